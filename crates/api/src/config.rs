use std::env;

/// Process configuration, read once at startup.
///
/// The signing secret lives here so `main` can hand it to the router
/// explicitly; the middleware never reads ambient process state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        Self {
            port,
            jwt_secret,
            database_url: env::var("DATABASE_URL").ok(),
        }
    }
}
