use userdir_api::app;
use userdir_api::config::AppConfig;

#[tokio::main]
async fn main() {
    userdir_observability::init();

    let config = AppConfig::from_env();
    let users = app::services::build_user_store(&config).await;
    let router = app::build_app(users, &config.jwt_secret);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind listener");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, router).await.unwrap();
}
