use userdir_store::UserRecord;

/// Authenticated user for the current request.
///
/// Inserted into request extensions by the authorization middleware, so it is
/// present exactly when the guard has run and passed. Dropped with the
/// request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    user: UserRecord,
}

impl CurrentUser {
    pub fn new(user: UserRecord) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &UserRecord {
        &self.user
    }
}
