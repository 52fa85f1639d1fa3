//! Login, registration and logout.
//!
//! A successful login stores the token and the profile fetched with it, then
//! sends the user to the catalog. Registration creates the account and logs
//! in with the same credentials.

use api::ApiError;
use store::{NewUser, SessionProvider, User};

use crate::navigation::{Navigator, Route};
use crate::service::AuthApi;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password. Please try again.";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password. Please try again.")]
    InvalidCredentials,
    #[error("{0}")]
    Registration(String),
}

pub struct AuthFlow<A, S, N> {
    api: A,
    session: S,
    navigator: N,
}

impl<A, S, N> AuthFlow<A, S, N>
where
    A: AuthApi,
    S: SessionProvider,
    N: Navigator,
{
    pub fn new(api: A, session: S, navigator: N) -> Self {
        Self {
            api,
            session,
            navigator,
        }
    }

    /// User of the stored session, if any.
    pub fn current_user(&self) -> Option<User> {
        self.session.get_session().map(|s| s.user)
    }

    /// Skip the login screen when a session already exists.
    pub fn redirect_if_authenticated(&self) -> bool {
        if self.session.is_authenticated() {
            self.navigator.navigate(Route::Catalog);
            true
        } else {
            false
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self.sign_in(username, password).await.map_err(|e| {
            tracing::warn!("Login for {} failed: {}", username, e);
            AuthError::InvalidCredentials
        })?;
        self.navigator.navigate(Route::Catalog);
        Ok(user)
    }

    pub async fn register(&self, new_user: &NewUser) -> Result<User, AuthError> {
        self.api.register(new_user).await.map_err(|e| {
            tracing::warn!("Registration of {} failed: {}", new_user.username, e);
            match e {
                ApiError::RequestFailed { message, .. } if !message.is_empty() => {
                    AuthError::Registration(message)
                }
                _ => AuthError::Registration(REGISTRATION_FAILED.to_string()),
            }
        })?;
        tracing::info!("Registered {}", new_user.username);
        self.login(&new_user.username, &new_user.password).await
    }

    pub fn logout(&self) {
        self.session.clear_session();
        self.navigator.navigate(Route::Login);
    }

    async fn sign_in(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let token = self.api.login(username, password).await?;
        let user = self.api.current_user_with_token(&token.access_token).await?;
        self.session.set_session(&token.access_token, &user);
        tracing::info!("Signed in as {}", user.username);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::testing::{FakeApi, Failure};
    use store::{MemoryStore, SessionStore};

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: Some(format!("{username}@example.com")),
            full_name: Some("New User".to_string()),
            password: "correct".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_sets_session_and_redirects() {
        let api = FakeApi::default();
        let sessions = SessionStore::new(MemoryStore::new());
        let nav = RecordingNavigator::new();
        let flow = AuthFlow::new(&api, &sessions, &nav);

        let user = flow.login("alice", "correct").await.unwrap();
        assert_eq!(user.username, "alice");

        let session = sessions.get_session().unwrap();
        assert_eq!(session.token, "alice-token");
        assert_eq!(session.user.username, "alice");
        assert_eq!(nav.routes(), vec![Route::Catalog]);
        assert_eq!(api.calls.borrow().as_slice(), &["token", "users/me"]);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let api = FakeApi::default();
        let sessions = SessionStore::new(MemoryStore::new());
        let nav = RecordingNavigator::new();
        let flow = AuthFlow::new(&api, &sessions, &nav);

        let err = flow.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
        assert!(sessions.get_session().is_none());
        assert!(nav.routes().is_empty());
    }

    #[tokio::test]
    async fn test_profile_failure_stores_nothing() {
        let api = FakeApi::default();
        api.fail("users/me", Failure::Server);
        let sessions = SessionStore::new(MemoryStore::new());
        let nav = RecordingNavigator::new();
        let flow = AuthFlow::new(&api, &sessions, &nav);

        assert!(flow.login("alice", "correct").await.is_err());
        assert!(sessions.get_session().is_none());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let api = FakeApi::default();
        let sessions = SessionStore::new(MemoryStore::new());
        let nav = RecordingNavigator::new();
        let flow = AuthFlow::new(&api, &sessions, &nav);

        let user = flow.register(&new_user("bob")).await.unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(sessions.get_session().unwrap().token, "bob-token");
        assert_eq!(nav.last(), Some(Route::Catalog));
    }

    #[tokio::test]
    async fn test_register_surfaces_server_detail() {
        let api = FakeApi::default();
        let sessions = SessionStore::new(MemoryStore::new());
        let nav = RecordingNavigator::new();
        let flow = AuthFlow::new(&api, &sessions, &nav);

        let err = flow.register(&new_user("alice")).await.unwrap_err();
        assert_eq!(err.to_string(), "Username already registered");

        api.fail("register", Failure::Expired);
        let err = flow.register(&new_user("carol")).await.unwrap_err();
        assert_eq!(err.to_string(), REGISTRATION_FAILED);
        assert!(sessions.get_session().is_none());
    }

    #[tokio::test]
    async fn test_redirect_if_authenticated_and_logout() {
        let api = FakeApi::default();
        let sessions = SessionStore::new(MemoryStore::new());
        let nav = RecordingNavigator::new();
        let flow = AuthFlow::new(&api, &sessions, &nav);

        assert!(!flow.redirect_if_authenticated());
        flow.login("alice", "correct").await.unwrap();
        assert!(flow.redirect_if_authenticated());
        assert_eq!(flow.current_user().unwrap().username, "alice");

        flow.logout();
        assert!(sessions.get_session().is_none());
        assert!(flow.current_user().is_none());
        assert_eq!(nav.last(), Some(Route::Login));
    }
}
