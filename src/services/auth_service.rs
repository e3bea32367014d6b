use crate::dto::auth_dto::{
    AdminLoginResponse, AuthResponse, LoginRequest, SendOtpRequest, SendOtpResponse,
    VerifyOtpRequest,
};
use crate::error::Result;
use crate::models::user::{Role, User};
use crate::services::api_client::ApiClient;
use crate::session::{claims, AppKind, Session, SessionStore};
use crate::utils::validation::validate;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Single source of truth for who is signed in.
///
/// A successful login persists the token (and user, for the main app) under
/// the app's fixed storage keys and installs it as the default bearer header
/// of the shared [`ApiClient`]. Failed calls leave memory, storage and header
/// untouched.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    kind: AppKind,
    state: Arc<RwLock<Session>>,
}

impl AuthService {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>, kind: AppKind) -> Self {
        Self {
            api,
            store,
            kind,
            state: Arc::new(RwLock::new(Session::default())),
        }
    }

    pub fn kind(&self) -> AppKind {
        self.kind
    }

    pub fn session(&self) -> Session {
        self.state.read().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn current_role(&self) -> Option<Role> {
        self.state.read().user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    /// Loads a previously persisted session. Expired tokens are dropped from
    /// storage instead of being replayed.
    pub fn restore(&self) -> Result<Session> {
        let Some(token) = self.store.load(self.kind.token_key())? else {
            return Ok(Session::default());
        };

        if claims::is_expired(&token) {
            warn!(app = self.kind.storage_name(), "Stored token has expired, clearing session");
            self.clear_storage()?;
            return Ok(Session::default());
        }

        let user = match self.kind.user_key() {
            Some(key) => match self.store.load(key)? {
                Some(raw) => match serde_json::from_str::<User>(&raw) {
                    Ok(user) => Some(user),
                    Err(e) => {
                        warn!(error = %e, "Stored user record is unreadable, ignoring it");
                        None
                    }
                },
                None => None,
            },
            None => None,
        };

        self.api.set_bearer(&token);
        let session = Session {
            token: Some(token),
            user,
        };
        *self.state.write() = session.clone();
        Ok(session)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validate(&body)?;

        let res: AuthResponse = self.api.post("/api/auth/login", &body).await?;
        self.persist(&res.token, Some(&res.user))?;
        info!(user_id = res.user.id, role = %res.user.role, "Logged in with password");
        Ok(res.user)
    }

    /// Asks the backend to text a login code. Development backends echo the
    /// code back, which is returned here.
    pub async fn send_otp(&self, phone: &str) -> Result<Option<String>> {
        let body = SendOtpRequest {
            phone_number: phone.trim().to_string(),
        };
        validate(&body)?;

        let res: SendOtpResponse = self.api.post("/api/auth/send-otp", &body).await?;
        info!("OTP requested");
        Ok(res.otp)
    }

    pub async fn verify_otp(&self, phone: &str, otp: &str) -> Result<User> {
        let body = VerifyOtpRequest {
            phone_number: phone.trim().to_string(),
            otp: otp.trim().to_string(),
        };
        validate(&body)?;

        let res: AuthResponse = self.api.post("/api/auth/verify-otp", &body).await?;
        self.persist(&res.token, Some(&res.user))?;
        info!(user_id = res.user.id, role = %res.user.role, "Logged in with OTP");
        Ok(res.user)
    }

    /// Admin panel login. The response carries only a token; the role is
    /// implied by the endpoint.
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<()> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validate(&body)?;

        let res: AdminLoginResponse = self.api.post("/api/admin/login", &body).await?;
        self.persist(&res.token, None)?;
        info!("Admin logged in");
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        *self.state.write() = Session::default();
        self.api.clear_bearer();
        self.clear_storage()?;
        info!(app = self.kind.storage_name(), "Logged out");
        Ok(())
    }

    /// Writes the new session to storage, then memory and header. If the
    /// user record cannot be stored the previous token is put back and the
    /// in-memory session is left as it was.
    fn persist(&self, token: &str, user: Option<&User>) -> Result<()> {
        let user_entry = match (self.kind.user_key(), user) {
            (Some(key), Some(user)) => Some((key, serde_json::to_string(user)?)),
            _ => None,
        };

        let token_key = self.kind.token_key();
        let previous = self.store.load(token_key)?;
        self.store.save(token_key, token)?;

        if let Some((key, raw)) = user_entry {
            if let Err(e) = self.store.save(key, &raw) {
                warn!(error = %e, "Could not store user record, restoring previous token");
                let rollback = match previous {
                    Some(old) => self.store.save(token_key, &old),
                    None => self.store.remove(token_key),
                };
                if let Err(rollback_err) = rollback {
                    warn!(error = %rollback_err, "Token rollback failed");
                }
                return Err(e);
            }
        }

        *self.state.write() = Session {
            token: Some(token.to_string()),
            user: user.cloned(),
        };
        self.api.set_bearer(token);
        Ok(())
    }

    fn clear_storage(&self) -> Result<()> {
        self.store.remove(self.kind.token_key())?;
        if let Some(key) = self.kind.user_key() {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
