// civic-client/src/session/context.rs
// Session context - the current actor, shared by every screen

use std::sync::Arc;

use shared::client::{AuthResponse, LoginRequest, RegisterRequest};
use shared::models::{PasswordChange, ProfileUpdate, Role, User};
use shared::response::Ack;
use tokio::sync::RwLock;

use crate::api::CivicApi;
use crate::client::HttpClient;
use crate::dashboard::{DashboardShell, wrong_role};
use crate::error::{ClientError, ClientResult};
use crate::reconciler::ComplaintBoard;
use crate::store::StoreScope;

use super::storage::{CredentialStore, StoredSession};

/// Login form input
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Authenticated session held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Session context
///
/// Single owner of the bearer token and the signed-in user. Components that
/// need the actor ask the context instead of reading persisted state, and
/// the cached user is only re-fetched through [`SessionContext::refresh_profile`].
/// Complaint boards created through (or attached to) the context are emptied
/// on logout, so the next actor never sees the previous one's list.
///
/// Cloning is cheap and every clone sees the same session.
#[derive(Debug, Clone)]
pub struct SessionContext<H> {
    api: CivicApi<H>,
    store: Option<CredentialStore>,
    session: Arc<RwLock<Option<Session>>>,
    boards: Arc<RwLock<Vec<ComplaintBoard<H>>>>,
}

impl<H: HttpClient + Clone> SessionContext<H> {
    pub fn new(api: CivicApi<H>, store: Option<CredentialStore>) -> Self {
        Self {
            api,
            store,
            session: Arc::new(RwLock::new(None)),
            boards: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// API handle authorized with this session's token
    pub fn api(&self) -> &CivicApi<H> {
        &self.api
    }

    /// New complaint board over this session's API, emptied on logout
    pub async fn board(&self, scope: StoreScope) -> ComplaintBoard<H> {
        let board = ComplaintBoard::new(self.api.clone(), scope);
        self.attach(&board).await;
        board
    }

    /// Tie a board built elsewhere to this session's lifetime
    pub async fn attach(&self, board: &ComplaintBoard<H>) {
        self.boards.write().await.push(board.clone());
    }

    /// Restore a persisted session, if any. Returns the restored user.
    pub async fn restore(&self) -> ClientResult<Option<User>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let Some(stored) = store.load()? else {
            return Ok(None);
        };
        let mut user = stored.user;
        user.role = stored.role;
        tracing::info!(user_id = %user.id, role = %user.role, "session restored");
        self.establish(stored.token, user.clone()).await;
        Ok(Some(user))
    }

    pub async fn login(&self, credentials: &Credentials) -> ClientResult<User> {
        let request = LoginRequest {
            email: credentials.email.trim().to_string(),
            password: credentials.password.clone(),
        };
        let auth = self.api.login(&request).await?;
        tracing::info!(user_id = %auth.user.id, role = %auth.user.role, "logged in");
        self.start(auth).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        let auth = self.api.register(request).await?;
        tracing::info!(user_id = %auth.user.id, role = %auth.user.role, "registered");
        self.start(auth).await
    }

    async fn start(&self, auth: AuthResponse) -> ClientResult<User> {
        let AuthResponse { token, user } = auth;
        if let Some(store) = &self.store {
            store.save(&StoredSession {
                token: token.clone(),
                user: user.clone(),
                role: user.role,
            })?;
        }
        self.establish(token, user.clone()).await;
        Ok(user)
    }

    async fn establish(&self, token: String, user: User) {
        self.api.set_token(Some(token.clone())).await;
        *self.session.write().await = Some(Session { token, user });
    }

    /// Drop the session: persisted entries, transport token, cached user
    /// and the contents of every attached complaint board
    pub async fn logout(&self) -> ClientResult<()> {
        self.api.set_token(None).await;
        let previous = self.session.write().await.take();
        if let Some(session) = previous {
            tracing::info!(user_id = %session.user.id, "logged out");
        }
        let boards = self.boards.read().await.clone();
        for board in &boards {
            board.clear().await;
        }
        if let Some(store) = &self.store {
            store.clear()?;
        }
        Ok(())
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn role(&self) -> Option<Role> {
        self.session.read().await.as_ref().map(Session::role)
    }

    pub async fn token(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Shell for the signed-in role
    pub async fn shell(&self) -> Option<DashboardShell> {
        self.role().await.map(DashboardShell::new)
    }

    /// The current user, if their role is `role`
    pub async fn require_role(&self, role: Role) -> ClientResult<User> {
        let user = self
            .current_user()
            .await
            .ok_or_else(|| ClientError::Unauthorized("Not logged in".into()))?;
        if user.role != role {
            return Err(wrong_role(role));
        }
        Ok(user)
    }

    /// Re-fetch `/user/me` and replace the cached user
    pub async fn refresh_profile(&self) -> ClientResult<User> {
        self.ensure_authenticated().await?;
        let user = self.api.me().await?;
        self.replace_user(user.clone()).await?;
        Ok(user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        self.ensure_authenticated().await?;
        let user = self.api.update_profile(update).await?;
        self.replace_user(user.clone()).await?;
        Ok(user)
    }

    /// Change the password. `confirm` must equal `new_password`; a mismatch
    /// is rejected before any request is sent.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm: &str,
    ) -> ClientResult<Ack> {
        if new_password != confirm {
            return Err(ClientError::Validation("New passwords do not match!".into()));
        }
        shared::validation::validate_password(new_password)?;
        self.ensure_authenticated().await?;
        self.api
            .change_password(&PasswordChange {
                current_password: current_password.to_string(),
                new_password: new_password.to_string(),
            })
            .await
    }

    async fn ensure_authenticated(&self) -> ClientResult<()> {
        if self.is_authenticated().await {
            Ok(())
        } else {
            Err(ClientError::Unauthorized("Not logged in".into()))
        }
    }

    async fn replace_user(&self, user: User) -> ClientResult<()> {
        let mut guard = self.session.write().await;
        let Some(session) = guard.as_mut() else {
            return Err(ClientError::InvalidState(
                "session ended while the profile was loading".into(),
            ));
        };
        session.user = user;
        if let Some(store) = &self.store {
            store.save(&StoredSession {
                token: session.token.clone(),
                user: session.user.clone(),
                role: session.user.role,
            })?;
        }
        Ok(())
    }
}
