use async_trait::async_trait;
use vocab_core::model::UserId;

/// Answers "who is playing?" at the moment a session finishes.
///
/// `None` means anonymous play; results are then not submitted.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user_id(&self) -> Option<UserId>;
}

/// Nobody is signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousIdentity;

#[async_trait]
impl IdentityProvider for AnonymousIdentity {
    async fn current_user_id(&self) -> Option<UserId> {
        None
    }
}

/// Always reports the same signed-in user.
#[derive(Debug, Clone, Copy)]
pub struct StaticIdentity(pub UserId);

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user_id(&self) -> Option<UserId> {
        Some(self.0)
    }
}
