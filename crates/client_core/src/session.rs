use anyhow::Result;
use async_trait::async_trait;
use shared::{domain::UserId, model::User};
use tracing::{info, warn};

/// Account/session store the router delegates identity to.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// The already signed-in user, if any. Queried once at startup.
    fn current_user(&self) -> Option<User>;
    /// Signs in as `user_id`, or as a fresh signup when `None`.
    async fn login(&self, user_id: Option<UserId>) -> Result<User>;
    fn logout(&self);
}

/// One-shot bootstrap of the assistant integration. Failures stay inside the
/// implementation; the router never observes them.
pub trait AssistantBootstrap: Send + Sync {
    fn initialize(&self);
}

pub struct NoopAssistant;

impl AssistantBootstrap for NoopAssistant {
    fn initialize(&self) {}
}

/// Checks that an API key is configured and reports readiness through tracing.
pub struct EnvAssistantBootstrap {
    api_key: Option<String>,
}

impl EnvAssistantBootstrap {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl AssistantBootstrap for EnvAssistantBootstrap {
    fn initialize(&self) {
        if self.is_configured() {
            info!("assistant integration initialized");
        } else {
            warn!("assistant API key not configured; AI features disabled");
        }
    }
}
