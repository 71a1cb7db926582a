//! # Inbound Ports (Driving Ports / API)

use crate::domain::authentication::InboundAuthentication;
use async_trait::async_trait;
use shared_types::{Did, Message};

/// Authenticate an inbound message on both layers.
#[async_trait]
pub trait InboundAuthApi: Send + Sync {
    /// Verify the sender envelope and the delegation envelope on `message`.
    ///
    /// `calling_agent` is the agent the transport says is calling, when it
    /// knows. Never fails: absent or bad envelopes are reported in the result.
    async fn authenticate(
        &self,
        message: &Message,
        calling_agent: Option<&Did>,
    ) -> InboundAuthentication;
}
