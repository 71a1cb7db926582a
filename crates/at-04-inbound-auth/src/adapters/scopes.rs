//! # Verification Scopes
//!
//! Arena of per-request verification results keyed by [`RequestId`].
//!
//! An entry exists exactly as long as its [`ScopeGuard`]. Dropping the guard,
//! on normal return, early return or unwind, removes the entry, so one
//! request's verified identity can never be read by another request.

use crate::domain::context::{RequestContext, RequestId};
use crate::domain::errors::ScopeError;
use at_02_sender_envelope::VerifiedSender;
use at_03_delegation::VerifiedUser;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use trust_telemetry::ACTIVE_REQUEST_SCOPES;

/// Shared arena. Cloning shares the same entries.
#[derive(Debug, Clone, Default)]
pub struct VerificationScopes {
    entries: Arc<RwLock<HashMap<RequestId, RequestContext>>>,
}

impl VerificationScopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `context` for the lifetime of the returned guard.
    pub fn enter(&self, context: RequestContext) -> Result<ScopeGuard, ScopeError> {
        let request_id = context.request_id;
        {
            let mut entries = self.entries.write();
            if entries.contains_key(&request_id) {
                return Err(ScopeError::Duplicate(request_id));
            }
            entries.insert(request_id, context);
        }

        ACTIVE_REQUEST_SCOPES.inc();
        debug!(request_id = %request_id, "Verification scope opened");

        Ok(ScopeGuard {
            request_id,
            scopes: self.clone(),
        })
    }

    /// Snapshot of the context stored for `request_id`.
    pub fn get(&self, request_id: &RequestId) -> Option<RequestContext> {
        self.entries.read().get(request_id).cloned()
    }

    pub fn sender(&self, request_id: &RequestId) -> Option<VerifiedSender> {
        self.entries
            .read()
            .get(request_id)
            .and_then(|c| c.sender.clone())
    }

    pub fn user(&self, request_id: &RequestId) -> Option<VerifiedUser> {
        self.entries
            .read()
            .get(request_id)
            .and_then(|c| c.user.clone())
    }

    /// Open scopes.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, request_id: &RequestId) {
        if self.entries.write().remove(request_id).is_some() {
            ACTIVE_REQUEST_SCOPES.dec();
            debug!(request_id = %request_id, "Verification scope closed");
        }
    }
}

/// Owns one arena entry. The entry is removed when the guard drops.
#[must_use = "the scope closes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard {
    request_id: RequestId,
    scopes: VerificationScopes,
}

impl ScopeGuard {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// The context this guard holds.
    pub fn context(&self) -> Option<RequestContext> {
        self.scopes.get(&self.request_id)
    }

    pub fn sender(&self) -> Option<VerifiedSender> {
        self.scopes.sender(&self.request_id)
    }

    pub fn user(&self) -> Option<VerifiedUser> {
        self.scopes.user(&self.request_id)
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.scopes.remove(&self.request_id);
    }
}
