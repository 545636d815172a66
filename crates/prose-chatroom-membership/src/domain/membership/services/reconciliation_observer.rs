// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

/// Notified once per session when the roster has been processed, the archive query completed
/// and all deferred membership facts have been flushed.
#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ReconciliationObserver: Send + Sync {
    async fn initial_reconciliation_completed(&self);
}
