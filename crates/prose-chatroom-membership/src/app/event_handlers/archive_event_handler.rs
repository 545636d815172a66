// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::app::deps::{AppDependencies, DynMembershipReconciler};
use crate::app::event_handlers::{ArchiveEvent, ServerEvent, ServerEventHandler};
use crate::domain::membership::models::ArchiveEventKind;

pub struct ArchiveEventHandler {
    membership_reconciler: DynMembershipReconciler,
}

impl From<&AppDependencies> for ArchiveEventHandler {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            membership_reconciler: deps.membership_reconciler.clone(),
        }
    }
}

#[async_trait]
impl ServerEventHandler for ArchiveEventHandler {
    fn name(&self) -> &'static str {
        "archive"
    }

    async fn handle_event(&self, event: ServerEvent) -> Result<Option<ServerEvent>> {
        match event {
            ServerEvent::Archive(event) => self.handle_archive_event(event).await,
            _ => return Ok(Some(event)),
        }
        Ok(None)
    }
}

impl ArchiveEventHandler {
    async fn handle_archive_event(&self, event: ArchiveEvent) {
        match event {
            ArchiveEvent::Membership {
                room_id,
                timestamp,
                kind: ArchiveEventKind::Join,
            } => {
                self.membership_reconciler
                    .archive_join_observed(&room_id, timestamp)
                    .await
            }
            ArchiveEvent::Membership {
                room_id,
                timestamp,
                kind: ArchiveEventKind::Leave,
            } => {
                self.membership_reconciler
                    .archive_leave_observed(&room_id, timestamp)
                    .await
            }
            ArchiveEvent::QueryCompleted { is_complete } => {
                self.membership_reconciler
                    .archive_query_completed(is_complete)
                    .await
            }
        }
    }
}
