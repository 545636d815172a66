// prose-core-client/prose-chatroom-membership
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::any::Any;
use std::fmt::{Display, Formatter};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use chrono::{DateTime, Utc};
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::app::deps::{DynAppContext, DynDirectoryService, DynRoomMembershipService};
use crate::domain::membership::models::MembershipAction;
use crate::domain::membership::services::{
    JoinRequestResult, MembershipActionQueue, MembershipReconciler,
};
use crate::domain::rooms::models::RoomError;
use crate::domain::shared::models::RoomId;

pub struct SequentialActionQueueDependencies {
    pub ctx: DynAppContext,
    pub directory_service: DynDirectoryService,
    pub room_membership_service: DynRoomMembershipService,
}

/// Executes membership actions one at a time on a dedicated Tokio task, in the order they
/// were enqueued. Joins and leaves requested by the user share the same queue.
///
/// Failed joins are enqueued again after `AppConfig::join_retry_delay`. A panicking action is
/// treated like a failed one so that the worker keeps running. `cancel_all` discards every
/// action that has not started yet, including pending retries.
///
/// Must be created from within a Tokio runtime.
pub struct SequentialActionQueue {
    sender: UnboundedSender<Job>,
    shared: Arc<Shared>,
    worker: JoinHandle<()>,
}

#[derive(Default)]
struct Shared {
    /// Incremented by `cancel_all`. Jobs from an older generation are dropped.
    generation: AtomicU64,
    /// Told about joins and leaves that it did not decide on.
    membership_reconciler: OnceLock<Weak<dyn MembershipReconciler>>,
    retries: Mutex<Vec<JoinHandle<()>>>,
}

struct Job {
    kind: JobKind,
    generation: u64,
}

enum JobKind {
    /// Decided by the reconciler or the invitation queue.
    Scheduled {
        action: MembershipAction,
        attempt: u32,
    },
    Requested(UserRequest),
}

enum UserRequest {
    Join {
        room_id: RoomId,
        password: Option<String>,
        reply: oneshot::Sender<JoinRequestResult>,
    },
    Leave {
        room_id: RoomId,
        left_at: Option<DateTime<Utc>>,
        reply: oneshot::Sender<()>,
    },
}

struct Worker {
    ctx: DynAppContext,
    directory_service: DynDirectoryService,
    room_membership_service: DynRoomMembershipService,
    sender: WeakUnboundedSender<Job>,
    shared: Arc<Shared>,
}

impl From<SequentialActionQueueDependencies> for SequentialActionQueue {
    fn from(deps: SequentialActionQueueDependencies) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared::default());

        let worker = Worker {
            ctx: deps.ctx,
            directory_service: deps.directory_service,
            room_membership_service: deps.room_membership_service,
            sender: sender.downgrade(),
            shared: shared.clone(),
        };

        Self {
            sender,
            shared,
            worker: tokio::spawn(worker.run(receiver)),
        }
    }
}

impl SequentialActionQueue {
    /// Sets the reconciler that is told about user requests and abandoned joins. Held weakly
    /// since the reconciler owns the queue.
    pub fn set_membership_reconciler(&self, reconciler: Weak<dyn MembershipReconciler>) {
        if self.shared.membership_reconciler.set(reconciler).is_err() {
            debug!("MembershipReconciler was set already.");
        }
    }

    fn send(&self, kind: JobKind) {
        let job = Job {
            kind,
            generation: self.shared.generation.load(Ordering::SeqCst),
        };
        if let Err(err) = self.sender.send(job) {
            error!("Failed to enqueue {}. The worker is gone.", err.0.kind);
        }
    }
}

impl MembershipActionQueue for SequentialActionQueue {
    fn enqueue(&self, action: MembershipAction) {
        self.send(JobKind::Scheduled { action, attempt: 1 })
    }

    fn enqueue_join_request(
        &self,
        room_id: RoomId,
        password: Option<String>,
    ) -> oneshot::Receiver<JoinRequestResult> {
        let (reply, receiver) = oneshot::channel();
        self.send(JobKind::Requested(UserRequest::Join {
            room_id,
            password,
            reply,
        }));
        receiver
    }

    fn enqueue_leave_request(
        &self,
        room_id: RoomId,
        left_at: Option<DateTime<Utc>>,
    ) -> oneshot::Receiver<()> {
        let (reply, receiver) = oneshot::channel();
        self.send(JobKind::Requested(UserRequest::Leave {
            room_id,
            left_at,
            reply,
        }));
        receiver
    }

    fn cancel_all(&self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);

        let retries = std::mem::take(&mut *self.shared.retries.lock());
        if !retries.is_empty() {
            debug!("Cancelling {} scheduled retries.", retries.len());
        }
        for retry in retries {
            retry.abort();
        }
    }
}

impl Drop for SequentialActionQueue {
    fn drop(&mut self) {
        self.cancel_all();
        self.worker.abort();
    }
}

impl Worker {
    async fn run(self, mut receiver: UnboundedReceiver<Job>) {
        while let Some(job) = receiver.recv().await {
            if job.generation != self.shared.generation.load(Ordering::SeqCst) {
                debug!("Dropping cancelled {}", job.kind);
                continue;
            }
            match job.kind {
                JobKind::Scheduled { action, attempt } => {
                    self.execute(action, attempt, job.generation).await
                }
                JobKind::Requested(request) => self.execute_request(request).await,
            }
        }
        debug!("Membership action queue shut down.");
    }

    async fn execute(&self, action: MembershipAction, attempt: u32, generation: u64) {
        if !self.directory_service.is_connected() {
            warn!("Dropping {action} since the client is not connected.");
            return;
        }

        info!("Executing {action} (attempt {attempt})…");

        let reason = match &action {
            MembershipAction::Join {
                room_id,
                timestamp,
                password,
            } => {
                let result = AssertUnwindSafe(self.room_membership_service.join_room(
                    room_id,
                    password.clone(),
                    *timestamp,
                ))
                .catch_unwind()
                .await;

                match result {
                    Ok(Ok(_)) => return,
                    Ok(Err(err)) => err.to_string(),
                    Err(panic) => format!("panicked with '{}'", panic_message(&*panic)),
                }
            }
            MembershipAction::Leave { room_id, timestamp } => {
                let result = AssertUnwindSafe(
                    self.room_membership_service
                        .evict_room(room_id, *timestamp),
                )
                .catch_unwind()
                .await;

                if let Err(panic) = result {
                    error!(
                        "Leaving {room_id} panicked with '{}'.",
                        panic_message(&*panic)
                    );
                }
                return;
            }
        };

        self.schedule_retry(action, attempt, generation, reason);
    }

    async fn execute_request(&self, request: UserRequest) {
        match request {
            UserRequest::Join {
                room_id,
                password,
                reply,
            } => {
                info!("Joining {room_id} on request…");
                let result = AssertUnwindSafe(self.room_membership_service.join_room(
                    &room_id,
                    password,
                    None,
                ))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    Err(RoomError::JoinFailed {
                        room_id: room_id.clone(),
                        reason: format!("panicked with '{}'", panic_message(&*panic)),
                    })
                });

                if result.is_ok() {
                    self.report_membership(&room_id, true);
                }
                if reply.send(result).is_err() {
                    debug!("Nobody is waiting for the join of {room_id} anymore.");
                }
            }
            UserRequest::Leave {
                room_id,
                left_at,
                reply,
            } => {
                info!("Leaving {room_id} on request…");
                let result = AssertUnwindSafe(
                    self.room_membership_service
                        .leave_room(&room_id, left_at),
                )
                .catch_unwind()
                .await;

                if let Err(panic) = result {
                    error!(
                        "Leaving {room_id} panicked with '{}'.",
                        panic_message(&*panic)
                    );
                }
                self.report_membership(&room_id, false);
                if reply.send(()).is_err() {
                    debug!("Nobody is waiting for leaving {room_id} anymore.");
                }
            }
        }
    }

    fn schedule_retry(
        &self,
        action: MembershipAction,
        attempt: u32,
        generation: u64,
        reason: String,
    ) {
        let config = &self.ctx.config;
        let room_id = action.room_id().clone();

        if let Some(max_attempts) = config.max_join_attempts {
            if attempt >= max_attempts {
                error!("Giving up on joining {room_id} after {attempt} attempts. Reason: {reason}");
                self.report_membership(&room_id, false);
                return;
            }
        }

        let delay = config.join_retry_delay;
        warn!("Failed to join {room_id}. Retrying in {delay:?}. Reason: {reason}");

        let sender = self.sender.clone();
        let retry = Job {
            kind: JobKind::Scheduled {
                action,
                attempt: attempt + 1,
            },
            generation,
        };

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(sender) = sender.upgrade() else {
                debug!("Dropping retry of {room_id}. The queue is gone.");
                return;
            };
            if let Err(err) = sender.send(retry) {
                error!("Failed to enqueue {}. The worker is gone.", err.0.kind);
            }
        });

        let mut retries = self.shared.retries.lock();
        retries.retain(|retry| !retry.is_finished());
        retries.push(handle);
    }

    fn report_membership(&self, room_id: &RoomId, is_joined: bool) {
        let Some(reconciler) = self
            .shared
            .membership_reconciler
            .get()
            .and_then(Weak::upgrade)
        else {
            return;
        };
        reconciler.membership_changed(room_id, is_joined);
    }
}

impl Display for JobKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Scheduled { action, .. } => write!(f, "{action}"),
            JobKind::Requested(UserRequest::Join { room_id, .. }) => {
                write!(f, "requested join {room_id}")
            }
            JobKind::Requested(UserRequest::Leave { room_id, .. }) => {
                write!(f, "requested leave {room_id}")
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        return message.to_string();
    }
    if let Some(message) = panic.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic".to_string()
}
