//! Ambient NPC Chatter
//!
//! Passing remarks from NPCs are produced off the frame loop: requests go to a
//! background thread running its own tokio runtime, which asks an external
//! `ChatterBackend` and drops the answer into a single pending slot. The game
//! polls that slot once per frame. When the backend fails or is too slow, a
//! canned line from the NPC's chatter pool is used instead.
//!
//! The conversation orchestrator never waits on this path.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::dialogue::DialogueLine;
use crate::npc::NpcDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatterError {
    #[error("Chatter backend unavailable: {0}")]
    Unavailable(String),
    #[error("Chatter worker has shut down")]
    WorkerGone,
}

/// External text generator for ambient remarks
pub trait ChatterBackend: Send + Sync + 'static {
    fn reply(&self, request: &ChatterRequest) -> Result<String, ChatterError>;
}

/// Backend for running without a generator; every request falls back
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineChatter;

impl ChatterBackend for OfflineChatter {
    fn reply(&self, _request: &ChatterRequest) -> Result<String, ChatterError> {
        Err(ChatterError::Unavailable("offline".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct ChatterRequest {
    pub npc_id: String,
    pub npc_name: String,
    /// What the NPC is reacting to, e.g. "player walked past"
    pub prompt: String,
    pub fallback_lines: Vec<String>,
}

impl ChatterRequest {
    pub fn for_npc(npc: &NpcDescriptor, prompt: &str) -> Self {
        Self {
            npc_id: npc.id.clone(),
            npc_name: npc.display_name.clone(),
            prompt: prompt.to_string(),
            fallback_lines: npc.dialogue.chatter.clone(),
        }
    }

    fn fallback(&self) -> ChatterReply {
        let text = self
            .fallback_lines
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| "...".to_string());
        ChatterReply {
            npc_id: self.npc_id.clone(),
            line: DialogueLine::say(&self.npc_name, text),
            source: ReplySource::Fallback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Backend,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatterReply {
    pub npc_id: String,
    pub line: DialogueLine,
    pub source: ReplySource,
}

/// Single-slot mailbox between the worker and the frame loop; newest wins
#[derive(Debug, Clone, Default)]
pub struct PendingReply(Arc<Mutex<Option<ChatterReply>>>);

impl PendingReply {
    pub fn put(&self, reply: ChatterReply) {
        let mut slot = self.0.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(dropped) = slot.replace(reply) {
            debug!("Unpolled chatter from {} replaced", dropped.npc_id);
        }
    }

    pub fn take(&self) -> Option<ChatterReply> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).is_none()
    }
}

/// Handle to the background chatter thread
pub struct ChatterWorker {
    tx: Option<mpsc::UnboundedSender<ChatterRequest>>,
    pending: PendingReply,
    handle: Option<JoinHandle<()>>,
}

impl ChatterWorker {
    pub fn spawn(backend: Arc<dyn ChatterBackend>, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let pending = PendingReply::default();
        let slot = pending.clone();

        let handle = std::thread::Builder::new()
            .name("npc-chatter".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("Failed to start chatter runtime: {}", e);
                        return;
                    }
                };
                runtime.block_on(run(backend, rx, slot, timeout));
                // A backend call that already timed out may still be running.
                runtime.shutdown_background();
                debug!("Chatter worker stopped");
            });

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("Failed to spawn chatter thread: {}", e);
                None
            }
        };

        Self {
            tx: Some(tx),
            pending,
            handle,
        }
    }

    /// Queue a remark; the answer shows up in a later `poll`
    pub fn request(&self, request: ChatterRequest) -> Result<(), ChatterError> {
        let tx = self.tx.as_ref().ok_or(ChatterError::WorkerGone)?;
        tx.send(request).map_err(|_| ChatterError::WorkerGone)
    }

    /// Take the pending reply, if one arrived since the last poll
    pub fn poll(&self) -> Option<ChatterReply> {
        self.pending.take()
    }

    /// Stop accepting requests and wait for the thread to finish
    pub fn shutdown(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Chatter thread panicked");
            }
        }
    }
}

impl Drop for ChatterWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run(
    backend: Arc<dyn ChatterBackend>,
    mut rx: mpsc::UnboundedReceiver<ChatterRequest>,
    slot: PendingReply,
    timeout: Duration,
) {
    while let Some(request) = rx.recv().await {
        let reply = answer(Arc::clone(&backend), request, timeout).await;
        slot.put(reply);
    }
}

async fn answer(backend: Arc<dyn ChatterBackend>, request: ChatterRequest, timeout: Duration) -> ChatterReply {
    let job = request.clone();
    let task = tokio::task::spawn_blocking(move || backend.reply(&job));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(text))) => ChatterReply {
            npc_id: request.npc_id.clone(),
            line: DialogueLine::say(&request.npc_name, text),
            source: ReplySource::Backend,
        },
        Ok(Ok(Err(e))) => {
            warn!("Chatter for {} failed: {}", request.npc_id, e);
            request.fallback()
        }
        Ok(Err(e)) => {
            warn!("Chatter task for {} aborted: {}", request.npc_id, e);
            request.fallback()
        }
        Err(_) => {
            warn!("Chatter for {} timed out after {:?}", request.npc_id, timeout);
            request.fallback()
        }
    }
}
