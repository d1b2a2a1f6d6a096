//! In-memory table of draft sessions.
//!
//! The table maps session ids to individually locked slots. Table access is
//! brief (clone the slot handle, then release); every mutating operation then
//! holds the slot's mutex for its whole check-then-act sequence, which
//! serializes operations per session id while leaving other sessions free.
//! A slot that leaves the `Active` state is terminal and is removed from the
//! table before its lock is released, so late waiters observe the terminal
//! state and treat the session as gone.

use std::collections::HashMap;
use std::sync::Arc;

use keystone_models::{ConfirmationToken, DraftPlan, ids::DraftSessionId};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// Accepted and written through. Terminal.
    Committed,
    /// Dropped by the teacher. Terminal.
    Discarded,
}

/// A draft plan together with its confirmation handshake state.
#[derive(Debug)]
pub struct DraftSession {
    pub plan: DraftPlan,
    /// At most one live token; issuing a new one replaces it.
    pub confirmation_token: Option<ConfirmationToken>,
    state: SessionState,
}

impl DraftSession {
    pub fn new(plan: DraftPlan) -> Self {
        Self {
            plan,
            confirmation_token: None,
            state: SessionState::Active,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub(crate) fn finish(&mut self, state: SessionState) {
        self.state = state;
        self.confirmation_token = None;
    }
}

type Slot = Arc<Mutex<DraftSession>>;

#[derive(Debug, Default)]
pub struct SessionArena {
    slots: RwLock<HashMap<DraftSessionId, Slot>>,
}

impl SessionArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: DraftSession) {
        let id = session.plan.session_id;
        self.slots
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
    }

    /// Lock an active session; `None` when unknown or already terminal.
    pub async fn lock(&self, id: DraftSessionId) -> Option<OwnedMutexGuard<DraftSession>> {
        let slot = self.slots.read().await.get(&id).cloned()?;
        let guard = slot.lock_owned().await;
        guard.is_active().then_some(guard)
    }

    pub async fn remove(&self, id: DraftSessionId) {
        self.slots.write().await.remove(&id);
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshots of active sessions matching `filter`.
    pub async fn collect<F>(&self, filter: F) -> Vec<DraftPlan>
    where
        F: Fn(&DraftPlan) -> bool,
    {
        let slots: Vec<Slot> = self.slots.read().await.values().cloned().collect();
        let mut plans = Vec::new();
        for slot in slots {
            let session = slot.lock().await;
            if session.is_active() && filter(&session.plan) {
                plans.push(session.plan.clone());
            }
        }
        plans.sort_by_key(|plan| plan.created_at);
        plans
    }
}
