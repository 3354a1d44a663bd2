//! SessionStore - The live flash session table.
//!
//! Owns one debounced accumulation buffer per user. Every mutating
//! operation (start, append, cancel, drain, timeout removal) runs under a
//! single table lock, so for a given user they are linearizable.
//!
//! ## Timers
//!
//! Each live session has exactly one timer task. Installing a timer bumps
//! a store-wide generation counter and records it on the entry; a firing
//! timer only removes the entry if the generation still matches. A
//! superseded timer is also aborted, but the generation check is what makes
//! it inert: once `append`/`cancel`/`start` has released the lock, the old
//! timer can no longer remove anything.
//!
//! ## Notification
//!
//! The timed-out session is removed under the lock and then handed to the
//! observers outside it, one after another. Observer errors and panics are
//! logged and never reach the table or the other observers.

use futures::FutureExt;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{Mutex, Notify, RwLock};
use tokio::task::JoinHandle;

use crate::domain::flash::{FlashSession, Fragment, SessionError};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::SessionObserver;

/// Whether `append_or_start` opened a new session or extended one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDisposition {
    Started,
    Appended,
}

/// A live table entry: the session plus its one pending timer.
struct Entry {
    session: FlashSession,
    generation: u64,
    timer: JoinHandle<()>,
}

struct StoreState {
    sessions: HashMap<UserId, Entry>,
    next_generation: u64,
}

impl StoreState {
    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }
}

struct StoreInner {
    idle_timeout: Duration,
    state: Mutex<StoreState>,
    observers: RwLock<Vec<Arc<dyn SessionObserver>>>,
    /// Timeouts removed from the table whose observers are still running.
    in_flight: AtomicUsize,
    settled: Notify,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        for entry in self.state.get_mut().sessions.values() {
            entry.timer.abort();
        }
    }
}

/// Handle to the live session table.
///
/// Cheap to clone; all clones share one table. Dropping the last handle
/// aborts every pending timer without notifying observers. Call
/// [`SessionStore::drain_all`] first to keep the sessions.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Creates an empty store whose sessions time out after `idle_timeout`
    /// without new fragments.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                idle_timeout,
                state: Mutex::new(StoreState {
                    sessions: HashMap::new(),
                    next_generation: 0,
                }),
                observers: RwLock::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                settled: Notify::new(),
            }),
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.inner.idle_timeout
    }

    // ─────────────────────────────────────────────────────────────────────
    // Observers
    // ─────────────────────────────────────────────────────────────────────

    /// Registers an observer. Registering the same instance twice is a no-op.
    pub async fn add_observer(&self, observer: Arc<dyn SessionObserver>) {
        let mut observers = self.inner.observers.write().await;
        if !observers.iter().any(|o| same_observer(o, &observer)) {
            tracing::debug!(observer = observer.name(), "Session observer registered");
            observers.push(observer);
        }
    }

    /// Unregisters an observer. Returns false if it was not registered.
    pub async fn remove_observer(&self, observer: &Arc<dyn SessionObserver>) -> bool {
        let mut observers = self.inner.observers.write().await;
        let before = observers.len();
        observers.retain(|o| !same_observer(o, observer));
        observers.len() != before
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Opens a fresh session holding only `fragment`.
    ///
    /// An existing session for the same user is discarded first: its timer
    /// is invalidated and no observer hears about it.
    pub async fn start(&self, user_id: UserId, fragment: Fragment) -> FlashSession {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;

        if let Some(old) = state.sessions.remove(&user_id) {
            old.timer.abort();
            tracing::debug!(
                user_id = %user_id,
                discarded_fragments = old.session.len(),
                "Replacing existing flash session"
            );
        }

        let session = FlashSession::new(user_id, fragment);
        let snapshot = session.clone();
        self.install(state, session);
        tracing::debug!(user_id = %snapshot.user_id(), "Flash session started");
        snapshot
    }

    /// Appends `fragment` to the user's live session and restarts its
    /// idle timer.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user has no live session (never started, timed
    ///   out, cancelled, or drained)
    pub async fn append(
        &self,
        user_id: &UserId,
        fragment: Fragment,
    ) -> Result<FlashSession, SessionError> {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;

        self.extend(state, user_id, fragment)
            .map_err(|_| SessionError::not_found(user_id.clone()))
    }

    /// Appends to the user's live session, or starts one if there is none,
    /// in a single critical section.
    ///
    /// Two first messages racing for the same user both land in one
    /// session instead of the second silently replacing the first.
    pub async fn append_or_start(
        &self,
        user_id: UserId,
        fragment: Fragment,
    ) -> (FlashSession, SessionDisposition) {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;

        match self.extend(state, &user_id, fragment) {
            Ok(session) => (session, SessionDisposition::Appended),
            Err(fragment) => {
                let session = FlashSession::new(user_id, fragment);
                let snapshot = session.clone();
                self.install(state, session);
                tracing::debug!(user_id = %snapshot.user_id(), "Flash session started");
                (snapshot, SessionDisposition::Started)
            }
        }
    }

    /// Removes and returns the user's session without notifying observers.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user has no live session
    pub async fn cancel(&self, user_id: &UserId) -> Result<FlashSession, SessionError> {
        let mut guard = self.inner.state.lock().await;
        let entry = guard
            .sessions
            .remove(user_id)
            .ok_or_else(|| SessionError::not_found(user_id.clone()))?;
        entry.timer.abort();

        tracing::debug!(
            user_id = %user_id,
            fragments = entry.session.len(),
            "Flash session cancelled"
        );
        Ok(entry.session)
    }

    /// Removes every live session and invalidates every timer.
    ///
    /// Returns the sessions, oldest first, for the caller to commit. No
    /// drained session is ever delivered to observers afterwards.
    pub async fn drain_all(&self) -> Vec<FlashSession> {
        let mut guard = self.inner.state.lock().await;
        let drained = std::mem::take(&mut guard.sessions);
        drop(guard);

        let mut sessions: Vec<FlashSession> = drained
            .into_values()
            .map(|entry| {
                entry.timer.abort();
                entry.session
            })
            .collect();
        sessions.sort_by(|a, b| a.created_at().cmp(b.created_at()));

        tracing::info!(count = sessions.len(), "Drained flash sessions");
        sessions
    }

    // ─────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────

    /// Returns a snapshot of the user's live session.
    pub async fn get(&self, user_id: &UserId) -> Option<FlashSession> {
        let guard = self.inner.state.lock().await;
        guard.sessions.get(user_id).map(|entry| entry.session.clone())
    }

    pub async fn contains(&self, user_id: &UserId) -> bool {
        self.inner.state.lock().await.sessions.contains_key(user_id)
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.state.lock().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Waits until every timeout already removed from the table has been
    /// through all observers.
    ///
    /// Used at shutdown after `drain_all`, so commits that were already
    /// under way are not cut off.
    pub async fn wait_for_pending_notifications(&self) {
        loop {
            let settled = self.inner.settled.notified();
            tokio::pin!(settled);
            settled.as_mut().enable();

            if self.inner.in_flight.load(Ordering::SeqCst) == 0 {
                return;
            }
            settled.await;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    /// Inserts a new entry with a freshly armed timer. Caller holds the lock.
    fn install(&self, state: &mut StoreState, session: FlashSession) {
        let generation = state.bump_generation();
        let user_id = session.user_id().clone();
        let timer = self.arm_timer(user_id.clone(), generation);
        state.sessions.insert(
            user_id,
            Entry {
                session,
                generation,
                timer,
            },
        );
    }

    /// Appends to the user's entry and replaces its timer. Caller holds
    /// the lock. Hands the fragment back if the user has no entry.
    fn extend(
        &self,
        state: &mut StoreState,
        user_id: &UserId,
        fragment: Fragment,
    ) -> Result<FlashSession, Fragment> {
        let Some(entry) = state.sessions.get_mut(user_id) else {
            return Err(fragment);
        };
        state.next_generation += 1;
        let generation = state.next_generation;

        entry.timer.abort();
        entry.timer = self.arm_timer(user_id.clone(), generation);
        entry.generation = generation;
        entry.session.push(fragment);

        tracing::debug!(
            user_id = %user_id,
            fragments = entry.session.len(),
            "Fragment appended, idle timer reset"
        );
        Ok(entry.session.clone())
    }

    fn arm_timer(&self, user_id: UserId, generation: u64) -> JoinHandle<()> {
        let store = Arc::downgrade(&self.inner);
        let idle_timeout = self.inner.idle_timeout;

        tokio::spawn(async move {
            tokio::time::sleep(idle_timeout).await;
            on_timeout(store, user_id, generation).await;
        })
    }
}

/// Timer body: removes the session if this timer is still current, then
/// fans it out to the observers.
async fn on_timeout(store: Weak<StoreInner>, user_id: UserId, generation: u64) {
    let Some(inner) = store.upgrade() else {
        return;
    };

    let session = {
        let mut guard = inner.state.lock().await;
        let current = guard
            .sessions
            .get(&user_id)
            .is_some_and(|entry| entry.generation == generation);
        if !current {
            tracing::trace!(user_id = %user_id, generation, "Stale session timer ignored");
            return;
        }
        // Counted before the lock is released so a concurrent drain plus
        // wait_for_pending_notifications cannot miss this session.
        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        guard.sessions.remove(&user_id).map(|entry| entry.session)
    };

    if let Some(session) = session {
        tracing::info!(
            user_id = %user_id,
            fragments = session.len(),
            "Flash session timed out"
        );
        notify_observers(&inner, session).await;
    }

    if inner.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
        inner.settled.notify_waiters();
    }
}

async fn notify_observers(inner: &StoreInner, session: FlashSession) {
    // Clone the list to release the lock before await points
    let observers: Vec<Arc<dyn SessionObserver>> = inner.observers.read().await.clone();

    if observers.is_empty() {
        tracing::warn!(
            user_id = %session.user_id(),
            "Flash session timed out with no observers; content dropped"
        );
        return;
    }

    for observer in observers {
        let delivery = AssertUnwindSafe(observer.on_session_timeout(session.clone()))
            .catch_unwind()
            .await;
        let result = delivery.unwrap_or_else(|_| {
            Err(DomainError::new(ErrorCode::ObserverFailed, "observer panicked"))
        });
        if let Err(e) = result {
            tracing::error!(
                observer = observer.name(),
                user_id = %session.user_id(),
                error = %e,
                "Session observer failed"
            );
        }
    }
}

fn same_observer(a: &Arc<dyn SessionObserver>, b: &Arc<dyn SessionObserver>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
