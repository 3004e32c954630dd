//! State machine shared by every hook.
//!
//! A hook moves `Idle -> Loading -> Ready | Errored` and re-enters `Loading` on
//! each fetch or mutation. Reads carry a sequence token; a read that finishes
//! after a newer read was issued is discarded, so the last-issued read wins.

use tokio::sync::watch;

/// What a subscriber should render right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase<'a, T> {
    Idle,
    Loading,
    Ready(&'a T),
    Errored(&'a str),
}

/// Snapshot published to subscribers after every transition.
///
/// Data from an earlier success stays visible while loading and after an error.
#[derive(Debug, Clone)]
pub struct HookState<T> {
    data: Option<T>,
    error: Option<String>,
    in_flight: usize,
    latest_read: u64,
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            in_flight: 0,
            latest_read: 0,
        }
    }
}

impl<T> HookState<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn phase(&self) -> Phase<'_, T> {
        if self.is_loading() {
            Phase::Loading
        } else if let Some(error) = &self.error {
            Phase::Errored(error)
        } else if let Some(data) = &self.data {
            Phase::Ready(data)
        } else {
            Phase::Idle
        }
    }

    fn begin(&mut self) {
        self.in_flight += 1;
        self.error = None;
    }

    fn end(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

/// Owner of a hook's state; every transition is broadcast through a `watch` channel.
#[derive(Debug)]
pub(crate) struct Store<T> {
    tx: watch::Sender<HookState<T>>,
}

impl<T> Store<T> {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(HookState::default());
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<HookState<T>> {
        self.tx.subscribe()
    }

    pub(crate) fn snapshot(&self) -> HookState<T>
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Enter `Loading` for a read and hand out its sequence token.
    pub(crate) fn begin_read(&self) -> u64 {
        let mut token = 0;
        self.tx.send_modify(|state| {
            state.begin();
            state.latest_read += 1;
            token = state.latest_read;
        });
        token
    }

    /// Settle a read. Superseded reads only release their loading slot.
    pub(crate) fn finish_read(&self, token: u64, result: Result<T, String>) {
        self.tx.send_modify(|state| {
            state.end();
            if token != state.latest_read {
                tracing::debug!(token, latest = state.latest_read, "discarding superseded response");
                return;
            }
            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.error = None;
                }
                Err(message) => state.error = Some(message),
            }
        });
    }

    pub(crate) fn begin_mutation(&self) {
        self.tx.send_modify(HookState::begin);
    }

    /// Settle a mutation by applying its delta to the held data, or storing its error.
    pub(crate) fn finish_mutation<F>(&self, result: Result<F, String>)
    where
        F: FnOnce(&mut Option<T>),
    {
        self.tx.send_modify(|state| {
            state.end();
            match result {
                Ok(apply) => {
                    apply(&mut state.data);
                    state.error = None;
                }
                Err(message) => state.error = Some(message),
            }
        });
    }
}
