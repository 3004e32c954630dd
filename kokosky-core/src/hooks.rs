//! Stateful subscriptions over the resource clients.
//!
//! A hook fetches when it is attached, publishes every state change through a
//! `tokio::sync::watch` channel and exposes imperative refetch and mutate calls.
//! Read failures are stored and logged only; mutation failures are stored,
//! logged and also returned to the caller.

use crate::ApiError;

pub mod locations;
pub mod state;
pub mod weather;

pub use locations::LocationsHook;
pub use state::{HookState, Phase};
pub use weather::WeatherHook;

/// Turn a failure into the message a hook stores, logging it on the way.
fn failure_message(err: &ApiError, default: &str) -> String {
    tracing::error!(error = %err, "{default}");
    err.message_or(default)
}
