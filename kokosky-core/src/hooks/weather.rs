use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    api::WeatherResource,
    hooks::{
        failure_message,
        state::{HookState, Store},
    },
};

/// Weather snapshot for an optional location code.
///
/// With a code the hook reads by code, without one it reads by caller IP.
/// It fetches once when attached and again every time the code changes.
#[derive(Debug, Clone)]
pub struct WeatherHook<R: WeatherResource> {
    resource: R,
    code: Arc<watch::Sender<Option<String>>>,
    store: Arc<Store<R::Snapshot>>,
}

impl<R: WeatherResource> WeatherHook<R> {
    /// Create the hook and start the initial fetch on the current tokio runtime.
    pub fn attach(resource: R, code: Option<String>) -> Self {
        let (code_tx, _rx) = watch::channel(code);
        let hook = Self {
            resource,
            code: Arc::new(code_tx),
            store: Arc::new(Store::new()),
        };
        hook.spawn_fetch();
        hook
    }

    pub fn subscribe(&self) -> watch::Receiver<HookState<R::Snapshot>> {
        self.store.subscribe()
    }

    pub fn state(&self) -> HookState<R::Snapshot> {
        self.store.snapshot()
    }

    pub fn code(&self) -> Option<String> {
        self.code.borrow().clone()
    }

    /// Change the location code. A different value (including `None`) starts a fetch.
    pub fn set_code(&self, code: Option<String>) {
        let changed = self.code.send_if_modified(|current| {
            if *current == code {
                false
            } else {
                *current = code;
                true
            }
        });

        if changed {
            self.spawn_fetch();
        }
    }

    /// Fetch again for the current code and wait for it to settle.
    pub async fn refetch(&self) {
        let code = self.code();
        let token = self.store.begin_read();
        self.run_fetch(token, code).await;
    }

    fn spawn_fetch(&self) {
        let code = self.code();
        let token = self.store.begin_read();
        let task = self.clone();
        tokio::spawn(async move { task.run_fetch(token, code).await });
    }

    async fn run_fetch(&self, token: u64, code: Option<String>) {
        tracing::debug!(resource = %self.resource.kind(), code = ?code, token, "fetching weather");
        let result = self
            .resource
            .fetch(code.as_deref())
            .await
            .map_err(|e| failure_message(&e, R::DEFAULT_ERROR));
        self.store.finish_read(token, result);
    }
}
