use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    ApiError,
    api::locations::LocationsApi,
    hooks::{
        failure_message,
        state::{HookState, Store},
    },
    model::Location,
};

const FETCH_ERROR: &str = "Failed to fetch locations";
const ADD_ERROR: &str = "Failed to add location";
const UPDATE_ERROR: &str = "Failed to update location";
const DELETE_ERROR: &str = "Failed to delete location";

/// The location registry as an ordered list kept in sync with local mutations.
///
/// Mutations echo the server's answer into the held list instead of
/// re-fetching it.
#[derive(Debug, Clone)]
pub struct LocationsHook {
    api: LocationsApi,
    store: Arc<Store<Vec<Location>>>,
}

impl LocationsHook {
    /// Create the hook and start the initial `fetch_all` on the current tokio runtime.
    pub fn attach(api: LocationsApi) -> Self {
        let hook = Self {
            api,
            store: Arc::new(Store::new()),
        };

        let token = hook.store.begin_read();
        let task = hook.clone();
        tokio::spawn(async move { task.run_fetch_all(token).await });

        hook
    }

    pub fn subscribe(&self) -> watch::Receiver<HookState<Vec<Location>>> {
        self.store.subscribe()
    }

    pub fn state(&self) -> HookState<Vec<Location>> {
        self.store.snapshot()
    }

    /// Currently held locations, empty before the first successful fetch.
    pub fn locations(&self) -> Vec<Location> {
        self.state().data().cloned().unwrap_or_default()
    }

    /// Replace the whole list with the server's. Failures are only stored.
    pub async fn fetch_all(&self) {
        let token = self.store.begin_read();
        self.run_fetch_all(token).await;
    }

    async fn run_fetch_all(&self, token: u64) {
        let result = self
            .api
            .list()
            .await
            .map_err(|e| failure_message(&e, FETCH_ERROR));
        self.store.finish_read(token, result);
    }

    /// Create a location and append the server's record to the list.
    pub async fn add(&self, location: &Location) -> Result<Location, ApiError> {
        self.store.begin_mutation();
        match self.api.add(location).await {
            Ok(created) => {
                let entry = created.clone();
                self.store.finish_mutation(Ok(move |data: &mut Option<Vec<Location>>| {
                    data.get_or_insert_with(Vec::new).push(entry);
                }));
                Ok(created)
            }
            Err(e) => Err(self.fail(e, ADD_ERROR)),
        }
    }

    /// Replace the entry whose code matches the server's answer, keeping its position.
    pub async fn update(&self, location: &Location) -> Result<Location, ApiError> {
        self.store.begin_mutation();
        match self.api.update(location).await {
            Ok(updated) => {
                let entry = updated.clone();
                self.store.finish_mutation(Ok(move |data: &mut Option<Vec<Location>>| {
                    if let Some(list) = data {
                        for loc in list.iter_mut().filter(|loc| loc.code == entry.code) {
                            *loc = entry.clone();
                        }
                    }
                }));
                Ok(updated)
            }
            Err(e) => Err(self.fail(e, UPDATE_ERROR)),
        }
    }

    /// Delete a location and drop every entry with that code from the list.
    pub async fn delete(&self, code: &str) -> Result<(), ApiError> {
        self.store.begin_mutation();
        match self.api.delete(code).await {
            Ok(()) => {
                let code = code.to_string();
                self.store.finish_mutation(Ok(move |data: &mut Option<Vec<Location>>| {
                    if let Some(list) = data {
                        list.retain(|loc| loc.code != code);
                    }
                }));
                Ok(())
            }
            Err(e) => Err(self.fail(e, DELETE_ERROR)),
        }
    }

    fn fail(&self, err: ApiError, default: &str) -> ApiError {
        let message = failure_message(&err, default);
        self.store
            .finish_mutation::<fn(&mut Option<Vec<Location>>)>(Err(message));
        err
    }
}
