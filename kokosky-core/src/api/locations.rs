use reqwest::Method;
use tracing::instrument;

use crate::{
    ApiError,
    api::resource_path,
    model::{Empty, Location},
    transport::{RequestOptions, Transport},
};

const BASE_PATH: &str = "/api/v1/locations";

/// Client for the location registry.
#[derive(Debug, Clone)]
pub struct LocationsApi {
    transport: Transport,
}

impl LocationsApi {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    #[instrument(skip(self), level = "info")]
    pub async fn list(&self) -> Result<Vec<Location>, ApiError> {
        self.transport.request(BASE_PATH, RequestOptions::get()).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get(&self, code: &str) -> Result<Location, ApiError> {
        self.transport
            .request(&resource_path(BASE_PATH, Some(code)), RequestOptions::get())
            .await
    }

    #[instrument(skip(self, location), fields(code = %location.code), level = "info")]
    pub async fn add(&self, location: &Location) -> Result<Location, ApiError> {
        let options = RequestOptions::method(Method::POST).json(location)?;
        self.transport.request(BASE_PATH, options).await
    }

    /// Replace a location. The code travels in the body, not the path.
    #[instrument(skip(self, location), fields(code = %location.code), level = "info")]
    pub async fn update(&self, location: &Location) -> Result<Location, ApiError> {
        let options = RequestOptions::method(Method::PUT).json(location)?;
        self.transport.request(BASE_PATH, options).await
    }

    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, code: &str) -> Result<(), ApiError> {
        let _: Empty = self
            .transport
            .request(
                &resource_path(BASE_PATH, Some(code)),
                RequestOptions::method(Method::DELETE),
            )
            .await?;
        Ok(())
    }
}
