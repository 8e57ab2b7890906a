//! HTTP client implementing the state provider port.

use matrixclock_app::ports::StateProvider;
use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::sensor::{AreaGrouping, EntitySnapshot};
use reqwest::{RequestBuilder, Response};

use crate::config::HomeAssistantConfig;
use crate::error::HomeAssistantError;
use crate::types::{AREA_SENSORS_TEMPLATE, AreaSensorsResponse, StateResponse, TemplateRequest};

/// Home Assistant REST client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct HomeAssistantClient {
    http: reqwest::Client,
    config: HomeAssistantConfig,
}

impl HomeAssistantClient {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HomeAssistantError::Http`] if the TLS backend fails to initialise.
    pub fn new(config: HomeAssistantConfig) -> Result<Self, HomeAssistantError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, HomeAssistantError> {
        let response = request.bearer_auth(&self.config.token).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HomeAssistantError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn fetch_state(&self, entity_id: &str) -> Result<EntitySnapshot, HomeAssistantError> {
        let request = self.http.get(self.url(&format!("/api/states/{entity_id}")));
        let body: StateResponse = self.send(request).await?.json().await?;
        body.into_snapshot()
            .map_err(|err| HomeAssistantError::Domain(err.into()))
    }

    async fn fetch_area_groupings(&self) -> Result<Vec<AreaGrouping>, HomeAssistantError> {
        let request = self
            .http
            .post(self.url("/api/template"))
            .json(&TemplateRequest {
                template: AREA_SENSORS_TEMPLATE,
            });
        let areas: Vec<AreaSensorsResponse> = self.send(request).await?.json().await?;
        tracing::debug!(areas = areas.len(), "discovered sensor areas");
        Ok(areas.into_iter().map(AreaGrouping::from).collect())
    }
}

impl StateProvider for HomeAssistantClient {
    async fn state(&self, entity_id: &str) -> Result<EntitySnapshot, MatrixClockError> {
        Ok(self.fetch_state(entity_id).await?)
    }

    async fn area_groupings(&self) -> Result<Vec<AreaGrouping>, MatrixClockError> {
        Ok(self.fetch_area_groupings().await?)
    }
}
