use crate::domain::model::{MovePayload, SpeciesPayload, SubjectPayload};
use crate::domain::ports::{ConfigProvider, LookupClient};
use crate::utils::error::{CardError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
    client: Client,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{resource}/{key}`，key 以單一路徑片段編碼
    fn resource_url(&self, resource: &str, key: &str) -> Result<Url> {
        let invalid_base = |reason: String| CardError::Config {
            message: format!("invalid provider base URL '{}': {}", self.base_url, reason),
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid_base(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid_base("cannot be a base".to_string()))?
            .pop_if_empty()
            .push(resource)
            .push(key);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str, name: &str) -> Result<T> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return Err(CardError::Validation {
                field: resource.to_string(),
                value: name.to_string(),
                reason: "Name cannot be empty".to_string(),
            });
        }

        let url = self.resource_url(resource, &key)?;
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        match response.status() {
            status if status.is_success() => {
                let body = response.bytes().await?;
                serde_json::from_slice(&body).map_err(|e| CardError::Payload {
                    message: format!("{} '{}': {}", resource, key, e),
                })
            }
            StatusCode::NOT_FOUND => Err(CardError::NotFound {
                resource: resource.to_string(),
                name: key,
            }),
            status => Err(CardError::Provider {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

#[async_trait]
impl LookupClient for PokeApiClient {
    async fn lookup_subject(&self, name: &str) -> Result<SubjectPayload> {
        self.get_json("pokemon", name).await
    }

    async fn lookup_move_type(&self, identifier: &str) -> Result<String> {
        let payload: MovePayload = self.get_json("move", identifier).await?;
        Ok(payload.type_ref.name)
    }

    async fn lookup_description(&self, name: &str) -> Result<SpeciesPayload> {
        self.get_json("pokemon-species", name).await
    }

    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Fetching asset: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CardError::Provider {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
