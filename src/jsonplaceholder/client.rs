use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::cache::Resource;
use crate::config::ApiConfig;
use crate::repository::RemoteSource;

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Invalid API URL: {0}")]
  Url(#[from] url::ParseError),

  #[error("API URL cannot be used as a base: {0}")]
  NotABase(String),
}

/// REST client for one JSONPlaceholder-style resource.
///
/// Lists come from `GET {base}/{resource}`, single entities from
/// `GET {base}/{resource}/{id}`. Non-2xx responses are errors.
pub struct HttpRemote<E> {
  client: reqwest::Client,
  base_url: Url,
  resource: &'static str,
  _entity: PhantomData<fn() -> E>,
}

impl<E> HttpRemote<E> {
  pub fn new(config: &ApiConfig, resource: &'static str) -> Result<Self, ApiError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("postcache/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Self::with_client(client, &config.base_url, resource)
  }

  pub fn with_client(
    client: reqwest::Client,
    base_url: &str,
    resource: &'static str,
  ) -> Result<Self, ApiError> {
    let base_url = Url::parse(base_url)?;
    if base_url.cannot_be_a_base() {
      return Err(ApiError::NotABase(base_url.to_string()));
    }

    Ok(Self {
      client,
      base_url,
      resource,
      _entity: PhantomData,
    })
  }

  /// URL of the resource collection, or of one entity when `id` is given.
  fn endpoint(&self, id: Option<&str>) -> Result<Url, ApiError> {
    let mut url = self.base_url.clone();
    {
      let mut segments = url
        .path_segments_mut()
        .map_err(|_| ApiError::NotABase(self.base_url.to_string()))?;
      segments.pop_if_empty().push(self.resource);
      if let Some(id) = id {
        segments.push(id);
      }
    }
    Ok(url)
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
    debug!(%url, "GET");
    let response = self.client.get(url).send().await?.error_for_status()?;
    Ok(response.json().await?)
  }
}

#[async_trait]
impl<E: Resource> RemoteSource for HttpRemote<E> {
  type Entity = E;
  type Error = ApiError;

  async fn fetch_all(&self) -> Result<Vec<E>, ApiError> {
    self.get_json(self.endpoint(None)?).await
  }

  async fn fetch_by_id(&self, id: &str) -> Result<E, ApiError> {
    self.get_json(self.endpoint(Some(id))?).await
  }
}
