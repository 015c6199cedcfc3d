use crate::domain::model::RawRestaurant;
use crate::utils::error::{Result, VegError};
use crate::utils::events::{EventSink, MenuEvent};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://www.lounasaika.net/api/v1/menus.json";

#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpFeedSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout = timeout_seconds.map(Duration::from_secs);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Raw response body. Non-2xx responses are errors.
    pub async fn fetch_raw(&self) -> Result<Vec<u8>> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(VegError::HttpStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes", body.len());
        Ok(body.to_vec())
    }

    pub async fn fetch_restaurants(&self, sink: &dyn EventSink) -> Result<Vec<RawRestaurant>> {
        let body = self.fetch_raw().await?;
        decode_feed(&body, sink)
    }
}

/// Decodes the feed's top-level array. Elements that do not look like a
/// restaurant are reported and dropped; a body that is not a JSON array fails.
pub fn decode_feed(body: &[u8], sink: &dyn EventSink) -> Result<Vec<RawRestaurant>> {
    let json: serde_json::Value = serde_json::from_slice(body)?;
    let items = match json {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(VegError::MalformedFeed {
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            })
        }
    };

    let mut restaurants = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<RawRestaurant>(item) {
            Ok(restaurant) => restaurants.push(restaurant),
            Err(e) => sink.emit(MenuEvent::UndecodableRecord {
                index,
                reason: e.to_string(),
            }),
        }
    }
    Ok(restaurants)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
