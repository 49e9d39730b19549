//! OpenWeatherMap current-weather client.

use std::time::Duration;

use hava_core::{ReqwestErrorExt, WeatherConfig, WeatherError};
use reqwest::Client;
use tracing::instrument;

use crate::types::{ApiCurrentWeather, ProviderStatus, WeatherReport};

const USER_AGENT: &str = concat!("Hava/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    units: String,
    lang: String,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(ReqwestErrorExt::into_weather_error)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key(),
            units: config.units.clone(),
            lang: config.lang.clone(),
        })
    }

    /// Fetch current conditions for `city`.
    ///
    /// One request, no retries. The body is classified by its `cod` field
    /// rather than the HTTP status, since the provider reports failures in
    /// the payload.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_city(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_deref().unwrap_or_default()),
                ("units", self.units.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_weather_error)?;

        let http_status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(ReqwestErrorExt::into_weather_error)?;

        let result = classify(http_status, &body, city);
        match &result {
            Ok(report) => tracing::info!(
                "Fetched weather for {}, {}",
                report.location_name,
                report.country
            ),
            Err(e) => tracing::warn!("Weather lookup failed: {}", e),
        }
        result
    }
}

/// Turn a provider response into a report or one of the known failures.
fn classify(http_status: u16, body: &[u8], city: &str) -> Result<WeatherReport, WeatherError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        WeatherError::NetworkFailure(format!(
            "malformed response (HTTP {}): {}",
            http_status, e
        ))
    })?;

    let status = value
        .get("cod")
        .and_then(|cod| serde_json::from_value::<ProviderStatus>(cod.clone()).ok())
        .unwrap_or(ProviderStatus(http_status));

    let message = match value.get("message") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    match status {
        ProviderStatus::NOT_FOUND => Err(WeatherError::CityNotFound(if message.is_empty() {
            city.to_string()
        } else {
            message
        })),
        ProviderStatus::UNAUTHORIZED => Err(WeatherError::InvalidCredential),
        s if s.is_success() => serde_json::from_value::<ApiCurrentWeather>(value)
            .map(WeatherReport::from)
            .map_err(|e| WeatherError::NetworkFailure(format!("malformed response: {}", e))),
        ProviderStatus(code) => Err(WeatherError::Provider { code, message }),
    }
}
