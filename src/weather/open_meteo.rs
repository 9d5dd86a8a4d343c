//! `OpenMeteo` forecast client
//!
//! Fetches hourly cloud layers plus daily sunrise/sunset in unix time, with
//! transient-failure retries and an optional TTL cache of raw responses.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::ForecastProvider;
use crate::cache;
use crate::config::WeatherConfig;
use crate::models::{Coordinate, DailyEvents, RawForecast, WeatherSeries};

const HOURLY_VARIABLES: &str =
    "temperature_2m,cloud_cover,cloud_cover_low,cloud_cover_mid,cloud_cover_high,visibility";

/// Forecast provider backed by the `OpenMeteo` API
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    base_url: String,
    past_days: u32,
    forecast_days: u32,
    temperature_unit: String,
    cache_ttl: Option<Duration>,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("Afterglow/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            past_days: config.past_days,
            forecast_days: config.forecast_days,
            temperature_unit: config.temperature_unit.clone(),
            cache_ttl: None,
        })
    }

    /// Serve repeated coordinates from the persistent cache for `ttl`.
    /// The cache must already be initialized.
    #[must_use]
    pub fn with_cache(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    fn forecast_url(&self, at: Coordinate) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly={HOURLY_VARIABLES}&daily=sunrise,sunset&timeformat=unixtime&past_days={}&forecast_days={}&temperature_unit={}",
            self.base_url, at.latitude, at.longitude, self.past_days, self.forecast_days, self.temperature_unit
        )
    }

    async fn fetch(&self, at: Coordinate) -> Result<RawForecast> {
        debug!("Calling the API");
        let response = self
            .client
            .get(self.forecast_url(at))
            .send()
            .await?
            .error_for_status()?;

        let body: ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo forecast response")?;
        Ok(body.into())
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(name = "open_meteo_forecast", skip(self))]
    async fn forecast(&self, at: Coordinate) -> Result<RawForecast> {
        let Some(ttl) = self.cache_ttl else {
            return self.fetch(at).await;
        };

        let key = at.cache_key();
        match cache::get::<RawForecast>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for {key}, fetching instead: {e:#}"),
        }

        let forecast = self.fetch(at).await?;
        let jitter: f32 = rand::rng().random_range(0.9..1.1);
        if let Err(e) = cache::put(&key, forecast.clone(), ttl.mul_f32(jitter)).await {
            warn!("Cache write failed for {key}: {e:#}");
        }
        Ok(forecast)
    }
}

/// Forecast response from `OpenMeteo` with `timeformat=unixtime`
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: HourlyData,
    daily: Option<DailyData>,
}

/// Hourly data; individual values may be null
#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<i64>,
    #[serde(rename = "temperature_2m")]
    temperature: Vec<Option<f64>>,
    cloud_cover: Vec<Option<f64>>,
    cloud_cover_low: Vec<Option<f64>>,
    cloud_cover_mid: Vec<Option<f64>>,
    cloud_cover_high: Vec<Option<f64>>,
    visibility: Vec<Option<f64>>,
}

/// Daily sunrise/sunset; null during polar day or night
#[derive(Debug, Deserialize)]
struct DailyData {
    sunrise: Vec<Option<i64>>,
    sunset: Vec<Option<i64>>,
}

/// Nulls become NaN so a gap only matters if it brackets the event instant
fn fill_gaps(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

impl From<ForecastResponse> for RawForecast {
    fn from(response: ForecastResponse) -> Self {
        let hourly = response.hourly;
        Self {
            hourly: WeatherSeries {
                time: hourly.time,
                temperature: fill_gaps(hourly.temperature),
                cloud_cover: fill_gaps(hourly.cloud_cover),
                cloud_cover_low: fill_gaps(hourly.cloud_cover_low),
                cloud_cover_mid: fill_gaps(hourly.cloud_cover_mid),
                cloud_cover_high: fill_gaps(hourly.cloud_cover_high),
                visibility: fill_gaps(hourly.visibility),
            },
            daily: response.daily.map(|daily| DailyEvents {
                sunrise: daily.sunrise.into_iter().flatten().collect(),
                sunset: daily.sunset.into_iter().flatten().collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AfterglowConfig;

    const SAMPLE: &str = r#"{
        "latitude": 40.71,
        "longitude": -74.0,
        "hourly": {
            "time": [1718960400, 1718964000, 1718967600],
            "temperature_2m": [70.1, 71.3, null],
            "cloud_cover": [10, 20, 30],
            "cloud_cover_low": [0, 5, 10],
            "cloud_cover_mid": [0, 0, 0],
            "cloud_cover_high": [40, 55, 70],
            "visibility": [24140.0, 24140.0, 24140.0]
        },
        "daily": {
            "time": [1718928000],
            "sunrise": [1718947500],
            "sunset": [null]
        }
    }"#;

    #[test]
    fn test_response_conversion() {
        let response: ForecastResponse = serde_json::from_str(SAMPLE).unwrap();
        let raw: RawForecast = response.into();

        assert_eq!(raw.hourly.len(), 3);
        assert!(raw.hourly.validate().is_ok());
        assert_eq!(raw.hourly.cloud_cover_high, vec![40.0, 55.0, 70.0]);
        assert!(raw.hourly.temperature[2].is_nan());

        let daily = raw.daily.unwrap();
        assert_eq!(daily.sunrise, vec![1_718_947_500]);
        assert!(daily.sunset.is_empty());
    }

    #[tokio::test]
    async fn test_cache_failure_falls_through_to_fetch() {
        let mut config = AfterglowConfig::default();
        config.weather.base_url = "http://127.0.0.1:1".to_string();
        config.weather.max_retries = 0;
        config.weather.timeout_seconds = 2;
        // The process-wide cache is never initialized here, so every cache call errors
        let client = OpenMeteoClient::new(&config.weather)
            .unwrap()
            .with_cache(Duration::from_secs(60));

        let err = client.forecast(Coordinate::new(1.0, 2.0)).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(!message.contains("Cache"), "got: {message}");
    }

    #[test]
    fn test_forecast_url() {
        let mut config = AfterglowConfig::default();
        config.weather.base_url = "https://api.open-meteo.com/v1/".to_string();
        let client = OpenMeteoClient::new(&config.weather).unwrap();

        let url = client.forecast_url(Coordinate::new(40.5, -74.25));
        assert!(url.starts_with("https://api.open-meteo.com/v1/forecast?latitude=40.5&longitude=-74.25"));
        assert!(url.contains("cloud_cover_high"));
        assert!(url.contains("timeformat=unixtime"));
        assert!(url.contains("past_days=1&forecast_days=2"));
        assert!(url.contains("temperature_unit=fahrenheit"));
    }
}
