//! Persistent TTL cache for raw forecast responses
//!
//! Entries are postcard-encoded with an absolute expiry and stored in a fjall
//! keyspace. Storage calls run on the blocking pool.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;
use tokio::task;

static FORECAST_CACHE: OnceCell<ForecastCache> = OnceCell::const_new();

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

pub struct ForecastCache {
    store: Keyspace,
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

impl ForecastCache {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let store = db.keyspace("forecasts", fjall::KeyspaceCreateOptions::default)?;
        Ok(ForecastCache { store })
    }

    /// Store `value` under `key` until `ttl` has elapsed.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let expires_at = unix_now()?
            .checked_add(ttl.as_secs())
            .ok_or(anyhow!("TTL overflow"))?;
        let bytes = postcard::to_stdvec(&StoredEntry { value, expires_at })?;

        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || store.insert(key, bytes)).await??;
        Ok(())
    }

    /// Fresh value for `key`, if any. Expired or undecodable entries are dropped on read.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();
        let bytes = task::spawn_blocking(move || -> Result<Option<Vec<u8>>> {
            Ok(store.get(key_bytes)?.map(|v| v.to_vec()))
        })
        .await??;

        let Some(bytes) = bytes else {
            tracing::debug!("Cache miss");
            return Ok(None);
        };

        let entry: StoredEntry<T> = match postcard::from_bytes(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Dropping undecodable cache entry: {e}");
                self.remove(key).await?;
                return Ok(None);
            }
        };
        if unix_now()? < entry.expires_at {
            tracing::debug!("Cache hit");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("Cache entry expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        task::spawn_blocking(move || store.remove(key)).await??;
        Ok(())
    }
}

/// Open the process-wide cache. Must be called once before use.
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let cache = ForecastCache::open(path)?;
    FORECAST_CACHE
        .set(cache)
        .map_err(|_| anyhow!("Cache already initialized"))?;
    Ok(())
}

fn global() -> Result<&'static ForecastCache> {
    FORECAST_CACHE
        .get()
        .ok_or(anyhow!("Cache not initialized. Call cache::init() first."))
}

pub async fn put<T: Serialize + Send + Debug + 'static>(key: &str, value: T, ttl: Duration) -> Result<()> {
    global()?.put(key, value, ttl).await
}

pub async fn get<T: DeserializeOwned + Send + 'static>(key: &str) -> Result<Option<T>> {
    global()?.get(key).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyEvents, RawForecast};

    fn temp_cache(name: &str) -> ForecastCache {
        let dir = std::env::temp_dir().join(format!("afterglow-cache-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        ForecastCache::open(&dir).unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips_forecast() {
        let cache = temp_cache("roundtrip");
        let forecast = RawForecast {
            daily: Some(DailyEvents {
                sunrise: vec![1, 2],
                sunset: vec![3],
            }),
            ..RawForecast::default()
        };

        cache
            .put("forecast:1.000:2.000", forecast.clone(), Duration::from_secs(600))
            .await
            .unwrap();
        let cached: Option<RawForecast> = cache.get("forecast:1.000:2.000").await.unwrap();
        assert_eq!(cached, Some(forecast));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let cache = temp_cache("garbage");
        cache.store.insert("forecast:0.000:0.000", vec![0xff_u8; 3]).unwrap();

        let cached: Option<RawForecast> = cache.get("forecast:0.000:0.000").await.unwrap();
        assert_eq!(cached, None);
        assert!(cache.store.get("forecast:0.000:0.000").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = temp_cache("expired");
        cache.put("k", 42u32, Duration::ZERO).await.unwrap();
        let cached: Option<u32> = cache.get("k").await.unwrap();
        assert_eq!(cached, None);
    }
}
