use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::app::{Result, SajadahError};
use crate::domain::{HijriMonth, IslamicHoliday};
use crate::fetcher::{ApiConfig, ApiRequest, Fetcher};
use crate::normalizer::Normalizer;

/// Month view of the Hijri calendar with the year's Islamic holidays.
///
/// Holidays are cached per Gregorian year for the life of the value. A year
/// is cached only after a successful lookup, so a failed one is retried on
/// the next call.
pub struct HijriCalendar {
    fetcher: Arc<dyn Fetcher>,
    normalizer: Normalizer,
    latitude: f64,
    longitude: f64,
    method: u8,
    holidays: Mutex<HashMap<i32, Vec<IslamicHoliday>>>,
}

impl HijriCalendar {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &ApiConfig) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            latitude: config.calendar_latitude,
            longitude: config.calendar_longitude,
            method: config.calculation_method,
            holidays: Mutex::new(HashMap::new()),
        }
    }

    pub async fn month(&self, year: i32, month: u32) -> Result<HijriMonth> {
        if !(1..=12).contains(&month) {
            return Err(SajadahError::Validation(format!(
                "month must be 1-12, got {}",
                month
            )));
        }

        let request = ApiRequest::MonthCalendar {
            year,
            month,
            latitude: self.latitude,
            longitude: self.longitude,
            method: self.method,
        };
        let (body, holidays) = futures::join!(self.fetcher.fetch(&request), self.holidays(year));
        let days = self.normalizer.month_calendar(&body?)?;

        Ok(HijriMonth { days, holidays })
    }

    /// Holidays of `year`. Upstream failures are logged and give an empty list.
    pub async fn holidays(&self, year: i32) -> Vec<IslamicHoliday> {
        if let Some(cached) = self.cached(year) {
            tracing::debug!("Holiday cache hit for {}", year);
            return cached;
        }

        let fetched = match self.fetcher.fetch(&ApiRequest::Holidays { year }).await {
            Ok(body) => self.normalizer.holidays(&body),
            Err(e) => Err(e),
        };

        match fetched {
            Ok(holidays) => {
                if let Ok(mut cache) = self.holidays.lock() {
                    cache.insert(year, holidays.clone());
                }
                holidays
            }
            Err(e) => {
                tracing::warn!("Islamic holidays for {} unavailable: {}", year, e);
                Vec::new()
            }
        }
    }

    pub fn is_cached(&self, year: i32) -> bool {
        self.cached(year).is_some()
    }

    fn cached(&self, year: i32) -> Option<Vec<IslamicHoliday>> {
        self.holidays.lock().ok()?.get(&year).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::fixtures;
    use crate::services::mock::MockFetcher;

    fn calendar(fetcher: Arc<MockFetcher>) -> HijriCalendar {
        HijriCalendar::new(fetcher, &ApiConfig::default())
    }

    #[tokio::test]
    async fn test_month_with_holidays() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with("calendar", fixtures::month(31))
                .with("holidays", fixtures::holidays()),
        );
        let month = calendar(fetcher.clone()).month(2024, 3).await.unwrap();

        assert_eq!(month.days.len(), 31);
        assert_eq!(month.holidays.len(), 2);

        match fetcher.calls().iter().find(|c| c.kind() == "calendar") {
            Some(ApiRequest::MonthCalendar {
                latitude,
                longitude,
                ..
            }) => {
                assert!((latitude + 6.175110).abs() < 1e-9);
                assert!((longitude - 106.865036).abs() < 1e-9);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_holidays_cached_per_year() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with("calendar", fixtures::month(30))
                .with("holidays", fixtures::holidays()),
        );
        let calendar = calendar(fetcher.clone());

        calendar.month(2024, 3).await.unwrap();
        calendar.month(2024, 4).await.unwrap();
        assert_eq!(fetcher.count("holidays"), 1);
        assert!(calendar.is_cached(2024));

        calendar.month(2025, 1).await.unwrap();
        assert_eq!(fetcher.count("holidays"), 2);
    }

    #[tokio::test]
    async fn test_holiday_failure_is_empty_and_not_cached() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with("calendar", fixtures::month(31))
                .with("holidays", fixtures::failure(404)),
        );
        let calendar = calendar(fetcher.clone());

        let month = calendar.month(2024, 3).await.unwrap();
        assert!(month.holidays.is_empty());
        assert!(!calendar.is_cached(2024));

        fetcher.set("holidays", fixtures::holidays());
        let month = calendar.month(2024, 3).await.unwrap();
        assert_eq!(month.holidays.len(), 2);
        assert_eq!(fetcher.count("holidays"), 2);
    }

    #[tokio::test]
    async fn test_month_failure_is_error() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with("calendar", fixtures::failure(400))
                .with("holidays", fixtures::holidays()),
        );
        let result = calendar(fetcher).month(2024, 3).await;
        assert!(matches!(result, Err(SajadahError::Api(_))));
    }

    #[tokio::test]
    async fn test_invalid_month() {
        let fetcher = Arc::new(MockFetcher::default());
        let result = calendar(fetcher.clone()).month(2024, 13).await;
        assert!(matches!(result, Err(SajadahError::Validation(_))));
        assert!(fetcher.calls().is_empty());
    }
}
