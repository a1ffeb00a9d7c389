use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::app::{Result, SajadahError};
use crate::domain::{GeocodingResult, Location, PrayerSchedule};
use crate::fetcher::{ApiConfig, ApiRequest, Fetcher};
use crate::normalizer::Normalizer;
use crate::services::check_coordinates;

/// Daily prayer times for a place, plus city search to find that place.
pub struct ScheduleService {
    fetcher: Arc<dyn Fetcher>,
    normalizer: Normalizer,
    method: u8,
    language: String,
}

impl ScheduleService {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &ApiConfig) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            method: config.calculation_method,
            language: config.language.clone(),
        }
    }

    /// Prayer times for `date` at the given coordinates.
    ///
    /// The whole month is fetched and the day picked out of it. The place
    /// name is looked up alongside; if that lookup fails the schedule is
    /// still returned with [`Location::unknown`].
    pub async fn prayer_schedule(&self, lat: f64, lon: f64, date: NaiveDate) -> Result<PrayerSchedule> {
        check_coordinates(lat, lon)?;

        let month_request = ApiRequest::MonthCalendar {
            year: date.year(),
            month: date.month(),
            latitude: lat,
            longitude: lon,
            method: self.method,
        };
        let (month, location) =
            futures::join!(self.fetcher.fetch(&month_request), self.locate(lat, lon));

        let days = self.normalizer.month_calendar(&month?)?;
        if days.is_empty() {
            return Err(SajadahError::Api(format!(
                "no prayer times for {}-{:02}",
                date.year(),
                date.month()
            )));
        }

        let index = date.day0() as usize;
        let day = days.into_iter().nth(index).ok_or_else(|| {
            SajadahError::Api(format!("calendar has no entry for {}", date))
        })?;

        Ok(PrayerSchedule { day, location })
    }

    /// Up to five places matching `name`. A blank name matches nothing.
    pub async fn search_city(&self, name: &str) -> Result<Vec<GeocodingResult>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .fetcher
            .fetch(&ApiRequest::CitySearch {
                name: name.to_string(),
                language: self.language.clone(),
            })
            .await?;
        let cities = self.normalizer.cities(&body)?;
        tracing::debug!("City search '{}' matched {}", name, cities.len());
        Ok(cities)
    }

    async fn locate(&self, lat: f64, lon: f64) -> Location {
        let request = ApiRequest::ReverseGeocode {
            latitude: lat,
            longitude: lon,
            language: self.language.clone(),
        };
        let located = match self.fetcher.fetch(&request).await {
            Ok(body) => self.normalizer.location(&body, lat, lon),
            Err(e) => Err(e),
        };

        located.unwrap_or_else(|e| {
            tracing::warn!("Reverse geocoding failed, using coordinates: {}", e);
            Location::unknown(lat, lon)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::UNKNOWN_CITY;
    use crate::normalizer::fixtures;
    use crate::services::mock::MockFetcher;

    fn service(fetcher: Arc<MockFetcher>) -> ScheduleService {
        ScheduleService::new(fetcher, &ApiConfig::default())
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[tokio::test]
    async fn test_picks_requested_day() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with("calendar", fixtures::month(31))
                .with(
                    "reverse-geocode",
                    br#"{"city":"Jakarta","countryName":"Indonesia"}"#.to_vec(),
                ),
        );
        let schedule = service(fetcher.clone())
            .prayer_schedule(-6.2, 106.8, date(15))
            .await
            .unwrap();

        assert_eq!(schedule.day.date.gregorian.day, "15");
        assert_eq!(schedule.location.city, "Jakarta");
        assert_eq!(schedule.location.country, "Indonesia");

        let month_call = fetcher
            .calls()
            .into_iter()
            .find(|c| c.kind() == "calendar")
            .unwrap();
        assert_eq!(
            month_call,
            ApiRequest::MonthCalendar {
                year: 2024,
                month: 3,
                latitude: -6.2,
                longitude: 106.8,
                method: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_geocoding_failure_is_not_fatal() {
        let fetcher = Arc::new(MockFetcher::default().with("calendar", fixtures::month(31)));
        let schedule = service(fetcher)
            .prayer_schedule(-6.2, 106.8, date(1))
            .await
            .unwrap();

        assert_eq!(schedule.location.city, UNKNOWN_CITY);
        assert_eq!(schedule.location.country, "");
        assert!((schedule.location.lat + 6.2).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_empty_month_is_api_error() {
        let fetcher = Arc::new(
            MockFetcher::default().with("calendar", fixtures::month(0)),
        );
        let result = service(fetcher).prayer_schedule(-6.2, 106.8, date(1)).await;
        assert!(matches!(result, Err(SajadahError::Api(_))));
    }

    #[tokio::test]
    async fn test_missing_day_is_api_error() {
        let fetcher = Arc::new(MockFetcher::default().with("calendar", fixtures::month(10)));
        let result = service(fetcher).prayer_schedule(-6.2, 106.8, date(20)).await;
        assert!(matches!(result, Err(SajadahError::Api(_))));
    }

    #[tokio::test]
    async fn test_rejects_bad_coordinates_without_fetching() {
        let fetcher = Arc::new(MockFetcher::default());
        let result = service(fetcher.clone())
            .prayer_schedule(120.0, 0.0, date(1))
            .await;
        assert!(matches!(result, Err(SajadahError::Validation(_))));
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_city() {
        let fetcher = Arc::new(MockFetcher::default().with(
            "city-search",
            br#"{"results":[{"name":"Medan","latitude":3.58,"longitude":98.67,"country":"Indonesia","admin1":"Sumatera Utara"}]}"#.to_vec(),
        ));
        let service = service(fetcher.clone());

        let cities = service.search_city("  Medan ").await.unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Medan");
        assert_eq!(
            fetcher.calls()[0],
            ApiRequest::CitySearch {
                name: "Medan".into(),
                language: "id".into(),
            }
        );

        assert!(service.search_city("   ").await.unwrap().is_empty());
        assert_eq!(fetcher.count("city-search"), 1);
    }
}
