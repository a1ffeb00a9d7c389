pub mod http_fetcher;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

const ALADHAN_BASE: &str = "https://api.aladhan.com/v1";
const REVERSE_GEOCODE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";
const CITY_SEARCH_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Maximum number of matches requested from the city search.
pub const CITY_SEARCH_LIMIT: u8 = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub timeout_secs: u64,
    /// Aladhan calculation method id. 2 is ISNA.
    pub calculation_method: u8,
    /// Coordinates used for the Hijri calendar view.
    pub calendar_latitude: f64,
    pub calendar_longitude: f64,
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            calculation_method: 2,
            calendar_latitude: -6.175110,
            calendar_longitude: 106.865036,
            language: "id".to_string(),
        }
    }
}

/// One call against a third-party reference API.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    MonthCalendar {
        year: i32,
        month: u32,
        latitude: f64,
        longitude: f64,
        method: u8,
    },
    ReverseGeocode {
        latitude: f64,
        longitude: f64,
        language: String,
    },
    CitySearch {
        name: String,
        language: String,
    },
    Holidays {
        year: i32,
    },
    Qibla {
        latitude: f64,
        longitude: f64,
    },
}

impl ApiRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiRequest::MonthCalendar { .. } => "calendar",
            ApiRequest::ReverseGeocode { .. } => "reverse-geocode",
            ApiRequest::CitySearch { .. } => "city-search",
            ApiRequest::Holidays { .. } => "holidays",
            ApiRequest::Qibla { .. } => "qibla",
        }
    }

    pub fn url(&self) -> Result<Url> {
        let url = match self {
            ApiRequest::MonthCalendar {
                year,
                month,
                latitude,
                longitude,
                method,
            } => Url::parse_with_params(
                &format!("{}/calendar/{}/{}", ALADHAN_BASE, year, month),
                [
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("method", method.to_string()),
                ],
            )?,
            ApiRequest::ReverseGeocode {
                latitude,
                longitude,
                language,
            } => Url::parse_with_params(
                REVERSE_GEOCODE_URL,
                [
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("localityLanguage", language.clone()),
                ],
            )?,
            ApiRequest::CitySearch { name, language } => Url::parse_with_params(
                CITY_SEARCH_URL,
                [
                    ("name", name.clone()),
                    ("count", CITY_SEARCH_LIMIT.to_string()),
                    ("language", language.clone()),
                    ("format", "json".to_string()),
                ],
            )?,
            // The upstream path really is spelled "hollidays".
            ApiRequest::Holidays { year } => {
                Url::parse(&format!("{}/hollidays/{}", ALADHAN_BASE, year))?
            }
            ApiRequest::Qibla {
                latitude,
                longitude,
            } => Url::parse(&format!("{}/qibla/{}/{}", ALADHAN_BASE, latitude, longitude))?,
        };
        Ok(url)
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform the request and return the raw response body. Non-success
    /// HTTP statuses are errors.
    async fn fetch(&self, request: &ApiRequest) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_calendar_url() {
        let url = ApiRequest::MonthCalendar {
            year: 2024,
            month: 3,
            latitude: -6.17511,
            longitude: 106.865036,
            method: 2,
        }
        .url()
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.aladhan.com/v1/calendar/2024/3?latitude=-6.17511&longitude=106.865036&method=2"
        );
    }

    #[test]
    fn test_city_search_url_encodes_name() {
        let url = ApiRequest::CitySearch {
            name: "Banda Aceh".into(),
            language: "id".into(),
        }
        .url()
        .unwrap();
        assert_eq!(url.host_str(), Some("geocoding-api.open-meteo.com"));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("name".into(), "Banda Aceh".into())));
        assert!(pairs.contains(&("count".into(), "5".into())));
        assert!(url.as_str().contains("name=Banda+Aceh"));
    }

    #[test]
    fn test_path_urls() {
        let holidays = ApiRequest::Holidays { year: 2025 }.url().unwrap();
        assert_eq!(holidays.path(), "/v1/hollidays/2025");

        let qibla = ApiRequest::Qibla {
            latitude: 21.4,
            longitude: 39.8,
        }
        .url()
        .unwrap();
        assert_eq!(qibla.path(), "/v1/qibla/21.4/39.8");
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.calculation_method, 2);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.language, "id");
    }
}
