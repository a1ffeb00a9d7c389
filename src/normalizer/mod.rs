use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::app::{Result, SajadahError};
use crate::domain::{CalendarDay, GeocodingResult, IslamicHoliday, Location, QiblaDirection};

/// City label when the reverse geocoder answered but named no place.
pub const FALLBACK_CITY: &str = "Lokasi Anda";

/// The `{code, status, data}` wrapper every Aladhan response uses.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: u16,
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocode {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CitySearch {
    #[serde(default)]
    results: Option<Vec<CityMatch>>,
}

#[derive(Debug, Deserialize)]
struct CityMatch {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: String,
    #[serde(default)]
    admin1: Option<String>,
}

/// Decodes raw API bodies into domain shapes.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Days of a month calendar. An empty `data` array is returned as-is.
    pub fn month_calendar(&self, body: &[u8]) -> Result<Vec<CalendarDay>> {
        self.unwrap_envelope(body, "calendar")
    }

    pub fn holidays(&self, body: &[u8]) -> Result<Vec<IslamicHoliday>> {
        self.unwrap_envelope(body, "holidays")
    }

    pub fn qibla(&self, body: &[u8]) -> Result<QiblaDirection> {
        self.unwrap_envelope(body, "qibla")
    }

    /// City name comes from `city`, then `locality`, then [`FALLBACK_CITY`].
    pub fn location(&self, body: &[u8], lat: f64, lon: f64) -> Result<Location> {
        let raw: ReverseGeocode = serde_json::from_slice(body)?;
        let city = non_empty(raw.city)
            .or_else(|| non_empty(raw.locality))
            .unwrap_or_else(|| FALLBACK_CITY.to_string());

        Ok(Location {
            city,
            country: raw.country_name.unwrap_or_default(),
            lat,
            lon,
        })
    }

    pub fn cities(&self, body: &[u8]) -> Result<Vec<GeocodingResult>> {
        let raw: CitySearch = serde_json::from_slice(body)?;
        Ok(raw
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|m| GeocodingResult {
                name: m.name,
                lat: m.latitude,
                lon: m.longitude,
                country: m.country,
                state: m.admin1,
            })
            .collect())
    }

    fn unwrap_envelope<T: DeserializeOwned>(&self, body: &[u8], what: &str) -> Result<T> {
        // Error answers carry a message string in `data`, so the payload is
        // only decoded once the code says it is there.
        let envelope: Envelope = serde_json::from_slice(body)?;
        if envelope.code != 200 {
            return Err(SajadahError::Api(format!(
                "{} request answered {} {}",
                what, envelope.code, envelope.status
            )));
        }
        if envelope.data.is_null() {
            return Err(SajadahError::Api(format!("{} response has no data", what)));
        }
        Ok(serde_json::from_value(envelope.data)?)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Canned API bodies shared by the unit tests of this crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn calendar_day(day: u32, month: u32, year: i32) -> Value {
        json!({
            "timings": {
                "Imsak": "04:24 (WIB)",
                "Fajr": "04:34 (WIB)",
                "Sunrise": "05:48 (WIB)",
                "Dhuhr": "11:56 (WIB)",
                "Asr": "15:01 (WIB)",
                "Maghrib": "18:00 (WIB)",
                "Isha": "19:09 (WIB)"
            },
            "date": {
                "readable": format!("{:02} Mar {}", day, year),
                "hijri": {
                    "date": format!("{:02}-09-1445", day),
                    "day": day.to_string(),
                    "weekday": { "en": "Al Juma'a", "ar": "الجمعة" },
                    "month": { "number": 9, "en": "Ramaḍān", "ar": "رَمَضان" },
                    "year": "1445",
                    "designation": { "abbreviated": "AH", "expanded": "Anno Hegirae" }
                },
                "gregorian": {
                    "date": format!("{:02}-{:02}-{}", day, month, year),
                    "day": format!("{:02}", day),
                    "weekday": { "en": "Friday" },
                    "month": { "number": month, "en": "March" },
                    "year": year.to_string(),
                    "designation": { "abbreviated": "AD", "expanded": "Anno Domini" }
                }
            },
            "meta": {
                "latitude": -6.17511,
                "longitude": 106.865036,
                "timezone": "Asia/Jakarta"
            }
        })
    }

    pub fn month(days: u32) -> Vec<u8> {
        let data: Vec<Value> = (1..=days).map(|d| calendar_day(d, 3, 2024)).collect();
        json!({ "code": 200, "status": "OK", "data": data })
            .to_string()
            .into_bytes()
    }

    pub fn holidays() -> Vec<u8> {
        json!({
            "code": 200,
            "status": "OK",
            "data": [
                { "name": "Lailat-ul-Qadr", "date": { "hijri": "27-09-1445", "gregorian": "06-04-2024" } },
                { "name": "Eid-ul-Fitr", "date": { "hijri": "01-10-1445", "gregorian": "10-04-2024" } }
            ]
        })
        .to_string()
        .into_bytes()
    }

    pub fn failure(code: u16) -> Vec<u8> {
        json!({ "code": code, "status": "Bad Request", "data": "Invalid date" })
            .to_string()
            .into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_calendar() {
        let days = Normalizer::new().month_calendar(&fixtures::month(3)).unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[1].date.gregorian.day, "02");
        assert_eq!(days[0].timings.fajr, "04:34 (WIB)");
        assert_eq!(days[0].meta.timezone, "Asia/Jakarta");
    }

    #[test]
    fn test_non_200_code_is_api_error() {
        let result = Normalizer::new().month_calendar(&fixtures::failure(400));
        assert!(matches!(result, Err(SajadahError::Api(_))));
    }

    #[test]
    fn test_missing_data_is_api_error() {
        let result = Normalizer::new().qibla(br#"{"code": 200, "status": "OK"}"#);
        assert!(matches!(result, Err(SajadahError::Api(_))));
    }

    #[test]
    fn test_qibla() {
        let body = br#"{"code":200,"status":"OK","data":{"latitude":-6.2,"longitude":106.8,"direction":295.15}}"#;
        let qibla = Normalizer::new().qibla(body).unwrap();
        assert!((qibla.direction - 295.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_holidays() {
        let holidays = Normalizer::new().holidays(&fixtures::holidays()).unwrap();
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[1].name, "Eid-ul-Fitr");
        assert_eq!(holidays[1].date.gregorian, "10-04-2024");
    }

    #[test]
    fn test_location_prefers_city_then_locality() {
        let normalizer = Normalizer::new();

        let body = br#"{"city":"Bandung","locality":"Coblong","countryName":"Indonesia"}"#;
        let location = normalizer.location(body, -6.9, 107.6).unwrap();
        assert_eq!(location.city, "Bandung");
        assert_eq!(location.country, "Indonesia");

        let body = br#"{"city":"","locality":"Coblong","countryName":"Indonesia"}"#;
        assert_eq!(normalizer.location(body, 0.0, 0.0).unwrap().city, "Coblong");

        let body = br#"{"countryName":"Indonesia"}"#;
        assert_eq!(
            normalizer.location(body, 0.0, 0.0).unwrap().city,
            FALLBACK_CITY
        );
    }

    #[test]
    fn test_cities() {
        let body = br#"{"results":[
            {"name":"Surabaya","latitude":-7.25,"longitude":112.75,"country":"Indonesia","admin1":"Jawa Timur"},
            {"name":"Surabaya","latitude":-5.1,"longitude":105.3,"country":"Indonesia"}
        ]}"#;
        let cities = Normalizer::new().cities(body).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].state.as_deref(), Some("Jawa Timur"));
        assert_eq!(cities[1].state, None);
    }

    #[test]
    fn test_cities_without_results() {
        let cities = Normalizer::new().cities(br#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(cities.is_empty());
    }
}
