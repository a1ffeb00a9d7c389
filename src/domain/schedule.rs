//! Prayer-time, calendar and geocoding shapes as decoded from the upstream APIs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimings {
    #[serde(rename = "Imsak")]
    pub imsak: String,
    #[serde(rename = "Fajr")]
    pub fajr: String,
    #[serde(rename = "Sunrise", default)]
    pub sunrise: Option<String>,
    #[serde(rename = "Dhuhr")]
    pub dhuhr: String,
    #[serde(rename = "Asr")]
    pub asr: String,
    #[serde(rename = "Maghrib")]
    pub maghrib: String,
    #[serde(rename = "Isha")]
    pub isha: String,
}

impl PrayerTimings {
    /// Named times in the order they occur during the day.
    pub fn ordered(&self) -> Vec<(&'static str, &str)> {
        let mut times = vec![("Imsak", self.imsak.as_str()), ("Subuh", self.fajr.as_str())];
        if let Some(ref sunrise) = self.sunrise {
            times.push(("Terbit", sunrise.as_str()));
        }
        times.extend([
            ("Dzuhur", self.dhuhr.as_str()),
            ("Ashar", self.asr.as_str()),
            ("Maghrib", self.maghrib.as_str()),
            ("Isya", self.isha.as_str()),
        ]);
        times
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weekday {
    pub en: String,
    #[serde(default)]
    pub ar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Month {
    pub number: u32,
    pub en: String,
    #[serde(default)]
    pub ar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Designation {
    pub abbreviated: String,
    pub expanded: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HijriDate {
    pub date: String,
    pub day: String,
    pub weekday: Weekday,
    pub month: Month,
    pub year: String,
    #[serde(default)]
    pub designation: Designation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GregorianDate {
    pub date: String,
    pub day: String,
    pub weekday: Weekday,
    pub month: Month,
    pub year: String,
    #[serde(default)]
    pub designation: Designation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDate {
    pub readable: String,
    pub hijri: HijriDate,
    pub gregorian: GregorianDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMeta {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// One day of a month calendar: prayer timings plus both date systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub timings: PrayerTimings,
    pub date: DayDate,
    pub meta: DayMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayDate {
    pub hijri: String,
    pub gregorian: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IslamicHoliday {
    pub name: String,
    pub date: HolidayDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HijriMonth {
    pub days: Vec<CalendarDay>,
    pub holidays: Vec<IslamicHoliday>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Fallback city name when reverse geocoding is unavailable.
pub const UNKNOWN_CITY: &str = "Lokasi Tidak Dikenal";

impl Location {
    pub fn unknown(lat: f64, lon: f64) -> Self {
        Self {
            city: UNKNOWN_CITY.to_string(),
            country: String::new(),
            lat,
            lon,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrayerSchedule {
    pub day: CalendarDay,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QiblaDirection {
    pub latitude: f64,
    pub longitude: f64,
    pub direction: f64,
}
