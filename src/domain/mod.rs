pub mod category;
pub mod doa;
pub mod hadith;
pub mod schedule;

use sha2::{Digest, Sha256};

pub use category::Category;
pub use doa::{Doa, DoaUpdate, DEFAULT_DOA_CATEGORY};
pub use hadith::{Hadith, HadithUpdate};
pub use schedule::{
    CalendarDay, GeocodingResult, HijriMonth, IslamicHoliday, Location, PrayerSchedule,
    PrayerTimings, QiblaDirection,
};

/// Length of generated document ids, in hex characters.
pub const DOCUMENT_ID_LEN: usize = 20;

/// Generate a document id from the collection name and a seed.
///
/// Callers pass something unique per write (content plus a timestamp), so two
/// documents with identical text still get distinct ids.
pub fn generate_id(collection: &str, seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(collection.as_bytes());
    hasher.update(seed.as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(DOCUMENT_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation_deterministic() {
        assert_eq!(generate_id("doas", "seed-1"), generate_id("doas", "seed-1"));
    }

    #[test]
    fn test_id_generation_different_inputs() {
        let a = generate_id("doas", "seed-1");
        assert_ne!(a, generate_id("doas", "seed-2"));
        assert_ne!(a, generate_id("hadiths", "seed-1"));
    }

    #[test]
    fn test_id_is_short_hex() {
        let id = generate_id("doas", "seed-1");
        assert_eq!(id.len(), DOCUMENT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
