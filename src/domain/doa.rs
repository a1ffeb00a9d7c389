use serde::{Deserialize, Serialize};

use crate::app::{Result, SajadahError};

/// Category assigned to a stored supplication when none is given.
pub const DEFAULT_DOA_CATEGORY: &str = "Tanpa Kategori";

/// A short devotional text. Field names on the wire follow the bundled data
/// file and the store documents (`doa`, `ayat`, `latin`, `artinya`, `kategori`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doa {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "doa")]
    pub title: String,
    #[serde(rename = "ayat")]
    pub arabic: String,
    pub latin: String,
    #[serde(rename = "artinya")]
    pub translation: String,
    #[serde(rename = "kategori", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Doa {
    pub fn new(
        title: impl Into<String>,
        arabic: impl Into<String>,
        latin: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            arabic: arabic.into(),
            latin: latin.into(),
            translation: translation.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn display_category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_DOA_CATEGORY)
    }

    /// Every text field except the category must be filled in.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("doa", &self.title),
            ("ayat", &self.arabic),
            ("latin", &self.latin),
            ("artinya", &self.translation),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SajadahError::Validation(format!(
                    "doa field '{}' must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn apply(&mut self, update: &DoaUpdate) {
        if let Some(ref title) = update.title {
            self.title = title.clone();
        }
        if let Some(ref arabic) = update.arabic {
            self.arabic = arabic.clone();
        }
        if let Some(ref latin) = update.latin {
            self.latin = latin.clone();
        }
        if let Some(ref translation) = update.translation {
            self.translation = translation.clone();
        }
        if let Some(ref category) = update.category {
            self.category = Some(category.clone());
        }
    }
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct DoaUpdate {
    pub title: Option<String>,
    pub arabic: Option<String>,
    pub latin: Option<String>,
    pub translation: Option<String>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_bundle_shape() {
        let json = r#"{
            "id": "d1",
            "doa": "Doa Sebelum Makan",
            "ayat": "اللَّهُمَّ بَارِكْ لَنَا",
            "latin": "Allahumma barik lana",
            "artinya": "Ya Allah, berkahilah kami",
            "kategori": "Makan"
        }"#;
        let doa: Doa = serde_json::from_str(json).unwrap();
        assert_eq!(doa.id, "d1");
        assert_eq!(doa.title, "Doa Sebelum Makan");
        assert_eq!(doa.category.as_deref(), Some("Makan"));
    }

    #[test]
    fn test_deserialize_without_category() {
        let json = r#"{"id":"d2","doa":"t","ayat":"a","latin":"l","artinya":"r"}"#;
        let doa: Doa = serde_json::from_str(json).unwrap();
        assert_eq!(doa.category, None);
        assert_eq!(doa.display_category(), DEFAULT_DOA_CATEGORY);
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let doa = Doa::new("Doa Pagi", "  ", "latin", "arti");
        assert!(matches!(doa.validate(), Err(SajadahError::Validation(_))));

        let doa = Doa::new("Doa Pagi", "ayat", "latin", "arti");
        assert!(doa.validate().is_ok());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut doa = Doa::new("Doa Pagi", "ayat", "latin", "arti").with_category("Harian");
        doa.apply(&DoaUpdate {
            translation: Some("arti baru".into()),
            ..Default::default()
        });
        assert_eq!(doa.translation, "arti baru");
        assert_eq!(doa.title, "Doa Pagi");
        assert_eq!(doa.category.as_deref(), Some("Harian"));
    }
}
