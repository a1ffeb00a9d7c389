use serde::{Deserialize, Serialize};

use crate::app::{Result, SajadahError};

/// An attributed teaching. Wire names match the store documents
/// (`namaHadist`, `tulisanArab`, `arti`, `penjelasan`, `riwayat`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hadith {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "namaHadist")]
    pub title: String,
    #[serde(rename = "kategori")]
    pub category: String,
    #[serde(rename = "tulisanArab")]
    pub arabic: String,
    pub latin: String,
    #[serde(rename = "arti")]
    pub translation: String,
    #[serde(rename = "penjelasan")]
    pub explanation: String,
    #[serde(rename = "riwayat")]
    pub narrator: String,
}

impl Hadith {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("namaHadist", &self.title),
            ("kategori", &self.category),
            ("tulisanArab", &self.arabic),
            ("latin", &self.latin),
            ("arti", &self.translation),
            ("penjelasan", &self.explanation),
            ("riwayat", &self.narrator),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SajadahError::Validation(format!(
                    "hadith field '{}' must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn apply(&mut self, update: &HadithUpdate) {
        let fields = [
            (&mut self.title, &update.title),
            (&mut self.category, &update.category),
            (&mut self.arabic, &update.arabic),
            (&mut self.latin, &update.latin),
            (&mut self.translation, &update.translation),
            (&mut self.explanation, &update.explanation),
            (&mut self.narrator, &update.narrator),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HadithUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub arabic: Option<String>,
    pub latin: Option<String>,
    pub translation: Option<String>,
    pub explanation: Option<String>,
    pub narrator: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hadith {
        Hadith {
            id: String::new(),
            title: "Niat".into(),
            category: "Akhlak".into(),
            arabic: "إِنَّمَا الأَعْمَالُ بِالنِّيَّاتِ".into(),
            latin: "Innamal a'malu binniyyat".into(),
            translation: "Sesungguhnya amal itu tergantung niatnya".into(),
            explanation: "Setiap amal dinilai dari niatnya".into(),
            narrator: "Bukhari dan Muslim".into(),
        }
    }

    #[test]
    fn test_validate_requires_category() {
        let mut hadith = sample();
        assert!(hadith.validate().is_ok());

        hadith.category = String::new();
        assert!(matches!(
            hadith.validate(),
            Err(SajadahError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut hadith = sample();
        hadith.apply(&HadithUpdate {
            narrator: Some("Muslim".into()),
            ..Default::default()
        });
        assert_eq!(hadith.narrator, "Muslim");
        assert_eq!(hadith.title, "Niat");
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["namaHadist"], "Niat");
        assert_eq!(value["riwayat"], "Bukhari dan Muslim");
    }
}
