use std::sync::Arc;

use crate::app::Result;
use crate::domain::QiblaDirection;
use crate::fetcher::{ApiRequest, Fetcher};
use crate::normalizer::Normalizer;
use crate::services::check_coordinates;

pub struct QiblaFinder {
    fetcher: Arc<dyn Fetcher>,
    normalizer: Normalizer,
}

impl QiblaFinder {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
        }
    }

    /// Bearing to the Kaaba in degrees clockwise from true north.
    pub async fn direction(&self, lat: f64, lon: f64) -> Result<QiblaDirection> {
        check_coordinates(lat, lon)?;
        let body = self
            .fetcher
            .fetch(&ApiRequest::Qibla {
                latitude: lat,
                longitude: lon,
            })
            .await?;
        self.normalizer.qibla(&body)
    }
}
