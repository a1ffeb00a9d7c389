//! Lookups against the third-party reference APIs.

pub mod calendar;
pub mod qibla;
pub mod schedule;

use crate::app::{Result, SajadahError};

pub use calendar::HijriCalendar;
pub use qibla::QiblaFinder;
pub use schedule::ScheduleService;

pub(crate) fn check_coordinates(lat: f64, lon: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(SajadahError::Validation(format!(
            "coordinates out of range: {}, {}",
            lat, lon
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::app::{Result, SajadahError};
    use crate::fetcher::{ApiRequest, Fetcher};

    /// Answers each request kind with a canned body and records every call.
    #[derive(Default)]
    pub struct MockFetcher {
        bodies: Mutex<HashMap<&'static str, Vec<u8>>>,
        calls: Mutex<Vec<ApiRequest>>,
    }

    impl MockFetcher {
        pub fn with(self, kind: &'static str, body: Vec<u8>) -> Self {
            self.bodies.lock().unwrap().insert(kind, body);
            self
        }

        pub fn set(&self, kind: &'static str, body: Vec<u8>) {
            self.bodies.lock().unwrap().insert(kind, body);
        }

        pub fn calls(&self) -> Vec<ApiRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn count(&self, kind: &str) -> usize {
            self.calls().iter().filter(|c| c.kind() == kind).count()
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, request: &ApiRequest) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push(request.clone());
            self.bodies
                .lock()
                .unwrap()
                .get(request.kind())
                .cloned()
                .ok_or_else(|| SajadahError::Api(format!("HTTP 503 for {}", request.kind())))
        }
    }
}
