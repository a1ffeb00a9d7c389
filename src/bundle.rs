//! Supplications bundled into the binary at build time.

use std::sync::Arc;

use crate::app::Result;
use crate::domain::Doa;

const BUNDLED_DOAS: &str = include_str!("../data/doa.json");

/// Parse the bundled supplications. Called once when the app context is built;
/// the result is shared read-only by every view.
pub fn static_doas() -> Result<Arc<[Doa]>> {
    parse_doas(BUNDLED_DOAS)
}

pub fn parse_doas(json: &str) -> Result<Arc<[Doa]>> {
    let doas: Vec<Doa> = serde_json::from_str(json)?;
    tracing::debug!("Loaded {} bundled doas", doas.len());
    Ok(Arc::from(doas))
}
