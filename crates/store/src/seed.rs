//! Seed fixture: the four example challenges a fresh session starts with.
//!
//! Carried verbatim from the demo data set, including progress values
//! that were authored by hand; the engine corrects them on the first
//! mutation of each challenge.

use momentum_core::Challenge;

static SEED_JSON: &str = include_str!("seed.json");

/// Decode the embedded fixture.
pub fn seed_challenges() -> Result<Vec<Challenge>, serde_json::Error> {
    serde_json::from_str(SEED_JSON)
}
