//! Test fixtures and helpers.
//!
//! Pre-built content tables and game states for consistent testing.

use flock_core::currency::{Currency, SiteType};
use flock_core::data::ContentTables;
use flock_core::state::{GameState, Population, ResourceState, Resources, SiteState};

/// The bundled early-game content table.
pub const DISCOVERIES_RON: &str = include_str!("../../flock_core/content/discoveries.ron");

/// Parse the bundled content table.
///
/// # Panics
///
/// Panics if the bundled table fails to parse or validate.
#[must_use]
pub fn discoveries() -> ContentTables {
    ContentTables::from_ron_str(DISCOVERIES_RON).expect("bundled content should load")
}

/// Resources holding `amount` of every currency.
#[must_use]
pub fn stocked_resources(amount: f64) -> Resources {
    Currency::ALL
        .iter()
        .map(|c| (*c, ResourceState::new(amount)))
        .collect()
}

/// A fresh game over the bundled content with a well-stocked flock.
///
/// Every currency holds `amount`, the flock has ten idle sheep and three
/// free meadows.
///
/// # Panics
///
/// Panics if the bundled content fails to load.
#[must_use]
pub fn starting_state(amount: f64) -> GameState {
    let mut state =
        GameState::from_content(&discoveries(), None).expect("fresh game should build");
    state.resources = stocked_resources(amount);
    state.population = Population::new(10, 0);
    state.sites.insert(SiteType::Meadow, SiteState::new(3, 0));
    tracing::debug!("Built starting state with {} of every currency", amount);
    state
}

/// Approximate float equality for prices built from growth factors.
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
