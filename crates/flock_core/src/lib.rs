//! # Flock Core
//!
//! Content model and purchase economy for the flock idle game.
//!
//! This crate contains **only** the game model:
//! - No rendering
//! - No UI bindings
//! - No clock or production loop
//! - No storage backend (saves are encoded, not written)
//!
//! ## Crate Structure
//!
//! - [`price`] - Price and site-set arithmetic, geometric price growth
//! - [`reward`] - Reward bundles and their aggregation
//! - [`cost`] - Composite cost with stacked modifiers
//! - [`objects`] - Lockable game objects: ideas, upgrades, storages, buildings
//! - [`purchase`] - Affordability predicates and the purchase engine
//! - [`state`] - Live game state
//! - [`data`] - Content tables loaded from RON
//! - [`save`] - Saved-game snapshot

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod cost;
pub mod currency;
pub mod data;
pub mod effect;
pub mod error;
pub mod objects;
pub mod price;
pub mod purchase;
pub mod reward;
pub mod save;
pub mod state;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cost::ComplexPrice;
    pub use crate::currency::{Currency, SiteType};
    pub use crate::data::{ContentTables, ObjectData, ObjectTemplate, TemplateKind};
    pub use crate::effect::{AffectedProperty, EffectType, UpgradeEffect};
    pub use crate::error::{GameError, Result};
    pub use crate::objects::{
        AnyObject, Building, Buyable, GameObject, Idea, Lock, ObjectType, Storage, Upgrade,
    };
    pub use crate::price::{
        add_prices, can_be_paid, multiply_prices, scale_price, scaled_price, sum_prices,
        sum_site_sets, Price, SiteSet, PRICE_GROWTH,
    };
    pub use crate::purchase::{can_be_bought, try_buy_item};
    pub use crate::reward::{sum_rewards, RewardItem};
    pub use crate::save::{ObjectState, SaveGame};
    pub use crate::state::{GameState, Population, ResourceState, Resources, SiteState, Sites};
}
