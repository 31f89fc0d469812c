//! Lockable game objects: ideas, upgrades, storages and buildings.
//!
//! Every object pairs a shared, read-only [`ObjectTemplate`] with the
//! mutable state it owns: its current lock set and its composite cost.
//! Variants add their own fields and decide their own price and
//! availability rules.

mod building;
mod idea;
mod on_buy;
mod storage;
mod upgrade;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use building::Building;
pub use idea::Idea;
pub use on_buy::{HandlerId, OnBuy};
pub use storage::Storage;
pub use upgrade::Upgrade;

use crate::cost::ComplexPrice;
use crate::currency::SiteType;
use crate::data::ObjectTemplate;
use crate::error::{GameError, Result};
use crate::price::Price;
use crate::save::ObjectState;

/// Opaque prerequisite identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lock(pub String);

impl Lock {
    /// Create a lock from its identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The lock identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Lock {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminant of a game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// One-shot discovery.
    Idea,
    /// One-shot modifier of another object.
    Upgrade,
    /// Repeatable capacity provider.
    Storage,
    /// Repeatable producer.
    Building,
}

impl ObjectType {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::Upgrade => "upgrade",
            Self::Storage => "storage",
            Self::Building => "building",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every object.
#[derive(Debug)]
pub struct ObjectBase {
    template: Rc<ObjectTemplate>,
    /// Effective cost before quantity scaling.
    pub cost: ComplexPrice,
    /// Locks still outstanding.
    pub locks: Vec<Lock>,
}

impl ObjectBase {
    /// Build from a template and the optional saved fields.
    ///
    /// Missing fields fall back to the template: the raw cost with no
    /// modifiers and a copy of the original locks.
    #[must_use]
    pub fn new(
        template: Rc<ObjectTemplate>,
        cost: Option<ComplexPrice>,
        locks: Option<Vec<Lock>>,
    ) -> Self {
        let cost = cost.unwrap_or_else(|| ComplexPrice::new(template.raw_cost.clone()));
        let locks = locks.unwrap_or_else(|| template.original_locks.clone());
        Self {
            template,
            cost,
            locks,
        }
    }

    /// The shared template.
    #[must_use]
    pub fn template(&self) -> &ObjectTemplate {
        &self.template
    }

    /// Unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.template.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Template-defined price.
    #[must_use]
    pub fn raw_cost(&self) -> &Price {
        &self.template.raw_cost
    }

    /// Locks the object starts with in a fresh game.
    #[must_use]
    pub fn original_locks(&self) -> &[Lock] {
        &self.template.original_locks
    }

    /// Whether no lock is outstanding.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.locks.is_empty()
    }

    /// Remove `lock` from the outstanding set. Returns whether it was there.
    pub fn release_lock(&mut self, lock: &Lock) -> bool {
        let before = self.locks.len();
        self.locks.retain(|l| l != lock);
        self.locks.len() != before
    }
}

/// Behaviour every game object provides.
pub trait GameObject {
    /// Shared fields.
    fn base(&self) -> &ObjectBase;

    /// Shared fields, mutably.
    fn base_mut(&mut self) -> &mut ObjectBase;

    /// Discriminant.
    fn object_type(&self) -> ObjectType;

    /// Price the player pays right now.
    fn current_price(&self) -> Price;

    /// Minimal mutable state; never template fields.
    fn save(&self) -> ObjectState;

    /// Whether the object is currently offered to the player.
    fn is_available(&self) -> bool;

    /// Unique identifier.
    fn id(&self) -> &str {
        self.base().id()
    }

    /// Remove one outstanding lock.
    fn release_lock(&mut self, lock: &Lock) -> bool {
        self.base_mut().release_lock(lock)
    }
}

/// Objects the purchase engine can buy.
pub trait Buyable: GameObject {
    /// Units owned. One-shot objects report 1 once done.
    fn quantity(&self) -> u32;

    /// Record one completed purchase.
    fn record_purchase(&mut self);

    /// Purchase-completion handlers.
    fn on_buy(&mut self) -> &mut OnBuy;

    /// Workers a unit occupies.
    fn employees(&self) -> Option<u32> {
        None
    }

    /// Site a unit occupies.
    fn required_site(&self) -> Option<SiteType> {
        None
    }

    /// Fire the purchase-completion handlers.
    fn buy(&mut self) {
        self.on_buy().notify();
    }
}

/// Any game object, as produced by the template factory.
#[derive(Debug)]
pub enum AnyObject {
    /// An idea.
    Idea(Idea),
    /// An upgrade.
    Upgrade(Upgrade),
    /// A storage.
    Storage(Storage),
    /// A building.
    Building(Building),
}

impl AnyObject {
    /// Construct the variant named by the template's discriminant.
    ///
    /// With no state the object starts fresh from template defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::StateMismatch`] if `state` belongs to a
    /// different variant than the template.
    pub fn from_template(template: Rc<ObjectTemplate>, state: Option<ObjectState>) -> Result<Self> {
        let id = template.id.as_str();
        let object = match template.kind.object_type() {
            ObjectType::Idea => {
                let state = idea_state(id, state)?;
                Self::Idea(Idea::new(template, state)?)
            }
            ObjectType::Upgrade => {
                let state = upgrade_state(id, state)?;
                Self::Upgrade(Upgrade::new(template, state)?)
            }
            ObjectType::Storage => {
                let state = storage_state(id, state)?;
                Self::Storage(Storage::new(template, state)?)
            }
            ObjectType::Building => {
                let state = building_state(id, state)?;
                Self::Building(Building::new(template, state)?)
            }
        };
        Ok(object)
    }

    /// View as the common trait.
    #[must_use]
    pub fn as_game_object(&self) -> &dyn GameObject {
        match self {
            Self::Idea(o) => o,
            Self::Upgrade(o) => o,
            Self::Storage(o) => o,
            Self::Building(o) => o,
        }
    }
}

/// Error for a template handed to the wrong variant constructor.
pub(crate) fn kind_mismatch(template: &ObjectTemplate, expected: ObjectType) -> GameError {
    GameError::StateMismatch {
        id: template.id.clone(),
        expected: expected.to_string(),
        found: template.kind.object_type().to_string(),
    }
}

/// Unwrap the saved state of one variant, rejecting any other variant.
macro_rules! state_extractor {
    ($name:ident, $variant:ident, $state:ty) => {
        fn $name(id: &str, state: Option<ObjectState>) -> Result<Option<$state>> {
            match state {
                None => Ok(None),
                Some(ObjectState::$variant(s)) => Ok(Some(s)),
                Some(other) => Err(GameError::StateMismatch {
                    id: id.to_string(),
                    expected: ObjectType::$variant.to_string(),
                    found: other.object_type().to_string(),
                }),
            }
        }
    };
}

state_extractor!(idea_state, Idea, crate::save::IdeaState);
state_extractor!(upgrade_state, Upgrade, crate::save::UpgradeState);
state_extractor!(storage_state, Storage, crate::save::StorageState);
state_extractor!(building_state, Building, crate::save::BuildingState);
