//! Live game state: the shared resource stockpile, the flock's workforce,
//! site usage and every object built from the content tables.
//!
//! Objects are stored per variant. Lookups by id search all four
//! collections and treat an id that matches zero or several objects as a
//! content bug.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::currency::{Currency, SiteType};
use crate::data::ContentTables;
use crate::effect::{AffectedProperty, UpgradeEffect};
use crate::error::{GameError, Result};
use crate::objects::{
    AnyObject, Building, Buyable, GameObject, Idea, Lock, ObjectType, Storage, Upgrade,
};
use crate::price::{sum_prices, Price};
use crate::save::SaveGame;

/// Stockpile of one currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Amount available.
    pub amount: f64,
}

impl ResourceState {
    /// Create a stockpile holding `amount`.
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self { amount }
    }
}

/// Stockpiles keyed by currency. A missing entry holds nothing.
pub type Resources = BTreeMap<Currency, ResourceState>;

/// Size of the flock and how many of it are employed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    /// Sheep in the flock.
    pub population: u32,
    /// Sheep employed by buildings.
    pub workers: u32,
}

impl Population {
    /// Create a population record.
    #[must_use]
    pub const fn new(population: u32, workers: u32) -> Self {
        Self {
            population,
            workers,
        }
    }

    /// Sheep free to be hired.
    #[must_use]
    pub const fn idle(&self) -> u32 {
        self.population.saturating_sub(self.workers)
    }
}

/// Capacity and usage of one site type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteState {
    /// Sites discovered.
    pub total_amount: u32,
    /// Sites occupied by buildings.
    pub amount_used: u32,
}

impl SiteState {
    /// Create a site record.
    #[must_use]
    pub const fn new(total_amount: u32, amount_used: u32) -> Self {
        Self {
            total_amount,
            amount_used,
        }
    }

    /// Sites still free.
    #[must_use]
    pub const fn free(&self) -> u32 {
        self.total_amount.saturating_sub(self.amount_used)
    }
}

/// Site usage keyed by site type. A missing entry has no sites.
pub type Sites = BTreeMap<SiteType, SiteState>;

/// Position of an object inside [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Idea(usize),
    Upgrade(usize),
    Storage(usize),
    Building(usize),
}

/// Everything that changes during play.
#[derive(Debug, Default)]
pub struct GameState {
    /// Stockpiled resources.
    pub resources: Resources,
    /// Flock size and workforce.
    pub population: Population,
    /// Site capacity and usage.
    pub sites: Sites,
    /// Ideas, in content order.
    pub ideas: Vec<Idea>,
    /// Upgrades, in content order.
    pub upgrades: Vec<Upgrade>,
    /// Storages, in content order.
    pub storages: Vec<Storage>,
    /// Buildings, in content order.
    pub buildings: Vec<Building>,
}

impl GameState {
    /// Build every object in `tables`, restoring from `save` when given.
    ///
    /// Objects the save does not mention start from their content starting
    /// state. Saved costs already carry every applied modifier, so no effect
    /// is applied here.
    ///
    /// # Errors
    ///
    /// Returns `StateMismatch` if a saved state belongs to another variant
    /// than its template.
    pub fn from_content(tables: &ContentTables, save: Option<&SaveGame>) -> Result<Self> {
        let mut state = match save {
            Some(save) => Self {
                resources: save.resources.clone(),
                population: save.population,
                sites: save.sites.clone(),
                ..Self::default()
            },
            None => Self::default(),
        };

        for data in &tables.objects {
            let saved = save.and_then(|s| s.objects.get(&data.template.id)).cloned();
            let object_state = saved.or_else(|| data.starting_state.clone());
            let template = Rc::new(data.template.clone());

            match AnyObject::from_template(template, object_state)? {
                AnyObject::Idea(o) => state.ideas.push(o),
                AnyObject::Upgrade(o) => state.upgrades.push(o),
                AnyObject::Storage(o) => state.storages.push(o),
                AnyObject::Building(o) => state.buildings.push(o),
            }
        }

        if let Some(save) = save {
            tracing::info!(
                "Restored game state with {} objects from a version {} save",
                tables.len(),
                save.version
            );
        }

        Ok(state)
    }

    /// Snapshot the mutable state of every object.
    #[must_use]
    pub fn save(&self) -> SaveGame {
        let mut save = SaveGame::new(self.resources.clone(), self.population, self.sites.clone());
        for object in self.objects() {
            save.objects.insert(object.id().to_string(), object.save());
        }
        save
    }

    /// Every object, ideas first, then upgrades, storages and buildings.
    pub fn objects(&self) -> impl Iterator<Item = &dyn GameObject> {
        let ideas = self.ideas.iter().map(|o| o as &dyn GameObject);
        let upgrades = self.upgrades.iter().map(|o| o as &dyn GameObject);
        let storages = self.storages.iter().map(|o| o as &dyn GameObject);
        let buildings = self.buildings.iter().map(|o| o as &dyn GameObject);
        ideas.chain(upgrades).chain(storages).chain(buildings)
    }

    /// Resolve an id to exactly one object.
    pub(crate) fn locate(&self, id: &str) -> Result<Slot> {
        let ideas = self.ideas.iter().enumerate();
        let upgrades = self.upgrades.iter().enumerate();
        let storages = self.storages.iter().enumerate();
        let buildings = self.buildings.iter().enumerate();

        let mut matches = ideas
            .filter(|(_, o)| o.id() == id)
            .map(|(i, _)| Slot::Idea(i))
            .chain(upgrades.filter(|(_, o)| o.id() == id).map(|(i, _)| Slot::Upgrade(i)))
            .chain(storages.filter(|(_, o)| o.id() == id).map(|(i, _)| Slot::Storage(i)))
            .chain(
                buildings
                    .filter(|(_, o)| o.id() == id)
                    .map(|(i, _)| Slot::Building(i)),
            );

        match (matches.next(), matches.next()) {
            (Some(slot), None) => Ok(slot),
            _ => Err(GameError::AmbiguousOrMissingItem(id.to_string())),
        }
    }

    pub(crate) fn buyable(&self, slot: Slot) -> &dyn Buyable {
        match slot {
            Slot::Idea(i) => &self.ideas[i],
            Slot::Upgrade(i) => &self.upgrades[i],
            Slot::Storage(i) => &self.storages[i],
            Slot::Building(i) => &self.buildings[i],
        }
    }

    pub(crate) fn buyable_mut(&mut self, slot: Slot) -> &mut dyn Buyable {
        match slot {
            Slot::Idea(i) => &mut self.ideas[i],
            Slot::Upgrade(i) => &mut self.upgrades[i],
            Slot::Storage(i) => &mut self.storages[i],
            Slot::Building(i) => &mut self.buildings[i],
        }
    }

    /// Find the object with the given id.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousOrMissingItem` unless exactly one object matches.
    pub fn find_object(&self, id: &str) -> Result<&dyn Buyable> {
        let slot = self.locate(id)?;
        Ok(self.buyable(slot))
    }

    /// Find the object with the given id, mutably.
    ///
    /// Handlers are subscribed through this.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousOrMissingItem` unless exactly one object matches.
    pub fn find_object_mut(&mut self, id: &str) -> Result<&mut dyn Buyable> {
        let slot = self.locate(id)?;
        Ok(self.buyable_mut(slot))
    }

    /// Display name of an object, or an empty string if unknown.
    #[must_use]
    pub fn object_name_by_id(&self, id: &str) -> &str {
        self.objects()
            .find(|o| o.id() == id)
            .map_or("", |o| o.base().name())
    }

    /// Capacity granted by every storage owned.
    #[must_use]
    pub fn total_storage(&self) -> Price {
        let granted: Vec<Price> = self.storages.iter().map(Storage::get_storage).collect();
        sum_prices(&granted)
    }

    /// Combined output of every building owned, per production tick.
    #[must_use]
    pub fn total_production(&self) -> Price {
        let produced: Vec<Price> = self.buildings.iter().map(Building::production).collect();
        sum_prices(&produced)
    }

    /// Ideas currently offered to the player.
    pub fn available_ideas(&self) -> impl Iterator<Item = &Idea> {
        self.ideas.iter().filter(|i| i.is_available())
    }

    /// Remove `lock` from every object. Returns how many objects changed.
    pub fn release_lock(&mut self, lock: &Lock) -> usize {
        let mut released = 0;
        for idea in &mut self.ideas {
            released += usize::from(idea.release_lock(lock));
        }
        for upgrade in &mut self.upgrades {
            released += usize::from(upgrade.release_lock(lock));
        }
        for storage in &mut self.storages {
            released += usize::from(storage.release_lock(lock));
        }
        for building in &mut self.buildings {
            released += usize::from(building.release_lock(lock));
        }
        tracing::debug!("Released lock '{}' on {} objects", lock, released);
        released
    }

    /// Stack an effect onto the object it targets.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousOrMissingItem` unless the target id resolves to
    /// exactly one object.
    pub fn apply_effect(&mut self, effect: &UpgradeEffect) -> Result<()> {
        let slot = self.locate(&effect.affected_object_id)?;
        let target = self.buyable_mut(slot);
        match effect.affected_property {
            AffectedProperty::Cost => effect.apply_to_cost(&mut target.base_mut().cost),
        }
        tracing::debug!(
            "Applied {:?} effect to the cost of '{}'",
            effect.effect_type,
            effect.affected_object_id
        );
        Ok(())
    }

    /// Apply the consequences of a done idea or upgrade: stack its effects
    /// and, for ideas, release the locks it unlocks.
    ///
    /// Completion runs once per object; the object is marked completed so a
    /// second call cannot stack its effects again.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousOrMissingItem` if `id` or an effect target does
    /// not resolve, and `InvalidState` if the object is not a done idea or
    /// upgrade or is already completed.
    pub fn apply_completion(&mut self, id: &str) -> Result<()> {
        let slot = self.locate(id)?;
        let (done, completed, effects, unlocks) = match slot {
            Slot::Idea(i) => {
                let idea = &self.ideas[i];
                (
                    idea.done,
                    idea.completed,
                    idea.effects().to_vec(),
                    idea.unlocks().to_vec(),
                )
            }
            Slot::Upgrade(i) => {
                let upgrade = &self.upgrades[i];
                (
                    upgrade.done,
                    upgrade.completed,
                    upgrade.effects().to_vec(),
                    Vec::new(),
                )
            }
            Slot::Storage(_) | Slot::Building(_) => {
                return Err(GameError::InvalidState(format!(
                    "Object '{}' has no completion",
                    id
                )));
            }
        };

        if !done {
            return Err(GameError::InvalidState(format!(
                "Object '{}' is not done yet",
                id
            )));
        }
        if completed {
            return Err(GameError::InvalidState(format!(
                "Object '{}' is already completed",
                id
            )));
        }

        for effect in &effects {
            self.apply_effect(effect)?;
        }
        for lock in &unlocks {
            self.release_lock(lock);
        }
        match slot {
            Slot::Idea(i) => self.ideas[i].completed = true,
            Slot::Upgrade(i) => self.upgrades[i].completed = true,
            Slot::Storage(_) | Slot::Building(_) => {}
        }
        Ok(())
    }

    /// Number of objects of one variant.
    #[must_use]
    pub fn count(&self, object_type: ObjectType) -> usize {
        match object_type {
            ObjectType::Idea => self.ideas.len(),
            ObjectType::Upgrade => self.upgrades.len(),
            ObjectType::Storage => self.storages.len(),
            ObjectType::Building => self.buildings.len(),
        }
    }
}
