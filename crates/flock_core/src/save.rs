//! Saved-game snapshot.
//!
//! A save holds only what changes during play: resource amounts, the
//! population, site usage and each object's minimal state, including its
//! cost with every modifier stacked so far. Template fields are never
//! written; on load they come from the content tables.
//!
//! Snapshots encode as JSON for browser storage or as bincode for a
//! compact binary blob. Both encodings carry [`SAVE_VERSION`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cost::ComplexPrice;
use crate::error::{GameError, Result};
use crate::objects::{Lock, ObjectType};
use crate::state::{Population, Resources, Sites};

/// Save format version for compatibility.
pub const SAVE_VERSION: u32 = 1;

/// Mutable state of an idea.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaState {
    /// Outstanding locks; `None` means "use the template's".
    #[serde(default)]
    pub locks: Option<Vec<Lock>>,
    /// Cost with modifiers; `None` means "raw cost".
    #[serde(default)]
    pub cost: Option<ComplexPrice>,
    /// Whether the idea has been acted upon.
    #[serde(default)]
    pub done: bool,
    /// Whether its effects and unlocks have been applied.
    #[serde(default)]
    pub completed: bool,
}

/// Mutable state of an upgrade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeState {
    /// Outstanding locks; `None` means "use the template's".
    #[serde(default)]
    pub locks: Option<Vec<Lock>>,
    /// Cost with modifiers; `None` means "raw cost".
    #[serde(default)]
    pub cost: Option<ComplexPrice>,
    /// Whether the upgrade has been bought.
    #[serde(default)]
    pub done: bool,
    /// Whether its effects have been applied.
    #[serde(default)]
    pub completed: bool,
}

/// Mutable state of a storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageState {
    /// Outstanding locks; `None` means "use the template's".
    #[serde(default)]
    pub locks: Option<Vec<Lock>>,
    /// Cost with modifiers; `None` means "raw cost".
    #[serde(default)]
    pub cost: Option<ComplexPrice>,
    /// Units owned.
    #[serde(default)]
    pub quantity: u32,
}

/// Mutable state of a building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingState {
    /// Outstanding locks; `None` means "use the template's".
    #[serde(default)]
    pub locks: Option<Vec<Lock>>,
    /// Cost with modifiers; `None` means "raw cost".
    #[serde(default)]
    pub cost: Option<ComplexPrice>,
    /// Units owned.
    #[serde(default)]
    pub quantity: u32,
}

/// Mutable state of any object, tagged by variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectState {
    /// Idea state.
    Idea(IdeaState),
    /// Upgrade state.
    Upgrade(UpgradeState),
    /// Storage state.
    Storage(StorageState),
    /// Building state.
    Building(BuildingState),
}

impl ObjectState {
    /// Discriminant of the variant this state belongs to.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Idea(_) => ObjectType::Idea,
            Self::Upgrade(_) => ObjectType::Upgrade,
            Self::Storage(_) => ObjectType::Storage,
            Self::Building(_) => ObjectType::Building,
        }
    }

    /// Outstanding locks recorded in this state, if any.
    #[must_use]
    pub fn locks(&self) -> Option<&[Lock]> {
        match self {
            Self::Idea(s) => s.locks.as_deref(),
            Self::Upgrade(s) => s.locks.as_deref(),
            Self::Storage(s) => s.locks.as_deref(),
            Self::Building(s) => s.locks.as_deref(),
        }
    }
}

/// Complete saved game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    /// Save format version.
    pub version: u32,
    /// Stockpiled resources.
    pub resources: Resources,
    /// Population and workforce.
    pub population: Population,
    /// Site capacity and usage.
    pub sites: Sites,
    /// Per-object state keyed by object id.
    pub objects: BTreeMap<String, ObjectState>,
}

impl SaveGame {
    /// Create an empty snapshot at the current version.
    #[must_use]
    pub fn new(resources: Resources, population: Population, sites: Sites) -> Self {
        Self {
            version: SAVE_VERSION,
            resources,
            population,
            sites,
            objects: BTreeMap::new(),
        }
    }

    /// Encode as JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| GameError::InvalidState(format!("Failed to serialize save: {}", e)))
    }

    /// Decode from JSON.
    ///
    /// # Errors
    /// Returns an error if the text is malformed, names an unknown currency
    /// or site type, or was written by another save version.
    pub fn from_json(json: &str) -> Result<Self> {
        let save: Self = serde_json::from_str(json)
            .map_err(|e| GameError::InvalidState(format!("Failed to deserialize save: {}", e)))?;
        save.check_version()?;
        Ok(save)
    }

    /// Encode as a compact binary blob.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| GameError::InvalidState(format!("Failed to serialize save: {}", e)))
    }

    /// Decode from a binary blob.
    ///
    /// # Errors
    /// Returns an error if the bytes are malformed or were written by
    /// another save version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let save: Self = bincode::deserialize(bytes)
            .map_err(|e| GameError::InvalidState(format!("Failed to deserialize save: {}", e)))?;
        save.check_version()?;
        Ok(save)
    }

    fn check_version(&self) -> Result<()> {
        if self.version != SAVE_VERSION {
            return Err(GameError::InvalidState(format!(
                "Save version mismatch: expected {}, got {}",
                SAVE_VERSION, self.version
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{Currency, SiteType};
    use crate::state::{ResourceState, SiteState};

    fn sample_save() -> SaveGame {
        let mut resources = Resources::new();
        resources.insert(Currency::Wood, ResourceState::new(42.5));
        resources.insert(Currency::StoneTools, ResourceState::new(3.0));

        let mut sites = Sites::new();
        sites.insert(SiteType::Meadow, SiteState::new(4, 1));

        let mut save = SaveGame::new(resources, Population::new(10, 2), sites);
        save.objects.insert(
            "granary".to_string(),
            ObjectState::Storage(StorageState {
                locks: Some(vec![]),
                cost: None,
                quantity: 2,
            }),
        );
        save.objects.insert(
            "hunting-discovery".to_string(),
            ObjectState::Idea(IdeaState {
                locks: Some(vec![Lock::from("stone-tools")]),
                cost: None,
                done: false,
                completed: false,
            }),
        );
        save
    }

    #[test]
    fn test_json_round_trip() {
        let save = sample_save();
        let json = save.to_json().unwrap();
        assert!(json.contains("\"stone tools\""));
        assert_eq!(SaveGame::from_json(&json).unwrap(), save);
    }

    #[test]
    fn test_binary_round_trip() {
        let save = sample_save();
        let bytes = save.to_bytes().unwrap();
        assert_eq!(SaveGame::from_bytes(&bytes).unwrap(), save);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let mut save = sample_save();
        save.version = SAVE_VERSION + 1;
        let json = save.to_json().unwrap();
        assert!(matches!(
            SaveGame::from_json(&json),
            Err(GameError::InvalidState(_))
        ));
    }

    #[test]
    fn test_fresh_state_fields_are_optional() {
        let state: ObjectState = serde_json::from_str(r#"{"idea": {}}"#).unwrap();
        assert_eq!(state, ObjectState::Idea(IdeaState::default()));
        assert!(state.locks().is_none());
        assert_eq!(state.object_type(), ObjectType::Idea);
    }

    #[test]
    fn test_unknown_currency_in_save_is_rejected() {
        let json = sample_save()
            .to_json()
            .unwrap()
            .replace("\"stone tools\"", "\"gold\"");
        assert!(SaveGame::from_json(&json).is_err());
    }
}
