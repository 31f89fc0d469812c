//! Effects that ideas and upgrades apply to other objects once done.

use serde::{Deserialize, Serialize};

use crate::cost::ComplexPrice;
use crate::price::Price;

/// Property of the target object an effect changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectedProperty {
    /// The object's cost.
    Cost,
}

/// How the effect's scale combines with the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    /// Sum the scale onto the property.
    Add,
    /// Overlay the scale as per-currency factors.
    Multiply,
}

/// A modifier applied to another object's property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeEffect {
    /// Id of the object the effect changes.
    pub affected_object_id: String,
    /// Which property it changes.
    pub affected_property: AffectedProperty,
    /// Add or multiply.
    pub effect_type: EffectType,
    /// The modifier itself.
    pub scale: Price,
}

impl UpgradeEffect {
    /// Stack this effect onto a cost.
    pub fn apply_to_cost(&self, cost: &mut ComplexPrice) {
        match self.effect_type {
            EffectType::Add => cost.add_modifier(self.scale.clone()),
            EffectType::Multiply => cost.multiply_modifier(self.scale.clone()),
        }
    }
}
