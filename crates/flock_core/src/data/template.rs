//! Object template data structures.

use serde::{Deserialize, Serialize};

use crate::currency::SiteType;
use crate::effect::UpgradeEffect;
use crate::objects::{Lock, ObjectType};
use crate::price::{CurrencyValue, Price};

/// Variant-specific template fields, tagged by object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateKind {
    /// One-shot discovery.
    Idea {
        /// Effects applied once the idea is done.
        #[serde(default)]
        effects: Vec<UpgradeEffect>,
        /// Locks released once the idea is done.
        #[serde(default)]
        unlocks: Vec<Lock>,
    },

    /// One-shot modifier.
    Upgrade {
        /// Object the upgrade improves.
        #[serde(default)]
        object_id: Option<String>,
        /// Effects applied once bought.
        #[serde(default)]
        effects: Vec<UpgradeEffect>,
    },

    /// Repeatable capacity provider.
    Storage {
        /// Capacity granted per unit.
        #[serde(default)]
        storage: Vec<CurrencyValue>,
    },

    /// Repeatable producer.
    Building {
        /// Workers each unit occupies.
        #[serde(default)]
        employees: Option<u32>,
        /// Site each unit occupies.
        #[serde(default)]
        required_site: Option<SiteType>,
        /// Output per unit per production tick.
        #[serde(default)]
        produces: Price,
    },
}

impl TemplateKind {
    /// Discriminant of this template.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Idea { .. } => ObjectType::Idea,
            Self::Upgrade { .. } => ObjectType::Upgrade,
            Self::Storage { .. } => ObjectType::Storage,
            Self::Building { .. } => ObjectType::Building,
        }
    }

    /// Effects this template applies on completion, if it has any.
    #[must_use]
    pub fn effects(&self) -> &[UpgradeEffect] {
        match self {
            Self::Idea { effects, .. } | Self::Upgrade { effects, .. } => effects,
            Self::Storage { .. } | Self::Building { .. } => &[],
        }
    }
}

/// Data-driven object definition.
///
/// # Example RON
///
/// ```ron
/// ObjectTemplate(
///     id: "stone-tools-discovery",
///     name: "Create stone tools",
///     desc: "With a sharp stone, a sheep can do much more than without!",
///     branch: "discovery",
///     raw_cost: { "flint": 50.0, "wood": 20.0, "folklore": 10.0 },
///     buy_verb: "Try it!",
///     original_locks: [],
///     kind: Idea(unlocks: ["stone-tools"]),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTemplate {
    /// Globally unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Display description.
    #[serde(default)]
    pub desc: String,

    /// Classification tag, e.g. "discovery".
    #[serde(default)]
    pub branch: String,

    /// Price before modifiers and scaling.
    #[serde(default)]
    pub raw_cost: Price,

    /// Label of the purchase button.
    #[serde(default = "default_buy_verb")]
    pub buy_verb: String,

    /// Locks a fresh game starts with.
    #[serde(default)]
    pub original_locks: Vec<Lock>,

    /// Variant-specific fields.
    pub kind: TemplateKind,
}

fn default_buy_verb() -> String {
    "Buy".to_string()
}

impl ObjectTemplate {
    /// Create a template with no cost and no locks.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TemplateKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            branch: String::new(),
            raw_cost: Price::new(),
            buy_verb: default_buy_verb(),
            original_locks: Vec::new(),
            kind,
        }
    }

    /// Set the raw cost.
    #[must_use]
    pub fn with_raw_cost(mut self, raw_cost: Price) -> Self {
        self.raw_cost = raw_cost;
        self
    }

    /// Set the original locks.
    #[must_use]
    pub fn with_original_locks(mut self, locks: Vec<Lock>) -> Self {
        self.original_locks = locks;
        self
    }

    /// Set the branch.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Discriminant of this template.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        self.kind.object_type()
    }

    /// Check if this template starts behind a specific lock.
    #[must_use]
    pub fn starts_locked_by(&self, lock: &Lock) -> bool {
        self.original_locks.contains(lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;

    const COOKING: &str = r#"
        ObjectTemplate(
            id: "cooking",
            name: "Start cooking food",
            branch: "discovery",
            raw_cost: { "wood": 100.0, "stone tools": 5.0, "folklore": 20.0 },
            buy_verb: "Start the fire",
            original_locks: ["hunting"],
            kind: Idea(
                unlocks: ["cooking"],
                effects: [
                    (
                        affected_object_id: "tribe-elder",
                        affected_property: cost,
                        effect_type: add,
                        scale: { "vegetables": 10.0, "raw vegetables": -10.0 },
                    ),
                ],
            ),
        )
    "#;

    #[test]
    fn test_parse_idea_template() {
        let template: ObjectTemplate = ron::from_str(COOKING).unwrap();
        assert_eq!(template.id, "cooking");
        assert_eq!(template.object_type(), ObjectType::Idea);
        assert_eq!(template.raw_cost.amount(Currency::StoneTools), 5.0);
        assert!(template.starts_locked_by(&Lock::from("hunting")));
        assert_eq!(template.kind.effects().len(), 1);
        assert_eq!(
            template.kind.effects()[0].scale.amount(Currency::RawVegetables),
            -10.0
        );
    }

    #[test]
    fn test_defaults() {
        let template: ObjectTemplate =
            ron::from_str(r#"ObjectTemplate(id: "granary", name: "Granary", kind: Storage())"#)
                .unwrap();
        assert_eq!(template.buy_verb, "Buy");
        assert!(template.raw_cost.is_empty());
        assert!(template.original_locks.is_empty());
        assert_eq!(template.kind, TemplateKind::Storage { storage: vec![] });
    }

    #[test]
    fn test_unknown_currency_fails_to_parse() {
        let bad = COOKING.replace("\"wood\"", "\"gold\"");
        assert!(ron::from_str::<ObjectTemplate>(&bad).is_err());
    }
}
