//! Content table loading and validation.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::template::{ObjectTemplate, TemplateKind};
use crate::error::{GameError, Result};
use crate::save::ObjectState;

/// A template plus the state a fresh game starts it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    /// The immutable template.
    pub template: ObjectTemplate,
    /// Starting state; `None` means template defaults.
    #[serde(default)]
    pub starting_state: Option<ObjectState>,
}

impl ObjectData {
    /// Wrap a template with default starting state.
    #[must_use]
    pub fn new(template: ObjectTemplate) -> Self {
        Self {
            template,
            starting_state: None,
        }
    }
}

/// Every object template the game knows about.
///
/// # Example RON
///
/// ```ron
/// ContentTables(
///     objects: [
///         ObjectData(template: ObjectTemplate(id: "granary", name: "Granary", kind: Storage())),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTables {
    /// All object definitions.
    pub objects: Vec<ObjectData>,
}

impl ContentTables {
    /// Build tables from already-parsed data without validating.
    #[must_use]
    pub fn new(objects: Vec<ObjectData>) -> Self {
        Self { objects }
    }

    /// Parse and validate tables from RON text.
    ///
    /// # Errors
    ///
    /// Returns `DataParseError` if the text is malformed or names an
    /// unknown currency or site type, and `ContentValidation` if
    /// [`validate`](Self::validate) reports any problem.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Self::parse(text, "<inline>")
    }

    /// Read, parse and validate tables from a RON file.
    ///
    /// # Errors
    ///
    /// As [`from_ron_str`](Self::from_ron_str), plus `DataParseError` if
    /// the file cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GameError::DataParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self> {
        let tables: Self = ron::from_str(text).map_err(|e| GameError::DataParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let errors = tables.validate();
        if !errors.is_empty() {
            return Err(GameError::ContentValidation { errors });
        }

        tracing::info!(
            "Loaded {} object templates from {}",
            tables.objects.len(),
            origin
        );
        Ok(tables)
    }

    /// Find an object definition by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ObjectData> {
        self.objects.iter().find(|o| o.template.id == id)
    }

    /// Display name of an object, or an empty string if unknown.
    #[must_use]
    pub fn object_name_by_id(&self, id: &str) -> &str {
        self.get(id).map_or("", |o| o.template.name.as_str())
    }

    /// All templates, in table order.
    pub fn templates(&self) -> impl Iterator<Item = &ObjectTemplate> {
        self.objects.iter().map(|o| &o.template)
    }

    /// Number of object definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the tables are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Validate internal consistency of the tables.
    ///
    /// Checks for:
    /// - Duplicate object ids
    /// - Effects aimed at unknown objects
    /// - Upgrades referring to unknown objects
    /// - Starting states of the wrong variant
    ///
    /// Returns a list of validation errors.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for template in self.templates() {
            *counts.entry(template.id.as_str()).or_default() += 1;
        }
        for (id, count) in &counts {
            if *count > 1 {
                errors.push(format!("Object id '{}' is defined {} times", id, count));
            }
        }

        let known: HashSet<&str> = counts.keys().copied().collect();

        for data in &self.objects {
            let template = &data.template;

            for effect in template.kind.effects() {
                if !known.contains(effect.affected_object_id.as_str()) {
                    errors.push(format!(
                        "Object '{}' has an effect on unknown object '{}'",
                        template.id, effect.affected_object_id
                    ));
                }
            }

            if let TemplateKind::Upgrade {
                object_id: Some(target),
                ..
            } = &template.kind
            {
                if !known.contains(target.as_str()) {
                    errors.push(format!(
                        "Upgrade '{}' refers to unknown object '{}'",
                        template.id, target
                    ));
                }
            }

            if let Some(state) = &data.starting_state {
                if state.object_type() != template.object_type() {
                    errors.push(format!(
                        "Object '{}' is a {} but its starting state is a {}",
                        template.id,
                        template.object_type(),
                        state.object_type()
                    ));
                }
            }
        }

        for error in &errors {
            tracing::warn!("Content validation: {error}");
        }

        errors
    }
}
