//! Upgrades: one-shot purchases that modify another object.

use std::rc::Rc;

use super::{kind_mismatch, Buyable, GameObject, ObjectBase, ObjectType, OnBuy};
use crate::data::{ObjectTemplate, TemplateKind};
use crate::effect::UpgradeEffect;
use crate::error::Result;
use crate::price::Price;
use crate::save::{ObjectState, UpgradeState};

/// A one-shot improvement, priced at its raw cost.
#[derive(Debug)]
pub struct Upgrade {
    base: ObjectBase,
    object_id: Option<String>,
    effects: Vec<UpgradeEffect>,
    /// Whether the upgrade has been bought.
    pub done: bool,
    /// Whether its effects have been applied.
    pub completed: bool,
    on_buy: OnBuy,
}

impl Upgrade {
    /// Build from an upgrade template and an optional saved state.
    ///
    /// # Errors
    ///
    /// Returns `StateMismatch` if the template is not an upgrade template.
    pub fn new(template: Rc<ObjectTemplate>, state: Option<UpgradeState>) -> Result<Self> {
        let TemplateKind::Upgrade { object_id, effects } = &template.kind else {
            return Err(kind_mismatch(&template, ObjectType::Upgrade));
        };
        let (object_id, effects) = (object_id.clone(), effects.clone());
        let state = state.unwrap_or_default();

        Ok(Self {
            base: ObjectBase::new(template, state.cost, state.locks),
            object_id,
            effects,
            done: state.done,
            completed: state.completed,
            on_buy: OnBuy::new(),
        })
    }

    /// Object this upgrade improves, if any.
    #[must_use]
    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    /// Effects applied once bought.
    #[must_use]
    pub fn effects(&self) -> &[UpgradeEffect] {
        &self.effects
    }
}

impl GameObject for Upgrade {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Upgrade
    }

    fn current_price(&self) -> Price {
        self.base.raw_cost().clone()
    }

    fn save(&self) -> ObjectState {
        ObjectState::Upgrade(UpgradeState {
            locks: Some(self.base.locks.clone()),
            cost: Some(self.base.cost.clone()),
            done: self.done,
            completed: self.completed,
        })
    }

    fn is_available(&self) -> bool {
        self.base.is_unlocked() && !self.done
    }
}

impl Buyable for Upgrade {
    fn quantity(&self) -> u32 {
        u32::from(self.done)
    }

    fn record_purchase(&mut self) {
        self.done = true;
    }

    fn on_buy(&mut self) -> &mut OnBuy {
        &mut self.on_buy
    }
}
