//! Ideas: one-shot discoveries that unlock and modify other objects.

use std::rc::Rc;

use super::{kind_mismatch, Buyable, GameObject, Lock, ObjectBase, ObjectType, OnBuy};
use crate::data::{ObjectTemplate, TemplateKind};
use crate::effect::UpgradeEffect;
use crate::error::Result;
use crate::price::Price;
use crate::save::{IdeaState, ObjectState};

/// A discovery the flock acts upon once.
#[derive(Debug)]
pub struct Idea {
    base: ObjectBase,
    effects: Vec<UpgradeEffect>,
    unlocks: Vec<Lock>,
    /// Whether the idea has been acted upon.
    pub done: bool,
    /// Whether its effects and unlocks have been applied.
    pub completed: bool,
    on_buy: OnBuy,
}

impl Idea {
    /// Build from an idea template and an optional saved state.
    ///
    /// # Errors
    ///
    /// Returns `StateMismatch` if the template is not an idea template.
    pub fn new(template: Rc<ObjectTemplate>, state: Option<IdeaState>) -> Result<Self> {
        let TemplateKind::Idea { effects, unlocks } = &template.kind else {
            return Err(kind_mismatch(&template, ObjectType::Idea));
        };
        let (effects, unlocks) = (effects.clone(), unlocks.clone());
        let state = state.unwrap_or_default();

        Ok(Self {
            base: ObjectBase::new(template, state.cost, state.locks),
            effects,
            unlocks,
            done: state.done,
            completed: state.completed,
            on_buy: OnBuy::new(),
        })
    }

    /// Effects applied once the idea is done.
    #[must_use]
    pub fn effects(&self) -> &[UpgradeEffect] {
        &self.effects
    }

    /// Locks released once the idea is done.
    #[must_use]
    pub fn unlocks(&self) -> &[Lock] {
        &self.unlocks
    }
}

impl GameObject for Idea {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Idea
    }

    fn current_price(&self) -> Price {
        self.base.raw_cost().clone()
    }

    fn save(&self) -> ObjectState {
        ObjectState::Idea(IdeaState {
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

impl Buyable for Idea {
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
