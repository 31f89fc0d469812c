//! Storages: repeatable purchases that raise resource capacity.

use std::rc::Rc;

use super::{kind_mismatch, Buyable, GameObject, ObjectBase, ObjectType, OnBuy};
use crate::data::{ObjectTemplate, TemplateKind};
use crate::error::Result;
use crate::price::{scaled_price, CurrencyValue, Price};
use crate::save::{ObjectState, StorageState};

/// A capacity provider whose price grows with every unit owned.
#[derive(Debug)]
pub struct Storage {
    base: ObjectBase,
    storage: Vec<CurrencyValue>,
    /// Units owned.
    pub quantity: u32,
    on_buy: OnBuy,
}

impl Storage {
    /// Build from a storage template and an optional saved state.
    ///
    /// # Errors
    ///
    /// Returns `StateMismatch` if the template is not a storage template.
    pub fn new(template: Rc<ObjectTemplate>, state: Option<StorageState>) -> Result<Self> {
        let TemplateKind::Storage { storage } = &template.kind else {
            return Err(kind_mismatch(&template, ObjectType::Storage));
        };
        let storage = storage.clone();
        let state = state.unwrap_or_default();

        Ok(Self {
            base: ObjectBase::new(template, state.cost, state.locks),
            storage,
            quantity: state.quantity,
            on_buy: OnBuy::new(),
        })
    }

    /// Capacity granted by a single unit.
    #[must_use]
    pub fn unit_storage(&self) -> &[CurrencyValue] {
        &self.storage
    }

    /// Capacity granted by every unit owned.
    #[must_use]
    pub fn get_storage(&self) -> Price {
        let mut total = Price::new();
        for value in &self.storage {
            let granted = value.amount * f64::from(self.quantity);
            total.insert(value.currency, total.amount(value.currency) + granted);
        }
        total
    }
}

impl GameObject for Storage {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Storage
    }

    fn current_price(&self) -> Price {
        scaled_price(self.base.raw_cost(), self.quantity)
    }

    fn save(&self) -> ObjectState {
        ObjectState::Storage(StorageState {
            locks: Some(self.base.locks.clone()),
            cost: Some(self.base.cost.clone()),
            quantity: self.quantity,
        })
    }

    fn is_available(&self) -> bool {
        self.base.is_unlocked()
    }
}

impl Buyable for Storage {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn record_purchase(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    fn on_buy(&mut self) -> &mut OnBuy {
        &mut self.on_buy
    }
}
