//! Buildings: repeatable producers that need workers and land.

use std::rc::Rc;

use super::{kind_mismatch, Buyable, GameObject, ObjectBase, ObjectType, OnBuy};
use crate::currency::SiteType;
use crate::data::{ObjectTemplate, TemplateKind};
use crate::error::Result;
use crate::price::{scale_price, scaled_price, Price};
use crate::save::{BuildingState, ObjectState};

/// A producer whose price grows with every unit owned.
#[derive(Debug)]
pub struct Building {
    base: ObjectBase,
    employees: Option<u32>,
    required_site: Option<SiteType>,
    produces: Price,
    /// Units owned.
    pub quantity: u32,
    on_buy: OnBuy,
}

impl Building {
    /// Build from a building template and an optional saved state.
    ///
    /// # Errors
    ///
    /// Returns `StateMismatch` if the template is not a building template.
    pub fn new(template: Rc<ObjectTemplate>, state: Option<BuildingState>) -> Result<Self> {
        let TemplateKind::Building {
            employees,
            required_site,
            produces,
        } = &template.kind
        else {
            return Err(kind_mismatch(&template, ObjectType::Building));
        };
        let (employees, required_site, produces) = (*employees, *required_site, produces.clone());
        let state = state.unwrap_or_default();

        Ok(Self {
            base: ObjectBase::new(template, state.cost, state.locks),
            employees,
            required_site,
            produces,
            quantity: state.quantity,
            on_buy: OnBuy::new(),
        })
    }

    /// Output of every unit owned, per production tick.
    #[must_use]
    pub fn production(&self) -> Price {
        scale_price(&self.produces, f64::from(self.quantity))
    }
}

impl GameObject for Building {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Building
    }

    fn current_price(&self) -> Price {
        scaled_price(&self.base.cost.total(), self.quantity)
    }

    fn save(&self) -> ObjectState {
        ObjectState::Building(BuildingState {
            locks: Some(self.base.locks.clone()),
            cost: Some(self.base.cost.clone()),
            quantity: self.quantity,
        })
    }

    fn is_available(&self) -> bool {
        self.base.is_unlocked()
    }
}

impl Buyable for Building {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn record_purchase(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    fn on_buy(&mut self) -> &mut OnBuy {
        &mut self.on_buy
    }

    fn employees(&self) -> Option<u32> {
        self.employees
    }

    fn required_site(&self) -> Option<SiteType> {
        self.required_site
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;

    fn hut_template() -> Rc<ObjectTemplate> {
        Rc::new(
            ObjectTemplate::new(
                "gatherer-hut",
                "Gatherer hut",
                TemplateKind::Building {
                    employees: Some(2),
                    required_site: Some(SiteType::Meadow),
                    produces: Price::new().with(Currency::RawVegetables, 0.5),
                },
            )
            .with_raw_cost(Price::new().with(Currency::Wood, 20.0)),
        )
    }

    #[test]
    fn test_requirements_come_from_template() {
        let hut = Building::new(hut_template(), None).unwrap();
        assert_eq!(hut.employees(), Some(2));
        assert_eq!(hut.required_site(), Some(SiteType::Meadow));
    }

    #[test]
    fn test_production_scales_with_quantity() {
        let mut hut = Building::new(hut_template(), None).unwrap();
        assert_eq!(hut.production().amount(Currency::RawVegetables), 0.0);

        hut.record_purchase();
        hut.record_purchase();
        assert_eq!(hut.production().amount(Currency::RawVegetables), 1.0);
    }

    #[test]
    fn test_price_uses_modified_cost() {
        let mut hut = Building::new(hut_template(), None).unwrap();
        hut.base_mut()
            .cost
            .multiply_modifier(Price::new().with(Currency::Wood, 0.5));
        hut.quantity = 1;

        let price = hut.current_price().amount(Currency::Wood);
        assert!((price - 11.5).abs() < 1e-9);
    }
}
