//! Composite cost: a base price plus modifiers stacked on by effects.

use serde::{Deserialize, Serialize};

use crate::price::{add_prices, multiply_prices, sum_prices, Price};

/// An object's effective cost before quantity scaling.
///
/// `total = (base + Σ additions) × Π multipliers`, where multiplication is
/// the sparse overlay of [`multiply_prices`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexPrice {
    /// Price defined by the template.
    pub base_price: Price,
    /// Flat modifiers, summed onto the base.
    #[serde(default)]
    pub additions: Vec<Price>,
    /// Per-currency factors applied after the additions.
    #[serde(default)]
    pub multipliers: Vec<Price>,
}

impl ComplexPrice {
    /// A cost with no modifiers.
    #[must_use]
    pub fn new(base_price: Price) -> Self {
        Self {
            base_price,
            additions: Vec::new(),
            multipliers: Vec::new(),
        }
    }

    /// Stack a flat modifier.
    pub fn add_modifier(&mut self, scale: Price) {
        self.additions.push(scale);
    }

    /// Stack a multiplicative modifier.
    pub fn multiply_modifier(&mut self, scale: Price) {
        self.multipliers.push(scale);
    }

    /// Whether any modifier is stacked.
    #[must_use]
    pub fn has_modifiers(&self) -> bool {
        !self.additions.is_empty() || !self.multipliers.is_empty()
    }

    /// Effective price after all modifiers.
    #[must_use]
    pub fn total(&self) -> Price {
        let summed = add_prices(&self.base_price, &sum_prices(&self.additions));
        self.multipliers
            .iter()
            .fold(summed, |acc, factor| multiply_prices(&acc, factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;

    #[test]
    fn test_total_without_modifiers_is_base() {
        let base = Price::new().with(Currency::Wood, 100.0);
        let cost = ComplexPrice::new(base.clone());
        assert!(!cost.has_modifiers());
        assert_eq!(cost.total(), base);
    }

    #[test]
    fn test_additions_then_multipliers() {
        let mut cost = ComplexPrice::new(
            Price::new()
                .with(Currency::Wood, 100.0)
                .with(Currency::Folklore, 20.0),
        );
        cost.add_modifier(
            Price::new()
                .with(Currency::Vegetables, 10.0)
                .with(Currency::Wood, -20.0),
        );
        cost.multiply_modifier(Price::new().with(Currency::Wood, 0.5));

        let total = cost.total();
        assert_eq!(total.amount(Currency::Wood), 40.0);
        assert_eq!(total.amount(Currency::Folklore), 20.0);
        assert_eq!(total.amount(Currency::Vegetables), 10.0);
    }
}
