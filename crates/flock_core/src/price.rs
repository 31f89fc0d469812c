//! Price and site-set arithmetic.
//!
//! Prices are sparse: a currency that is not listed costs nothing when
//! adding, and leaves the other operand alone when multiplying. Every
//! reducer here is associative and commutative under those identity rules,
//! which is what lets callers fold argument lists of any length.

use std::collections::BTreeMap;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::currency::{Currency, SiteType};
use crate::error::Result;
use crate::state::Resources;

/// Growth factor applied to a repeatable item's price per unit owned.
pub const PRICE_GROWTH: f64 = 1.15;

/// Untyped price as it appears at the content boundary.
pub type RawPrice = BTreeMap<String, f64>;

/// Sparse mapping from currency to amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(BTreeMap<Currency, f64>);

impl Price {
    /// Create an empty price.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, currency: Currency, amount: f64) -> Self {
        self.0.insert(currency, amount);
        self
    }

    /// Set the amount for one currency.
    pub fn insert(&mut self, currency: Currency, amount: f64) {
        self.0.insert(currency, amount);
    }

    /// Amount for a currency, if listed.
    #[must_use]
    pub fn get(&self, currency: Currency) -> Option<f64> {
        self.0.get(&currency).copied()
    }

    /// Amount for a currency, zero if not listed.
    #[must_use]
    pub fn amount(&self, currency: Currency) -> f64 {
        self.get(currency).unwrap_or(0.0)
    }

    /// Currencies listed in this price, in enumeration order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.0.keys().copied()
    }

    /// Iterate over `(currency, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, f64)> + '_ {
        self.0.iter().map(|(c, a)| (*c, *a))
    }

    /// Number of listed currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no currency is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Currency, f64)> for Price {
    fn from_iter<I: IntoIterator<Item = (Currency, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Add for &Price {
    type Output = Price;

    fn add(self, rhs: Self) -> Self::Output {
        add_prices(self, rhs)
    }
}

impl Mul<f64> for &Price {
    type Output = Price;

    fn mul(self, rhs: f64) -> Self::Output {
        scale_price(self, rhs)
    }
}

/// Sparse mapping from site type to a count of sites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteSet(BTreeMap<SiteType, u32>);

impl SiteSet {
    /// Create an empty site set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, site: SiteType, quantity: u32) -> Self {
        self.0.insert(site, quantity);
        self
    }

    /// Count for a site type, zero if not listed.
    #[must_use]
    pub fn quantity(&self, site: SiteType) -> u32 {
        self.0.get(&site).copied().unwrap_or(0)
    }

    /// Iterate over `(site, quantity)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SiteType, u32)> + '_ {
        self.0.iter().map(|(s, q)| (*s, *q))
    }

    /// Number of listed site types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no site type is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SiteType, u32)> for SiteSet {
    fn from_iter<I: IntoIterator<Item = (SiteType, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single `(currency, amount)` pair, used for per-unit capacity lists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyValue {
    /// The currency.
    pub currency: Currency,
    /// The amount.
    pub amount: f64,
}

impl CurrencyValue {
    /// Create a new currency value.
    #[must_use]
    pub const fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }
}

/// Multiply every amount by `factor`.
#[must_use]
pub fn scale_price(price: &Price, factor: f64) -> Price {
    price.iter().map(|(c, a)| (c, a * factor)).collect()
}

/// Price of the next unit of a repeatable item when `quantity` are owned.
///
/// This is the only place the geometric growth rule lives.
#[must_use]
pub fn scaled_price(price: &Price, quantity: u32) -> Price {
    let exponent = i32::try_from(quantity).unwrap_or(i32::MAX);
    scale_price(price, PRICE_GROWTH.powi(exponent))
}

/// Element-wise sum; a currency missing on one side contributes zero.
#[must_use]
pub fn add_prices(price1: &Price, price2: &Price) -> Price {
    let mut sum = price1.clone();
    for (currency, amount) in price2.iter() {
        *sum.0.entry(currency).or_insert(0.0) += amount;
    }
    sum
}

/// Sum any number of prices. No operands yields the empty price.
#[must_use]
pub fn sum_prices<'a>(prices: impl IntoIterator<Item = &'a Price>) -> Price {
    prices
        .into_iter()
        .fold(Price::new(), |acc, price| add_prices(&acc, price))
}

/// Element-wise product; a currency missing on one side contributes a
/// factor of one.
///
/// An empty operand is "no modifier" and returns the other side unchanged.
#[must_use]
pub fn multiply_prices(price1: &Price, price2: &Price) -> Price {
    if price1.is_empty() {
        return price2.clone();
    }
    if price2.is_empty() {
        return price1.clone();
    }

    let mut product = price1.clone();
    for (currency, factor) in price2.iter() {
        *product.0.entry(currency).or_insert(1.0) *= factor;
    }
    product
}

/// Element-wise sum of two site sets.
#[must_use]
pub fn add_site_sets(sites1: &SiteSet, sites2: &SiteSet) -> SiteSet {
    let mut sum = sites1.clone();
    for (site, quantity) in sites2.iter() {
        let count = sum.0.entry(site).or_insert(0);
        *count = count.saturating_add(quantity);
    }
    sum
}

/// Sum any number of site sets. No operands yields the empty set.
#[must_use]
pub fn sum_site_sets<'a>(site_sets: impl IntoIterator<Item = &'a SiteSet>) -> SiteSet {
    site_sets
        .into_iter()
        .fold(SiteSet::new(), |acc, sites| add_site_sets(&acc, sites))
}

/// List the currencies of an untyped price.
///
/// # Errors
///
/// Returns [`GameError::InvalidCurrency`](crate::error::GameError::InvalidCurrency)
/// naming the first key outside the currency enumeration.
pub fn get_currencies(price: &RawPrice) -> Result<Vec<Currency>> {
    price.keys().map(|k| k.parse()).collect()
}

/// Convert an untyped price into a typed one.
///
/// # Errors
///
/// Same as [`get_currencies`].
pub fn parse_price(price: &RawPrice) -> Result<Price> {
    let currencies = get_currencies(price)?;
    Ok(currencies.into_iter().zip(price.values().copied()).collect())
}

/// Whether `resources` hold at least the listed amount of every currency.
///
/// A currency with no resource entry counts as zero available.
#[must_use]
pub fn can_be_paid(price: &Price, resources: &Resources) -> bool {
    price.iter().all(|(currency, required)| {
        resources.get(&currency).map_or(0.0, |r| r.amount) >= required
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::state::ResourceState;

    fn wood(amount: f64) -> Price {
        Price::new().with(Currency::Wood, amount)
    }

    fn resources(entries: &[(Currency, f64)]) -> Resources {
        entries
            .iter()
            .map(|(c, a)| (*c, ResourceState::new(*a)))
            .collect()
    }

    #[test]
    fn test_scale_price() {
        let price = wood(10.0).with(Currency::Flint, 4.0);
        let scaled = scale_price(&price, 2.5);
        assert_eq!(scaled.amount(Currency::Wood), 25.0);
        assert_eq!(scaled.amount(Currency::Flint), 10.0);
        assert_eq!(&price * 2.5, scaled);
    }

    #[test]
    fn test_scaled_price_growth() {
        let price = wood(100.0);
        assert_eq!(scaled_price(&price, 0), price);
        assert!((scaled_price(&price, 1).amount(Currency::Wood) - 115.0).abs() < 1e-9);
        assert!((scaled_price(&price, 2).amount(Currency::Wood) - 132.25).abs() < 1e-9);
    }

    #[test]
    fn test_add_prices_union_of_keys() {
        let a = wood(10.0).with(Currency::Flint, 1.0);
        let b = wood(5.0).with(Currency::Folklore, 3.0);
        let sum = add_prices(&a, &b);
        assert_eq!(sum.amount(Currency::Wood), 15.0);
        assert_eq!(sum.amount(Currency::Flint), 1.0);
        assert_eq!(sum.amount(Currency::Folklore), 3.0);
        assert_eq!(sum.len(), 3);
        assert_eq!(&a + &b, sum);
    }

    #[test]
    fn test_sum_prices_variadic() {
        let prices = [wood(1.0), wood(2.0), Price::new().with(Currency::Meat, 4.0)];
        let sum = sum_prices(&prices);
        assert_eq!(sum.amount(Currency::Wood), 3.0);
        assert_eq!(sum.amount(Currency::Meat), 4.0);
        assert!(sum_prices([]).is_empty());
    }

    #[test]
    fn test_multiply_prices_missing_key_is_factor_one() {
        let base = wood(10.0).with(Currency::Flint, 4.0);
        let modifier = wood(0.5);
        let product = multiply_prices(&base, &modifier);
        assert_eq!(product.amount(Currency::Wood), 5.0);
        assert_eq!(product.amount(Currency::Flint), 4.0);
    }

    #[test]
    fn test_multiply_prices_empty_is_identity() {
        let price = wood(10.0);
        assert_eq!(multiply_prices(&Price::new(), &price), price);
        assert_eq!(multiply_prices(&price, &Price::new()), price);
    }

    #[test]
    fn test_multiply_prices_explicit_zero_is_kept() {
        let product = multiply_prices(&wood(10.0), &wood(0.0));
        assert_eq!(product.get(Currency::Wood), Some(0.0));
    }

    #[test]
    fn test_sum_site_sets() {
        let a = SiteSet::new().with(SiteType::Forest, 2);
        let b = SiteSet::new()
            .with(SiteType::Forest, 1)
            .with(SiteType::Cave, 3);
        let sum = sum_site_sets([&a, &b]);
        assert_eq!(sum.quantity(SiteType::Forest), 3);
        assert_eq!(sum.quantity(SiteType::Cave), 3);
        assert_eq!(sum.quantity(SiteType::River), 0);
    }

    #[test]
    fn test_add_site_sets_saturates() {
        let full = SiteSet::new().with(SiteType::Quarry, u32::MAX);
        let one = SiteSet::new().with(SiteType::Quarry, 1);
        assert_eq!(add_site_sets(&full, &one).quantity(SiteType::Quarry), u32::MAX);
        assert_eq!(add_site_sets(&one, &full).quantity(SiteType::Quarry), u32::MAX);
    }

    #[test]
    fn test_get_currencies_rejects_unknown() {
        let mut raw = RawPrice::new();
        raw.insert("wood".to_string(), 1.0);
        raw.insert("gold".to_string(), 2.0);

        let err = get_currencies(&raw).unwrap_err();
        assert!(matches!(err, GameError::InvalidCurrency(ref c) if c == "gold"));
        assert!(parse_price(&raw).is_err());
    }

    #[test]
    fn test_parse_price() {
        let mut raw = RawPrice::new();
        raw.insert("stone tools".to_string(), 10.0);
        raw.insert("folklore".to_string(), 15.0);

        let price = parse_price(&raw).unwrap();
        assert_eq!(price.amount(Currency::StoneTools), 10.0);
        assert_eq!(price.amount(Currency::Folklore), 15.0);
    }

    #[test]
    fn test_can_be_paid() {
        let stock = resources(&[(Currency::Wood, 10.0)]);
        assert!(can_be_paid(&Price::new(), &stock));
        assert!(can_be_paid(&wood(10.0), &stock));
        assert!(!can_be_paid(&wood(11.0), &stock));
        assert!(!can_be_paid(&Price::new().with(Currency::Meat, 1.0), &stock));
    }

    #[test]
    fn test_price_deserialize_rejects_unknown_currency() {
        let ok: Price = serde_json::from_str(r#"{"wood": 3.0}"#).unwrap();
        assert_eq!(ok.amount(Currency::Wood), 3.0);

        let bad: std::result::Result<Price, _> = serde_json::from_str(r#"{"gold": 3.0}"#);
        assert!(bad.is_err());
    }
}
