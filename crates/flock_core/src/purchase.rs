//! Affordability checks and the purchase engine.
//!
//! Falling short on resources, workers or sites is a normal outcome and is
//! reported as `false`. Only content bugs, such as an id that resolves to
//! no object or to several, are errors.

use crate::error::Result;
use crate::objects::Buyable;
use crate::price::{can_be_paid, Price};
use crate::state::{GameState, Population, Resources, Sites};

/// Whether enough idle sheep exist to staff one more unit of `item`.
///
/// Objects that employ nobody always pass.
#[must_use]
pub fn has_enough_workforce(item: &dyn Buyable, population: &Population) -> bool {
    item.employees()
        .map_or(true, |employees| employees <= population.idle())
}

/// Whether a free site exists for one more unit of `item`.
///
/// Objects without a required site always pass. A site type with no entry
/// has no free sites.
#[must_use]
pub fn has_free_site(item: &dyn Buyable, sites: &Sites) -> bool {
    item.required_site()
        .map_or(true, |site| sites.get(&site).map_or(false, |s| s.free() > 0))
}

/// Whether `item` can be bought right now.
///
/// Without a population record an object that employs workers cannot be
/// bought; without site records an object that needs a site cannot be
/// bought.
#[must_use]
pub fn can_be_bought(
    item: &dyn Buyable,
    resources: &Resources,
    population: Option<&Population>,
    sites: Option<&Sites>,
) -> bool {
    let workforce = population.map_or(item.employees().is_none(), |p| {
        has_enough_workforce(item, p)
    });
    let site = sites.map_or(item.required_site().is_none(), |s| has_free_site(item, s));

    workforce && site && can_be_paid(&item.current_price(), resources)
}

/// Amount the engine debits for the next unit of `item`.
///
/// This is the object's current price, so the engine and the objects share
/// one growth rule: storages grow their raw cost and buildings their
/// modified cost by [`scaled_price`](crate::price::scaled_price).
#[must_use]
pub fn real_cost(item: &dyn Buyable) -> Price {
    item.current_price()
}

/// Whether the object with `item_id` is offered and affordable.
///
/// # Errors
///
/// Returns `AmbiguousOrMissingItem` unless exactly one object has the id.
pub fn can_buy_item(state: &GameState, item_id: &str) -> Result<bool> {
    let item = state.find_object(item_id)?;
    Ok(item.is_available() && is_affordable(state, item, &real_cost(item)))
}

fn is_affordable(state: &GameState, item: &dyn Buyable, cost: &Price) -> bool {
    can_be_paid(cost, &state.resources)
        && has_enough_workforce(item, &state.population)
        && has_free_site(item, &state.sites)
}

/// Buy one unit of the object with `item_id`.
///
/// Everything is checked before anything changes. On success the real
/// cost is debited, the unit recorded, workers hired and a site occupied
/// for buildings, and only then the object's `on_buy` handlers fire.
///
/// Returns `Ok(false)` with no side effect when the object is locked, done
/// or unaffordable.
///
/// # Errors
///
/// Returns `AmbiguousOrMissingItem` unless exactly one object has the id.
pub fn try_buy_item(state: &mut GameState, item_id: &str) -> Result<bool> {
    let slot = state.locate(item_id)?;
    let item = state.buyable(slot);

    if !item.is_available() {
        tracing::trace!("Purchase of '{}' rejected: not available", item_id);
        return Ok(false);
    }

    let cost = real_cost(item);
    if !is_affordable(state, item, &cost) {
        tracing::trace!("Purchase of '{}' rejected: not affordable", item_id);
        return Ok(false);
    }

    for (currency, amount) in cost.iter() {
        state.resources.entry(currency).or_default().amount -= amount;
    }

    let item = state.buyable_mut(slot);
    item.record_purchase();
    let employees = item.employees();
    let required_site = item.required_site();

    if let Some(employees) = employees {
        state.population.workers = state.population.workers.saturating_add(employees);
    }
    if let Some(site) = required_site {
        let site = state.sites.entry(site).or_default();
        site.amount_used = site.amount_used.saturating_add(1);
    }

    #[cfg(feature = "debug-validation")]
    {
        debug_assert!(state.population.workers <= state.population.population);
        debug_assert!(state.sites.values().all(|s| s.amount_used <= s.total_amount));
    }

    let item = state.buyable_mut(slot);
    item.buy();
    tracing::debug!("Bought '{}', now owning {}", item_id, item.quantity());

    Ok(true)
}
