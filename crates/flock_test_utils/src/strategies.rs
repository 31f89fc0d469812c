//! Proptest strategies for the price and reward model.
//!
//! Amounts are whole numbers so that float sums and products stay exact
//! and algebraic properties can be checked with `==`.

use proptest::prelude::*;

use flock_core::currency::{Currency, SiteType};
use flock_core::price::{Price, SiteSet};
use flock_core::reward::RewardItem;
use flock_core::state::{ResourceState, Resources};

/// Any currency.
pub fn arb_currency() -> impl Strategy<Value = Currency> {
    proptest::sample::select(Currency::ALL.to_vec())
}

/// Any site type.
pub fn arb_site_type() -> impl Strategy<Value = SiteType> {
    proptest::sample::select(SiteType::ALL.to_vec())
}

/// A whole-number amount, possibly negative.
pub fn arb_amount() -> impl Strategy<Value = f64> {
    (-1000i32..1000i32).prop_map(f64::from)
}

/// A sparse price over up to five currencies.
pub fn arb_price() -> impl Strategy<Value = Price> {
    proptest::collection::btree_map(arb_currency(), arb_amount(), 0..5)
        .prop_map(|m| m.into_iter().collect())
}

/// A sparse site set over up to three site types.
pub fn arb_site_set() -> impl Strategy<Value = SiteSet> {
    proptest::collection::btree_map(arb_site_type(), 0u32..20u32, 0..3)
        .prop_map(|m| m.into_iter().collect())
}

/// A stockpile with non-negative amounts.
pub fn arb_resources() -> impl Strategy<Value = Resources> {
    proptest::collection::btree_map(
        arb_currency(),
        (0i32..1000i32).prop_map(|a| ResourceState::new(f64::from(a))),
        0..8,
    )
}

/// A reward item of one of three kinds.
pub fn arb_reward_item() -> impl Strategy<Value = RewardItem> {
    (
        proptest::sample::select(vec!["resources", "sites", "gift"]),
        proptest::option::of(arb_price()),
        proptest::option::of(arb_site_set()),
    )
        .prop_map(|(kind, resources, sites)| RewardItem {
            kind: kind.to_string(),
            resources,
            sites,
        })
}

/// A list of reward items.
pub fn arb_reward_list(max_len: usize) -> impl Strategy<Value = Vec<RewardItem>> {
    proptest::collection::vec(arb_reward_item(), 0..max_len)
}
