//! Algebraic properties of price, site-set and reward arithmetic.

use flock_core::price::{
    add_prices, can_be_paid, multiply_prices, scaled_price, sum_prices, sum_site_sets, Price,
    SiteSet,
};
use flock_core::reward::sum_rewards;
use flock_test_utils::strategies::{arb_price, arb_resources, arb_reward_list, arb_site_set};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_add_prices_is_commutative(a in arb_price(), b in arb_price()) {
        prop_assert_eq!(add_prices(&a, &b), add_prices(&b, &a));
    }

    #[test]
    fn prop_add_prices_is_associative(a in arb_price(), b in arb_price(), c in arb_price()) {
        let left = add_prices(&add_prices(&a, &b), &c);
        let right = add_prices(&a, &add_prices(&b, &c));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_empty_price_is_additive_identity(p in arb_price()) {
        prop_assert_eq!(add_prices(&p, &Price::new()), p.clone());
        prop_assert_eq!(add_prices(&Price::new(), &p), p);
    }

    #[test]
    fn prop_empty_price_is_multiplicative_identity(p in arb_price()) {
        prop_assert_eq!(multiply_prices(&Price::new(), &p), p.clone());
        prop_assert_eq!(multiply_prices(&p, &Price::new()), p);
    }

    #[test]
    fn prop_multiply_prices_is_commutative(a in arb_price(), b in arb_price()) {
        prop_assert_eq!(multiply_prices(&a, &b), multiply_prices(&b, &a));
    }

    #[test]
    fn prop_multiply_prices_is_associative(a in arb_price(), b in arb_price(), c in arb_price()) {
        let left = multiply_prices(&multiply_prices(&a, &b), &c);
        let right = multiply_prices(&a, &multiply_prices(&b, &c));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_sum_prices_matches_pairwise_fold(prices in proptest::collection::vec(arb_price(), 0..6)) {
        let folded = prices.iter().fold(Price::new(), |acc, p| add_prices(&acc, p));
        prop_assert_eq!(sum_prices(&prices), folded);
    }

    #[test]
    fn prop_sum_site_sets_is_commutative(a in arb_site_set(), b in arb_site_set()) {
        prop_assert_eq!(sum_site_sets([&a, &b]), sum_site_sets([&b, &a]));
        prop_assert_eq!(sum_site_sets([&a, &SiteSet::new()]), a);
    }

    #[test]
    fn prop_empty_price_is_always_payable(resources in arb_resources()) {
        prop_assert!(can_be_paid(&Price::new(), &resources));
    }

    #[test]
    fn prop_scaled_price_at_zero_is_identity(p in arb_price()) {
        prop_assert_eq!(scaled_price(&p, 0), p);
    }

    #[test]
    fn prop_single_reward_list_is_unchanged(rewards in arb_reward_list(6)) {
        prop_assert_eq!(sum_rewards(&rewards, &[]), rewards);
    }

    #[test]
    fn prop_merged_rewards_have_unique_kinds(
        rewards in arb_reward_list(6),
        extra in arb_reward_list(6),
    ) {
        let merged = sum_rewards(&rewards, &[extra.clone()]);
        let mut kinds: Vec<&str> = merged.iter().map(|r| r.kind.as_str()).collect();
        let total = kinds.len();
        kinds.sort_unstable();
        kinds.dedup();
        prop_assert_eq!(kinds.len(), total);

        for item in rewards.iter().chain(extra.iter()) {
            prop_assert!(merged.iter().any(|m| m.kind == item.kind));
        }
    }
}

#[test]
fn test_can_be_paid_boundary() {
    use flock_core::currency::Currency;
    use flock_core::state::{ResourceState, Resources};

    let mut resources = Resources::new();
    resources.insert(Currency::Wood, ResourceState::new(10.0));

    assert!(can_be_paid(&Price::new().with(Currency::Wood, 10.0), &resources));
    assert!(!can_be_paid(&Price::new().with(Currency::Wood, 11.0), &resources));
}
