//! Reward bundles and their aggregation.

use serde::{Deserialize, Serialize};

use crate::price::{add_prices, add_site_sets, Price, SiteSet};

/// A tagged bundle of resources and sites granted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardItem {
    /// Reward tag; items with the same tag merge.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resources granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Price>,
    /// Sites granted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sites: Option<SiteSet>,
}

impl RewardItem {
    /// Create an empty reward with the given tag.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            resources: None,
            sites: None,
        }
    }

    /// Attach granted resources.
    #[must_use]
    pub fn with_resources(mut self, resources: Price) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Attach granted sites.
    #[must_use]
    pub fn with_sites(mut self, sites: SiteSet) -> Self {
        self.sites = Some(sites);
        self
    }

    fn absorb(&mut self, other: &Self) {
        self.resources = add_optional(self.resources.take(), other.resources.as_ref(), add_prices);
        self.sites = add_optional(self.sites.take(), other.sites.as_ref(), add_site_sets);
    }
}

/// Combine two optional values, treating `None` as "nothing to add".
fn add_optional<T: Clone>(a: Option<T>, b: Option<&T>, adder: fn(&T, &T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(adder(&a, b)),
        (Some(a), None) => Some(a),
        (None, b) => b.cloned(),
    }
}

/// Merge reward lists.
///
/// With no `others` the first list comes back unchanged. Otherwise items
/// are grouped by tag in order of first appearance, and each group's
/// resources and sites are summed into a single entry.
#[must_use]
pub fn sum_rewards(reward: &[RewardItem], others: &[Vec<RewardItem>]) -> Vec<RewardItem> {
    if others.is_empty() {
        return reward.to_vec();
    }

    let mut merged: Vec<RewardItem> = Vec::new();
    for item in reward.iter().chain(others.iter().flatten()) {
        match merged.iter_mut().find(|m| m.kind == item.kind) {
            Some(existing) => existing.absorb(item),
            None => merged.push(item.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{Currency, SiteType};

    fn grant(kind: &str, wood: f64) -> RewardItem {
        RewardItem::new(kind).with_resources(Price::new().with(Currency::Wood, wood))
    }

    #[test]
    fn test_single_list_is_returned_unchanged() {
        let list = vec![grant("expedition", 5.0), grant("expedition", 7.0)];
        assert_eq!(sum_rewards(&list, &[]), list);
    }

    #[test]
    fn test_same_type_merges() {
        let a = vec![grant("expedition", 5.0)];
        let b = vec![RewardItem::new("expedition")
            .with_resources(Price::new().with(Currency::Wood, 2.0))
            .with_sites(SiteSet::new().with(SiteType::Forest, 1))];

        let merged = sum_rewards(&a, &[b]);
        assert_eq!(merged.len(), 1);
        let resources = merged[0].resources.as_ref().unwrap();
        assert_eq!(resources.amount(Currency::Wood), 7.0);
        assert_eq!(merged[0].sites.as_ref().unwrap().quantity(SiteType::Forest), 1);
    }

    #[test]
    fn test_distinct_types_stay_separate() {
        let merged = sum_rewards(&[grant("expedition", 5.0)], &[vec![grant("trade", 1.0)]]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].kind, "expedition");
        assert_eq!(merged[1].kind, "trade");
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let a = vec![grant("expedition", 5.0)];
        let b = vec![grant("expedition", 1.0)];
        let _ = sum_rewards(&a, &[b.clone()]);
        assert_eq!(a[0].resources.as_ref().unwrap().amount(Currency::Wood), 5.0);
        assert_eq!(b[0].resources.as_ref().unwrap().amount(Currency::Wood), 1.0);
    }

    #[test]
    fn test_reward_json_uses_type_tag() {
        let json = r#"{"type": "expedition", "sites": {"cave": 2}}"#;
        let item: RewardItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, "expedition");
        assert!(item.resources.is_none());
        assert_eq!(item.sites.unwrap().quantity(SiteType::Cave), 2);
    }
}
