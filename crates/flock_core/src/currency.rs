//! Closed enumerations of currencies and site types.
//!
//! Content tables and save files spell these as plain strings. Parsing
//! happens once at the deserialization boundary, so every [`Price`] and
//! [`SiteSet`] in memory only ever holds known keys.
//!
//! [`Price`]: crate::price::Price
//! [`SiteSet`]: crate::price::SiteSet

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A resource the flock can stockpile and spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    /// Gathered from forests.
    Wood,
    /// Knappable stone.
    Flint,
    /// Crafted from flint.
    StoneTools,
    /// Stories told around the fire; the research currency.
    Folklore,
    /// Foraged greens.
    RawVegetables,
    /// Cooked greens.
    Vegetables,
    /// Hunted meat.
    Meat,
    /// Tanned hides.
    Leather,
}

impl Currency {
    /// Every currency, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Wood,
        Self::Flint,
        Self::StoneTools,
        Self::Folklore,
        Self::RawVegetables,
        Self::Vegetables,
        Self::Meat,
        Self::Leather,
    ];

    /// Name used in content tables and save files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Flint => "flint",
            Self::StoneTools => "stone tools",
            Self::Folklore => "folklore",
            Self::RawVegetables => "raw vegetables",
            Self::Vegetables => "vegetables",
            Self::Meat => "meat",
            Self::Leather => "leather",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| GameError::InvalidCurrency(s.to_string()))
    }
}

impl TryFrom<String> for Currency {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.as_str().to_string()
    }
}

/// A kind of land a building can be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SiteType {
    /// Wooded land.
    Forest,
    /// Open grassland.
    Meadow,
    /// Exposed rock.
    Quarry,
    /// Riverbank.
    River,
    /// Sheltered cave.
    Cave,
}

impl SiteType {
    /// Every site type, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Forest,
        Self::Meadow,
        Self::Quarry,
        Self::River,
        Self::Cave,
    ];

    /// Name used in content tables and save files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::Meadow => "meadow",
            Self::Quarry => "quarry",
            Self::River => "river",
            Self::Cave => "cave",
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GameError::InvalidSiteType(s.to_string()))
    }
}

impl TryFrom<String> for SiteType {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SiteType> for String {
    fn from(value: SiteType) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_round_trips_through_name() {
        for currency in Currency::ALL {
            assert_eq!(currency.as_str().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let err = "gold".parse::<Currency>().unwrap_err();
        assert!(matches!(err, GameError::InvalidCurrency(ref name) if name == "gold"));
    }

    #[test]
    fn test_currency_names_contain_spaces() {
        assert_eq!(Currency::StoneTools.to_string(), "stone tools");
        assert_eq!(
            "raw vegetables".parse::<Currency>().unwrap(),
            Currency::RawVegetables
        );
    }

    #[test]
    fn test_site_type_parse() {
        assert_eq!("quarry".parse::<SiteType>().unwrap(), SiteType::Quarry);
        assert!(matches!(
            "swamp".parse::<SiteType>(),
            Err(GameError::InvalidSiteType(_))
        ));
    }

    #[test]
    fn test_currency_json_uses_content_spelling() {
        let json = serde_json::to_string(&Currency::StoneTools).unwrap();
        assert_eq!(json, "\"stone tools\"");

        let bad: std::result::Result<Currency, _> = serde_json::from_str("\"gold\"");
        assert!(bad.is_err());
    }
}
