//! Product, carrier and station identifier parsing
//!
//! Producers encode a product's category and variant in one string such as
//! `assembly_battery_blue`. These helpers split those strings into a
//! [`ProductKey`] once, at the edge, so the scorers only ever compare keys.

use super::types::{ANY_CARRIER, KNOWN_CARRIERS, KNOWN_STATIONS};

const ASSEMBLY_MARKER: &str = "assembly_";

/// Category and variant parts of a product identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductKey {
    pub category: String,
    pub variant: String,
}

impl ProductKey {
    pub fn new(category: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            variant: variant.into(),
        }
    }

    /// Kitting convention: everything before the last underscore is the
    /// category, the rest is the variant.
    ///
    /// `assembly_battery_blue` -> (`assembly_battery`, `blue`). An identifier
    /// without an underscore is all category.
    pub fn from_kitting_identifier(identifier: &str) -> Self {
        match identifier.rsplit_once('_') {
            Some((category, variant)) => Self::new(category, variant),
            None => Self::new(identifier, ""),
        }
    }

    /// Assembly convention: the category is the token right after
    /// `assembly_`, the variant is the token after the last underscore.
    ///
    /// `assembly_battery_blue` -> (`battery`, `blue`). Without the marker the
    /// whole identifier is scanned the same way. A lone token has no variant.
    pub fn from_assembly_identifier(identifier: &str) -> Self {
        let tail = match identifier.find(ASSEMBLY_MARKER) {
            Some(start) => &identifier[start + ASSEMBLY_MARKER.len()..],
            None => identifier,
        };
        match tail.split_once('_') {
            Some((category, rest)) => {
                let variant = rest.rsplit('_').next().unwrap_or(rest);
                Self::new(category, variant)
            }
            None => Self::new(tail, ""),
        }
    }

    pub fn same_category(&self, other: &ProductKey) -> bool {
        self.category == other.category
    }
}

/// Carrier requested by an expected kitting shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierTarget {
    Any,
    Carrier(&'static str),
}

/// Parse an expected carrier; `None` when the identifier is not recognized
pub fn parse_carrier_target(carrier: &str) -> Option<CarrierTarget> {
    if carrier == ANY_CARRIER {
        return Some(CarrierTarget::Any);
    }
    KNOWN_CARRIERS
        .iter()
        .find(|known| **known == carrier)
        .map(|known| CarrierTarget::Carrier(*known))
}

/// Parse a station identifier; `None` when it is not one of the fixed stations
pub fn parse_station(station: &str) -> Option<&'static str> {
    KNOWN_STATIONS.iter().find(|known| **known == station).copied()
}

impl CarrierTarget {
    pub fn accepts(&self, detected_carrier: &str) -> bool {
        match self {
            CarrierTarget::Any => true,
            CarrierTarget::Carrier(expected) => *expected == detected_carrier,
        }
    }
}
