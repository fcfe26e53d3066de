//! Cart (remote checkout) domain types
//!
//! The remote checkout resource is the single source of truth; these types
//! are the bridge's view of one snapshot. The snapshot is re-read on every
//! mutation and never cached across requests.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item the caller wants to add to a cart.
///
/// Carries no line-item id: the remote service assigns one when the line is
/// first written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItemInput {
    pub variant_id: i64,
    pub quantity: u32,
    /// Custom attributes (e.g. "Milk" -> "Oat"). A `BTreeMap` so two
    /// attribute sets with the same pairs compare equal regardless of the
    /// order the caller listed them in.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// One line of a cart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Remote line-item id. `None` for lines not yet written to the remote
    /// service; the replacement write creates them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub variant_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Unit price as reported by the remote service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl CartLine {
    /// Identity key for merge purposes.
    ///
    /// Deliberately NOT the remote line-item id: incoming intents have no id
    /// yet, so "the same logical item" is decided by variant + attributes.
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey {
            variant_id: self.variant_id,
            properties: self.properties.clone(),
        }
    }
}

impl From<CartItemInput> for CartLine {
    fn from(input: CartItemInput) -> Self {
        Self {
            id: None,
            variant_id: input.variant_id,
            quantity: input.quantity,
            properties: input.properties,
            price: None,
        }
    }
}

/// The (variant, normalized attribute set) pair that decides whether two
/// cart lines represent the same logical item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    pub variant_id: i64,
    pub properties: BTreeMap<String, String>,
}

/// A full cart snapshot as returned by the remote checkout service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Remote checkout token
    pub id: String,
    pub line_items: Vec<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,
    /// URL where the customer completes checkout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(variant_id: i64, props: &[(&str, &str)]) -> CartLine {
        CartLine {
            id: None,
            variant_id,
            quantity: 1,
            properties: props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            price: None,
        }
    }

    #[test]
    fn canonical_key_ignores_attribute_order() {
        let a = line(10, &[("Milk", "Oat"), ("Size", "L")]);
        let b = line(10, &[("Size", "L"), ("Milk", "Oat")]);
        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn canonical_key_distinguishes_attribute_values() {
        let a = line(10, &[("Size", "L")]);
        let b = line(10, &[("Size", "M")]);
        let c = line(11, &[("Size", "L")]);
        assert_ne!(a.canonical_key(), b.canonical_key());
        assert_ne!(a.canonical_key(), c.canonical_key());
    }
}
