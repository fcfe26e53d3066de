//! Outbound fulfillment order payload (Printful order API)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default shipping method for draft orders
pub const SHIPPING_STANDARD: &str = "STANDARD";

/// A fulfillment order ready for submission to Printful.
///
/// Submitted in draft mode; confirmation for production is a separate,
/// explicitly invoked operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftOrder {
    /// Caller-supplied id, unique per logical order. Derived
    /// deterministically from the source order id so a redelivered webhook
    /// retries the same submission instead of minting a new one.
    pub external_id: String,
    /// Shipping method code
    pub shipping: String,
    pub recipient: Recipient,
    /// Invariant: non-empty before submission
    pub items: Vec<FulfillmentItem>,
    /// Retail cost summary, used for customs declarations and packing slips
    pub retail_costs: RetailCosts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipient {
    pub name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub state_code: Option<String>,
    pub country_code: String,
    pub zip: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FulfillmentItem {
    /// Numeric Printful variant id, decoded from the source SKU
    pub variant_id: i64,
    pub quantity: u32,
    /// Price the customer paid, for the packing slip
    pub retail_price: Decimal,
    /// Product name as it should appear on the packing slip
    pub name: String,
    /// Print files. Empty for variants with pre-associated designs.
    #[serde(default)]
    pub files: Vec<FileRef>,
}

/// Reference to a design file attached to a fulfillment item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRef {
    /// File role, e.g. "default" for the main print file
    #[serde(rename = "type")]
    pub file_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetailCosts {
    pub currency: String,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
}
