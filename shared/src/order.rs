//! Inbound storefront order payload (Shopify order webhook)
//!
//! Explicit schema for the order-created webhook body. Field presence is
//! enforced here at the trust boundary instead of trusting the payload shape
//! implicitly downstream: a payload that does not deserialize is rejected
//! with 400 after signature verification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A Shopify order as delivered by the `orders/create` webhook.
///
/// Only the fields the bridge actually consumes are modeled; unknown fields
/// are ignored by serde.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorefrontOrder {
    /// Numeric Shopify order id
    pub id: i64,
    /// Human-facing order name, e.g. "#1001"
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub customer: Option<Customer>,
    /// Absent for orders without a shipment (e.g. in-store pickup)
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    pub line_items: Vec<OrderLineItem>,
    pub currency: String,
    /// Shopify sends money fields as decimal strings
    pub subtotal_price: Decimal,
    #[serde(default)]
    pub shipping_lines: Vec<ShippingLine>,
    pub total_tax: Decimal,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Customer {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub default_address: Option<DefaultAddress>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultAddress {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub province_code: Option<String>,
    pub country_code: String,
    pub zip: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderLineItem {
    /// Vendor tag; routes the item to the fulfillment provider
    #[serde(default)]
    pub vendor: Option<String>,
    /// SKU carrying the encoded provider variant id
    #[serde(default)]
    pub sku: Option<String>,
    pub title: String,
    /// Unit price the customer paid
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShippingLine {
    pub price: Decimal,
}
