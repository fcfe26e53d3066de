//! Order transformer: storefront order -> Printful draft order
//!
//! Pure mapping, no I/O. Items are routed to Printful by vendor tag and a
//! SKU-encoded variant id; an order where nothing survives the filter is a
//! valid no-op rather than an error.

use rust_decimal::Decimal;

use shared::fulfillment::{DraftOrder, FulfillmentItem, Recipient, RetailCosts, SHIPPING_STANDARD};
use shared::order::StorefrontOrder;

/// Vendor tag marking a line item as Printful-fulfilled
pub const PRINTFUL_VENDOR: &str = "Printful_DS";

/// SKU convention: the provider variant id follows this marker
pub const SKU_MARKER: &str = "PFUL-";

/// Sentinel used when neither the customer nor the shipping address carries
/// an email. Callers must treat it as "unknown", not as deliverable.
pub const PLACEHOLDER_EMAIL: &str = "no-reply@example.com";

const PLACEHOLDER_NAME: &str = "Valued Customer";

/// Decode the Printful variant id from a storefront SKU.
///
/// The convention is `PFUL-<variant id>` (possibly with a leading prefix
/// before the marker, e.g. `MUG-PFUL-501`). Anything after the digits is
/// ignored. Returns `None` for SKUs that do not carry a usable id; the
/// caller skips those items instead of submitting a null variant.
pub fn decode_printful_variant(sku: &str) -> Option<i64> {
    let (_, rest) = sku.split_once(SKU_MARKER)?;
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    digits.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Transform a storefront order into a Printful draft order.
///
/// Returns `None` when there is nothing to submit: no shipping address
/// (fulfillment is shipment-bound) or no eligible items. Per-item SKU
/// decoding failures skip the item and keep the rest of the order —
/// partial fulfillment beats total silent failure.
pub fn transform_order(order: &StorefrontOrder) -> Option<DraftOrder> {
    let Some(shipping) = &order.shipping_address else {
        tracing::warn!(
            order_id = order.id,
            "Order has no shipping address, not forwarding to Printful"
        );
        return None;
    };

    let mut items = Vec::new();
    for item in &order.line_items {
        if item.vendor.as_deref() != Some(PRINTFUL_VENDOR) {
            continue;
        }
        if item.quantity == 0 {
            tracing::warn!(order_id = order.id, title = %item.title, "Skipping zero-quantity item");
            continue;
        }

        let Some(variant_id) = item.sku.as_deref().and_then(decode_printful_variant) else {
            tracing::warn!(
                order_id = order.id,
                sku = item.sku.as_deref().unwrap_or(""),
                title = %item.title,
                "Could not extract Printful variant id from SKU, skipping item"
            );
            continue;
        };

        items.push(FulfillmentItem {
            variant_id,
            quantity: item.quantity,
            retail_price: item.price,
            name: item.title.clone(),
            // Designs are pre-associated with the variant on Printful
            files: Vec::new(),
        });
    }

    if items.is_empty() {
        tracing::info!(order_id = order.id, "No Printful items in order");
        return None;
    }

    let customer = order.customer.as_ref();

    let email = customer
        .and_then(|c| c.email.clone())
        .or_else(|| shipping.email.clone())
        .unwrap_or_else(|| {
            tracing::warn!(
                order_id = order.id,
                "Order has no customer or shipping address email, using placeholder"
            );
            PLACEHOLDER_EMAIL.to_string()
        });

    let shipping_name = format!(
        "{} {}",
        shipping.first_name.as_deref().unwrap_or(""),
        shipping.last_name.as_deref().unwrap_or("")
    )
    .trim()
    .to_string();
    let name = if !shipping_name.is_empty() {
        shipping_name
    } else {
        customer
            .and_then(|c| c.default_address.as_ref())
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| PLACEHOLDER_NAME.to_string())
    };

    let phone = shipping
        .phone
        .clone()
        .or_else(|| customer.and_then(|c| c.phone.clone()));

    Some(DraftOrder {
        // Deterministic: a redelivered webhook re-submits the same id
        // instead of minting a new one and double-fulfilling.
        external_id: format!("shopify-{}", order.id),
        shipping: SHIPPING_STANDARD.to_string(),
        recipient: Recipient {
            name,
            address1: shipping.address1.clone(),
            address2: shipping.address2.clone(),
            city: shipping.city.clone(),
            state_code: shipping.province_code.clone(),
            country_code: shipping.country_code.clone(),
            zip: shipping.zip.clone(),
            email,
            phone,
        },
        items,
        retail_costs: RetailCosts {
            currency: order.currency.clone(),
            subtotal: order.subtotal_price,
            shipping: order
                .shipping_lines
                .first()
                .map(|l| l.price)
                .unwrap_or(Decimal::ZERO),
            tax: order.total_tax,
        },
    })
}
