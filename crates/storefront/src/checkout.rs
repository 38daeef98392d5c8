//! Checkout: shipping details, order summary and order placement.
//!
//! Payment is not handled here. Placing an order validates the shipping
//! form, snapshots the cart into a [`PlacedOrder`], and empties the cart.

use chrono::{DateTime, Utc};
use perfumery_core::{CartLine, Email, EmailError, OrderStatus, Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::cart::Cart;
use crate::notify::Toast;

const MIN_PHONE_DIGITS: usize = 7;
const REFERENCE_PREFIX: &str = "ORD-";
const REFERENCE_LEN: usize = 8;

/// Reasons an order cannot be placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid phone number")]
    InvalidPhone,
}

/// Shipping form as entered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// Validated shipping details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl ShippingForm {
    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first missing field, or an email or phone error.
    pub fn validate(self) -> Result<ShippingDetails, CheckoutError> {
        let first_name = required(self.first_name, "first_name")?;
        let last_name = required(self.last_name, "last_name")?;
        let email = Email::parse(&required(self.email, "email")?)?;
        let phone = required(self.phone, "phone")?;
        let address = required(self.address, "address")?;
        let city = required(self.city, "city")?;
        let postal_code = required(self.postal_code, "postal_code")?;

        let phone_chars_ok = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        if !phone_chars_ok || digits < MIN_PHONE_DIGITS {
            return Err(CheckoutError::InvalidPhone);
        }

        Ok(ShippingDetails {
            first_name,
            last_name,
            email,
            phone,
            address,
            city,
            postal_code,
        })
    }
}

impl ShippingDetails {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Single-line shipping address.
    #[must_use]
    pub fn address_line(&self) -> String {
        format!("{}, {} {}", self.address, self.city, self.postal_code)
    }
}

fn required(value: String, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CheckoutError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// One ordered product at the price it had when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.id(),
            name: line.product.name.clone(),
            quantity: line.quantity.get(),
            unit_price: line.product.price,
        }
    }
}

/// Totals shown beside the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub items: Vec<OrderItem>,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Summarize the cart. Shipping is always free.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let items: Vec<OrderItem> = cart.lines().iter().map(OrderItem::from).collect();
        let subtotal = cart.total();
        let shipping = Price::zero();
        Self {
            items,
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Display label for the shipping charge.
    #[must_use]
    pub fn shipping_label(&self) -> String {
        if self.shipping.is_zero() {
            "Free".to_string()
        } else {
            self.shipping.to_string()
        }
    }
}

/// An order handed off for fulfilment.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    /// Human-facing reference, `ORD-` followed by eight hex digits.
    pub reference: String,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub customer: String,
    pub customer_email: Email,
    pub phone: String,
    pub shipping_address: String,
    pub items: Vec<OrderItem>,
    pub total: Price,
}

/// Place an order for everything in `cart` and empty it.
///
/// # Errors
///
/// Returns an error if the cart is empty or the form is invalid. The cart
/// is left untouched on error.
#[instrument(skip_all, fields(lines = cart.len()))]
pub fn place_order(cart: &mut Cart, form: ShippingForm) -> Result<PlacedOrder, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let details = form.validate()?;
    let summary = OrderSummary::from_cart(cart);

    let order = PlacedOrder {
        reference: new_reference(),
        status: OrderStatus::Pending,
        placed_at: Utc::now(),
        customer: details.full_name(),
        customer_email: details.email.clone(),
        phone: details.phone.clone(),
        shipping_address: details.address_line(),
        items: summary.items,
        total: summary.total,
    };

    info!(reference = %order.reference, total = %order.total, "Order placed");
    cart.notifier().notify(Toast::new(
        "Order placed successfully!",
        "You will receive a confirmation email shortly.",
    ));
    cart.clear();

    Ok(order)
}

fn new_reference() -> String {
    let hex: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(REFERENCE_LEN)
        .collect();
    format!("{REFERENCE_PREFIX}{}", hex.to_uppercase())
}
