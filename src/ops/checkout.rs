use serde::Serialize;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::types::cart::Cart;
use crate::types::catalog::Catalog;
use crate::types::item::{ItemId, LicenseTier, Price};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLine {
    pub item_id: ItemId,
    pub title: String,
    pub tier: LicenseTier,
    pub price: Price,
}

/// Snapshot of the cart handed to the checkout collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub lines: Vec<CheckoutLine>,
    pub total: Price,
    pub currency: String,
}

impl CheckoutRequest {
    pub fn from_cart(cart: &Cart, catalog: &Catalog, currency: &str) -> Self {
        let lines = cart
            .entries()
            .iter()
            .map(|entry| CheckoutLine {
                item_id: entry.item_id,
                title: catalog
                    .get(entry.item_id)
                    .map(|item| item.title.clone())
                    .unwrap_or_default(),
                tier: entry.tier,
                price: entry.unit_price,
            })
            .collect();
        Self {
            lines,
            total: cart.total(),
            currency: currency.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Completed { order_id: Uuid },
    Declined { reason: String },
}

/// Receives the cart on "proceed to checkout". Payment happens elsewhere.
pub trait CheckoutCollaborator {
    fn submit(&mut self, request: &CheckoutRequest) -> Result<CheckoutOutcome>;
}

/// Logs the order as JSON and accepts it.
#[derive(Debug, Default)]
pub struct LogCheckout;

impl CheckoutCollaborator for LogCheckout {
    fn submit(&mut self, request: &CheckoutRequest) -> Result<CheckoutOutcome> {
        let order =
            serde_json::to_string(request).map_err(|e| StoreError::Checkout(e.to_string()))?;
        let order_id = Uuid::new_v4();
        log::info!("Order {order_id}: {order}");
        Ok(CheckoutOutcome::Completed { order_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_mirrors_cart() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add(catalog.get(ItemId(3)).unwrap());
        cart.add_with_tier(catalog.get(ItemId(1)).unwrap(), LicenseTier::Stems);

        let request = CheckoutRequest::from_cart(&cart, &catalog, "₽");
        assert_eq!(request.total, 2000 + 7500);
        assert_eq!(request.lines.len(), 2);
        assert_eq!(request.lines[0].title, "Neon Nights");
        assert_eq!(request.lines[1].tier, LicenseTier::Stems);
        assert_eq!(request.lines[1].price, 7500);
    }

    #[test]
    fn test_request_serializes_tiers_lowercase() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add(catalog.get(ItemId(1)).unwrap());
        let request = CheckoutRequest::from_cart(&cart, &catalog, "₽");
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["lines"][0]["tier"], "wav");
        assert_eq!(json["total"], 2500);
    }

    #[test]
    fn test_log_checkout_completes() {
        let request = CheckoutRequest {
            lines: Vec::new(),
            total: 0,
            currency: "₽".to_string(),
        };
        let outcome = LogCheckout.submit(&request).unwrap();
        assert!(matches!(outcome, CheckoutOutcome::Completed { .. }));
    }
}
