use crate::backend::playback_bridge::{MediaBackend, PlaybackBridge};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::ops::checkout::{CheckoutCollaborator, CheckoutOutcome, CheckoutRequest};
use crate::ops::transport::PlaybackController;
use crate::types::cart::Cart;
use crate::types::catalog::Catalog;
use crate::types::item::{Item, ItemId, LicenseTier};
use crate::types::playback_state::PlaybackState;

/// A discrete user action coming from the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreCommand {
    TogglePlay(ItemId),
    Seek(f32),
    SkipBackward,
    SkipForward,
    SetVolume(f32),
    ToggleLoop,
    AddToCart(ItemId),
    AddToCartWithTier(ItemId, LicenseTier),
    SetCartTier(ItemId, LicenseTier),
    RemoveFromCart(ItemId),
    Checkout,
}

/// Ids come from the catalog the view was built from, so a miss here is an
/// integration bug rather than user error.
fn lookup(catalog: &Catalog, id: ItemId) -> Option<&Item> {
    let item = catalog.get(id);
    debug_assert!(item.is_some(), "item {id} is not in the catalog");
    if item.is_none() {
        log::error!("Ignoring command for unknown item {id}");
    }
    item
}

/// StoreSession groups the immutable catalog with the two session state
/// owners. Neither the player nor the cart sees the other; the view reads
/// them through snapshots and changes them only through `dispatch`.
pub struct StoreSession {
    catalog: Catalog,
    player: PlaybackController,
    cart: Cart,
    bridge: PlaybackBridge,
    checkout: Box<dyn CheckoutCollaborator>,
    currency: String,
    last_checkout: Option<CheckoutOutcome>,
}

impl std::fmt::Debug for StoreSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSession")
            .field("catalog", &self.catalog)
            .field("player", &self.player)
            .field("cart", &self.cart)
            .field("last_checkout", &self.last_checkout)
            .finish_non_exhaustive()
    }
}

impl StoreSession {
    pub fn new(
        catalog: Catalog,
        config: &StoreConfig,
        backend: Box<dyn MediaBackend>,
        checkout: Box<dyn CheckoutCollaborator>,
    ) -> Self {
        let player = PlaybackController::new(config.initial_volume, config.skip_step);
        let mut bridge = PlaybackBridge::new(backend);
        bridge.sync(player.state(), &catalog);
        StoreSession {
            catalog,
            player,
            cart: Cart::new(),
            bridge,
            checkout,
            currency: config.currency_symbol.clone(),
            last_checkout: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn playback(&self) -> &PlaybackState {
        self.player.state()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn last_checkout(&self) -> Option<&CheckoutOutcome> {
        self.last_checkout.as_ref()
    }

    /// Applies one command and brings the media backend in line with the
    /// resulting playback state.
    pub fn dispatch(&mut self, command: StoreCommand) {
        log::debug!("Dispatch {command:?}");
        match command {
            StoreCommand::TogglePlay(id) => {
                if let Some(item) = lookup(&self.catalog, id) {
                    self.player.toggle_play(item);
                }
            }
            StoreCommand::Seek(percent) => self.player.seek(percent),
            StoreCommand::SkipBackward => self.player.skip_backward(),
            StoreCommand::SkipForward => self.player.skip_forward(),
            StoreCommand::SetVolume(percent) => self.player.set_volume(percent),
            StoreCommand::ToggleLoop => self.player.toggle_loop(),
            StoreCommand::AddToCart(id) => {
                if let Some(item) = lookup(&self.catalog, id) {
                    self.cart.add(item);
                }
            }
            StoreCommand::AddToCartWithTier(id, tier) => {
                if let Some(item) = lookup(&self.catalog, id) {
                    self.cart.add_with_tier(item, tier);
                }
            }
            StoreCommand::SetCartTier(id, tier) => {
                if let Some(item) = lookup(&self.catalog, id) {
                    self.cart.set_tier(item, tier);
                }
            }
            StoreCommand::RemoveFromCart(id) => {
                self.cart.remove(id);
            }
            StoreCommand::Checkout => {
                if let Err(e) = self.proceed_to_checkout() {
                    log::warn!("Checkout failed: {e}");
                }
            }
        }
        self.bridge.sync(self.player.state(), &self.catalog);
    }

    /// Pulls the latest position report from the media backend.
    pub fn tick(&mut self) {
        let player = &mut self.player;
        self.bridge.pump(|report| {
            player.apply_report(report);
            player.state().clone()
        });
    }

    /// Hands the cart to the checkout collaborator. The cart is emptied only
    /// when the order completes. Returns None for an empty cart.
    pub fn proceed_to_checkout(&mut self) -> Result<Option<CheckoutOutcome>> {
        if self.cart.is_empty() {
            return Ok(None);
        }
        let request = CheckoutRequest::from_cart(&self.cart, &self.catalog, &self.currency);
        log::info!(
            "Checking out {} item(s), total {}{}",
            request.lines.len(),
            self.currency,
            request.total
        );
        let outcome = self.checkout.submit(&request)?;
        match &outcome {
            CheckoutOutcome::Completed { order_id } => {
                log::info!("Order {order_id} completed, clearing cart");
                self.cart.clear();
            }
            CheckoutOutcome::Declined { reason } => {
                log::warn!("Checkout declined: {reason}");
            }
        }
        self.last_checkout = Some(outcome.clone());
        Ok(Some(outcome))
    }
}
