//! Pure mapping from session snapshots to what the widgets draw.
//! Nothing here mutates state; the egui panels only read these props and
//! emit `StoreCommand`s.

use crate::ops::checkout::CheckoutOutcome;
use crate::types::cart::Cart;
use crate::types::catalog::Catalog;
use crate::types::item::{Item, ItemId, LicenseTier, Price};
use crate::types::playback_state::PlaybackState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRow {
    pub tier: LicenseTier,
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCardProps {
    pub item_id: ItemId,
    pub title: String,
    pub artist: String,
    pub genre_badge: String,
    pub bpm_badge: String,
    pub tags: Vec<String>,
    pub duration: String,
    pub play_icon: PlayIcon,
    /// Drives the check mark and the disabled add button.
    pub in_cart: bool,
    pub from_price_label: String,
    pub tiers: Vec<TierRow>,
}

impl ItemCardProps {
    pub fn add_enabled(&self) -> bool {
        !self.in_cart
    }
}

pub fn price_label(currency: &str, price: Price) -> String {
    format!("{currency}{price}")
}

/// Image source for a cover: URIs pass through, file paths get `file://`.
pub fn cover_uri(image: &str) -> String {
    if image.contains("://") {
        image.to_string()
    } else {
        format!("file://{image}")
    }
}

pub fn item_card(
    item: &Item,
    playback: &PlaybackState,
    cart: &Cart,
    currency: &str,
) -> ItemCardProps {
    ItemCardProps {
        item_id: item.id,
        title: item.title.clone(),
        artist: item.artist.clone(),
        genre_badge: item.genre.clone(),
        bpm_badge: format!("{} BPM", item.bpm),
        tags: item.tags.clone(),
        duration: item.duration.clone(),
        play_icon: if playback.is_playing_item(item.id) {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        },
        in_cart: cart.contains(item.id),
        from_price_label: format!("from {}", price_label(currency, item.base_price())),
        tiers: LicenseTier::ALL
            .iter()
            .map(|&tier| TierRow {
                tier,
                price_label: price_label(currency, item.price(tier)),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBarProps {
    pub item_id: ItemId,
    pub title: String,
    pub artist: String,
    /// Cover image source, ready for `egui::Image`.
    pub image: Option<String>,
    pub play_icon: PlayIcon,
    pub in_cart: bool,
    pub price_label: String,
    pub progress_percent: f32,
    pub elapsed_label: String,
    pub total_label: String,
    pub volume_percent: f32,
    pub loop_active: bool,
}

/// The player bar exists only while an item is loaded.
pub fn player_bar(
    playback: &PlaybackState,
    catalog: &Catalog,
    cart: &Cart,
    currency: &str,
) -> Option<PlayerBarProps> {
    let item = catalog.get(playback.loaded_item?)?;
    Some(PlayerBarProps {
        item_id: item.id,
        title: item.title.clone(),
        artist: item.artist.clone(),
        image: item.image.as_deref().map(cover_uri),
        play_icon: if playback.is_playing {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        },
        in_cart: cart.contains(item.id),
        price_label: price_label(currency, item.base_price()),
        progress_percent: playback.progress_percent,
        elapsed_label: playback.elapsed_label.clone(),
        total_label: playback
            .total_label
            .clone()
            .unwrap_or_else(|| item.duration.clone()),
        volume_percent: playback.volume_percent,
        loop_active: playback.is_looping,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartBadgeProps {
    pub count: usize,
}

impl CartBadgeProps {
    pub fn visible(&self) -> bool {
        self.count > 0
    }
}

pub fn cart_badge(cart: &Cart) -> CartBadgeProps {
    CartBadgeProps { count: cart.len() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineProps {
    pub item_id: ItemId,
    pub title: String,
    /// Cover image source, ready for `egui::Image`.
    pub image: Option<String>,
    pub tier: LicenseTier,
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanelProps {
    pub description: String,
    pub lines: Vec<CartLineProps>,
    /// None when the cart is empty; the total and checkout button are hidden.
    pub total_label: Option<String>,
}

impl CartPanelProps {
    pub fn checkout_visible(&self) -> bool {
        self.total_label.is_some()
    }
}

pub fn cart_panel(cart: &Cart, catalog: &Catalog, currency: &str) -> CartPanelProps {
    let description = if cart.is_empty() {
        "Your cart is empty".to_string()
    } else {
        format!("Items in cart: {}", cart.len())
    };
    let lines = cart
        .entries()
        .iter()
        .filter_map(|entry| {
            let item = catalog.get(entry.item_id)?;
            Some(CartLineProps {
                item_id: entry.item_id,
                title: item.title.clone(),
                image: item.image.as_deref().map(cover_uri),
                tier: entry.tier,
                price_label: price_label(currency, entry.unit_price),
            })
        })
        .collect();
    CartPanelProps {
        description,
        lines,
        total_label: (!cart.is_empty()).then(|| price_label(currency, cart.total())),
    }
}

/// One-line status shown under the cart after a checkout attempt.
pub fn checkout_notice(outcome: Option<&CheckoutOutcome>) -> Option<String> {
    match outcome? {
        CheckoutOutcome::Completed { order_id } => Some(format!("Order {order_id} placed")),
        CheckoutOutcome::Declined { reason } => Some(format!("Checkout declined: {reason}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::transport::PlaybackController;

    fn fixture() -> (Catalog, PlaybackController, Cart) {
        (Catalog::default(), PlaybackController::default(), Cart::new())
    }

    #[test]
    fn test_card_shows_pause_only_for_playing_item() {
        let (catalog, mut player, cart) = fixture();
        let a = catalog.get(ItemId(1)).unwrap();
        let b = catalog.get(ItemId(2)).unwrap();

        player.toggle_play(a);
        assert_eq!(item_card(a, player.state(), &cart, "₽").play_icon, PlayIcon::Pause);
        assert_eq!(item_card(b, player.state(), &cart, "₽").play_icon, PlayIcon::Play);

        player.toggle_play(a);
        assert_eq!(item_card(a, player.state(), &cart, "₽").play_icon, PlayIcon::Play);
    }

    #[test]
    fn test_card_disables_add_when_in_cart() {
        let (catalog, player, mut cart) = fixture();
        let a = catalog.get(ItemId(1)).unwrap();
        let props = item_card(a, player.state(), &cart, "₽");
        assert!(props.add_enabled());
        assert_eq!(props.from_price_label, "from ₽2500");
        assert_eq!(props.bpm_badge, "140 BPM");
        assert_eq!(props.tiers[2].price_label, "₽25000");

        cart.add(a);
        let props = item_card(a, player.state(), &cart, "₽");
        assert!(props.in_cart);
        assert!(!props.add_enabled());
    }

    #[test]
    fn test_cover_uri_wraps_paths_only() {
        assert_eq!(cover_uri("/srv/covers/a.jpg"), "file:///srv/covers/a.jpg");
        assert_eq!(cover_uri("https://cdn.example/a.jpg"), "https://cdn.example/a.jpg");
    }

    #[test]
    fn test_player_bar_hidden_when_idle() {
        let (catalog, player, cart) = fixture();
        assert!(player_bar(player.state(), &catalog, &cart, "₽").is_none());
    }

    #[test]
    fn test_player_bar_falls_back_to_catalog_duration() {
        let (catalog, mut player, cart) = fixture();
        player.toggle_play(catalog.get(ItemId(5)).unwrap());
        player.toggle_loop();
        let bar = player_bar(player.state(), &catalog, &cart, "₽").unwrap();
        assert_eq!(bar.title, "Midnight Groove");
        assert_eq!(bar.total_label, "4:32");
        assert_eq!(bar.elapsed_label, "0:00");
        assert_eq!(bar.play_icon, PlayIcon::Pause);
        assert_eq!(bar.price_label, "₽3500");
        assert!(bar.loop_active);
        assert_eq!(bar.volume_percent, 75.0);
        assert!(bar.image.unwrap().starts_with("file://"));
    }

    #[test]
    fn test_cart_badge_and_panel() {
        let (catalog, _, mut cart) = fixture();
        assert!(!cart_badge(&cart).visible());
        let empty = cart_panel(&cart, &catalog, "₽");
        assert_eq!(empty.description, "Your cart is empty");
        assert!(!empty.checkout_visible());

        cart.add(catalog.get(ItemId(1)).unwrap());
        cart.add(catalog.get(ItemId(2)).unwrap());
        assert_eq!(cart_badge(&cart).count, 2);
        let panel = cart_panel(&cart, &catalog, "₽");
        assert_eq!(panel.description, "Items in cart: 2");
        assert_eq!(panel.lines[1].title, "Street Dreams");
        assert_eq!(panel.total_label.as_deref(), Some("₽5500"));
        assert!(panel.checkout_visible());
    }

    #[test]
    fn test_checkout_notice() {
        assert_eq!(checkout_notice(None), None);
        let declined = CheckoutOutcome::Declined {
            reason: "limit".to_string(),
        };
        assert_eq!(
            checkout_notice(Some(&declined)).as_deref(),
            Some("Checkout declined: limit")
        );
    }
}
