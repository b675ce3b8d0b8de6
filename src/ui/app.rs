use eframe::egui;
use std::time::Duration;

use crate::types::playback_state::Transport;
use crate::types::session::{StoreCommand, StoreSession};
use crate::ui::props;
use crate::ui::{cart_panel, catalog_view, player_bar};

/// Repaint interval while audio is playing, so the scrubber keeps moving.
const PLAYING_REPAINT: Duration = Duration::from_millis(100);

pub struct BeatStoreApp {
    pub session: StoreSession,
    pub cart_open: bool,
}

impl BeatStoreApp {
    pub fn new(session: StoreSession) -> Self {
        Self {
            session,
            cart_open: false,
        }
    }
}

impl eframe::App for BeatStoreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.tick();

        let session = &self.session;
        let playback = session.playback();
        let currency = session.currency();
        let mut commands: Vec<StoreCommand> = Vec::new();

        // Header with the cart toggle
        egui::TopBottomPanel::top("header_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("BEAT STORE").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let badge = props::cart_badge(session.cart());
                    let label = if badge.visible() {
                        format!("🛒 {}", badge.count)
                    } else {
                        "🛒".to_string()
                    };
                    if ui.selectable_label(self.cart_open, label).clicked() {
                        self.cart_open = !self.cart_open;
                    }
                });
            });
        });

        let bar = props::player_bar(playback, session.catalog(), session.cart(), currency);
        if let Some(bar) = bar {
            egui::TopBottomPanel::top("player_panel").show(ctx, |ui| {
                commands.extend(player_bar::player_bar(ui, &bar));
            });
        }

        egui::SidePanel::right("cart_panel")
            .min_width(300.0)
            .show_animated(ctx, self.cart_open, |ui| {
                let panel = props::cart_panel(session.cart(), session.catalog(), currency);
                let notice = props::checkout_notice(session.last_checkout());
                commands.extend(cart_panel::cart_panel(ui, &panel, notice.as_deref()));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                catalog_view::license_section(ui);
                ui.add_space(16.0);
                let cards: Vec<_> = session
                    .catalog()
                    .items()
                    .iter()
                    .map(|item| props::item_card(item, playback, session.cart(), currency))
                    .collect();
                commands.extend(catalog_view::catalog_grid(ui, &cards));
            });
        });

        for command in commands {
            self.session.dispatch(command);
        }

        if matches!(self.session.playback().transport(), Transport::Playing(_)) {
            ctx.request_repaint_after(PLAYING_REPAINT);
        }
    }
}
