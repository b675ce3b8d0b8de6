use eframe::egui;

use crate::types::catalog::license_types;
use crate::types::session::StoreCommand;
use crate::ui::props::ItemCardProps;

const CARD_WIDTH: f32 = 320.0;

/// Draws the three license tier cards.
pub fn license_section(ui: &mut egui::Ui) {
    ui.heading("License types");
    ui.label("Pick the tier that fits your project");
    ui.add_space(8.0);
    ui.columns(license_types().len(), |columns| {
        for (ui, license) in columns.iter_mut().zip(license_types()) {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(license.name).strong().size(16.0));
                    ui.label(egui::RichText::new(license.description).small());
                    ui.add_space(4.0);
                    for feature in license.features {
                        ui.label(format!("✔ {feature}"));
                    }
                });
            });
        }
    });
}

/// Draws the catalog grid. Returns the commands raised by the cards.
pub fn catalog_grid(ui: &mut egui::Ui, cards: &[ItemCardProps]) -> Vec<StoreCommand> {
    let mut commands = Vec::new();
    ui.heading("Beat catalog");
    ui.add_space(8.0);

    let per_row = ((ui.available_width() / CARD_WIDTH).floor() as usize).max(1);
    for row in cards.chunks(per_row) {
        ui.horizontal_top(|ui| {
            for card in row {
                ui.allocate_ui(egui::vec2(CARD_WIDTH - 12.0, 0.0), |ui| {
                    item_card(ui, card, &mut commands);
                });
            }
        });
        ui.add_space(8.0);
    }
    commands
}

fn item_card(ui: &mut egui::Ui, card: &ItemCardProps, commands: &mut Vec<StoreCommand>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH - 24.0);
        ui.horizontal(|ui| {
            if ui
                .button(egui::RichText::new(card.play_icon.glyph()).size(20.0))
                .clicked()
            {
                commands.push(StoreCommand::TogglePlay(card.item_id));
            }
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&card.title).strong().size(16.0));
                ui.label(egui::RichText::new(&card.artist).weak());
            });
        });

        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new(&card.genre_badge).strong());
            ui.label(&card.bpm_badge);
            for tag in &card.tags {
                ui.label(egui::RichText::new(tag).small().weak());
            }
        });

        ui.horizontal(|ui| {
            ui.label(format!("⏱ {}", card.duration));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let glyph = if card.in_cart { "✔" } else { "🛒" };
                if ui
                    .add_enabled(card.add_enabled(), egui::Button::new(glyph))
                    .clicked()
                {
                    commands.push(StoreCommand::AddToCart(card.item_id));
                }
                ui.label(egui::RichText::new(&card.from_price_label).strong());
            });
        });

        ui.separator();
        for row in &card.tiers {
            ui.horizontal(|ui| {
                ui.label(row.tier.label());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!card.in_cart, egui::Button::new("+").small())
                        .on_hover_text(format!("Add with {} license", row.tier))
                        .clicked()
                    {
                        commands.push(StoreCommand::AddToCartWithTier(card.item_id, row.tier));
                    }
                    ui.label(&row.price_label);
                });
            });
        }
    });
}
