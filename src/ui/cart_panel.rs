use eframe::egui;

use crate::types::item::LicenseTier;
use crate::types::session::StoreCommand;
use crate::ui::props::CartPanelProps;

pub fn cart_panel(
    ui: &mut egui::Ui,
    props: &CartPanelProps,
    notice: Option<&str>,
) -> Vec<StoreCommand> {
    let mut commands = Vec::new();

    ui.heading("Cart");
    ui.label(&props.description);
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for line in &props.lines {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    if let Some(image) = &line.image {
                        ui.add(
                            egui::Image::new(image.as_str())
                                .fit_to_exact_size(egui::vec2(40.0, 40.0)),
                        );
                    }
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&line.title).strong());
                        ui.label(&line.price_label);
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("✖").clicked() {
                            commands.push(StoreCommand::RemoveFromCart(line.item_id));
                        }
                        let mut tier = line.tier;
                        egui::ComboBox::from_id_salt(("cart_tier", line.item_id.0))
                            .selected_text(tier.label())
                            .show_ui(ui, |ui| {
                                for option in LicenseTier::ALL {
                                    ui.selectable_value(&mut tier, option, option.label());
                                }
                            });
                        if tier != line.tier {
                            commands.push(StoreCommand::SetCartTier(line.item_id, tier));
                        }
                    });
                });
            });
        }

        if let Some(total) = &props.total_label {
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Total:").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(total).strong());
                });
            });
            if ui
                .add_sized([ui.available_width(), 32.0], egui::Button::new("Checkout"))
                .clicked()
            {
                commands.push(StoreCommand::Checkout);
            }
        }

        if let Some(notice) = notice {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(notice).italics());
        }
    });

    commands
}
