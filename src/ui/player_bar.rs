use eframe::egui;

use crate::types::session::StoreCommand;
use crate::ui::props::PlayerBarProps;

/// Transport, scrubber and volume for the loaded item.
pub fn player_bar(ui: &mut egui::Ui, props: &PlayerBarProps) -> Vec<StoreCommand> {
    let mut commands = Vec::new();

    ui.horizontal(|ui| {
        if let Some(image) = &props.image {
            ui.add(
                egui::Image::new(image.as_str())
                    .fit_to_exact_size(egui::vec2(48.0, 48.0)),
            );
        }
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&props.title).strong());
            ui.label(egui::RichText::new(&props.artist).weak());
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(&props.price_label).strong());
            let glyph = if props.in_cart { "✔" } else { "🛒" };
            if ui
                .add_enabled(!props.in_cart, egui::Button::new(glyph))
                .clicked()
            {
                commands.push(StoreCommand::AddToCart(props.item_id));
            }
        });
    });

    ui.horizontal(|ui| {
        ui.label(&props.elapsed_label);
        let mut progress = props.progress_percent;
        let slider_width = (ui.available_width() - 60.0).max(80.0);
        ui.spacing_mut().slider_width = slider_width;
        if ui
            .add(egui::Slider::new(&mut progress, 0.0..=100.0).show_value(false))
            .changed()
        {
            commands.push(StoreCommand::Seek(progress));
        }
        ui.label(&props.total_label);
    });

    ui.horizontal(|ui| {
        if ui.button("⏮").clicked() {
            commands.push(StoreCommand::SkipBackward);
        }
        if ui
            .button(egui::RichText::new(props.play_icon.glyph()).size(18.0))
            .clicked()
        {
            commands.push(StoreCommand::TogglePlay(props.item_id));
        }
        if ui.button("⏭").clicked() {
            commands.push(StoreCommand::SkipForward);
        }
        if ui.selectable_label(props.loop_active, "🔁").clicked() {
            commands.push(StoreCommand::ToggleLoop);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut volume = props.volume_percent;
            ui.spacing_mut().slider_width = 80.0;
            if ui
                .add(egui::Slider::new(&mut volume, 0.0..=100.0).show_value(false))
                .changed()
            {
                commands.push(StoreCommand::SetVolume(volume));
            }
            ui.label("🔊");
        });
    });

    commands
}
