use crate::ops::time_format::format_time;
use crate::types::item::Item;
use crate::types::playback_state::{PlaybackReport, PlaybackState};

pub const DEFAULT_VOLUME: f32 = 75.0;
pub const DEFAULT_SKIP_STEP: f32 = 10.0;

/// Clamps to 0..=100. NaN maps to 0 so a bad slider value cannot poison state.
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Owns the session's `PlaybackState` and applies transport commands to it.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    skip_step: f32,
}

impl PlaybackController {
    pub fn new(initial_volume: f32, skip_step: f32) -> Self {
        Self {
            state: PlaybackState::new(clamp_percent(initial_volume)),
            skip_step: clamp_percent(skip_step),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Pauses or resumes the loaded item, or switches to `item` and starts it.
    /// This is the only way the loaded item changes.
    pub fn toggle_play(&mut self, item: &Item) {
        if self.state.loaded_item == Some(item.id) {
            self.state.is_playing = !self.state.is_playing;
            log::debug!(
                "Toggled item {}: playing = {}",
                item.id,
                self.state.is_playing
            );
            return;
        }

        log::debug!("Switching playback to item {} ({})", item.id, item.title);
        self.state.loaded_item = Some(item.id);
        self.state.progress_percent = 0.0;
        self.state.elapsed_label = format_time(std::time::Duration::ZERO);
        self.state.total_label = None;
        self.state.is_playing = true;
    }

    /// Moves the position of the loaded item. Works while paused.
    pub fn seek(&mut self, target_percent: f32) {
        self.state.progress_percent = clamp_percent(target_percent);
    }

    pub fn skip_backward(&mut self) {
        self.seek(self.state.progress_percent - self.skip_step);
    }

    pub fn skip_forward(&mut self) {
        self.seek(self.state.progress_percent + self.skip_step);
    }

    pub fn set_volume(&mut self, percent: f32) {
        self.state.volume_percent = clamp_percent(percent);
    }

    /// Only stores the flag; restarting at the end is the backend's job.
    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        log::debug!("Loop = {}", self.state.is_looping);
    }

    /// Stores a position reported by the media backend.
    /// Reports for anything but the loaded item are stale and dropped.
    pub fn apply_report(&mut self, report: &PlaybackReport) {
        if self.state.loaded_item != Some(report.item_id) {
            log::debug!("Dropping stale report for item {}", report.item_id);
            return;
        }

        if report.ended && !self.state.is_looping {
            self.state.is_playing = false;
            self.state.progress_percent = 100.0;
        } else if !report.total.is_zero() {
            let ratio = report.elapsed.as_secs_f32() / report.total.as_secs_f32();
            self.state.progress_percent = clamp_percent(ratio * 100.0);
        }

        self.state.elapsed_label = format_time(report.elapsed.min(report.total));
        if !report.total.is_zero() {
            self.state.total_label = Some(format_time(report.total));
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME, DEFAULT_SKIP_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::catalog::Catalog;
    use crate::types::item::ItemId;
    use crate::types::playback_state::Transport;
    use std::time::Duration;

    fn items() -> (Item, Item) {
        let catalog = Catalog::default();
        (
            catalog.get(ItemId(1)).unwrap().clone(),
            catalog.get(ItemId(2)).unwrap().clone(),
        )
    }

    #[test]
    fn test_first_toggle_loads_and_plays() {
        let (a, _) = items();
        let mut player = PlaybackController::default();
        player.toggle_play(&a);
        assert_eq!(player.state().transport(), Transport::Playing(a.id));
        assert_eq!(player.state().progress_percent, 0.0);
    }

    #[test]
    fn test_switching_items_resets_progress_and_plays() {
        let (a, b) = items();
        let mut player = PlaybackController::default();

        // Paused mid-track on A
        player.toggle_play(&a);
        player.seek(40.0);
        player.toggle_play(&a);
        assert_eq!(player.state().transport(), Transport::Paused(a.id));

        player.toggle_play(&b);
        let state = player.state();
        assert_eq!(state.loaded_item, Some(b.id));
        assert!(state.is_playing);
        assert_eq!(state.progress_percent, 0.0);
        assert_eq!(state.elapsed_label, "0:00");
        assert!(state.total_label.is_none());
    }

    #[test]
    fn test_double_toggle_same_item_keeps_position() {
        let (a, _) = items();
        let mut player = PlaybackController::default();
        player.toggle_play(&a);
        player.seek(33.0);

        let was_playing = player.state().is_playing;
        player.toggle_play(&a);
        assert_ne!(player.state().is_playing, was_playing);
        player.toggle_play(&a);
        assert_eq!(player.state().is_playing, was_playing);
        assert_eq!(player.state().loaded_item, Some(a.id));
        assert_eq!(player.state().progress_percent, 33.0);
    }

    #[test]
    fn test_volume_is_clamped_and_survives_switch() {
        let (a, b) = items();
        let mut player = PlaybackController::default();
        player.set_volume(150.0);
        assert_eq!(player.state().volume_percent, 100.0);
        player.set_volume(-10.0);
        assert_eq!(player.state().volume_percent, 0.0);
        player.set_volume(f32::NAN);
        assert_eq!(player.state().volume_percent, 0.0);

        player.set_volume(42.0);
        player.toggle_play(&a);
        player.toggle_play(&b);
        assert_eq!(player.state().volume_percent, 42.0);
    }

    #[test]
    fn test_seek_and_skip_stay_in_range() {
        let mut player = PlaybackController::default();
        player.seek(95.0);
        player.skip_forward();
        assert_eq!(player.state().progress_percent, 100.0);

        player.seek(5.0);
        player.skip_backward();
        assert_eq!(player.state().progress_percent, 0.0);

        player.seek(250.0);
        assert_eq!(player.state().progress_percent, 100.0);
        player.seek(-3.0);
        assert_eq!(player.state().progress_percent, 0.0);

        player.seek(50.0);
        player.skip_forward();
        assert_eq!(player.state().progress_percent, 60.0);
        player.skip_backward();
        player.skip_backward();
        assert_eq!(player.state().progress_percent, 40.0);
    }

    #[test]
    fn test_seek_does_not_change_transport() {
        let (a, _) = items();
        let mut player = PlaybackController::default();
        player.seek(20.0);
        assert_eq!(player.state().transport(), Transport::Idle);

        player.toggle_play(&a);
        player.toggle_play(&a);
        player.seek(70.0);
        assert_eq!(player.state().transport(), Transport::Paused(a.id));
    }

    #[test]
    fn test_toggle_loop_only_flips_flag() {
        let (a, _) = items();
        let mut player = PlaybackController::default();
        player.toggle_play(&a);
        player.seek(12.0);
        player.toggle_loop();
        assert!(player.state().is_looping);
        assert!(player.state().is_playing);
        assert_eq!(player.state().progress_percent, 12.0);
        player.toggle_loop();
        assert!(!player.state().is_looping);
    }

    #[test]
    fn test_apply_report_updates_progress_and_labels() {
        let (a, _) = items();
        let mut player = PlaybackController::default();
        player.toggle_play(&a);
        player.apply_report(&PlaybackReport {
            item_id: a.id,
            elapsed: Duration::from_secs(55),
            total: Duration::from_secs(220),
            ended: false,
        });
        let state = player.state();
        assert_eq!(state.progress_percent, 25.0);
        assert_eq!(state.elapsed_label, "0:55");
        assert_eq!(state.total_label.as_deref(), Some("3:40"));
    }

    #[test]
    fn test_apply_report_ignores_other_items() {
        let (a, b) = items();
        let mut player = PlaybackController::default();
        player.toggle_play(&a);
        player.toggle_play(&b);
        player.apply_report(&PlaybackReport {
            item_id: a.id,
            elapsed: Duration::from_secs(100),
            total: Duration::from_secs(200),
            ended: false,
        });
        assert_eq!(player.state().progress_percent, 0.0);
        assert_eq!(player.state().elapsed_label, "0:00");
    }

    #[test]
    fn test_end_of_media_pauses_unless_looping() {
        let (a, _) = items();
        let mut player = PlaybackController::default();
        player.toggle_play(&a);
        let end = PlaybackReport {
            item_id: a.id,
            elapsed: Duration::from_secs(200),
            total: Duration::from_secs(200),
            ended: true,
        };
        player.apply_report(&end);
        assert_eq!(player.state().transport(), Transport::Paused(a.id));
        assert_eq!(player.state().progress_percent, 100.0);

        player.toggle_play(&a);
        player.toggle_loop();
        player.apply_report(&end);
        assert!(player.state().is_playing);
    }
}
