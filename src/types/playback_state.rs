use serde::Serialize;
use std::time::Duration;

use crate::types::item::ItemId;

/// Session-scoped transport state. Only `PlaybackController` mutates it;
/// everything else reads snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub loaded_item: Option<ItemId>,
    pub is_playing: bool,
    /// Position within the loaded item, 0..=100.
    pub progress_percent: f32,
    pub volume_percent: f32,
    pub is_looping: bool,
    pub elapsed_label: String,
    /// None until the backend reports a duration for the loaded item.
    pub total_label: Option<String>,
}

/// Collapsed view of the transport state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Idle,
    Playing(ItemId),
    Paused(ItemId),
}

impl PlaybackState {
    pub fn new(volume_percent: f32) -> Self {
        PlaybackState {
            loaded_item: None,
            is_playing: false,
            progress_percent: 0.0,
            volume_percent,
            is_looping: false,
            elapsed_label: "0:00".to_string(),
            total_label: None,
        }
    }

    pub fn transport(&self) -> Transport {
        match (self.loaded_item, self.is_playing) {
            (None, _) => Transport::Idle,
            (Some(id), true) => Transport::Playing(id),
            (Some(id), false) => Transport::Paused(id),
        }
    }

    pub fn is_playing_item(&self, id: ItemId) -> bool {
        self.is_playing && self.loaded_item == Some(id)
    }
}

/// Position update pushed by a media backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackReport {
    pub item_id: ItemId,
    pub elapsed: Duration,
    pub total: Duration,
    /// The backend reached the end of the media without looping.
    pub ended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = PlaybackState::new(75.0);
        assert_eq!(state.transport(), Transport::Idle);
        assert_eq!(state.volume_percent, 75.0);
        assert_eq!(state.elapsed_label, "0:00");
        assert!(state.total_label.is_none());
        assert!(!state.is_playing_item(ItemId(1)));
    }

    #[test]
    fn test_transport_reflects_loaded_item() {
        let mut state = PlaybackState::new(75.0);
        state.loaded_item = Some(ItemId(3));
        assert_eq!(state.transport(), Transport::Paused(ItemId(3)));
        state.is_playing = true;
        assert_eq!(state.transport(), Transport::Playing(ItemId(3)));
        assert!(state.is_playing_item(ItemId(3)));
        assert!(!state.is_playing_item(ItemId(4)));
    }
}
