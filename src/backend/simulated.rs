use std::time::{Duration, Instant};

use crate::backend::playback_bridge::MediaBackend;
use crate::error::Result;
use crate::ops::time_format::parse_duration_label;
use crate::types::item::{Item, ItemId};
use crate::types::playback_state::PlaybackReport;

/// Clock-driven stand-in for an audio engine. Advances a playhead through the
/// catalog duration of the loaded item in real time and honours the loop flag.
#[derive(Debug)]
pub struct SimulatedBackend {
    loaded: Option<(ItemId, Duration)>,
    position: Duration,
    playing: bool,
    looping: bool,
    volume: f32,
    last_update: Instant,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self {
            loaded: None,
            position: Duration::ZERO,
            playing: false,
            looping: false,
            volume: 0.0,
            last_update: Instant::now(),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Advance the playhead to `now` and report where it is.
    pub fn poll_at(&mut self, now: Instant) -> Option<PlaybackReport> {
        let (item_id, total) = self.loaded?;
        let mut ended = false;

        if self.playing {
            self.position += now.saturating_duration_since(self.last_update);
            if self.position >= total {
                if self.looping && !total.is_zero() {
                    let overshoot = self.position.as_nanos() % total.as_nanos();
                    self.position = Duration::from_nanos(overshoot as u64);
                } else {
                    self.position = total;
                    self.playing = false;
                    ended = true;
                }
            }
        }
        self.last_update = now;

        Some(PlaybackReport {
            item_id,
            elapsed: self.position,
            total,
            ended,
        })
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for SimulatedBackend {
    fn load(&mut self, item: &Item) -> Result<()> {
        let total = parse_duration_label(&item.duration).unwrap_or(Duration::ZERO);
        self.loaded = Some((item.id, total));
        self.position = Duration::ZERO;
        self.playing = false;
        self.last_update = Instant::now();
        Ok(())
    }

    fn set_playing(&mut self, playing: bool) -> Result<()> {
        if let Some((_, total)) = self.loaded {
            if playing && !self.playing && self.position >= total {
                self.position = Duration::ZERO;
            }
        }
        self.playing = playing;
        self.last_update = Instant::now();
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) -> Result<()> {
        self.looping = looping;
        Ok(())
    }

    fn set_volume(&mut self, percent: f32) -> Result<()> {
        self.volume = percent;
        Ok(())
    }

    fn seek(&mut self, percent: f32) -> Result<()> {
        if let Some((_, total)) = self.loaded {
            self.position = total.mul_f32(percent / 100.0);
        }
        Ok(())
    }

    fn poll(&mut self) -> Option<PlaybackReport> {
        self.poll_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::catalog::Catalog;

    fn loaded_backend() -> (SimulatedBackend, Instant) {
        let catalog = Catalog::default();
        // Dark Vibes, 3:42
        let item = catalog.get(ItemId(1)).unwrap();
        let mut backend = SimulatedBackend::new();
        backend.load(item).unwrap();
        backend.set_playing(true).unwrap();
        let start = backend.last_update;
        (backend, start)
    }

    #[test]
    fn test_idle_backend_reports_nothing() {
        let mut backend = SimulatedBackend::new();
        assert!(backend.poll().is_none());
    }

    #[test]
    fn test_playhead_advances_only_while_playing() {
        let (mut backend, start) = loaded_backend();
        let report = backend.poll_at(start + Duration::from_secs(10)).unwrap();
        assert_eq!(report.elapsed, Duration::from_secs(10));
        assert_eq!(report.total, Duration::from_secs(222));
        assert!(!report.ended);

        backend.set_playing(false).unwrap();
        let paused_at = backend.last_update;
        let report = backend.poll_at(paused_at + Duration::from_secs(30)).unwrap();
        assert_eq!(report.elapsed, Duration::from_secs(10));
    }

    #[test]
    fn test_end_of_media_without_loop() {
        let (mut backend, start) = loaded_backend();
        let report = backend.poll_at(start + Duration::from_secs(300)).unwrap();
        assert!(report.ended);
        assert_eq!(report.elapsed, report.total);

        // Resuming after the end starts over.
        backend.set_playing(true).unwrap();
        let report = backend.poll_at(backend.last_update).unwrap();
        assert_eq!(report.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_loop_wraps_to_start() {
        let (mut backend, start) = loaded_backend();
        backend.set_looping(true).unwrap();
        let report = backend.poll_at(start + Duration::from_secs(232)).unwrap();
        assert!(!report.ended);
        assert_eq!(report.elapsed, Duration::from_secs(10));
    }

    #[test]
    fn test_seek_maps_percent_to_position() {
        let (mut backend, start) = loaded_backend();
        backend.set_playing(false).unwrap();
        backend.set_volume(60.0).unwrap();
        backend.seek(50.0).unwrap();
        assert_eq!(backend.volume(), 60.0);
        let report = backend.poll_at(start).unwrap();
        assert_eq!(report.elapsed, Duration::from_secs(111));
    }
}
