use gst::prelude::*;
use gstreamer as gst;
use std::time::Duration;

use crate::backend::playback_bridge::MediaBackend;
use crate::error::{Result, StoreError};
use crate::types::item::{Item, ItemId};
use crate::types::playback_state::PlaybackReport;

fn backend_err(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Plays item previews through a GStreamer `playbin`.
/// Items without a `preview_uri` are treated as silent.
pub struct GstBackend {
    playbin: gst::Element,
    loaded: Option<ItemId>,
    looping: bool,
    /// Set on a non-looping EOS; the next play starts over.
    at_end: bool,
}

impl GstBackend {
    pub fn new() -> Result<Self> {
        gst::init().map_err(backend_err)?;
        let playbin = gst::ElementFactory::make("playbin")
            .build()
            .map_err(backend_err)?;
        Ok(Self {
            playbin,
            loaded: None,
            looping: false,
            at_end: false,
        })
    }

    fn restart(&self) -> Result<()> {
        self.playbin
            .seek_simple(
                gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
                gst::ClockTime::ZERO,
            )
            .map_err(backend_err)
    }
}

impl MediaBackend for GstBackend {
    fn load(&mut self, item: &Item) -> Result<()> {
        self.playbin
            .set_state(gst::State::Null)
            .map_err(backend_err)?;
        self.at_end = false;
        match &item.preview_uri {
            Some(uri) => {
                self.playbin.set_property("uri", uri.as_str());
                self.loaded = Some(item.id);
            }
            None => {
                log::warn!("Item {} has no preview, nothing to play", item.id);
                self.loaded = None;
            }
        }
        Ok(())
    }

    fn set_playing(&mut self, playing: bool) -> Result<()> {
        if self.loaded.is_none() {
            return Ok(());
        }
        let state = if playing {
            gst::State::Playing
        } else {
            gst::State::Paused
        };
        if playing && self.at_end {
            self.restart()?;
            self.at_end = false;
        }
        self.playbin.set_state(state).map_err(backend_err)?;
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) -> Result<()> {
        self.looping = looping;
        Ok(())
    }

    fn set_volume(&mut self, percent: f32) -> Result<()> {
        self.playbin.set_property("volume", f64::from(percent) / 100.0);
        Ok(())
    }

    fn seek(&mut self, percent: f32) -> Result<()> {
        if self.loaded.is_none() {
            return Ok(());
        }
        // Duration is unknown until the pipeline has prerolled.
        let Some(duration) = self.playbin.query_duration::<gst::ClockTime>() else {
            return Ok(());
        };
        let target = (duration.nseconds() as f64 * f64::from(percent) / 100.0) as u64;
        self.playbin
            .seek_simple(
                gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
                gst::ClockTime::from_nseconds(target),
            )
            .map_err(backend_err)?;
        self.at_end = false;
        Ok(())
    }

    fn poll(&mut self) -> Option<PlaybackReport> {
        let item_id = self.loaded?;
        let mut ended = false;

        if let Some(bus) = self.playbin.bus() {
            while let Some(msg) = bus.pop() {
                match msg.view() {
                    gst::MessageView::Eos(..) => {
                        if self.looping {
                            if let Err(e) = self.restart() {
                                log::warn!("Failed to loop item {item_id}: {e}");
                            }
                        } else {
                            // Hold the pipeline where the controller thinks it is.
                            if let Err(e) = self.playbin.set_state(gst::State::Paused) {
                                log::warn!("Failed to pause item {item_id} at end: {e}");
                            }
                            self.at_end = true;
                            ended = true;
                        }
                    }
                    gst::MessageView::Error(err) => {
                        log::warn!("GStreamer error on item {item_id}: {}", err.error());
                    }
                    _ => {}
                }
            }
        }

        let elapsed = self
            .playbin
            .query_position::<gst::ClockTime>()
            .unwrap_or(gst::ClockTime::ZERO);
        let total = self
            .playbin
            .query_duration::<gst::ClockTime>()
            .unwrap_or(gst::ClockTime::ZERO);

        Some(PlaybackReport {
            item_id,
            elapsed: Duration::from_nanos(elapsed.nseconds()),
            total: Duration::from_nanos(total.nseconds()),
            ended,
        })
    }
}

impl Drop for GstBackend {
    fn drop(&mut self) {
        let _ = self.playbin.set_state(gst::State::Null);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::catalog::Catalog;
    use std::io::Write;
    use std::time::Instant;

    /// A fifth of a second of 8 kHz mono silence.
    fn silent_wav() -> tempfile::NamedTempFile {
        let data_len: u32 = 1600 * 2;
        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVEfmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&8000u32.to_le_bytes());
        wav.extend_from_slice(&16000u32.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        wav.resize(wav.len() + data_len as usize, 0);

        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        file.write_all(&wav).unwrap();
        file
    }

    fn wait_for_end(backend: &mut GstBackend) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if backend.poll().is_some_and(|r| r.ended) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        false
    }

    #[test]
    fn test_play_after_end_starts_over() {
        // Needs the playback and wavparse plugins.
        let Ok(mut backend) = GstBackend::new() else {
            return;
        };
        if gst::ElementFactory::find("wavparse").is_none() {
            return;
        }
        let Ok(sink) = gst::ElementFactory::make("fakesink")
            .property("sync", true)
            .build()
        else {
            return;
        };
        backend.playbin.set_property("audio-sink", &sink);

        let wav = silent_wav();
        let mut item = Catalog::default().get(ItemId(1)).unwrap().clone();
        item.preview_uri = Some(format!("file://{}", wav.path().display()));

        backend.load(&item).unwrap();
        backend.set_playing(true).unwrap();
        assert!(wait_for_end(&mut backend));
        assert!(backend.at_end);

        backend.set_playing(true).unwrap();
        assert!(!backend.at_end);
        assert!(wait_for_end(&mut backend));
    }
}
