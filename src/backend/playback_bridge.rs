use crate::error::Result;
use crate::types::catalog::Catalog;
use crate::types::item::Item;
use crate::types::playback_state::{PlaybackReport, PlaybackState};

/// The audio engine behind the store. Decoding and output live entirely on
/// the other side of this trait; the session only sends requests and reads
/// position reports.
pub trait MediaBackend {
    fn load(&mut self, item: &Item) -> Result<()>;
    fn set_playing(&mut self, playing: bool) -> Result<()>;
    fn set_looping(&mut self, looping: bool) -> Result<()>;
    fn set_volume(&mut self, percent: f32) -> Result<()>;
    fn seek(&mut self, percent: f32) -> Result<()>;
    /// Latest position of the loaded item, if anything is loaded.
    fn poll(&mut self) -> Option<PlaybackReport>;
}

/// Keeps a `MediaBackend` in step with the controller's `PlaybackState`.
///
/// `sync` pushes whatever changed since the last known snapshot; `pump`
/// pulls reports and records the resulting state so reported progress is
/// not echoed back to the backend as a seek.
pub struct PlaybackBridge {
    backend: Box<dyn MediaBackend>,
    last: Option<PlaybackState>,
}

impl std::fmt::Debug for PlaybackBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackBridge")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl PlaybackBridge {
    pub fn new(backend: Box<dyn MediaBackend>) -> Self {
        Self {
            backend,
            last: None,
        }
    }

    /// On failure the snapshot is forgotten, so the next `sync` pushes the
    /// full state again.
    pub fn sync(&mut self, state: &PlaybackState, catalog: &Catalog) {
        match self.push_changes(state, catalog) {
            Ok(()) => self.last = Some(state.clone()),
            Err(e) => {
                log::warn!("Media backend rejected update: {e}");
                self.last = None;
            }
        }
    }

    fn push_changes(&mut self, state: &PlaybackState, catalog: &Catalog) -> Result<()> {
        let last = self.last.as_ref();
        let switched = last.map(|l| l.loaded_item) != Some(state.loaded_item);

        if switched {
            if let Some(item) = state.loaded_item.and_then(|id| catalog.get(id)) {
                self.backend.load(item)?;
            }
        }
        if switched || last.map(|l| l.volume_percent) != Some(state.volume_percent) {
            self.backend.set_volume(state.volume_percent)?;
        }
        if switched || last.map(|l| l.is_looping) != Some(state.is_looping) {
            self.backend.set_looping(state.is_looping)?;
        }
        if state.loaded_item.is_none() {
            return Ok(());
        }
        if !switched && last.map(|l| l.progress_percent) != Some(state.progress_percent) {
            self.backend.seek(state.progress_percent)?;
        }
        if switched || last.map(|l| l.is_playing) != Some(state.is_playing) {
            self.backend.set_playing(state.is_playing)?;
        }
        Ok(())
    }

    /// Drains one report from the backend, hands it to `apply`, and records
    /// the state that results.
    pub fn pump(
        &mut self,
        apply: impl FnOnce(&PlaybackReport) -> PlaybackState,
    ) -> Option<PlaybackReport> {
        let report = self.backend.poll()?;
        self.last = Some(apply(&report));
        Some(report)
    }
}
