#[cfg(feature = "gstreamer")]
pub mod gst_backend;
pub mod playback_bridge;
pub mod simulated;

use crate::error::Result;
use playback_bridge::MediaBackend;

/// The backend this build plays through.
pub fn default_backend() -> Result<Box<dyn MediaBackend>> {
    #[cfg(feature = "gstreamer")]
    {
        log::info!("Using GStreamer playback backend");
        Ok(Box::new(gst_backend::GstBackend::new()?))
    }
    #[cfg(not(feature = "gstreamer"))]
    {
        log::info!("Using simulated playback backend");
        Ok(Box::new(simulated::SimulatedBackend::new()))
    }
}
