pub mod controller;
pub mod gst_player;
pub mod media_element;

use gstreamer as gst;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("GStreamer error: {0}")]
    Glib(#[from] gst::glib::Error),
    #[error("failed to build pipeline: {0}")]
    Pipeline(#[from] gst::glib::BoolError),
    #[error("pipeline has no appsink named 'sink'")]
    MissingSink,
    #[error("playbin is not a pipeline")]
    NotAPipeline,
    #[error("pipeline state change failed: {0}")]
    StateChange(#[from] gst::StateChangeError),
}
