use crate::player::PlayerError;

/// Unit of the value passed to [`MediaElement::seek_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekUnit {
    Seconds,
}

/// The embedded video-playback element. Decoding, buffering and the mechanics
/// of seeking are entirely its business.
pub trait MediaElement {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    /// Total media duration in seconds, 0.0 while unknown.
    fn duration(&self) -> f64;
    fn seek_to(&mut self, value: f64, unit: SeekUnit) -> Result<(), PlayerError>;
    fn set_playing(&mut self, playing: bool) -> Result<(), PlayerError>;
    fn set_muted(&mut self, muted: bool);
}

/// Whatever hosts the video and can be put into fullscreen.
pub trait FullscreenSurface {
    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
}
