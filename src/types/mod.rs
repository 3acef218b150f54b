pub mod chapter;
pub mod playback_state;
