//! Audio playback
//!
//! Sound effects fire one-shot; music loops and only one track of it plays
//! at a time.

mod manager;

pub use manager::{AudioManager, TrackKind};

/// Errors that can occur during audio operations
#[derive(Debug, Clone)]
pub enum AudioError {
    /// IO error reading a file
    IoError(String),
    /// Error decoding audio data
    DecodeError(String),
    /// Error during playback
    PlayError(String),
    /// No audio output device available
    NoDevice,
    /// No track loaded under the requested name
    UnknownTrack(String),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DecodeError(e) => write!(f, "Decode error: {e}"),
            Self::PlayError(e) => write!(f, "Playback error: {e}"),
            Self::NoDevice => write!(f, "No audio output device available"),
            Self::UnknownTrack(name) => write!(f, "No track loaded as '{name}'"),
        }
    }
}

impl std::error::Error for AudioError {}
