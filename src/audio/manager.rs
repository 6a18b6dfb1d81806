//! Audio manager for output and track playback

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source, mixer::Mixer};

use super::AudioError;

/// How a track behaves when played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// One-shot playback
    Effect,
    /// Looped playback; at most one music track plays at a time
    Music,
}

struct Track {
    kind: TrackKind,
    bytes: Arc<[u8]>,
    volume: f32,
}

/// Manages audio output and loaded tracks.
///
/// Tracks are kept decoded-on-demand as raw bytes; playing one spawns a
/// sink on the shared mixer. Starting a music track stops whichever music
/// was playing before it.
pub struct AudioManager {
    /// The output stream (must be kept alive)
    _stream: OutputStream,
    mixer: Mixer,
    tracks: HashMap<String, Track>,
    /// Live effect sinks by track name
    playing: HashMap<String, Sink>,
    current_music: Option<(String, Sink)>,
    master_volume: f32,
    muted: bool,
}

impl AudioManager {
    /// Create a new audio manager
    ///
    /// # Errors
    ///
    /// Returns an error if no audio output device is available
    pub fn new() -> Result<Self, AudioError> {
        let stream = OutputStreamBuilder::from_default_device()
            .map_err(|_| AudioError::NoDevice)?
            .open_stream()
            .map_err(|_| AudioError::NoDevice)?;
        let mixer = stream.mixer().clone();

        Ok(Self {
            _stream: stream,
            mixer,
            tracks: HashMap::new(),
            playing: HashMap::new(),
            current_music: None,
            master_volume: 1.0,
            muted: false,
        })
    }

    /// Load a track from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not decodable
    pub fn load(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
        kind: TrackKind,
    ) -> Result<(), AudioError> {
        let bytes: Arc<[u8]> = fs::read(path)
            .map_err(|e| AudioError::IoError(e.to_string()))?
            .into();
        self.load_bytes(name, bytes, kind)
    }

    /// Load a track from bytes already in memory
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not decodable audio
    pub fn load_bytes(
        &mut self,
        name: impl Into<String>,
        bytes: Arc<[u8]>,
        kind: TrackKind,
    ) -> Result<(), AudioError> {
        // Decode once up front so bad data fails at load time
        Decoder::new(Cursor::new(bytes.clone()))
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;
        self.tracks.insert(
            name.into(),
            Track {
                kind,
                bytes,
                volume: 1.0,
            },
        );
        Ok(())
    }

    /// Play a track by name.
    ///
    /// Effects restart from the top if already playing. Music stops the
    /// currently playing music track first.
    ///
    /// # Errors
    ///
    /// Returns an error if the track is unknown or its data fails to decode
    pub fn play(&mut self, name: &str) -> Result<(), AudioError> {
        let track = self
            .tracks
            .get(name)
            .ok_or_else(|| AudioError::UnknownTrack(name.to_string()))?;
        let source = Decoder::new(Cursor::new(track.bytes.clone()))
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        let sink = Sink::connect_new(&self.mixer);
        sink.set_volume(self.effective_volume(track.volume));
        match track.kind {
            TrackKind::Effect => {
                sink.append(source);
                if let Some(old) = self.playing.insert(name.to_string(), sink) {
                    old.stop();
                }
            }
            TrackKind::Music => {
                sink.append(source.repeat_infinite());
                if let Some((old_name, old)) = self.current_music.take() {
                    log::debug!("Stopping music '{old_name}' for '{name}'");
                    old.stop();
                }
                self.current_music = Some((name.to_string(), sink));
            }
        }
        Ok(())
    }

    /// Stop a track by name, returning whether it was playing
    pub fn stop(&mut self, name: &str) -> bool {
        if let Some(sink) = self.playing.remove(name) {
            sink.stop();
            return true;
        }
        if self.current_music.as_ref().is_some_and(|(n, _)| n == name)
            && let Some((_, sink)) = self.current_music.take()
        {
            sink.stop();
            return true;
        }
        false
    }

    /// Stop everything, music included
    pub fn stop_all(&mut self) {
        for (_, sink) in self.playing.drain() {
            sink.stop();
        }
        if let Some((_, sink)) = self.current_music.take() {
            sink.stop();
        }
    }

    /// Whether a track currently has sound coming out of it
    #[must_use]
    pub fn is_playing(&self, name: &str) -> bool {
        if let Some(sink) = self.playing.get(name) {
            return !sink.empty();
        }
        self.current_music.as_ref().is_some_and(|(n, _)| n == name)
    }

    /// Name of the music track currently playing
    #[must_use]
    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_ref().map(|(n, _)| n.as_str())
    }

    /// Set the volume of one track
    ///
    /// # Errors
    ///
    /// Returns an error if the track is unknown
    pub fn set_volume(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
        let track = self
            .tracks
            .get_mut(name)
            .ok_or_else(|| AudioError::UnknownTrack(name.to_string()))?;
        track.volume = volume.max(0.0);
        let effective = self.effective_volume(volume.max(0.0));
        if let Some(sink) = self.playing.get(name) {
            sink.set_volume(effective);
        }
        if let Some((n, sink)) = &self.current_music
            && n == name
        {
            sink.set_volume(effective);
        }
        Ok(())
    }

    /// Set the master volume, which scales every track
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.max(0.0);
        self.refresh_volumes();
    }

    /// Get the master volume
    #[must_use]
    pub const fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Silence all output without stopping playback
    pub fn mute(&mut self) {
        self.muted = true;
        self.refresh_volumes();
    }

    /// Restore output volume
    pub fn unmute(&mut self) {
        self.muted = false;
        self.refresh_volumes();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.unmute();
        } else {
            self.mute();
        }
    }

    /// Check if audio is muted
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Number of loaded tracks
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Drop sinks for effects that have finished playing
    pub fn cleanup_finished(&mut self) {
        self.playing.retain(|_, sink| !sink.empty());
    }

    fn effective_volume(&self, track_volume: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            track_volume * self.master_volume
        }
    }

    fn refresh_volumes(&mut self) {
        for (name, sink) in &self.playing {
            let vol = self.tracks.get(name).map_or(1.0, |t| t.volume);
            sink.set_volume(self.effective_volume(vol));
        }
        if let Some((name, sink)) = &self.current_music {
            let vol = self.tracks.get(name).map_or(1.0, |t| t.volume);
            sink.set_volume(self.effective_volume(vol));
        }
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("track_count", &self.tracks.len())
            .field("current_music", &self.current_music())
            .field("master_volume", &self.master_volume)
            .field("muted", &self.muted)
            .finish()
    }
}
