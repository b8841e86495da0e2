//! Frame sinks: where rendered frames go.
//!
//! Sinks consume rendered frames in timeline order and are used by
//! [`crate::FxSession::render_script`].

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// PNG file-sequence sink.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
