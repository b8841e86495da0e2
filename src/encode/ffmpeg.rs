//! MP4 output through the system `ffmpeg` binary.
//!
//! Stage frames are always opaque because the background is painted first, so their bytes are
//! identical in premultiplied and straight form and go to `ffmpeg` unchanged as `rgba` raw
//! video. The output is always silent H.264 in yuv420p.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig, check_order, create_output_dir};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FxError, FxResult};
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 path. Missing parent directories are created on `begin`.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Write (and overwrite) `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Streams frames into a child `ffmpeg` process.
///
/// `begin` spawns the encoder, `push_frame` writes one frame to its stdin and `end` closes
/// stdin and waits for the file to be finalized. A sink is single-use: after `end` it rejects
/// further frames.
#[derive(Debug)]
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    state: EncoderState,
}

#[derive(Debug)]
enum EncoderState {
    Idle,
    Running(Encoder),
    Finished,
}

#[derive(Debug)]
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
    cfg: SinkConfig,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create an idle sink; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            state: EncoderState::Idle,
        }
    }

    /// Whether an encoder process is currently accepting frames.
    pub fn is_running(&self) -> bool {
        matches!(self.state, EncoderState::Running(_))
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> FxResult<()> {
        match self.state {
            EncoderState::Idle => {}
            EncoderState::Running(_) => return Err(FxError::encode("ffmpeg sink already started")),
            EncoderState::Finished => return Err(FxError::encode("ffmpeg sink already finished")),
        }
        check_config(cfg)?;

        let out = &self.opts.out_path;
        if let Some(parent) = out.parent() {
            create_output_dir(parent)?;
        }
        if !self.opts.overwrite && out.exists() {
            return Err(FxError::validation(format!(
                "output file '{}' already exists",
                out.display()
            )));
        }

        let mut child = Command::new("ffmpeg")
            .args(encoder_args(cfg, out, self.opts.overwrite))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    FxError::encode("ffmpeg is required for MP4 output but was not found on PATH")
                }
                _ => FxError::encode(format!("failed to spawn ffmpeg: {e}")),
            })?;

        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            let _ = child.kill();
            return Err(FxError::encode("ffmpeg started without piped stdio"));
        };
        // Drained concurrently; ffmpeg stalls once the pipe buffer is full.
        let stderr = std::thread::spawn(move || {
            let mut log = Vec::new();
            stderr.read_to_end(&mut log).map(|_| log)
        });

        tracing::debug!(
            out = %out.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "ffmpeg encoder started"
        );
        self.state = EncoderState::Running(Encoder {
            child,
            stdin,
            stderr,
            cfg,
            last_idx: None,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> FxResult<()> {
        let enc = match &mut self.state {
            EncoderState::Running(enc) => enc,
            EncoderState::Idle => return Err(FxError::encode("ffmpeg sink not started")),
            EncoderState::Finished => return Err(FxError::encode("ffmpeg sink already finished")),
        };
        check_frame(enc.cfg, frame)?;
        check_order(&mut enc.last_idx, idx)?;
        enc.stdin.write_all(&frame.data).map_err(|e| {
            FxError::encode(format!("failed to write frame {} to ffmpeg: {e}", idx.0))
        })
    }

    fn end(&mut self) -> FxResult<()> {
        let enc = match std::mem::replace(&mut self.state, EncoderState::Finished) {
            EncoderState::Running(enc) => enc,
            other => {
                self.state = other;
                return Err(FxError::encode("ffmpeg sink not started"));
            }
        };
        let Encoder {
            mut child,
            stdin,
            stderr,
            ..
        } = enc;

        // Closing stdin is the end-of-stream signal.
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| FxError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| FxError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| FxError::encode(format!("failed to read ffmpeg stderr: {e}")))?;

        if !status.success() {
            return Err(FxError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg encoder finished");
        Ok(())
    }
}

/// Arguments encoding `cfg`-sized rgba frames read from stdin into a silent yuv420p MP4.
fn encoder_args(cfg: SinkConfig, out: &Path, overwrite: bool) -> Vec<OsString> {
    let size = format!("{}x{}", cfg.width, cfg.height);
    let rate = format!("{}/{}", cfg.fps.num, cfg.fps.den);
    let mut args: Vec<OsString> = [
        if overwrite { "-y" } else { "-n" },
        "-loglevel",
        "error",
        // Input options must precede `-i`.
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        size.as_str(),
        "-r",
        rate.as_str(),
        "-i",
        "pipe:0",
        "-an",
        "-c:v",
        "libx264",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(out.as_os_str().to_os_string());
    args
}

fn check_config(cfg: SinkConfig) -> FxResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(FxError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(FxError::validation("mp4 width/height must be non-zero"));
    }
    // yuv420p subsamples chroma 2x2.
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(FxError::validation(format!(
            "mp4 width/height must be even, got {}x{}",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

fn check_frame(cfg: SinkConfig, frame: &FrameRGBA) -> FxResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(FxError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 4 {
        return Err(FxError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    if frame.data.chunks_exact(4).any(|px| px[3] != 255) {
        return Err(FxError::validation("mp4 output needs fully opaque frames"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
