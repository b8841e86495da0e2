use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
    }
}

fn opaque(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: [181, 181, 181, 255].repeat((width * height) as usize),
        premultiplied: true,
    }
}

fn args_of(cfg: SinkConfig, out: &Path, overwrite: bool) -> Vec<String> {
    encoder_args(cfg, out, overwrite)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn has_pair(args: &[String], flag: &str, value: &str) -> bool {
    args.windows(2).any(|w| w[0] == flag && w[1] == value)
}

#[test]
fn encoder_args_read_rgba_from_stdin_and_write_h264() {
    let out = Path::new("renders/clip.mp4");
    let args = args_of(cfg(64, 36), out, true);

    assert_eq!(args[0], "-y");
    assert!(has_pair(&args, "-f", "rawvideo"));
    assert!(has_pair(&args, "-pix_fmt", "rgba"));
    assert!(has_pair(&args, "-s", "64x36"));
    assert!(has_pair(&args, "-r", "30/1"));
    assert!(has_pair(&args, "-i", "pipe:0"));
    assert!(has_pair(&args, "-c:v", "libx264"));
    assert!(has_pair(&args, "-pix_fmt", "yuv420p"));
    assert!(args.iter().any(|a| a == "-an"));
    assert_eq!(args.last().map(String::as_str), Some("renders/clip.mp4"));

    let input = args.iter().position(|a| a == "-i").unwrap();
    let rate = args.iter().position(|a| a == "-r").unwrap();
    let codec = args.iter().position(|a| a == "-c:v").unwrap();
    assert!(rate < input && input < codec);
}

#[test]
fn encoder_args_refuse_overwrite_when_asked() {
    let args = args_of(cfg(2, 2), Path::new("x.mp4"), false);
    assert_eq!(args[0], "-n");
    assert!(!args.iter().any(|a| a == "-y"));
}

#[test]
fn frames_before_begin_are_rejected() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("never.mp4"));
    let err = sink.push_frame(FrameIndex(0), &opaque(2, 2)).unwrap_err();
    assert!(err.to_string().contains("not started"));
    assert!(sink.end().is_err());
    assert!(!sink.is_running());
}

#[test]
fn finished_sink_rejects_frames_and_restart() {
    let mut sink = FfmpegSink {
        opts: FfmpegSinkOpts::new("never.mp4"),
        state: EncoderState::Finished,
    };
    let err = sink.push_frame(FrameIndex(0), &opaque(2, 2)).unwrap_err();
    assert!(err.to_string().contains("already finished"));
    assert!(sink.begin(cfg(2, 2)).is_err());
    assert!(sink.end().is_err());
    assert!(matches!(sink.state, EncoderState::Finished));
}

#[test]
fn bad_sizes_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("stagefx_odd.mp4"),
    ));
    let err = sink.begin(cfg(33, 20)).unwrap_err();
    assert!(err.to_string().contains("even"));
    assert!(sink.begin(cfg(0, 20)).is_err());
    assert!(!sink.is_running());
}

#[test]
fn existing_output_is_kept_without_overwrite() {
    let path = std::env::temp_dir().join("stagefx_ffmpeg_existing.mp4");
    std::fs::write(&path, b"keep me").unwrap();

    let mut opts = FfmpegSinkOpts::new(&path);
    opts.overwrite = false;
    let mut sink = FfmpegSink::new(opts);
    let err = sink.begin(cfg(2, 2)).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    assert!(!sink.is_running());
}

#[test]
fn frames_must_match_size_and_be_opaque() {
    assert!(check_frame(cfg(2, 2), &opaque(2, 2)).is_ok());
    assert!(check_frame(cfg(2, 2), &opaque(4, 2)).is_err());

    let mut short = opaque(2, 2);
    short.data.truncate(8);
    assert!(check_frame(cfg(2, 2), &short).is_err());

    let mut translucent = opaque(2, 2);
    translucent.data[7] = 128;
    let err = check_frame(cfg(2, 2), &translucent).unwrap_err();
    assert!(err.to_string().contains("opaque"));
}
