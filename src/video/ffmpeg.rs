//! `ffmpeg`/`ffprobe` backed implementation of [`VideoBackend`].

use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use tracing::debug;

use super::process::{ChildGuard, run_captured};
use super::{ClipWindow, FrameTransform, VideoBackend, VideoInfo};
use crate::config::VideoConfig;
use crate::constants::encoding::{AUDIO_CODEC, OUTPUT_PIX_FMT, RAW_PIX_FMT, VIDEO_CODEC};
use crate::error::{Error, Result};
use crate::overlay::Frame;

/// Drives the `ffmpeg` and `ffprobe` executables.
#[derive(Debug, Clone)]
pub struct FfmpegBackend {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegBackend {
    /// Use the given executables as-is.
    pub fn new(ffmpeg: PathBuf, ffprobe: PathBuf) -> Self {
        Self { ffmpeg, ffprobe }
    }

    /// Resolve the configured executables on `PATH`.
    pub fn locate(config: &VideoConfig) -> Result<Self> {
        let find = |program: &Path| {
            which::which(program).map_err(|_| Error::ToolNotFound {
                program: program.display().to_string(),
            })
        };
        let ffmpeg = find(&config.ffmpeg)?;
        let ffprobe = find(&config.ffprobe)?;
        debug!(
            "Using ffmpeg at {} and ffprobe at {}",
            ffmpeg.display(),
            ffprobe.display()
        );
        Ok(Self::new(ffmpeg, ffprobe))
    }

    fn ffmpeg_command(&self) -> Command {
        let mut command = Command::new(&self.ffmpeg);
        command.args(["-hide_banner", "-nostdin", "-loglevel", "error"]);
        command
    }

    /// Trim and re-encode without touching frames.
    fn render_direct(
        &self,
        source: &Path,
        window: Option<ClipWindow>,
        output: &Path,
    ) -> Result<()> {
        let mut command = self.ffmpeg_command();
        command
            .arg("-y")
            .args(input_args(source, window))
            .args(["-map", "0:v:0", "-map", "0:a:0?"])
            .args(encode_args(true))
            .arg(output);
        run_captured(&self.ffmpeg, &mut command).map(drop)
    }

    /// Decode to raw RGB, transform every frame, and encode the result.
    fn render_transformed(
        &self,
        source: &Path,
        info: &VideoInfo,
        window: Option<ClipWindow>,
        transform: &dyn FrameTransform,
        output: &Path,
    ) -> Result<()> {
        let frame_len = Frame::byte_len(info.width, info.height).ok_or_else(|| Error::FramePipe {
            message: format!("frame size {}x{} overflows", info.width, info.height),
        })?;

        let mut decode = self.ffmpeg_command();
        decode
            .args(input_args(source, window))
            .args(["-map", "0:v:0", "-f", "rawvideo", "-pix_fmt", RAW_PIX_FMT, "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        let mut encode = self.ffmpeg_command();
        encode
            .arg("-y")
            .args(["-f", "rawvideo", "-pix_fmt", RAW_PIX_FMT])
            .arg("-s:v")
            .arg(format!("{}x{}", info.width, info.height))
            .arg("-r")
            .arg(&info.frame_rate)
            .args(["-i", "-"]);
        if info.has_audio {
            encode
                .args(input_args(source, window))
                .args(["-map", "0:v:0", "-map", "1:a:0"]);
        } else {
            encode.args(["-map", "0:v:0"]);
        }
        let length = window.map_or(info.duration_secs, |w| f64::from(w.duration_secs()));
        encode
            .args(encode_args(info.has_audio))
            .arg("-t")
            .arg(format!("{length:.3}"))
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        let mut decoder = ChildGuard::spawn(&self.ffmpeg, &mut decode)?;
        let mut encoder = ChildGuard::spawn(&self.ffmpeg, &mut encode)?;
        let mut frames_in = decoder.take_stdout()?;
        let mut frames_out = encoder.take_stdin()?;

        let pumped = pump_frames(&mut frames_in, &mut frames_out, info, frame_len, transform)?;
        drop(frames_out);
        drop(frames_in);

        if pumped.encoder_closed {
            // Leftover decoder output is not needed; dropping the guard kills it
            drop(decoder);
        } else {
            decoder.finish()?;
        }
        encoder.finish()?;
        debug!(
            "Transformed {} frames into {}",
            pumped.frames,
            output.display()
        );
        Ok(())
    }
}

impl VideoBackend for FfmpegBackend {
    fn probe(&self, path: &Path) -> Result<VideoInfo> {
        let mut command = Command::new(&self.ffprobe);
        command
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path);

        let stdout = run_captured(&self.ffprobe, &mut command).map_err(|e| match e {
            Error::ToolFailed { stderr, .. } => Error::VideoProbe {
                path: path.to_path_buf(),
                reason: stderr,
            },
            other => other,
        })?;
        parse_probe_output(path, &stdout)
    }

    fn render_segment(
        &self,
        source: &Path,
        info: &VideoInfo,
        window: Option<ClipWindow>,
        transform: Option<&dyn FrameTransform>,
        output: &Path,
    ) -> Result<()> {
        match transform {
            Some(transform) => self.render_transformed(source, info, window, transform, output),
            None => self.render_direct(source, window, output),
        }
    }

    fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let manifest = tempfile::Builder::new()
            .prefix("scorereel-concat-")
            .suffix(".txt")
            .tempfile()?;
        fs::write(manifest.path(), concat_manifest(inputs)?)?;

        let mut command = self.ffmpeg_command();
        command
            .args(["-y", "-f", "concat", "-safe", "0", "-i"])
            .arg(manifest.path())
            .args(encode_args(true))
            .arg(output);
        run_captured(&self.ffmpeg, &mut command).map(drop)
    }
}

/// Build a concat demuxer manifest, one `file '<absolute path>'` line per input.
fn concat_manifest(inputs: &[PathBuf]) -> Result<String> {
    let mut manifest = String::new();
    for input in inputs {
        let absolute = std::path::absolute(input)?;
        let escaped = absolute.to_string_lossy().replace('\'', r"'\''");
        manifest.push_str(&format!("file '{escaped}'\n"));
    }
    Ok(manifest)
}

/// Input options selecting `window` of `source`.
fn input_args(source: &Path, window: Option<ClipWindow>) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    if let Some(window) = window {
        args.extend([
            "-ss".into(),
            window.start_secs.to_string().into(),
            "-t".into(),
            window.duration_secs().to_string().into(),
        ]);
    }
    args.push("-i".into());
    args.push(source.as_os_str().to_os_string());
    args
}

/// Encoder options shared by every write.
fn encode_args(with_audio: bool) -> Vec<&'static str> {
    let mut args = vec!["-c:v", VIDEO_CODEC, "-pix_fmt", OUTPUT_PIX_FMT];
    if with_audio {
        args.extend(["-c:a", AUDIO_CODEC]);
    }
    args.extend(["-movflags", "+faststart"]);
    args
}

/// Result of moving frames from the decoder to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pumped {
    frames: u64,
    /// The encoder stopped reading before the decoder ran out.
    encoder_closed: bool,
}

/// Read raw frames, transform them and write them on until either side ends.
fn pump_frames(
    frames_in: &mut impl Read,
    frames_out: &mut impl Write,
    info: &VideoInfo,
    frame_len: usize,
    transform: &dyn FrameTransform,
) -> Result<Pumped> {
    let mut buffer = vec![0_u8; frame_len];
    let mut frames: u64 = 0;
    while read_frame(frames_in, &mut buffer)? {
        let frame = Frame::from_rgb(
            info.width,
            info.height,
            std::mem::replace(&mut buffer, vec![0_u8; frame_len]),
        )?;
        let transformed = transform.apply(&frame);
        match frames_out.write_all(transformed.as_bytes()) {
            Ok(()) => frames += 1,
            // The encoder reached its output length and stopped reading
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!("Encoder closed its input after {frames} frames");
                return Ok(Pumped {
                    frames,
                    encoder_closed: true,
                });
            }
            Err(e) => {
                return Err(Error::FramePipe {
                    message: format!("failed to write frame {frames} to encoder: {e}"),
                });
            }
        }
    }
    Ok(Pumped {
        frames,
        encoder_closed: false,
    })
}

/// Fill `buffer` with the next frame; `Ok(false)` on a clean end of stream.
fn read_frame(reader: &mut impl Read, buffer: &mut [u8]) -> Result<bool> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => {
                return Err(Error::FramePipe {
                    message: format!(
                        "decoder stopped mid-frame ({filled} of {} bytes)",
                        buffer.len()
                    ),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
    tags: Option<ProbeTags>,
}

impl ProbeStream {
    /// Display rotation in degrees, from the display matrix or the legacy `rotate` tag.
    fn rotation(&self) -> f64 {
        self.side_data_list
            .iter()
            .find_map(|d| d.rotation)
            .or_else(|| {
                self.tags
                    .as_ref()
                    .and_then(|t| t.rotate.as_deref())
                    .and_then(|r| r.trim().parse().ok())
            })
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeSideData {
    rotation: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProbeTags {
    rotate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Extract [`VideoInfo`] from `ffprobe -print_format json` output.
pub fn parse_probe_output(path: &Path, json: &[u8]) -> Result<VideoInfo> {
    let probe_error = |reason: &str| Error::VideoProbe {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let probe: ProbeOutput =
        serde_json::from_slice(json).map_err(|e| probe_error(&e.to_string()))?;

    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| probe_error("no video stream found"))?;
    let has_audio = probe
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    let (width, height) = match (video.width, video.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(probe_error("video stream has no frame size")),
    };
    // ffmpeg auto-rotates decoded frames, so quarter turns swap the frame size
    let (width, height) = if is_quarter_turn(video.rotation()) {
        (height, width)
    } else {
        (width, height)
    };

    let frame_rate = [&video.r_frame_rate, &video.avg_frame_rate]
        .into_iter()
        .flatten()
        .find(|rate| parse_frame_rate(rate).is_some())
        .cloned()
        .ok_or_else(|| probe_error("video stream has no frame rate"))?;

    let duration_secs = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(video.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| probe_error("duration unknown"))?;

    Ok(VideoInfo {
        duration_secs,
        width,
        height,
        frame_rate,
        has_audio,
    })
}

fn is_quarter_turn(degrees: f64) -> bool {
    (degrees.rem_euclid(180.0) - 90.0).abs() < 1.0
}

/// Parse a frame rate like `30`, `29.97` or `30000/1001`; `None` unless positive.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}
