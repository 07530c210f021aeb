//! Turns scoring events into captioned clip windows.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::overlay::Scoreboard;
use crate::scoresheet::{RunningScore, ScoreEvent, ScoreSheet};
use crate::video::{ClipWindow, Segment, VideoInfo};

/// Settings for highlight extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Seconds kept before each event.
    pub duration: u32,
    /// Attach a scoreboard to each clip.
    pub overlays: bool,
}

/// A clip queued for one scoring event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightClip {
    /// Position of the event in the score file's event list.
    pub index: usize,
    /// The event this clip leads up to.
    pub event: ScoreEvent,
    /// Part of the source video to keep.
    pub window: ClipWindow,
    /// Score before the event, if overlays are enabled.
    pub scoreboard: Option<Scoreboard>,
}

/// Clips planned for one score file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightPlan {
    /// Source video.
    pub source: PathBuf,
    /// Clips in event order.
    pub clips: Vec<HighlightClip>,
    /// Running score after the last queued clip.
    pub final_score: RunningScore,
    /// Events that could not be turned into a clip.
    pub skipped: usize,
}

impl HighlightPlan {
    /// Segments for the assembler, in clip order.
    pub fn segments(&self) -> Vec<Segment> {
        self.clips
            .iter()
            .map(|clip| Segment::clip(&self.source, clip.window, clip.scoreboard.clone()))
            .collect()
    }
}

/// Window `[max(0, event_time - duration), event_time]`.
pub fn clip_window(event_time: u32, duration: u32) -> ClipWindow {
    ClipWindow {
        start_secs: event_time.saturating_sub(duration),
        end_secs: event_time,
    }
}

/// Plan highlight clips against a probed source video.
///
/// Windows running past the end of the video are shortened; events at or
/// after the end are skipped.
///
/// # Errors
///
/// Returns [`Error::NoHighlightClips`] when no event yields a clip.
pub fn extract_highlights(
    sheet: &ScoreSheet,
    info: &VideoInfo,
    options: &ExtractOptions,
) -> Result<HighlightPlan> {
    plan_highlights(sheet, Some(info.duration_secs), options)
}

/// Plan highlight clips; `video_duration` of `None` skips the range check.
///
/// The running score starts from the match's starting scores. Each clip's
/// scoreboard is a snapshot taken before its own event is applied, and only
/// queued clips advance the score. An event whose deltas would overflow the
/// score is skipped.
///
/// # Errors
///
/// Returns [`Error::NoHighlightClips`] when no event yields a clip.
pub fn plan_highlights(
    sheet: &ScoreSheet,
    video_duration: Option<f64>,
    options: &ExtractOptions,
) -> Result<HighlightPlan> {
    let metadata = &sheet.metadata;
    let mut score = metadata.starting_score();
    let mut clips = Vec::with_capacity(sheet.events.len());
    let mut skipped = 0;

    for (index, event) in sheet.events.iter().enumerate() {
        let queued = fit_window(
            event.time_secs,
            clip_window(event.time_secs, options.duration),
            video_duration,
        )
        .and_then(|window| {
            let next = score.after(event).ok_or_else(|| Error::ClipExtraction {
                event_time: event.time_secs,
                reason: format!("score {score} overflows"),
            })?;
            Ok((window, next))
        });
        let (window, next) = match queued {
            Ok(queued) => queued,
            Err(e) => {
                warn!("Skipping event {}: {e}", index + 1);
                skipped += 1;
                continue;
            }
        };

        let scoreboard = options
            .overlays
            .then(|| Scoreboard::snapshot(metadata, score));
        debug!(
            "Clip {}: {}s-{}s at {score}",
            clips.len() + 1,
            window.start_secs,
            window.end_secs
        );
        clips.push(HighlightClip {
            index,
            event: *event,
            window,
            scoreboard,
        });

        score = next;
    }

    if clips.is_empty() {
        return Err(Error::NoHighlightClips {
            path: metadata.video_path.clone(),
        });
    }

    Ok(HighlightPlan {
        source: metadata.video_path.clone(),
        clips,
        final_score: score,
        skipped,
    })
}

/// Fit a window to the source video.
///
/// A window running past the end is cut at the end of the video; only a
/// window starting at or after the end, or an empty one, is rejected.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fit_window(
    event_time: u32,
    window: ClipWindow,
    video_duration: Option<f64>,
) -> Result<ClipWindow> {
    if window.duration_secs() == 0 {
        return Err(Error::ClipExtraction {
            event_time,
            reason: "clip would be empty".to_string(),
        });
    }

    let Some(duration) = video_duration else {
        return Ok(window);
    };
    if f64::from(window.start_secs) >= duration {
        return Err(Error::ClipExtraction {
            event_time,
            reason: format!("video is only {duration:.2}s long"),
        });
    }

    // ffmpeg stops at the end of input, so rounding up keeps the final partial second
    let last = duration.ceil() as u32;
    Ok(ClipWindow {
        end_secs: window.end_secs.min(last),
        ..window
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::scoresheet::MatchMetadata;

    fn event(time_secs: u32, team_one_delta: i64, team_two_delta: i64) -> ScoreEvent {
        ScoreEvent {
            time_secs,
            team_one_delta,
            team_two_delta,
            extra: 0,
        }
    }

    fn sheet(events: Vec<ScoreEvent>) -> ScoreSheet {
        ScoreSheet {
            metadata: MatchMetadata {
                video_path: PathBuf::from("/videos/match.mp4"),
                team_one: "Red Hawks".to_string(),
                team_two: "Otters".to_string(),
                starting_score_one: 0,
                starting_score_two: 0,
            },
            events,
        }
    }

    fn video(duration_secs: f64) -> VideoInfo {
        VideoInfo {
            duration_secs,
            width: 640,
            height: 360,
            frame_rate: "30/1".to_string(),
            has_audio: true,
        }
    }

    const OVERLAYS: ExtractOptions = ExtractOptions {
        duration: 10,
        overlays: true,
    };

    #[test]
    fn test_clip_window_clamps_at_zero() {
        assert_eq!(
            clip_window(20, 10),
            ClipWindow {
                start_secs: 10,
                end_secs: 20
            }
        );
        assert_eq!(
            clip_window(4, 10),
            ClipWindow {
                start_secs: 0,
                end_secs: 4
            }
        );
    }

    #[test]
    fn test_captions_show_score_before_event() {
        let sheet = sheet(vec![event(20, 1, 0), event(60, 0, 2)]);
        let plan = extract_highlights(&sheet, &video(120.0), &OVERLAYS).unwrap();

        assert_eq!(plan.clips.len(), 2);
        assert_eq!(plan.clips[0].window, clip_window(20, 10));
        assert_eq!(plan.clips[1].window, clip_window(60, 10));

        let first = plan.clips[0].scoreboard.as_ref().unwrap();
        let second = plan.clips[1].scoreboard.as_ref().unwrap();
        assert_eq!(first.score().to_string(), "0-0");
        assert_eq!(second.score().to_string(), "1-0");
        assert_eq!(second.team_one.text(), "Red Hawks: 1");

        assert_eq!(
            plan.final_score,
            RunningScore {
                team_one: 1,
                team_two: 2
            }
        );
        assert_eq!(plan.skipped, 0);
    }

    #[test]
    fn test_starting_scores_seed_captions() {
        let mut sheet = sheet(vec![event(30, 2, 0), event(40, 0, 3)]);
        sheet.metadata.starting_score_one = 5;
        sheet.metadata.starting_score_two = 7;

        let plan = plan_highlights(&sheet, None, &OVERLAYS).unwrap();
        let captions: Vec<String> = plan
            .clips
            .iter()
            .map(|c| c.scoreboard.as_ref().unwrap().score().to_string())
            .collect();
        assert_eq!(captions, vec!["5-7", "7-7"]);
        assert_eq!(plan.final_score.to_string(), "7-10");
    }

    #[test]
    fn test_overlays_disabled_leaves_clips_bare() {
        let options = ExtractOptions {
            duration: 10,
            overlays: false,
        };
        let plan = plan_highlights(&sheet(vec![event(20, 1, 0)]), None, &options).unwrap();
        assert!(plan.clips[0].scoreboard.is_none());
        assert_eq!(plan.final_score.team_one, 1);
    }

    #[test]
    fn test_out_of_range_event_skipped_without_scoring() {
        let sheet = sheet(vec![event(20, 1, 0), event(500, 3, 0), event(60, 0, 1)]);
        let plan = extract_highlights(&sheet, &video(90.0), &OVERLAYS).unwrap();

        assert_eq!(plan.clips.len(), 2);
        assert_eq!(plan.skipped, 1);
        assert_eq!(plan.clips[1].index, 2);
        // The skipped event's deltas never reach later captions
        assert_eq!(
            plan.clips[1].scoreboard.as_ref().unwrap().score().to_string(),
            "1-0"
        );
        assert_eq!(plan.final_score.to_string(), "1-1");
    }

    #[test]
    fn test_event_just_past_video_end_is_shortened() {
        let sheet = sheet(vec![event(95, 1, 0), event(100, 0, 1)]);
        let plan = extract_highlights(&sheet, &video(90.0), &OVERLAYS).unwrap();

        assert_eq!(plan.clips.len(), 1);
        assert_eq!(
            plan.clips[0].window,
            ClipWindow {
                start_secs: 85,
                end_secs: 90
            }
        );
        assert_eq!(plan.clips[0].event.time_secs, 95);
        // Window for the event at 100s starts at 90s, the end of the video
        assert_eq!(plan.skipped, 1);
        assert_eq!(plan.final_score.to_string(), "1-0");
    }

    #[test]
    fn test_shortened_clip_keeps_fractional_tail() {
        let plan =
            extract_highlights(&sheet(vec![event(95, 1, 0)]), &video(90.4), &OVERLAYS).unwrap();
        assert_eq!(plan.clips[0].window.end_secs, 91);
    }

    #[test]
    fn test_overflowing_score_event_is_skipped() {
        let mut sheet = sheet(vec![event(20, 1, 0), event(40, 0, 1)]);
        sheet.metadata.starting_score_one = i64::MAX;

        let plan = plan_highlights(&sheet, None, &OVERLAYS).unwrap();
        assert_eq!(plan.skipped, 1);
        assert_eq!(plan.clips.len(), 1);
        assert_eq!(plan.clips[0].event.time_secs, 40);
        assert_eq!(
            plan.clips[0].scoreboard.as_ref().unwrap().team_one.score,
            i64::MAX
        );
        assert_eq!(plan.final_score.team_two, 1);
    }

    #[test]
    fn test_event_at_zero_is_skipped() {
        let plan = plan_highlights(&sheet(vec![event(0, 1, 0), event(15, 0, 1)]), None, &OVERLAYS)
            .unwrap();
        assert_eq!(plan.clips.len(), 1);
        assert_eq!(plan.clips[0].event.time_secs, 15);
    }

    #[test]
    fn test_event_at_video_end_is_kept() {
        let plan = extract_highlights(&sheet(vec![event(90, 1, 0)]), &video(90.0), &OVERLAYS)
            .unwrap();
        assert_eq!(plan.clips.len(), 1);
    }

    #[test]
    fn test_no_surviving_clips_is_an_error() {
        let result = extract_highlights(&sheet(vec![event(300, 1, 0)]), &video(60.0), &OVERLAYS);
        assert!(matches!(result, Err(Error::NoHighlightClips { .. })));

        let mut sheet = sheet(vec![event(20, 1, 0)]);
        sheet.metadata.starting_score_one = i64::MAX;
        let result = plan_highlights(&sheet, None, &OVERLAYS);
        assert!(matches!(result, Err(Error::NoHighlightClips { .. })));
    }

    #[test]
    fn test_segments_follow_clip_order() {
        let plan = plan_highlights(&sheet(vec![event(20, 1, 0), event(60, 0, 2)]), None, &OVERLAYS)
            .unwrap();
        let segments = plan.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].window, Some(clip_window(20, 10)));
        assert_eq!(segments[1].source, PathBuf::from("/videos/match.mp4"));
        assert!(segments[1].scoreboard.is_some());
    }
}
