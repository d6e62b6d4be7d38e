//! Integration tests for the full sampling pipeline.
//!
//! Tests session lifecycle, end-to-end hue extraction through synthetic
//! capture sources, config serialization, and the error surface.

use std::cell::RefCell;
use std::rc::Rc;

use ambient_hue::capture::downsample_into;
use ambient_hue::{
    AmbientSession, CaptureError, CaptureSource, HueStrategy, SampleGrid, SessionConfig,
    SessionError, StillImage,
};
use image::{DynamicImage, Rgb, RgbImage};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config(strategy: HueStrategy) -> SessionConfig {
    SessionConfig {
        strategy,
        ..SessionConfig::new(256, 144, 16, 9)
    }
}

/// Left half red, right half blue, full intensity.
fn split_screen() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(256, 144, |x, _| {
        if x < 128 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    }))
}

// ── End-to-End Pipeline ─────────────────────────────────────────────

#[test]
fn still_image_pipeline_reports_the_dominant_hue() {
    init_logs();
    // Two thirds blue, one third white. White pixels are achromatic and
    // blue/white blends keep red == green, so the hue stays exactly blue.
    let frame = DynamicImage::ImageRgb8(RgbImage::from_fn(256, 144, |x, _| {
        if x < 170 {
            Rgb([0, 0, 255])
        } else {
            Rgb([255, 255, 255])
        }
    }));

    for strategy in [HueStrategy::AverageColor, HueStrategy::HueHistogram] {
        let source = Box::new(StillImage::new(frame.clone()));
        let mut session = AmbientSession::with_source(config(strategy), source).unwrap();
        let hue = session.ambient_hue().unwrap();
        assert!(
            (hue - 2.0 / 3.0).abs() < 0.01,
            "expected blue from {:?}, got {}",
            strategy,
            hue
        );
    }
}

#[test]
fn strategies_disagree_on_a_split_screen() {
    init_logs();
    // Averaging melts equal parts red and blue into magenta. Voting keeps
    // them apart, and the tie resolves to the lower hue bucket, red.
    let mut averaged = AmbientSession::with_source(
        config(HueStrategy::AverageColor),
        Box::new(StillImage::new(split_screen())),
    )
    .unwrap();
    let avg_hue = averaged.ambient_hue().unwrap();
    assert!(
        (avg_hue - 5.0 / 6.0).abs() < 1e-6,
        "expected magenta from averaging, got {}",
        avg_hue
    );

    let mut voted = AmbientSession::with_source(
        config(HueStrategy::HueHistogram),
        Box::new(StillImage::new(split_screen())),
    )
    .unwrap();
    assert_eq!(voted.ambient_hue().unwrap(), 0.0);
}

/// A capture source whose frame the test can swap mid-session.
struct SharedFrame(Rc<RefCell<DynamicImage>>);

impl CaptureSource for SharedFrame {
    fn capture_downsampled(&mut self, grid: &mut SampleGrid) -> Result<(), CaptureError> {
        downsample_into(&self.0.borrow(), grid)
    }
}

#[test]
fn queries_track_screen_content_over_time() {
    init_logs();
    let frame = Rc::new(RefCell::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        256,
        144,
        Rgb([0, 0, 255]),
    ))));
    let mut session = AmbientSession::with_source(
        config(HueStrategy::HueHistogram),
        Box::new(SharedFrame(Rc::clone(&frame))),
    )
    .unwrap();

    let hue = session.ambient_hue().unwrap();
    assert!((hue - 2.0 / 3.0).abs() < 0.01, "expected blue, got {}", hue);

    // The screen turns green; the next query must not remember blue.
    *frame.borrow_mut() = DynamicImage::ImageRgb8(RgbImage::from_pixel(256, 144, Rgb([0, 255, 0])));
    let hue = session.ambient_hue().unwrap();
    assert!((hue - 1.0 / 3.0).abs() < 0.01, "expected green, got {}", hue);
}

#[test]
fn session_lifecycle_round_trip() {
    init_logs();
    let settings = config(HueStrategy::AverageColor);
    let source = Box::new(StillImage::new(split_screen()));
    let mut session = AmbientSession::with_source(settings, source).unwrap();
    assert!(!session.is_closed());
    assert_eq!(session.config(), settings);

    session.ambient_hue().unwrap();
    session.close();
    assert!(session.is_closed());
    assert!(matches!(session.ambient_hue(), Err(SessionError::Closed)));
    // The config outlives teardown even though the capture state is gone.
    assert_eq!(session.config(), settings);

    // Closing again is a no-op, not an error.
    session.close();
    assert!(session.is_closed());
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn config_round_trips_through_json() {
    let original = SessionConfig {
        screen_width: 1920,
        screen_height: 1080,
        sample_width: 32,
        sample_height: 18,
        strategy: HueStrategy::HueHistogram,
    };
    let json = serde_json::to_string(&original).unwrap();
    let parsed: SessionConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn strategy_defaults_to_averaging_when_missing() {
    let json = r#"{"screen_width":1920,"screen_height":1080,"sample_width":32,"sample_height":18}"#;
    let parsed: SessionConfig = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.strategy, HueStrategy::AverageColor);
}

#[test]
fn strategy_names_are_snake_case() {
    let value = serde_json::to_value(HueStrategy::HueHistogram).unwrap();
    assert_eq!(value, serde_json::json!("hue_histogram"));
}

// ── Error Surface ───────────────────────────────────────────────────

#[test]
fn error_messages_name_the_problem() {
    let invalid = SessionError::InvalidDimensions {
        width: 0,
        height: 8,
    };
    assert!(invalid.to_string().contains("0x8"), "got: {}", invalid);

    let too_large = SessionError::GridTooLarge {
        requested: 20_000_000,
        max: ambient_hue::MAX_SAMPLE_PIXELS,
    };
    assert!(too_large.to_string().contains("20000000"), "got: {}", too_large);

    assert_eq!(SessionError::Closed.to_string(), "Session is closed");
}

#[test]
fn capture_errors_pass_through_unwrapped() {
    let wrapped = SessionError::from(CaptureError::NoMonitor);
    assert_eq!(wrapped.to_string(), "No monitor available to capture");
}

// ── Live Screen ─────────────────────────────────────────────────────

// Needs a display server, so it only runs with `cargo test -- --ignored`.
#[test]
#[ignore]
fn live_screen_hue_is_a_proper_fraction() {
    init_logs();
    let mut session = AmbientSession::new(SessionConfig::new(1920, 1080, 32, 18)).unwrap();

    let hue = session.ambient_hue().unwrap();
    assert!((0.0..1.0).contains(&hue), "hue out of range: {}", hue);
    session.close();
}
