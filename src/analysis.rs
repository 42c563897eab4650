//! Mock verification reports.
//!
//! Nothing here inspects the submitted content: every score is drawn from a
//! fixed range. The generator is taken as a parameter so callers decide where
//! randomness comes from (`rand::rng()` when serving, a seeded `StdRng` in
//! tests).

use {
    crate::{
        error::{AppError, AppResult},
        models::{
            ImageReport, ManipulatedRegion, ManipulatedSegment, TextMetrics, TextReport,
            VideoReport,
        },
    },
    rand::{Rng, seq::IndexedRandom},
    std::ops::RangeInclusive,
};

pub const IMAGE_MANIPULATIONS: &[&str] = &["Face Swap", "Background Edit", "Lighting Manipulation"];
pub const VIDEO_MANIPULATIONS: &[&str] = &["Deepfake Face", "Synthetic Audio", "Spliced Frame"];

pub const HALLUCINATION_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const ACCURACY_RANGE: RangeInclusive<f64> = 0.7..=1.0;
pub const RELIABILITY_RANGE: RangeInclusive<f64> = 0.6..=1.0;
pub const RESPONSE_TIME_RANGE: RangeInclusive<f64> = 0.2..=1.5;
pub const FACT_CHECK_RANGE: RangeInclusive<f64> = 0.5..=1.0;

pub const IMAGE_CONFIDENCE_RANGE: RangeInclusive<f64> = 0.5..=0.99;
pub const IMAGE_FINDING_RANGE: RangeInclusive<f64> = 0.6..=0.95;

pub const VIDEO_CONFIDENCE_RANGE: RangeInclusive<f64> = 0.5..=0.98;
pub const VIDEO_FINDING_RANGE: RangeInclusive<f64> = 0.7..=0.95;
pub const SEGMENT_START_RANGE: RangeInclusive<f64> = 5.0..=50.0;
pub const SEGMENT_DURATION_RANGE: RangeInclusive<f64> = 2.0..=6.0;

const MAX_FINDINGS: usize = 3;

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn hallucination_level(score: f64) -> &'static str {
    if score < 0.3 {
        "low"
    } else if score < 0.7 {
        "moderate"
    } else {
        "high"
    }
}

/// Always keeps a decimal point, so `0.0` stays `0.0` rather than `0`.
fn score_text(score: f64) -> String {
    format!("{score:?}")
}

fn verdict(authentic: bool) -> &'static str {
    if authentic { "authentic" } else { "manipulated" }
}

fn pick_kind<R: Rng + ?Sized>(rng: &mut R, kinds: &[&str]) -> String {
    kinds.choose(rng).copied().unwrap_or_default().to_owned()
}

/// Returns a filename that is present and non-blank, or the given rejection.
fn require_filename<'a>(filename: Option<&'a str>, missing: &str) -> AppResult<&'a str> {
    filename
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::invalid_input(missing))
}

pub fn analyze_text<R: Rng + ?Sized>(
    rng: &mut R,
    model_name: &str,
    text: &str,
) -> AppResult<TextReport> {
    if text.trim().is_empty() {
        return Err(AppError::invalid_input("Input text cannot be empty"));
    }

    let hallucination_score = round_to(rng.random_range(HALLUCINATION_RANGE), 2);
    let metrics = TextMetrics {
        accuracy: rng.random_range(ACCURACY_RANGE),
        reliability: rng.random_range(RELIABILITY_RANGE),
        response_time: rng.random_range(RESPONSE_TIME_RANGE),
        fact_check_confidence: rng.random_range(FACT_CHECK_RANGE),
    };
    let analysis = format!(
        "The model '{}' performed moderately well. Based on analysis, its hallucination score is {}, indicating {} hallucination tendency.",
        model_name,
        score_text(hallucination_score),
        hallucination_level(hallucination_score),
    );

    tracing::debug!(model = model_name, hallucination_score, "text report drawn");

    Ok(TextReport {
        model: model_name.to_owned(),
        hallucination_score,
        metrics,
        analysis,
    })
}

pub fn analyze_image<R: Rng + ?Sized>(
    rng: &mut R,
    filename: Option<&str>,
) -> AppResult<ImageReport> {
    let filename = require_filename(filename, "No image uploaded")?;

    let authentic = rng.random_bool(0.5);
    let confidence_score = round_to(rng.random_range(IMAGE_CONFIDENCE_RANGE), 2);

    let manipulated_regions = if authentic {
        Vec::new()
    } else {
        let count = rng.random_range(1..=MAX_FINDINGS);
        (0..count)
            .map(|_| ManipulatedRegion {
                kind: pick_kind(rng, IMAGE_MANIPULATIONS),
                confidence: round_to(rng.random_range(IMAGE_FINDING_RANGE), 2),
            })
            .collect()
    };

    let analysis = format!(
        "The image '{}' appears {} with a confidence of {:.1}%.",
        filename,
        verdict(authentic),
        confidence_score * 100.0,
    );

    tracing::debug!(filename, authentic, confidence_score, "image report drawn");

    Ok(ImageReport {
        filename: filename.to_owned(),
        authentic,
        confidence_score,
        analysis,
        manipulated_regions,
    })
}

pub fn analyze_video<R: Rng + ?Sized>(
    rng: &mut R,
    filename: Option<&str>,
) -> AppResult<VideoReport> {
    let filename = require_filename(filename, "No video uploaded")?;

    let authentic = rng.random_bool(0.5);
    let confidence_score = round_to(rng.random_range(VIDEO_CONFIDENCE_RANGE), 2);

    let manipulated_segments = if authentic {
        Vec::new()
    } else {
        let count = rng.random_range(1..=MAX_FINDINGS);
        (0..count).map(|_| draw_segment(rng)).collect()
    };

    let analysis = format!(
        "The video '{}' is likely {} with a confidence of {:.1}%.",
        filename,
        verdict(authentic),
        confidence_score * 100.0,
    );

    tracing::debug!(filename, authentic, confidence_score, "video report drawn");

    Ok(VideoReport {
        filename: filename.to_owned(),
        authentic,
        confidence_score,
        analysis,
        manipulated_segments,
    })
}

fn draw_segment<R: Rng + ?Sized>(rng: &mut R) -> ManipulatedSegment {
    let start_time = round_to(rng.random_range(SEGMENT_START_RANGE), 1);
    let duration = round_to(rng.random_range(SEGMENT_DURATION_RANGE), 1);
    ManipulatedSegment {
        kind: pick_kind(rng, VIDEO_MANIPULATIONS),
        start_time,
        end_time: start_time + duration,
        confidence: round_to(rng.random_range(VIDEO_FINDING_RANGE), 2),
    }
}
