//! The rating widget contract: one underlying 0–10 value feeding two
//! display modes, a discrete 5-star control at 2.0 points per star and
//! a 0.1-step slider.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 10.0;
pub const RATING_STEP: f64 = 0.1;
pub const POINTS_PER_STAR: f64 = 2.0;
pub const STAR_COUNT: u8 = 5;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RateArtworkRequest {
    /// Rating value in [0.0, 10.0], 0.1 granularity.
    #[schema(example = 8.5)]
    pub rating: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    /// The stored (validated, quantized) rating for the caller.
    pub rating: f64,
    /// Fresh mean over all ratings for the artwork; absent when no
    /// ratings exist.
    pub average_rating: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRatingResponse {
    pub rating: Option<f64>,
}

/// Rejects values outside [0.0, 10.0]. NaN never compares in range, so
/// it is rejected by the same check.
pub fn validate_rating(value: f64) -> AppResult<()> {
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(AppError::ValidationError(format!(
            "Rating must be between {RATING_MIN} and {RATING_MAX}"
        )));
    }
    Ok(())
}

/// Snaps a value onto the slider's 0.1 grid. Scales by 10 rather than
/// dividing by the step: 7.35 / 0.1 lands just below 73.5 in binary
/// and would round down.
pub fn quantize_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Star clicks map to fixed points: star n selects n * 2.0.
pub fn stars_to_rating(stars: u8) -> f64 {
    f64::from(stars.min(STAR_COUNT)) * POINTS_PER_STAR
}

/// Number of fully lit stars for a rating; a star lights up once the
/// value reaches its threshold.
pub fn rating_to_stars(rating: f64) -> u8 {
    let clamped = rating.clamp(RATING_MIN, RATING_MAX);
    (clamped / POINTS_PER_STAR).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_boundaries() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(10.0).is_ok());
        assert!(validate_rating(5.3).is_ok());
        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(10.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn test_quantize_rating() {
        assert!((quantize_rating(7.349) - 7.3).abs() < 1e-9);
        assert!((quantize_rating(7.35) - 7.4).abs() < 1e-9);
        assert!((quantize_rating(10.0) - 10.0).abs() < 1e-9);
        assert!((quantize_rating(0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_star_mapping_round_trip() {
        // both display modes stay on the same underlying value
        for stars in 0..=STAR_COUNT {
            let rating = stars_to_rating(stars);
            assert_eq!(rating_to_stars(rating), stars);
        }
        assert_eq!(stars_to_rating(3), 6.0);
        assert_eq!(stars_to_rating(7), 10.0); // clamped to 5 stars
    }

    #[test]
    fn test_partial_values_floor_to_stars() {
        assert_eq!(rating_to_stars(7.9), 3);
        assert_eq!(rating_to_stars(8.0), 4);
        assert_eq!(rating_to_stars(0.1), 0);
    }
}
