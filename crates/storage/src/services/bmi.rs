//! Body-mass index in imperial units and the derived ranking score.

use crate::models::Band;

/// Converts lb/in² to kg/m².
pub const IMPERIAL_FACTOR: f64 = 703.0;

pub const NORMAL_THRESHOLD: f64 = 18.5;
pub const OVERWEIGHT_THRESHOLD: f64 = 25.0;
pub const OBESE_THRESHOLD: f64 = 30.0;

/// Consistency bonus earned per logged entry.
pub const BONUS_PER_ENTRY: f64 = 0.1;
pub const MAX_CONSISTENCY_BONUS: f64 = 2.0;

/// `weight / height² × 703`, or `0.0` when the height is not positive.
///
/// A bad height never fails a ranking pass; the user simply scores no index.
pub fn index(weight: f64, height: f64) -> f64 {
    if height.is_nan() || height <= 0.0 {
        return 0.0;
    }
    weight / (height * height) * IMPERIAL_FACTOR
}

pub fn band(index: f64) -> Band {
    if index < NORMAL_THRESHOLD {
        Band::Underweight
    } else if index < OVERWEIGHT_THRESHOLD {
        Band::Normal
    } else if index < OBESE_THRESHOLD {
        Band::Overweight
    } else {
        Band::Obese
    }
}

/// Index decrease plus a logging bonus capped at [`MAX_CONSISTENCY_BONUS`].
pub fn improvement_score(index_change: f64, observation_count: usize) -> f64 {
    let bonus = (observation_count as f64 * BONUS_PER_ENTRY).min(MAX_CONSISTENCY_BONUS);
    index_change + bonus
}
