//! Potency estimation
//!
//! Potency is an effect's magnitude or duration normalized into `[0, 1]`
//! against a per-effect calibration range.

use crate::host::ItemEffect;
use crate::rules::{Calibration, Calibrations};

/// Range used when an effect has no calibration entry
pub const DEFAULT_CALIBRATION: Calibration = Calibration {
    min: 5.0,
    max: 100.0,
};

/// Potency used when no meaningful ratio exists
pub const NEUTRAL_POTENCY: f32 = 0.5;

/// Calibration for an effect: editor ID first, then display name, then the default
pub fn calibration_for(effect: &ItemEffect, calibrations: &Calibrations) -> Calibration {
    let editor_id = effect.editor_id.as_deref().filter(|id| !id.is_empty());

    if let Some(calibration) = editor_id.and_then(|id| calibrations.get(id)) {
        return calibration;
    }
    if let Some(calibration) = calibrations.get(&effect.name) {
        return calibration;
    }

    tracing::warn!(
        effect = %effect.name,
        editor_id = editor_id.unwrap_or(""),
        "Did not find potency entry, using default range"
    );
    DEFAULT_CALIBRATION
}

/// Normalize a value into `[0, 1]`.
///
/// A non-finite ratio (empty range, infinite or NaN value) yields
/// [`NEUTRAL_POTENCY`].
pub fn normalize(value: f32, calibration: Calibration) -> f32 {
    let span = calibration.max - calibration.min;
    if span == 0.0 {
        tracing::warn!(min = calibration.min, "Potency range is empty, using neutral potency");
        return NEUTRAL_POTENCY;
    }

    let ratio = (value - calibration.min) / span;
    if !ratio.is_finite() {
        return NEUTRAL_POTENCY;
    }
    ratio.clamp(0.0, 1.0)
}

/// Estimate the potency of an item's scoring effect
pub fn estimate_potency(effect: &ItemEffect, calibrations: &Calibrations) -> f32 {
    let calibration = calibration_for(effect, calibrations);

    match effect.scaled_value() {
        Some(value) => normalize(value, calibration),
        None => {
            tracing::trace!(
                effect = %effect.name,
                "Neither magnitude nor duration scales with power, using neutral potency"
            );
            NEUTRAL_POTENCY
        }
    }
}
