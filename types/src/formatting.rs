//! Potency formatting helpers.
//!
//! Potency is always a normalized value in `[0, 1]`. These helpers map it
//! onto a fixed number of bands, either the roman numeral table or a
//! descriptor category's word list.

/// Roman numerals appended in numeral mode, weakest first.
pub const ROMAN_NUMERALS: [&str; 20] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV", "XV",
    "XVI", "XVII", "XVIII", "XIX", "XX",
];

/// Map a potency onto one of `band_count` bands.
///
/// Computes `floor(p * (band_count - 1))`, so only a potency of exactly
/// `1.0` reaches the last band. Out-of-range and NaN potencies are clamped
/// first. Returns 0 when there are no bands.
///
/// # Examples
/// ```
/// use brewname_types::formatting::potency_band;
/// assert_eq!(potency_band(0.0, 5), 0);
/// assert_eq!(potency_band(0.5, 3), 1);
/// assert_eq!(potency_band(0.99, 3), 1);
/// assert_eq!(potency_band(1.0, 3), 2);
/// assert_eq!(potency_band(7.0, 3), 2);
/// ```
pub fn potency_band(potency: f32, band_count: usize) -> usize {
    if band_count == 0 {
        return 0;
    }
    let potency = if potency.is_nan() { 0.0 } else { potency.clamp(0.0, 1.0) };
    let index = (potency * (band_count - 1) as f32).floor() as usize;
    index.min(band_count - 1)
}

/// Roman numeral for a potency.
///
/// # Examples
/// ```
/// use brewname_types::formatting::roman_numeral;
/// assert_eq!(roman_numeral(0.0), "I");
/// assert_eq!(roman_numeral(0.5), "X");
/// assert_eq!(roman_numeral(1.0), "XX");
/// ```
pub fn roman_numeral(potency: f32) -> &'static str {
    ROMAN_NUMERALS[potency_band(potency, ROMAN_NUMERALS.len())]
}
