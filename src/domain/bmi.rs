//! BMI computation and band classification.
//!
//! BMI = weight (kg) / height (m)², rounded to two decimals and mapped onto
//! four ordered bands with exclusive upper bounds {18.5, 24, 27, +inf}.

use serde::{Deserialize, Serialize};

/// Display settings for one classification band.
#[derive(Debug, Clone, Copy)]
struct BandSetting {
    max_bmi: f64,
    color: &'static str,
    rgb: (u8, u8, u8),
    description: &'static str,
}

/// Fixed classification table, ordered by ascending upper bound.
static BAND_SETTINGS: [BandSetting; 4] = [
    BandSetting {
        max_bmi: 18.5,
        color: "#31BAF9",
        rgb: (49, 186, 249),
        description: "過輕",
    },
    BandSetting {
        max_bmi: 24.0,
        color: "#86D73E",
        rgb: (134, 215, 62),
        description: "理想",
    },
    BandSetting {
        max_bmi: 27.0,
        color: "#FF982D",
        rgb: (255, 152, 45),
        description: "過重",
    },
    BandSetting {
        max_bmi: f64::INFINITY,
        color: "#FF1200",
        rgb: (255, 18, 0),
        description: "肥胖",
    },
];

/// BMI severity band.
///
/// Persisted as its integer level (`bmiLevel`). Any level outside `0..=3`
/// read back from storage clamps to [`Band::Obese`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum Band {
    /// BMI below 18.5
    Underweight,
    /// 18.5 <= BMI < 24
    Ideal,
    /// 24 <= BMI < 27
    Overweight,
    /// BMI of 27 and above
    Obese,
}

impl Band {
    /// All bands in ascending order.
    pub const ALL: [Band; 4] = [
        Band::Underweight,
        Band::Ideal,
        Band::Overweight,
        Band::Obese,
    ];

    /// Classify a (rounded) BMI value.
    ///
    /// Returns the first band whose upper bound exceeds `bmi`. NaN falls
    /// through to the last band.
    #[must_use]
    pub fn classify(bmi: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| bmi < band.setting().max_bmi)
            .unwrap_or(Band::Obese)
    }

    /// Map a stored level onto a band, clamping invalid levels to `Obese`.
    #[must_use]
    pub fn from_level(level: i64) -> Self {
        match level {
            0 => Band::Underweight,
            1 => Band::Ideal,
            2 => Band::Overweight,
            _ => Band::Obese,
        }
    }

    /// Integer level used in the persisted format.
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Band::Underweight => 0,
            Band::Ideal => 1,
            Band::Overweight => 2,
            Band::Obese => 3,
        }
    }

    /// Hex color string stored alongside results.
    #[must_use]
    pub fn color(self) -> &'static str {
        self.setting().color
    }

    /// Color for TUI display (RGB).
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        self.setting().rgb
    }

    /// Fixed display label stored alongside results.
    #[must_use]
    pub fn description(self) -> &'static str {
        self.setting().description
    }

    /// Lowercase English name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Band::Underweight => "underweight",
            Band::Ideal => "ideal",
            Band::Overweight => "overweight",
            Band::Obese => "obese",
        }
    }

    fn setting(self) -> &'static BandSetting {
        &BAND_SETTINGS[usize::from(self.level())]
    }
}

impl From<i64> for Band {
    fn from(level: i64) -> Self {
        Self::from_level(level)
    }
}

impl From<Band> for u8 {
    fn from(band: Band) -> Self {
        band.level()
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Outcome of a single calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    /// Rounded BMI rendered as the shortest decimal string
    pub bmi: String,

    /// Classification band
    pub bmi_level: Band,

    /// Band color (hex)
    pub color: String,

    /// Band label
    pub description: String,

    /// Height as entered (cm, trimmed)
    pub height: String,

    /// Weight as entered (kg, trimmed)
    pub weight: String,
}

impl BmiResult {
    /// Build a result whose color and description follow the band.
    #[must_use]
    pub fn new(
        bmi: impl Into<String>,
        band: Band,
        height: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self {
            bmi: bmi.into(),
            bmi_level: band,
            color: band.color().to_string(),
            description: band.description().to_string(),
            height: height.into(),
            weight: weight.into(),
        }
    }

    /// Classification band of this result.
    #[must_use]
    pub fn band(&self) -> Band {
        self.bmi_level
    }

    /// Numeric BMI, if the stored string parses.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.bmi.parse().ok()
    }
}

/// Compute a BMI result from height (cm) and weight (kg) text.
///
/// Returns `None` when either input is empty, zero or non-numeric, or when
/// the resulting BMI is not finite. Negative inputs are computed as given.
#[must_use]
pub fn compute(height: &str, weight: &str) -> Option<BmiResult> {
    let height_cm = parse_measurement(height)?;
    let weight_kg = parse_measurement(weight)?;

    let rounded = round_to_hundredths(bmi_value(height_cm, weight_kg));
    if !rounded.is_finite() {
        return None;
    }

    Some(BmiResult::new(
        format_number(rounded),
        Band::classify(rounded),
        height.trim(),
        weight.trim(),
    ))
}

/// Unrounded BMI.
#[must_use]
pub fn bmi_value(height_cm: f64, weight_kg: f64) -> f64 {
    let meters = height_cm / 100.0;
    weight_kg / (meters * meters)
}

/// Round half away from zero to two decimal places.
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Shortest decimal rendering of a number (`22.5`, `22`, `17.58`).
#[must_use]
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Parse a measurement; zero and NaN count as missing.
fn parse_measurement(input: &str) -> Option<f64> {
    parse_leading_number(input).filter(|v| !v.is_nan() && *v != 0.0)
}

/// Parse the longest leading decimal number of `input`, ignoring surrounding
/// whitespace. `"170cm"` parses as 170; `"cm170"` does not parse.
pub(crate) fn parse_leading_number(input: &str) -> Option<f64> {
    let s = input.trim();
    let bytes = s.as_bytes();
    let digits_in = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = digits_in(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_in(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_in(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_reference_case() {
        let result = compute("170", "65").expect("Should compute");
        assert_eq!(result.bmi, "22.49");
        assert_eq!(result.band(), Band::Ideal);
        assert_eq!(result.color, "#86D73E");
        assert_eq!(result.description, "理想");
        assert_eq!(result.height, "170");
        assert_eq!(result.weight, "65");
    }

    #[test]
    fn test_underweight_reference_case() {
        let result = compute("160", "45").expect("Should compute");
        assert_eq!(result.bmi, "17.58");
        assert_eq!(result.band(), Band::Underweight);
    }

    #[test]
    fn test_invalid_inputs_yield_no_result() {
        assert!(compute("0", "70").is_none());
        assert!(compute("170", "0").is_none());
        assert!(compute("", "70").is_none());
        assert!(compute("abc", "70").is_none());
        assert!(compute("170", ".").is_none());
        assert!(compute("-0", "70").is_none());
        assert!(compute("170", "1e999").is_none());
    }

    #[test]
    fn test_negative_inputs_are_computed() {
        let result = compute("-170", "65").expect("Should compute");
        assert_eq!(result.bmi, "22.49");
        assert_eq!(result.band(), Band::Ideal);
        assert_eq!(result.height, "-170");

        let result = compute("170", "-65").expect("Should compute");
        assert_eq!(result.bmi, "-22.49");
        assert_eq!(result.band(), Band::Underweight);
    }

    #[test]
    fn test_lenient_number_parsing() {
        assert_eq!(parse_leading_number(" 170cm "), Some(170.0));
        assert_eq!(parse_leading_number("65.5kg"), Some(65.5));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("12."), Some(12.0));
        assert_eq!(parse_leading_number("1e2"), Some(100.0));
        assert_eq!(parse_leading_number("1e"), Some(1.0));
        assert_eq!(parse_leading_number("kg65"), None);
        assert_eq!(parse_leading_number("-"), None);

        let result = compute(" 170cm", "65kg ").expect("Should compute");
        assert_eq!(result.bmi, "22.49");
        assert_eq!(result.height, "170cm");
    }

    #[test]
    fn test_band_boundaries_are_exclusive() {
        assert_eq!(Band::classify(18.49), Band::Underweight);
        assert_eq!(Band::classify(18.5), Band::Ideal);
        assert_eq!(Band::classify(23.99), Band::Ideal);
        assert_eq!(Band::classify(24.0), Band::Overweight);
        assert_eq!(Band::classify(26.99), Band::Overweight);
        assert_eq!(Band::classify(27.0), Band::Obese);
        assert_eq!(Band::classify(f64::NAN), Band::Obese);
    }

    #[test]
    fn test_classification_uses_rounded_value() {
        // 180 cm / 59.93 kg is 18.4969..., which rounds up into the ideal band.
        let result = compute("180", "59.93").expect("Should compute");
        assert_eq!(result.bmi, "18.5");
        assert_eq!(result.band(), Band::Ideal);
    }

    #[test]
    fn test_level_clamping() {
        assert_eq!(Band::from_level(0), Band::Underweight);
        assert_eq!(Band::from_level(2), Band::Overweight);
        assert_eq!(Band::from_level(4), Band::Obese);
        assert_eq!(Band::from_level(-1), Band::Obese);
    }

    #[test]
    fn test_result_serializes_with_camel_case_level() {
        let result = compute("170", "65").expect("Should compute");
        let json = serde_json::to_value(&result).expect("Should serialize");
        assert_eq!(json["bmiLevel"], 1);
        assert_eq!(json["bmi"], "22.49");

        let back: BmiResult = serde_json::from_value(json).expect("Should deserialize");
        assert_eq!(back, result);
    }

    #[test]
    fn test_format_number_is_shortest() {
        assert_eq!(format_number(22.5), "22.5");
        assert_eq!(format_number(22.0), "22");
        assert_eq!(format_number(round_to_hundredths(22.4913)), "22.49");
    }
}
