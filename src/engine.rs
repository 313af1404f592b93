// ⚖️ BMI Engine
// Validates raw form text, converts feet/inches to meters, computes and classifies BMI

use crate::error::BmiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meters per inch
pub const METERS_PER_INCH: f64 = 0.0254;
pub const INCHES_PER_FOOT: i64 = 12;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity")]
    Obesity,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Underweight => "Underweight",
            Category::NormalWeight => "Normal weight",
            Category::Overweight => "Overweight",
            Category::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify an already-rounded BMI value
pub fn classify(bmi: f64) -> Category {
    if bmi < 18.5 {
        Category::Underweight
    } else if bmi < 25.0 {
        Category::NormalWeight
    } else if bmi < 30.0 {
        Category::Overweight
    } else {
        Category::Obesity
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// The four text fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputForm {
    pub age: String,
    pub height_feet: String,
    pub height_inches: String,
    pub weight_kg: String,
}

impl InputForm {
    pub fn new(age: &str, height_feet: &str, height_inches: &str, weight_kg: &str) -> Self {
        InputForm {
            age: age.to_string(),
            height_feet: height_feet.to_string(),
            height_inches: height_inches.to_string(),
            weight_kg: weight_kg.to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = InputForm::default();
    }

    pub fn validate(&self) -> Result<ValidatedInput, BmiError> {
        validate(&self.age, &self.height_feet, &self.height_inches, &self.weight_kg)
    }
}

/// Numeric inputs that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub age: i32,
    pub feet: i32,
    pub inches: i32,
    pub weight_kg: f64,
}

impl ValidatedInput {
    /// Widened to i64, any pair of i32 feet/inches fits
    pub fn total_inches(&self) -> i64 {
        i64::from(self.feet) * INCHES_PER_FOOT + i64::from(self.inches)
    }

    pub fn height_meters(&self) -> f64 {
        self.total_inches() as f64 * METERS_PER_INCH
    }
}

/// Check presence first, then parse each field strictly.
///
/// Surrounding whitespace is ignored; a field that is blank counts as missing.
/// No range checks are made, negative and zero values pass.
pub fn validate(
    age: &str,
    height_feet: &str,
    height_inches: &str,
    weight_kg: &str,
) -> Result<ValidatedInput, BmiError> {
    let fields = [age, height_feet, height_inches, weight_kg].map(str::trim);
    if fields.iter().any(|f| f.is_empty()) {
        return Err(BmiError::MissingField);
    }
    let [age, feet, inches, weight] = fields;

    Ok(ValidatedInput {
        age: parse_int(age, "age")?,
        feet: parse_int(feet, "height_feet")?,
        inches: parse_int(inches, "height_inches")?,
        weight_kg: parse_decimal(weight, "weight_kg")?,
    })
}

fn parse_int(raw: &str, field: &'static str) -> Result<i32, BmiError> {
    raw.parse::<i32>()
        .map_err(|_| BmiError::InvalidNumber { field })
}

fn parse_decimal(raw: &str, field: &'static str) -> Result<f64, BmiError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BmiError::InvalidNumber { field }),
    }
}

// ============================================================================
// COMPUTATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// Rounded to 2 fractional digits
    pub bmi: f64,
    pub category: Category,
}

impl BmiResult {
    /// BMI as shown to the user, always 2 fractional digits
    pub fn bmi_display(&self) -> String {
        format!("{:.2}", self.bmi)
    }
}

/// Round half away from zero to 2 fractional digits
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// weight / height², rounded, then classified on the rounded value.
///
/// Zero total height is rejected rather than yielding an infinite BMI, and so
/// is any other input whose BMI overflows `f64`.
pub fn compute_bmi(input: &ValidatedInput) -> Result<BmiResult, BmiError> {
    if input.total_inches() == 0 {
        return Err(BmiError::ZeroHeight);
    }

    let meters = input.height_meters();
    let bmi = round_to_hundredths(input.weight_kg / (meters * meters));
    if !bmi.is_finite() {
        return Err(BmiError::OutOfRange);
    }

    Ok(BmiResult {
        bmi,
        category: classify(bmi),
    })
}
