// BMI Calculator - Error taxonomy
// Every variant renders as the single line shown to the user

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BmiError {
    /// One or more of the four inputs was left empty
    #[error("Please enter age, height, and weight.")]
    MissingField,

    /// An input did not parse as a number. `field` is kept for logs only.
    #[error("All inputs must be valid numbers.")]
    InvalidNumber { field: &'static str },

    /// Feet and inches add up to zero, BMI would not be finite
    #[error("Height must be greater than zero.")]
    ZeroHeight,

    /// Weight and height are finite but their BMI overflows
    #[error("Height and weight are out of range.")]
    OutOfRange,
}
