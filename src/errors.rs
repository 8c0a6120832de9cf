//! Error types produced while validating stability inputs.
//!
//! The numeric routines never return these: they report invalid input through
//! `NaN`/`±∞` sentinels. Validation is an opt-in check callers can run before
//! solving so the sentinels can be traced back to a specific input.

use thiserror::Error;

/// Error returned when a parameter or option set is not physically meaningful.
///
/// # Examples
///
/// ```
/// use brbstab::{ParameterError, ScanOptions};
///
/// let options = ScanOptions {
///     step: 0.0,
///     ..ScanOptions::default()
/// };
/// let error = options.validate().expect_err("zero step is rejected");
/// assert_eq!(error, ParameterError::NonPositiveStep { step: 0.0 });
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// Returned when a stiffness, rotation or bound is negative or not finite.
    #[error("{field} must be finite and non-negative (received {value})")]
    NegativeValue {
        /// Name of the rejected field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when neither end of a span carries rotational stiffness.
    #[error("at least one of the gusset and restrainer stiffnesses must be positive")]
    NoRotationalRestraint,
    /// Returned when the connection length ratio lies outside `(0, 1)`.
    #[error("length ratio must lie strictly between 0 and 1 (received {length_ratio})")]
    LengthRatioOutOfRange {
        /// Rejected ratio `ξ`.
        length_ratio: f64,
    },
    /// Returned when the flexural rigidity ratio is zero or negative.
    #[error("stiffness ratio must be positive (received {stiffness_ratio})")]
    NonPositiveStiffnessRatio {
        /// Rejected ratio `γ`.
        stiffness_ratio: f64,
    },
    /// Returned when the imperfection would divide the capacity model by zero.
    #[error("imperfection must be positive (received {imperfection})")]
    NonPositiveImperfection {
        /// Rejected normalized imperfection `Δr`.
        imperfection: f64,
    },
    /// Returned when a scan increment is zero, negative or not finite.
    #[error("scan step must be positive (received {step})")]
    NonPositiveStep {
        /// Rejected increment.
        step: f64,
    },
    /// Returned when a scan range is empty or reversed.
    #[error("scan range [{min}, {max}] is empty")]
    EmptyRange {
        /// Lower bound of the range.
        min: f64,
        /// Upper bound of the range.
        max: f64,
    },
    /// Returned when a mode or occurrence index of zero is requested.
    #[error("mode numbers start at 1")]
    ZeroMode,
    /// Returned when one span of a chevron arrangement is invalid.
    #[error("span {span} is invalid: {source}")]
    InvalidSpan {
        /// One-based index of the offending span.
        span: usize,
        /// Description of the invalid property.
        #[source]
        source: Box<ParameterError>,
    },
}
