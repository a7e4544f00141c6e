//! Why a query did not resolve to a date.

use crate::astro::EphemerisError;
use crate::date::Date;

/// The outcome of a strategy or search that produced no date.
///
/// None of these is fatal: the dispatcher moves on to the next strategy and
/// a row that no strategy resolves is marked for manual checking.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The text holds nothing this strategy can use.
    #[error("text not recognised")]
    Unrecognized,
    /// The query does not apply, or has no answer of this shape.
    #[error("strategy not applicable")]
    Inapplicable,
    /// A tithi-anchored search ran out of days.
    #[error("no match in {steps} days from {start}")]
    NotFound { start: Date, steps: u32 },
    /// A solar-month search ran out of days.
    #[error("no match in the solar month; check manually")]
    CheckManual,
    /// Astronomy is disabled for this run.
    #[error("ephemeris unavailable")]
    EphemerisUnavailable,
    /// A digit run that is not a usable day or ordinal.
    #[error("malformed number {token:?}")]
    MalformedNumeric { token: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}
