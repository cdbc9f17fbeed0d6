use thiserror::Error;

/// Errors surfaced by calendar conversion and period arithmetic.
///
/// All calendar operations are total: every failure mode is represented
/// here, and none of them is ever papered over with an approximate date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The lunar year falls outside the 1900-2100 span covered by the table.
    #[error("lunar year {0} is outside the supported range (1900-2100)")]
    OutOfRange(i32),

    /// No solar date converts back to the given lunar date. This indicates
    /// an inconsistency that must be reported, never guessed around.
    #[error(
        "no solar date resolves lunar {year}-{month}-{day} (leap month: {is_leap_month})"
    )]
    Unresolvable {
        year: i32,
        month: u32,
        day: u32,
        is_leap_month: bool,
    },

    /// A zero-length period reached the arithmetic layer. Periods are
    /// validated at subscription creation time, so this is a caller bug.
    #[error("period value must be at least 1")]
    InvalidPeriod,
}
