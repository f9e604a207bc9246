use cosmwasm_std::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CurveError {
    #[error("Percentage must be in range 0.0-1.0: {0}")]
    PercentageOutOfRange(Decimal),

    #[error("Maximum discount must be greater than zero")]
    ZeroDiscount {},

    #[error("Duration must be greater than zero")]
    ZeroDuration {},

    #[error("Number of intervals must be greater than zero")]
    ZeroIntervals {},

    #[error("Per-interval rate {rate} times {intervals} intervals must equal the maximum discount {max_discount}")]
    RateScheduleMismatch {
        rate: Decimal,
        intervals: u64,
        max_discount: Decimal,
    },

    #[error("Growth rate must be greater than zero")]
    ZeroGrowth {},

    #[error("Exponent must be greater than zero")]
    ZeroExponent {},

    #[error("Curve parameter product overflows")]
    Overflow {},
}
