use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Decimal, Uint128};

use vesting_utils::Duration;

use crate::error::CurveError;

/// Describes how the escrowed discount accrues with elapsed time.
///
/// Every variant maps elapsed seconds to an accrued amount which is zero at
/// `t = 0`, non-decreasing in `t` and never exceeds the vault balance.
/// All percentage parameters are fractions in the range 0.0-1.0.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscountCurve {
    /// No discount at all; release is a pure time-gated asset transfer
    None {},
    /// Discount grows proportionally to elapsed time, reaching
    /// `max_discount` of the balance after `max_duration`
    Linear {
        max_duration: Duration,
        max_discount: Decimal,
    },
    /// Discount grows in discrete steps of `rate_per_interval` every
    /// `interval`, capped after `max_intervals` steps
    Interval {
        interval: Duration,
        max_intervals: u64,
        rate_per_interval: Decimal,
        max_discount: Decimal,
    },
    /// Discount grows as `growth_rate * t^exponent`, capped at `max_discount`
    Convex {
        growth_rate: Decimal,
        exponent: u32,
        max_discount: Decimal,
    },
}

impl DiscountCurve {
    pub fn validate(&self) -> Result<(), CurveError> {
        match self {
            DiscountCurve::None {} => Ok(()),
            DiscountCurve::Linear {
                max_duration,
                max_discount,
            } => {
                validate_percentage(*max_discount)?;
                if max_duration.is_zero() {
                    return Err(CurveError::ZeroDuration {});
                }
                Ok(())
            }
            DiscountCurve::Interval {
                interval,
                max_intervals,
                rate_per_interval,
                max_discount,
            } => {
                validate_percentage(*rate_per_interval)?;
                validate_percentage(*max_discount)?;
                if interval.is_zero() {
                    return Err(CurveError::ZeroDuration {});
                }
                if *max_intervals == 0 {
                    return Err(CurveError::ZeroIntervals {});
                }
                let total = rate_per_interval
                    .checked_mul(Decimal::from_ratio(*max_intervals, 1u64))
                    .map_err(|_| CurveError::Overflow {})?;
                if total != *max_discount {
                    return Err(CurveError::RateScheduleMismatch {
                        rate: *rate_per_interval,
                        intervals: *max_intervals,
                        max_discount: *max_discount,
                    });
                }
                Ok(())
            }
            DiscountCurve::Convex {
                growth_rate,
                exponent,
                max_discount,
            } => {
                validate_percentage(*max_discount)?;
                if growth_rate.is_zero() {
                    return Err(CurveError::ZeroGrowth {});
                }
                if *exponent == 0 {
                    return Err(CurveError::ZeroExponent {});
                }
                Ok(())
            }
        }
    }

    /// Whether this variant pays out funds at release and therefore needs
    /// a pre-funded vault
    pub fn requires_funding(&self) -> bool {
        !matches!(self, DiscountCurve::None {})
    }

    /// Accrued discount after `elapsed` seconds, debitable from `balance`.
    ///
    /// Pure and total: never fails, always in range `[0, balance]`. The
    /// clamp to `balance` holds even where the raw parameter product would
    /// overflow the numeric range; an overflowing product saturates at the
    /// configured maximum instead of wrapping.
    pub fn accrued(&self, elapsed: u64, balance: Uint128) -> Uint128 {
        let amount = match self {
            DiscountCurve::None {} => Uint128::zero(),
            DiscountCurve::Linear {
                max_duration,
                max_discount,
            } => {
                // multiply before dividing, so a small elapsed time is not
                // floored away to zero
                let vested =
                    balance.multiply_ratio(elapsed.min(max_duration.seconds()), max_duration.seconds());
                vested * *max_discount
            }
            DiscountCurve::Interval {
                interval,
                max_intervals,
                rate_per_interval,
                max_discount,
            } => {
                let steps = (elapsed / interval.seconds()).min(*max_intervals);
                let fraction = rate_per_interval
                    .checked_mul(Decimal::from_ratio(steps, 1u64))
                    .unwrap_or(*max_discount)
                    .min(*max_discount);
                balance * fraction
            }
            DiscountCurve::Convex {
                growth_rate,
                exponent,
                max_discount,
            } => {
                let fraction = Decimal::from_ratio(elapsed, 1u64)
                    .checked_pow(*exponent)
                    .and_then(|power| growth_rate.checked_mul(power))
                    // overflow means the cap is exceeded anyway
                    .unwrap_or(*max_discount)
                    .min(*max_discount);
                balance * fraction
            }
        };
        amount.min(balance)
    }

    /// Accrual periods still ahead after `elapsed` seconds: remaining
    /// whole intervals for the stepped variant, remaining seconds for the
    /// linear one. The other variants have no natural period structure.
    pub fn remaining_periods(&self, elapsed: u64) -> Option<u64> {
        match self {
            DiscountCurve::None {} => None,
            DiscountCurve::Linear { max_duration, .. } => {
                Some(max_duration.seconds().saturating_sub(elapsed))
            }
            DiscountCurve::Interval {
                interval,
                max_intervals,
                ..
            } => {
                let steps = (elapsed / interval.seconds()).min(*max_intervals);
                Some(max_intervals - steps)
            }
            DiscountCurve::Convex { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DiscountCurve::None {} => "none",
            DiscountCurve::Linear { .. } => "linear",
            DiscountCurve::Interval { .. } => "interval",
            DiscountCurve::Convex { .. } => "convex",
        }
    }
}

fn validate_percentage(percentage: Decimal) -> Result<(), CurveError> {
    if percentage > Decimal::one() {
        Err(CurveError::PercentageOutOfRange(percentage))
    } else if percentage.is_zero() {
        Err(CurveError::ZeroDiscount {})
    } else {
        Ok(())
    }
}
