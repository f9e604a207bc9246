
use suite::{SuiteBuilder, BENEFICIARY, OWNER, PAYEE, TOKEN_ID};

use assert_matches::assert_matches;
use cosmwasm_std::{Decimal, Event, Uint128};

use vesting_curve::DiscountCurve;
use vesting_utils::Duration;

use crate::error::ContractError;
use crate::state::ReleaseState;

fn linear_curve(max_duration: u64) -> DiscountCurve {
    DiscountCurve::Linear {
        max_duration: Duration::new(max_duration),
        max_discount: Decimal::one(),
    }
}

fn interval_curve() -> DiscountCurve {
    DiscountCurve::Interval {
        interval: Duration::new(100),
        max_intervals: 10,
        rate_per_interval: Decimal::percent(10),
        max_discount: Decimal::one(),
    }
}

fn convex_curve() -> DiscountCurve {
    DiscountCurve::Convex {
        growth_rate: Decimal::percent(1),
        exponent: 2,
        max_discount: Decimal::one(),
    }
}

#[test]
fn basic_release_after_vesting_start() {
    let mut suite = SuiteBuilder::new().with_start_offset(30).build();

    // 10 seconds in, still locked
    suite.advance_seconds(10);
    let err: ContractError = suite.release("anyone").unwrap_err().downcast().unwrap();
    assert_matches!(err, ContractError::NotYetVested(_));
    assert_eq!(suite.token_owner(TOKEN_ID), suite.escrow.as_str());
    assert_eq!(suite.escrow_info().state, ReleaseState::Locked);

    // past the start anyone may trigger the release
    suite.advance_seconds(21);
    suite.release("anyone").unwrap();
    assert_eq!(suite.token_owner(TOKEN_ID), BENEFICIARY);
    assert_eq!(suite.escrow_info().state, ReleaseState::Released);
}

#[test]
fn release_fires_at_most_once() {
    let mut suite = SuiteBuilder::new().build();

    suite.advance_seconds(30);
    suite.release(BENEFICIARY).unwrap();

    let err: ContractError = suite.release(BENEFICIARY).unwrap_err().downcast().unwrap();
    assert_eq!(err, ContractError::AlreadyReleased {});
    // the terminal record is still queryable and unchanged
    assert_eq!(suite.escrow_info().state, ReleaseState::Released);
    assert_eq!(suite.token_owner(TOKEN_ID), BENEFICIARY);
}

#[test]
fn release_requires_custody_of_the_asset() {
    let mut suite = SuiteBuilder::new().without_deposit().build();

    suite.advance_seconds(30);
    let err: ContractError = suite.release("anyone").unwrap_err().downcast().unwrap();
    assert_matches!(err, ContractError::AssetNotHeld { .. });
    assert_eq!(suite.escrow_info().state, ReleaseState::Locked);

    // retry after fixing the cause succeeds as if the first call had
    suite.send_nft(TOKEN_ID).unwrap();
    suite.release("anyone").unwrap();
    assert_eq!(suite.token_owner(TOKEN_ID), BENEFICIARY);
}

#[test]
fn deposit_hook_rejects_unknown_tokens() {
    let mut suite = SuiteBuilder::new().without_deposit().build();

    suite.mint_nft("stray-token").unwrap();
    let err: ContractError = suite.send_nft("stray-token").unwrap_err().downcast().unwrap();
    assert_matches!(err, ContractError::UnexpectedAsset { .. });
    // rejected, so the collection still records the owner
    assert_eq!(suite.token_owner("stray-token"), OWNER);
}

#[test]
fn linear_split_midway_through_the_schedule() {
    let mut suite = SuiteBuilder::new()
        .with_curve(linear_curve(1000))
        .with_secondary_payee(PAYEE)
        .with_funding(1000)
        .with_start_offset(100)
        .build();

    // elapsed = 500, half the schedule
    suite.advance_seconds(600);
    let resp = suite.release("anyone").unwrap();

    resp.assert_event(
        &Event::new("wasm-released")
            .add_attribute("token_id", TOKEN_ID)
            .add_attribute("beneficiary", BENEFICIARY)
            .add_attribute("discount_paid", "500"),
    );
    assert_eq!(suite.balance(PAYEE), 500);
    assert_eq!(suite.balance(BENEFICIARY), 500);
    assert_eq!(suite.balance(suite.escrow.as_str()), 0);
    assert_eq!(suite.token_owner(TOKEN_ID), BENEFICIARY);
    // conservation: the split drains exactly the pre-release balance
    assert_eq!(suite.balance(PAYEE) + suite.balance(BENEFICIARY), 1000);
}

#[test]
fn linear_split_past_the_schedule_end() {
    let mut suite = SuiteBuilder::new()
        .with_curve(linear_curve(1000))
        .with_secondary_payee(PAYEE)
        .with_funding(1000)
        .with_start_offset(100)
        .build();

    // elapsed = 1500, accrual capped at the full balance
    suite.advance_seconds(1600);
    suite.release("anyone").unwrap();

    assert_eq!(suite.balance(PAYEE), 1000);
    assert_eq!(suite.balance(BENEFICIARY), 0);
    assert_eq!(suite.token_owner(TOKEN_ID), BENEFICIARY);
}

#[test]
fn interval_accrual_steps_and_clamp() {
    let mut suite = SuiteBuilder::new()
        .with_curve(interval_curve())
        .with_funding(1000)
        .with_start_offset(100)
        .build();

    // two full intervals at elapsed = 250
    suite.advance_seconds(350);
    let accrual = suite.accrual();
    assert_eq!(accrual.elapsed, 250);
    assert_eq!(accrual.accrued, Uint128::new(200));
    assert_eq!(accrual.remaining_periods, Some(8));

    // elapsed = 1200, well past all ten intervals
    suite.advance_seconds(950);
    let accrual = suite.accrual();
    assert_eq!(accrual.accrued, Uint128::new(1000));
    assert_eq!(accrual.remaining_periods, Some(0));
}

#[test]
fn interval_release_pays_discount_and_refunds_the_rest() {
    let mut suite = SuiteBuilder::new()
        .with_curve(interval_curve())
        .with_funding(1000)
        .with_start_offset(100)
        .build();

    suite.advance_seconds(350);
    suite.release("anyone").unwrap();

    assert_eq!(suite.balance(BENEFICIARY), 200);
    assert_eq!(suite.balance(OWNER), 800);
    assert_eq!(suite.balance(suite.escrow.as_str()), 0);
    assert_eq!(suite.token_owner(TOKEN_ID), BENEFICIARY);
    assert_eq!(suite.vault_info().balance, Uint128::zero());
}

#[test]
fn interval_release_waits_for_the_first_interval() {
    let mut suite = SuiteBuilder::new()
        .with_curve(interval_curve())
        .with_funding(1000)
        .with_start_offset(100)
        .build();

    // past vesting start, first interval not yet complete
    suite.advance_seconds(150);
    let err: ContractError = suite.release("anyone").unwrap_err().downcast().unwrap();
    assert_matches!(err, ContractError::NotYetVested(_));
    // the failed attempt left everything untouched
    assert_eq!(suite.vault_info().balance, Uint128::new(1000));
    assert_eq!(suite.escrow_info().state, ReleaseState::Locked);

    suite.advance_seconds(50);
    suite.release("anyone").unwrap();
    assert_eq!(suite.balance(BENEFICIARY), 100);
    assert_eq!(suite.balance(OWNER), 900);
}

#[test]
fn convex_accrual_and_release() {
    let mut suite = SuiteBuilder::new()
        .with_curve(convex_curve())
        .with_funding(1000)
        .with_start_offset(100)
        .build();

    // 0.01 * 8^2 = 64% accrued at elapsed = 8
    suite.advance_seconds(108);
    assert_eq!(suite.accrual().accrued, Uint128::new(640));

    suite.release("anyone").unwrap();
    assert_eq!(suite.balance(BENEFICIARY), 640);
    assert_eq!(suite.balance(OWNER), 360);
    assert_eq!(suite.token_owner(TOKEN_ID), BENEFICIARY);
}

#[test]
fn convex_accrual_clamps_at_the_cap() {
    let mut suite = SuiteBuilder::new()
        .with_curve(convex_curve())
        .with_funding(1000)
        .with_start_offset(100)
        .build();

    // 0.01 * 20^2 = 400%, clamped to the full balance
    suite.advance_seconds(120);
    assert_eq!(suite.accrual().accrued, Uint128::new(1000));
}

#[test]
fn accrual_is_zero_before_vesting_start() {
    let suite = SuiteBuilder::new()
        .with_curve(linear_curve(1000))
        .with_secondary_payee(PAYEE)
        .with_funding(1000)
        .with_start_offset(100)
        .build();

    let accrual = suite.accrual();
    assert_eq!(accrual.elapsed, 0);
    assert_eq!(accrual.accrued, Uint128::zero());
    assert_eq!(suite.vault_info().balance, Uint128::new(1000));
}
