use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Uint128};
use cw721::Cw721ReceiveMsg;

use vesting_curve::DiscountCurve;
use vesting_utils::Expiration;

use crate::state::{Asset, ReleaseState};

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct InstantiateMsg {
    /// The token this escrow will hold until release
    pub asset: Asset,
    /// Receiver of the asset and, depending on the curve, part of the funds
    pub beneficiary: Addr,
    /// Receiver of the accrued discount; required by the linear curve,
    /// rejected by all others
    pub secondary_payee: Option<Addr>,
    /// Must lie strictly in the future at instantiation time
    pub vesting_start: Expiration,
    pub curve: DiscountCurve,
    /// Native denom of the vault; funding is taken from the message funds
    pub denom: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Trigger the one-shot release; deliberately callable by anyone once
    /// the time condition holds
    Release {},
    /// Deposit hook invoked by the cw721 collection when the asset is sent
    /// to this escrow
    ReceiveNft(Cw721ReceiveMsg),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Immutable configuration and the release state
    EscrowInfo {},
    /// Current vault denom and balance
    VaultInfo {},
    /// Elapsed time and the discount accrued at the current block
    Accrual {},
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct EscrowInfoResponse {
    pub asset: Asset,
    pub funder: Addr,
    pub beneficiary: Addr,
    pub secondary_payee: Option<Addr>,
    pub vesting_start: Expiration,
    pub curve: DiscountCurve,
    pub state: ReleaseState,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct VaultInfoResponse {
    pub denom: String,
    pub balance: Uint128,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct AccrualResponse {
    /// Whole seconds since vesting start, zero before it
    pub elapsed: u64,
    /// Discount accrued at the current block, clamped to the vault balance
    pub accrued: Uint128,
    /// Accrual periods still ahead, where the curve has a natural period
    /// structure
    pub remaining_periods: Option<u64>,
}
