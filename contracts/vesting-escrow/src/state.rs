use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, BlockInfo, Uint128};
use cw_storage_plus::Item;

use vesting_curve::DiscountCurve;
use vesting_utils::Expiration;

use crate::error::ContractError;

/// Handle to the non-fungible asset held by this escrow: a token within
/// an external cw721 collection, which stays the system of record for
/// ownership.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Asset {
    pub collection: Addr,
    pub token_id: String,
}

/// Release is a single-fire transition; once `Released` the escrow is a
/// terminal, queryable record.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseState {
    Locked,
    Released,
}

/// The fungible balance escrowed alongside the asset, funded at
/// instantiation and debited only during release.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Vault {
    pub denom: String,
    pub balance: Uint128,
}

impl Vault {
    pub fn balance(&self) -> Uint128 {
        self.balance
    }

    pub fn debit(&mut self, amount: Uint128) -> Result<(), ContractError> {
        self.balance =
            self.balance
                .checked_sub(amount)
                .map_err(|_| ContractError::InsufficientBalance {
                    available: self.balance,
                    requested: amount,
                })?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Escrow {
    pub asset: Asset,
    /// Who funded the vault at instantiation; single-payee curves return
    /// the unaccrued remainder here
    pub funder: Addr,
    pub beneficiary: Addr,
    /// Receiver of the accrued discount for the linear curve's two-party
    /// split, unused by the other curves
    pub secondary_payee: Option<Addr>,
    pub vesting_start: Expiration,
    pub curve: DiscountCurve,
    pub vault: Vault,
    pub state: ReleaseState,
}

impl Escrow {
    /// Whole seconds since vesting start, zero before it
    pub fn elapsed(&self, block: &BlockInfo) -> u64 {
        self.vesting_start.elapsed(block)
    }

    /// Discount accrued at the given block, clamped to the vault balance
    pub fn current_accrual(&self, block: &BlockInfo) -> Uint128 {
        self.curve.accrued(self.elapsed(block), self.vault.balance)
    }

    /// Earliest point release may happen. The stepped curve additionally
    /// requires its first interval to fully elapse.
    pub fn release_due_at(&self) -> Expiration {
        match &self.curve {
            DiscountCurve::Interval { interval, .. } => {
                self.vesting_start.plus_duration(*interval)
            }
            _ => self.vesting_start,
        }
    }
}

pub const ESCROW: Item<Escrow> = Item::new("escrow");
