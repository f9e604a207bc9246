use cosmwasm_std::{StdError, Timestamp, Uint128};
use thiserror::Error;

use cw_utils::PaymentError;
use vesting_curve::CurveError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Invalid curve parameters: {0}")]
    InvalidCurveParams(#[from] CurveError),

    #[error("Vesting must start strictly in the future (start {start}, now {now})")]
    InvalidSchedule { start: Timestamp, now: Timestamp },

    #[error("This curve pays out a discount and requires the vault to be funded at instantiation")]
    InsufficientFunding {},

    #[error("The linear curve pays its discount to a secondary payee, but none was given")]
    MissingSecondaryPayee {},

    #[error("Only the linear curve pays out to a secondary payee")]
    UnexpectedSecondaryPayee {},

    #[error("Nothing can be released before {0}")]
    NotYetVested(Timestamp),

    #[error("Escrow does not hold token {token_id}, it is owned by {owner}")]
    AssetNotHeld { token_id: String, owner: String },

    #[error("Escrow has already been released")]
    AlreadyReleased {},

    #[error("Escrow only accepts token {expected} of collection {collection}")]
    UnexpectedAsset {
        expected: String,
        collection: String,
    },

    #[error("Transferring the escrowed asset to the beneficiary failed")]
    AssetTransferFailed {},

    #[error("Paying out escrowed funds failed")]
    PayoutFailed {},

    #[error("Insufficient vault balance: {available} available, {requested} requested")]
    InsufficientBalance {
        available: Uint128,
        requested: Uint128,
    },

    #[error("Unrecognized reply id: {0}")]
    UnrecognizedReply(u64),
}
