pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

#[cfg(test)]
mod multitest;

pub use crate::error::ContractError;
