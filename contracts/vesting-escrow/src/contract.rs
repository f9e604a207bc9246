#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coins, to_binary, Addr, BankMsg, Binary, Deps, DepsMut, Env, Event, MessageInfo, Reply,
    Response, StdResult, SubMsg, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw721::{Cw721ExecuteMsg, Cw721QueryMsg, Cw721ReceiveMsg, OwnerOfResponse};
use cw_utils::{may_pay, nonpayable};

use vesting_curve::DiscountCurve;

use crate::error::ContractError;
use crate::msg::{
    AccrualResponse, EscrowInfoResponse, ExecuteMsg, InstantiateMsg, QueryMsg, VaultInfoResponse,
};
use crate::state::{Escrow, ReleaseState, Vault, ESCROW};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:vesting-escrow";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Reply ids marking which external transfer of a release failed
const ASSET_TRANSFER_REPLY_ID: u64 = 1;
const PAYOUT_REPLY_ID: u64 = 2;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.vesting_start.is_expired(&env.block) {
        return Err(ContractError::InvalidSchedule {
            start: msg.vesting_start.time(),
            now: env.block.time,
        });
    }
    msg.curve.validate()?;
    match (&msg.curve, &msg.secondary_payee) {
        (DiscountCurve::Linear { .. }, None) => {
            return Err(ContractError::MissingSecondaryPayee {})
        }
        (DiscountCurve::Linear { .. }, Some(_)) | (_, None) => (),
        (_, Some(_)) => return Err(ContractError::UnexpectedSecondaryPayee {}),
    }

    // the vault can only be funded here; there is no later funding path
    let balance = if msg.curve.requires_funding() {
        let amount = may_pay(&info, &msg.denom)?;
        if amount.is_zero() {
            return Err(ContractError::InsufficientFunding {});
        }
        amount
    } else {
        nonpayable(&info)?;
        Uint128::zero()
    };

    let escrow = Escrow {
        asset: msg.asset,
        funder: info.sender.clone(),
        beneficiary: msg.beneficiary,
        secondary_payee: msg.secondary_payee,
        vesting_start: msg.vesting_start,
        curve: msg.curve,
        vault: Vault {
            denom: msg.denom,
            balance,
        },
        state: ReleaseState::Locked,
    };
    ESCROW.save(deps.storage, &escrow)?;

    let created_ev = Event::new("escrow_created")
        .add_attribute("collection", &escrow.asset.collection)
        .add_attribute("token_id", &escrow.asset.token_id)
        .add_attribute("beneficiary", &escrow.beneficiary)
        .add_attribute("curve", escrow.curve.kind());
    let mut res = Response::default().add_event(created_ev);
    if !balance.is_zero() {
        res = res.add_event(
            Event::new("funded")
                .add_attribute("sender", info.sender)
                .add_attribute("amount", balance.to_string()),
        );
    }
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Release {} => execute_release(deps, env),
        ExecuteMsg::ReceiveNft(receive) => execute_receive_nft(deps, info, receive),
    }
}

/// The single state-changing operation. Permissionless: any caller may
/// trigger it once the time condition holds.
fn execute_release(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let mut escrow = ESCROW.load(deps.storage)?;

    let due = escrow.release_due_at();
    if !due.is_expired(&env.block) {
        return Err(ContractError::NotYetVested(due.time()));
    }

    // checked before custody: a released escrow no longer holds the token,
    // so a later call must report the terminal state, not a custody error
    if escrow.state != ReleaseState::Locked {
        return Err(ContractError::AlreadyReleased {});
    }

    // guards against release before deposit or after external interference
    let holder: OwnerOfResponse = deps.querier.query_wasm_smart(
        escrow.asset.collection.clone(),
        &Cw721QueryMsg::OwnerOf {
            token_id: escrow.asset.token_id.clone(),
            include_expired: None,
        },
    )?;
    if holder.owner != env.contract.address.as_str() {
        return Err(ContractError::AssetNotHeld {
            token_id: escrow.asset.token_id,
            owner: holder.owner,
        });
    }

    let discount = escrow.current_accrual(&env.block);
    let denom = escrow.vault.denom.clone();
    // both debits together drain exactly the pre-release balance
    escrow.vault.debit(discount)?;
    let remainder = escrow.vault.balance();
    escrow.vault.debit(remainder)?;

    let mut payouts: Vec<(Addr, Uint128)> = vec![];
    match &escrow.curve {
        DiscountCurve::None {} => (),
        DiscountCurve::Linear { .. } => {
            // two-party split: discount to the secondary payee, the
            // unaccrued rest to the beneficiary
            let payee = escrow
                .secondary_payee
                .clone()
                .ok_or(ContractError::MissingSecondaryPayee {})?;
            payouts.push((payee, discount));
            payouts.push((escrow.beneficiary.clone(), remainder));
        }
        DiscountCurve::Interval { .. } | DiscountCurve::Convex { .. } => {
            payouts.push((escrow.beneficiary.clone(), discount));
            payouts.push((escrow.funder.clone(), remainder));
        }
    }

    // Committed before any submessage is dispatched: a reentrant Release
    // observes the Released state and the drained vault, and fails closed.
    // Any submessage failure reverts this write together with everything
    // else in the transaction.
    escrow.state = ReleaseState::Released;
    ESCROW.save(deps.storage, &escrow)?;

    let transfer = WasmMsg::Execute {
        contract_addr: escrow.asset.collection.to_string(),
        msg: to_binary(&Cw721ExecuteMsg::TransferNft {
            recipient: escrow.beneficiary.to_string(),
            token_id: escrow.asset.token_id.clone(),
        })?,
        funds: vec![],
    };
    // asset transfer first, payouts after it
    let mut msgs = vec![SubMsg::reply_on_error(transfer, ASSET_TRANSFER_REPLY_ID)];
    for (addr, amount) in payouts {
        if amount.is_zero() {
            continue;
        }
        let send = BankMsg::Send {
            to_address: addr.into(),
            amount: coins(amount.u128(), &denom),
        };
        msgs.push(SubMsg::reply_on_error(send, PAYOUT_REPLY_ID));
    }

    let released_ev = Event::new("released")
        .add_attribute("token_id", escrow.asset.token_id)
        .add_attribute("beneficiary", escrow.beneficiary)
        .add_attribute("discount_paid", discount.to_string());
    Ok(Response::new().add_submessages(msgs).add_event(released_ev))
}

/// cw721 deposit hook. Only the configured token of the configured
/// collection is accepted, so a stray NFT cannot end up locked in here.
fn execute_receive_nft(
    deps: DepsMut,
    info: MessageInfo,
    receive: Cw721ReceiveMsg,
) -> Result<Response, ContractError> {
    let escrow = ESCROW.load(deps.storage)?;

    if info.sender != escrow.asset.collection || receive.token_id != escrow.asset.token_id {
        return Err(ContractError::UnexpectedAsset {
            expected: escrow.asset.token_id,
            collection: escrow.asset.collection.into(),
        });
    }

    let evt = Event::new("asset_deposited")
        .add_attribute("sender", receive.sender)
        .add_attribute("token_id", receive.token_id);
    Ok(Response::new().add_event(evt))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, reply: Reply) -> Result<Response, ContractError> {
    // Only dispatched on submessage errors. Returning an error here aborts
    // the whole transaction, so a failed transfer leaves no partial payout
    // and no state change behind, while the caller still sees which of the
    // two transfers failed.
    match reply.id {
        ASSET_TRANSFER_REPLY_ID => Err(ContractError::AssetTransferFailed {}),
        PAYOUT_REPLY_ID => Err(ContractError::PayoutFailed {}),
        id => Err(ContractError::UnrecognizedReply(id)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::EscrowInfo {} => to_binary(&query_escrow_info(deps)?),
        QueryMsg::VaultInfo {} => to_binary(&query_vault_info(deps)?),
        QueryMsg::Accrual {} => to_binary(&query_accrual(deps, env)?),
    }
}

fn query_escrow_info(deps: Deps) -> StdResult<EscrowInfoResponse> {
    let escrow = ESCROW.load(deps.storage)?;

    Ok(EscrowInfoResponse {
        asset: escrow.asset,
        funder: escrow.funder,
        beneficiary: escrow.beneficiary,
        secondary_payee: escrow.secondary_payee,
        vesting_start: escrow.vesting_start,
        curve: escrow.curve,
        state: escrow.state,
    })
}

fn query_vault_info(deps: Deps) -> StdResult<VaultInfoResponse> {
    let escrow = ESCROW.load(deps.storage)?;

    Ok(VaultInfoResponse {
        denom: escrow.vault.denom,
        balance: escrow.vault.balance,
    })
}

fn query_accrual(deps: Deps, env: Env) -> StdResult<AccrualResponse> {
    let escrow = ESCROW.load(deps.storage)?;

    let elapsed = escrow.elapsed(&env.block);
    Ok(AccrualResponse {
        elapsed,
        accrued: escrow.current_accrual(&env.block),
        remaining_periods: escrow.curve.remaining_periods(elapsed),
    })
}
