use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{GLOBAL_STATE_SEED, USER_INFO_SEED};
use crate::errors::SplPaymentError;
use crate::events::WithdrawEvent;
use crate::state::{GlobalState, UserInfo};

/// Returns up to the user's deposited amount from the shared vault.
///
/// The vault is owned by the global state PDA, so the transfer is signed with
/// `[GLOBAL_STATE_SEED, bump]`. The user-info PDA is derived from the signer,
/// which keeps one user from drawing on another user's ledger.
pub fn withdraw(mut ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let accts = &mut ctx.accounts;

    accts.global_state.check_mint(&accts.token_mint.key())?;

    let now = accts.clock.unix_timestamp;
    let user_total_staked = accts.user_info.debit(amount, now)?;

    let seeds: &[&[u8]] = &[GLOBAL_STATE_SEED, &[accts.global_state.bump]];
    let signer = &[seeds];

    token::transfer(
        CpiContext::new_with_signer(
            accts.token_program.to_account_info(),
            Transfer {
                from: accts.token_vault_account.to_account_info(),
                to: accts.token_owner_account.to_account_info(),
                authority: accts.global_state.to_account_info(),
            },
            signer,
        ),
        amount,
    )?;

    accts.token_vault_account.reload()?;
    let total_in_vault = accts.token_vault_account.amount;

    let event = WithdrawEvent {
        user: accts.user.key(),
        amount,
        user_total_staked,
        total_in_vault,
        timestamp: now,
    };
    msg!(
        "Withdraw amount={} user_total={} vault_total={}",
        event.amount,
        event.user_total_staked,
        event.total_in_vault
    );
    emit!(event);
    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        mut,
        seeds = [USER_INFO_SEED, user.key().as_ref()],
        bump = user_info.bump,
    )]
    pub user_info: Account<'info, UserInfo>,

    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = global_state.vault @ SplPaymentError::InvalidVault
    )]
    pub token_vault_account: Account<'info, TokenAccount>,

    /// Destination of the withdrawal
    #[account(
        mut,
        constraint = token_owner_account.mint == token_mint.key() @ SplPaymentError::InvalidTokenAddress
    )]
    pub token_owner_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub clock: Sysvar<'info, Clock>,
}
