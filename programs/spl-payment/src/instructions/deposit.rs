use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{GLOBAL_STATE_SEED, USER_INFO_SEED};
use crate::errors::SplPaymentError;
use crate::events::DepositEvent;
use crate::state::{GlobalState, UserInfo};

pub fn deposit(mut ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let user_info_bump = ctx.bumps.user_info;
    let accts = &mut ctx.accounts;

    accts.global_state.check_mint(&accts.token_mint.key())?;

    let now = accts.clock.unix_timestamp;
    let user_total_staked = accts.user_info.credit(accts.user.key(), amount, now)?;
    accts.user_info.bump = user_info_bump;

    token::transfer(
        CpiContext::new(
            accts.token_program.to_account_info(),
            Transfer {
                from: accts.token_owner_account.to_account_info(),
                to: accts.token_vault_account.to_account_info(),
                authority: accts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    // balance after the transfer
    accts.token_vault_account.reload()?;
    let total_in_vault = accts.token_vault_account.amount;

    let event = DepositEvent {
        user: accts.user.key(),
        amount,
        user_total_staked,
        total_in_vault,
        timestamp: now,
    };
    msg!(
        "Deposit amount={} user_total={} vault_total={}",
        event.amount,
        event.user_total_staked,
        event.total_in_vault
    );
    emit!(event);
    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
    )]
    pub global_state: Account<'info, GlobalState>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserInfo::LEN,
        seeds = [USER_INFO_SEED, user.key().as_ref()],
        bump
    )]
    pub user_info: Account<'info, UserInfo>,

    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = global_state.vault @ SplPaymentError::InvalidVault
    )]
    pub token_vault_account: Account<'info, TokenAccount>,

    /// Source of the deposit, signed for by `user`
    #[account(
        mut,
        constraint = token_owner_account.mint == token_mint.key() @ SplPaymentError::InvalidTokenAddress
    )]
    pub token_owner_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub clock: Sysvar<'info, Clock>,
}
