use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{GLOBAL_STATE_SEED, VAULT_SEED};
use crate::state::GlobalState;

/// Creates the global state and the vault token account.
///
/// `init` on the global state makes this a one-shot instruction: a second call
/// fails because the PDA already exists. The vault uses `init_if_needed` so a
/// vault pre-funded at its address is adopted rather than rejected.
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let global_state = &mut ctx.accounts.global_state;

    global_state.owner = ctx.accounts.owner.key();
    global_state.token_mint = ctx.accounts.token_mint.key();
    global_state.vault = ctx.accounts.token_vault_account.key();
    global_state.bump = ctx.bumps.global_state;

    msg!("Payment vault initialized, owner: {}", global_state.owner);
    msg!("Mint: {}", global_state.token_mint);
    msg!("Vault: {}", global_state.vault);
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = GlobalState::LEN,
        seeds = [GLOBAL_STATE_SEED],
        bump
    )]
    pub global_state: Account<'info, GlobalState>,

    pub token_mint: Account<'info, Mint>,

    /// Owned by the global state PDA, which signs withdrawals
    #[account(
        init_if_needed,
        payer = owner,
        seeds = [VAULT_SEED, token_mint.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = global_state,
    )]
    pub token_vault_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}
