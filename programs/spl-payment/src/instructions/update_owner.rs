use anchor_lang::prelude::*;

use crate::constants::GLOBAL_STATE_SEED;
use crate::events::OwnerUpdatedEvent;
use crate::state::GlobalState;

pub fn update_owner(ctx: Context<SetData>, new_owner: Pubkey) -> Result<()> {
    let global_state = &mut ctx.accounts.global_state;
    let previous_owner = global_state.transfer_ownership(&ctx.accounts.owner.key(), new_owner)?;

    emit!(OwnerUpdatedEvent {
        previous_owner,
        new_owner,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Owner updated from {} to {}", previous_owner, new_owner);
    Ok(())
}

#[derive(Accounts)]
pub struct SetData<'info> {
    /// Must match `global_state.owner`, checked in the handler
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump = global_state.bump,
    )]
    pub global_state: Account<'info, GlobalState>,

    pub system_program: Program<'info, System>,
}
