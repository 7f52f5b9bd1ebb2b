#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

declare_id!("EL7MGw7uNeAbgU5kEp2WnKQ2BtJb2Coopnr5U8HAZM9N");

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

pub use instructions::*;
pub use state::*;

#[program]
pub mod spl_payment {
    use super::*;

    /// Create the global state and the token vault for `token_mint`.
    /// The signer becomes the owner.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize(ctx)
    }

    /// Hand ownership of the global state to `new_owner`.
    /// Only the current owner may call this.
    pub fn update_owner(ctx: Context<SetData>, new_owner: Pubkey) -> Result<()> {
        instructions::update_owner(ctx, new_owner)
    }

    /// Move `amount` tokens from the user into the vault and credit the user's ledger.
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    /// Move `amount` tokens from the vault back to the user, up to what they deposited.
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }
}
