use anchor_lang::prelude::*;

use crate::errors::SplPaymentError;

/// Singleton configuration of the payment program.
///
/// The PDA `[GLOBAL_STATE_SEED]` is also the authority of the token vault,
/// so withdrawals are signed with its seeds.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct GlobalState {
    /// May call `update_owner`
    pub owner: Pubkey,
    /// The only mint accepted by deposit and withdraw
    pub token_mint: Pubkey,
    /// Token account holding every user's deposits
    pub vault: Pubkey,
    pub bump: u8,
}

impl GlobalState {
    pub const LEN: usize = 8 + GlobalState::INIT_SPACE;

    pub fn check_owner(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *signer, SplPaymentError::NotAllowedOwner);
        Ok(())
    }

    pub fn check_mint(&self, mint: &Pubkey) -> Result<()> {
        require_keys_eq!(self.token_mint, *mint, SplPaymentError::InvalidTokenAddress);
        Ok(())
    }

    /// Replaces the owner and returns the previous one.
    pub fn transfer_ownership(&mut self, signer: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.check_owner(signer)?;
        let previous = self.owner;
        self.owner = new_owner;
        Ok(previous)
    }
}

/// Per-user deposit ledger, PDA `[USER_INFO_SEED, user]`.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct UserInfo {
    /// The wallet this ledger belongs to
    pub address: Pubkey,
    /// Tokens currently deposited by `address`
    pub amount: u64,
    /// Unix timestamp of the last deposit or withdraw
    pub updated_time: i64,
    pub bump: u8,
}

impl UserInfo {
    pub const LEN: usize = 8 + UserInfo::INIT_SPACE;

    /// Records a deposit and returns the user's new total.
    pub fn credit(&mut self, user: Pubkey, amount: u64, now: i64) -> Result<u64> {
        require!(amount > 0, SplPaymentError::ZeroAmount);

        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(SplPaymentError::MaxDepositAmount)?;
        self.address = user;
        self.updated_time = now;

        Ok(self.amount)
    }

    /// Records a withdrawal and returns the user's remaining total.
    pub fn debit(&mut self, amount: u64, now: i64) -> Result<u64> {
        require!(amount > 0, SplPaymentError::ZeroAmount);
        require!(amount <= self.amount, SplPaymentError::InvalidAmount);

        self.amount -= amount;
        self.updated_time = now;

        Ok(self.amount)
    }
}
