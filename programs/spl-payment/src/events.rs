use anchor_lang::prelude::*;

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub user_total_staked: u64,
    pub total_in_vault: u64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawEvent {
    pub user: Pubkey,
    pub amount: u64,
    pub user_total_staked: u64,
    pub total_in_vault: u64,
    pub timestamp: i64,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerUpdatedEvent {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
    pub timestamp: i64,
}
