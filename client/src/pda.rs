use anchor_lang::prelude::Pubkey;
use spl_payment::constants::{GLOBAL_STATE_SEED, USER_INFO_SEED, VAULT_SEED};

pub fn find_global_state(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GLOBAL_STATE_SEED], program_id)
}

pub fn find_vault(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, mint.as_ref()], program_id)
}

pub fn find_user_info(program_id: &Pubkey, user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USER_INFO_SEED, user.as_ref()], program_id)
}
