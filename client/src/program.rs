use std::str::FromStr;

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::{instruction::Instruction, sysvar};
use anchor_lang::{
    system_program, AccountDeserialize, Discriminator, InstructionData, ToAccountMetas,
};
use anchor_spl::associated_token::get_associated_token_address;
use spl_payment::{accounts, instruction, GlobalState, UserInfo};

use crate::error::{ClientError, Result};
use crate::pda;

/// Handle on one deployment of the payment program.
///
/// The global state address depends only on the program id, so it is derived
/// once here; per-mint and per-user addresses are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentProgram {
    program_id: Pubkey,
    global_state: Pubkey,
    global_state_bump: u8,
}

impl Default for PaymentProgram {
    fn default() -> Self {
        Self::new(spl_payment::ID)
    }
}

impl PaymentProgram {
    pub fn new(program_id: Pubkey) -> Self {
        let (global_state, global_state_bump) = pda::find_global_state(&program_id);
        Self {
            program_id,
            global_state,
            global_state_bump,
        }
    }

    pub fn from_str_id(id: &str) -> Result<Self> {
        let program_id = Pubkey::from_str(id).map_err(|e| ClientError::InvalidProgramId {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(program_id))
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn global_state(&self) -> Pubkey {
        self.global_state
    }

    pub fn global_state_bump(&self) -> u8 {
        self.global_state_bump
    }

    pub fn vault(&self, mint: &Pubkey) -> Pubkey {
        pda::find_vault(&self.program_id, mint).0
    }

    pub fn user_info(&self, user: &Pubkey) -> Pubkey {
        pda::find_user_info(&self.program_id, user).0
    }

    /// The user's associated token account, used as deposit source and withdraw destination.
    pub fn user_token_account(&self, mint: &Pubkey, user: &Pubkey) -> Pubkey {
        get_associated_token_address(user, mint)
    }

    pub fn initialize(&self, owner: &Pubkey, mint: &Pubkey) -> Instruction {
        let accounts = accounts::Initialize {
            owner: *owner,
            global_state: self.global_state,
            token_mint: *mint,
            token_vault_account: self.vault(mint),
            system_program: system_program::ID,
            token_program: anchor_spl::token::ID,
        };
        self.instruction(accounts, instruction::Initialize {})
    }

    pub fn update_owner(&self, owner: &Pubkey, new_owner: Pubkey) -> Instruction {
        let accounts = accounts::SetData {
            owner: *owner,
            global_state: self.global_state,
            system_program: system_program::ID,
        };
        self.instruction(accounts, instruction::UpdateOwner { new_owner })
    }

    pub fn deposit(&self, user: &Pubkey, mint: &Pubkey, amount: u64) -> Instruction {
        let accounts = accounts::Deposit {
            user: *user,
            global_state: self.global_state,
            user_info: self.user_info(user),
            token_mint: *mint,
            token_vault_account: self.vault(mint),
            token_owner_account: self.user_token_account(mint, user),
            system_program: system_program::ID,
            token_program: anchor_spl::token::ID,
            clock: sysvar::clock::ID,
        };
        self.instruction(accounts, instruction::Deposit { amount })
    }

    pub fn withdraw(&self, user: &Pubkey, mint: &Pubkey, amount: u64) -> Instruction {
        let accounts = accounts::Withdraw {
            user: *user,
            global_state: self.global_state,
            user_info: self.user_info(user),
            token_mint: *mint,
            token_vault_account: self.vault(mint),
            token_owner_account: self.user_token_account(mint, user),
            system_program: system_program::ID,
            token_program: anchor_spl::token::ID,
            clock: sysvar::clock::ID,
        };
        self.instruction(accounts, instruction::Withdraw { amount })
    }

    fn instruction(&self, accounts: impl ToAccountMetas, args: impl InstructionData) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: accounts.to_account_metas(None),
            data: args.data(),
        }
    }
}

pub fn decode_global_state(data: &[u8]) -> Result<GlobalState> {
    decode_account(data, "GlobalState")
}

pub fn decode_user_info(data: &[u8]) -> Result<UserInfo> {
    decode_account(data, "UserInfo")
}

fn decode_account<T>(data: &[u8], account: &'static str) -> Result<T>
where
    T: AccountDeserialize + Discriminator,
{
    if !data.starts_with(T::DISCRIMINATOR) {
        return Err(ClientError::AccountDiscriminator { account });
    }
    let mut buf = data;
    T::try_deserialize_unchecked(&mut buf).map_err(|e| ClientError::Deserialize {
        account,
        reason: e.to_string(),
    })
}
