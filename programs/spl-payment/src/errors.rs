use anchor_lang::prelude::*;

#[error_code]
pub enum SplPaymentError {
    #[msg("SplPaymentError: Not allowed owner")]
    NotAllowedOwner,

    #[msg("SplPaymentError: Over max deposit amount")]
    MaxDepositAmount,

    #[msg("SplPaymentError: Withdraw amount exceeds the deposited amount")]
    InvalidAmount,

    #[msg("SplPaymentError: Amount must be greater than 0")]
    ZeroAmount,

    #[msg("SplPaymentError: The token mint address is not correct")]
    InvalidTokenAddress,

    #[msg("SplPaymentError: The vault account is not the configured vault")]
    InvalidVault,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_declaration_order() {
        assert_eq!(u32::from(SplPaymentError::NotAllowedOwner), 6000);
        assert_eq!(u32::from(SplPaymentError::InvalidTokenAddress), 6004);
        // InvalidVault is the last variant
        assert_eq!(u32::from(SplPaymentError::InvalidVault), 6005);
    }
}
