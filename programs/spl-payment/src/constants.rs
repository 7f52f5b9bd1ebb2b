/// Seed of the singleton global state PDA, which also signs for the vault.
pub const GLOBAL_STATE_SEED: &[u8] = b"GLOBAL-STATE-SEED";

/// Seed of the per-mint token vault PDA: `[VAULT_SEED, mint]`.
pub const VAULT_SEED: &[u8] = b"VAULT-SEED";

/// Seed of the per-user ledger PDA: `[USER_INFO_SEED, user]`.
pub const USER_INFO_SEED: &[u8] = b"USER-INFO-SEED";
