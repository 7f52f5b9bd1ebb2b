use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anchor_lang::prelude::Pubkey;
use clap::{Parser, ValueEnum};

use crate::network::{Endpoint, Network};
use crate::program::PaymentProgram;

/// Runs initialize, update owner, deposit and withdraw against a cluster,
/// waiting for the program's events after each token movement.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct HarnessArgs {
    /// Cluster to talk to when --url is not given
    #[arg(
        long,
        value_enum,
        env = "SPL_PAYMENT_NETWORK",
        default_value_t = Network::Localnet,
        ignore_case = true
    )]
    pub network: Network,

    /// Explicit RPC URL, overrides --network
    #[arg(long, env = "ANCHOR_PROVIDER_URL")]
    pub url: Option<String>,

    /// Owner keypair; also pays for initialize
    #[arg(long, env = "ANCHOR_WALLET")]
    pub wallet: PathBuf,

    /// Keypair that deposits and withdraws
    #[arg(long, env = "SPL_PAYMENT_USER_KEYPAIR")]
    pub user_keypair: PathBuf,

    #[arg(long, env = "SPL_PAYMENT_MINT", value_parser = parse_pubkey)]
    pub mint: Pubkey,

    /// Owner to hand over to; defaults to the current owner
    #[arg(long, value_parser = parse_pubkey)]
    pub new_owner: Option<Pubkey>,

    #[arg(long, env = "SPL_PAYMENT_PROGRAM_ID", value_parser = parse_pubkey)]
    pub program_id: Option<Pubkey>,

    #[arg(long, default_value_t = 50_000_000)]
    pub deposit_amount: u64,

    #[arg(long, default_value_t = 49_000_000)]
    pub withdraw_amount: u64,

    /// How long to wait for each event before failing the step
    #[arg(long, default_value_t = 30)]
    pub event_timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = Commitment::Confirmed)]
    pub commitment: Commitment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

/// What the harness does once connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub new_owner: Option<Pubkey>,
    pub deposit_amount: u64,
    pub withdraw_amount: u64,
}

impl HarnessArgs {
    pub fn endpoint(&self) -> Endpoint {
        match &self.url {
            Some(url) => Endpoint::from_url(url),
            None => self.network.endpoint(),
        }
    }

    pub fn program(&self) -> PaymentProgram {
        self.program_id
            .map(PaymentProgram::new)
            .unwrap_or_default()
    }

    pub fn event_timeout(&self) -> Duration {
        Duration::from_secs(self.event_timeout_secs)
    }

    pub fn plan(&self) -> Plan {
        Plan {
            new_owner: self.new_owner,
            deposit_amount: self.deposit_amount,
            withdraw_amount: self.withdraw_amount,
        }
    }
}

fn parse_pubkey(value: &str) -> Result<Pubkey, String> {
    Pubkey::from_str(value).map_err(|e| format!("invalid public key {}: {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Result<HarnessArgs, clap::Error> {
        let mint = Pubkey::new_unique().to_string();
        let mut args = vec![
            "spl-payment-harness",
            "--wallet",
            "owner.json",
            "--user-keypair",
            "user.json",
            "--mint",
            mint.as_str(),
            "--network",
            "localnet",
        ];
        args.extend_from_slice(extra);
        HarnessArgs::try_parse_from(args)
    }

    #[test]
    fn defaults_match_the_reference_run() {
        let args = parse(&["--url", "http://127.0.0.1:8899"]).unwrap();

        assert_eq!(args.deposit_amount, 50_000_000);
        assert_eq!(args.withdraw_amount, 49_000_000);
        assert_eq!(args.event_timeout(), Duration::from_secs(30));
        assert_eq!(args.commitment, Commitment::Confirmed);
        assert_eq!(args.program(), PaymentProgram::default());
        assert_eq!(args.endpoint(), Network::Localnet.endpoint());
    }

    #[test]
    fn url_overrides_network() {
        let args = parse(&["--url", "https://rpc.example.com"]).unwrap();
        assert_eq!(args.endpoint().ws_url, "wss://rpc.example.com");
    }

    #[test]
    fn plan_carries_overrides() {
        let new_owner = Pubkey::new_unique();
        let new_owner_arg = new_owner.to_string();
        let args = parse(&[
            "--url",
            "http://127.0.0.1:8899",
            "--new-owner",
            new_owner_arg.as_str(),
            "--deposit-amount",
            "10",
            "--withdraw-amount",
            "4",
        ])
        .unwrap();

        assert_eq!(
            args.plan(),
            Plan {
                new_owner: Some(new_owner),
                deposit_amount: 10,
                withdraw_amount: 4,
            }
        );
    }

    #[test]
    fn bad_keys_are_rejected() {
        assert!(parse(&["--program-id", "xyz"]).is_err());
    }
}
