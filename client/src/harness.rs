use std::time::Duration;

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::instruction::Instruction;
use async_trait::async_trait;
use futures::StreamExt;
use solana_client::nonblocking::pubsub_client::PubsubClient;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcTransactionLogsConfig, RpcTransactionLogsFilter};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::{read_keypair_file, Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use spl_payment::events::{DepositEvent, WithdrawEvent};
use spl_payment::GlobalState;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::config::{Commitment, HarnessArgs, Plan};
use crate::error::{ClientError, Result};
use crate::events::{events_from_logs, UserEvent};
use crate::network::Endpoint;
use crate::program::{decode_global_state, PaymentProgram};
use crate::steps::{run_steps, PaymentSteps, RunReport};
use crate::waiter::{one_shot, EventWaiter};

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Drives one deployment of the payment program through its instructions.
///
/// Steps share state only through the chain, so each step assumes the
/// previous ones landed. Sequencing lives in [`run_steps`].
pub struct Harness {
    rpc: RpcClient,
    endpoint: Endpoint,
    commitment: CommitmentConfig,
    program: PaymentProgram,
    owner: Keypair,
    user: Keypair,
    mint: Pubkey,
    event_timeout: Duration,
}

impl Harness {
    pub fn from_args(args: &HarnessArgs) -> Result<Self> {
        let endpoint = args.endpoint();
        let commitment = CommitmentConfig::from(args.commitment);

        Ok(Self {
            rpc: RpcClient::new_with_commitment(endpoint.rpc_url.clone(), commitment),
            endpoint,
            commitment,
            program: args.program(),
            owner: read_keypair(&args.wallet)?,
            user: read_keypair(&args.user_keypair)?,
            mint: args.mint,
            event_timeout: args.event_timeout(),
        })
    }

    pub fn program(&self) -> &PaymentProgram {
        &self.program
    }

    pub async fn run(&self, plan: &Plan) -> Result<RunReport> {
        info!(
            program = %self.program.program_id(),
            rpc = %self.endpoint.rpc_url,
            global_state = %self.program.global_state(),
            vault = %self.program.vault(&self.mint),
            user_info = %self.program.user_info(&self.user.pubkey()),
            "starting payment harness"
        );

        run_steps(self, plan).await
    }

    pub async fn fetch_global_state(&self) -> Result<GlobalState> {
        let data = self.rpc.get_account_data(&self.program.global_state()).await?;
        decode_global_state(&data)
    }

    async fn send(&self, ix: Instruction, signer: &Keypair) -> Result<Signature> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&signer.pubkey()),
            &[signer],
            blockhash,
        );
        Ok(self.rpc.send_and_confirm_transaction(&tx).await?)
    }

    /// Subscribes to the program's logs and returns a waiter for the first
    /// `E` emitted for `user`. Returns only once the subscription is live, so
    /// a transaction sent afterwards cannot be missed.
    async fn listen<E: UserEvent>(&self, user: Pubkey) -> Result<EventWaiter<E>> {
        let (slot, waiter) = one_shot::<E>(E::NAME);
        let (ready_tx, ready_rx) = oneshot::channel::<Result<()>>();
        let ws_url = self.endpoint.ws_url.clone();
        let program_id = self.program.program_id();
        let commitment = self.commitment;

        let listener = tokio::spawn(async move {
            let client = match PubsubClient::new(&ws_url).await {
                Ok(client) => client,
                Err(e) => {
                    let _ = ready_tx.send(Err(e.into()));
                    return;
                }
            };
            let subscription = client
                .logs_subscribe(
                    RpcTransactionLogsFilter::Mentions(vec![program_id.to_string()]),
                    RpcTransactionLogsConfig {
                        commitment: Some(commitment),
                    },
                )
                .await;
            let (mut stream, unsubscribe) = match subscription {
                Ok(subscription) => subscription,
                Err(e) => {
                    let _ = ready_tx.send(Err(e.into()));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));
            debug!(event = E::NAME, "log subscription live");

            while let Some(response) = stream.next().await {
                if response.value.err.is_some() {
                    continue;
                }
                let matched = events_from_logs::<E>(&program_id, &response.value.logs)
                    .into_iter()
                    .find(|event| event.user() == user);
                if let Some(event) = matched {
                    slot.fulfil(event);
                    break;
                }
            }

            drop(stream);
            unsubscribe().await;
        });

        let waiter = waiter.with_listener(listener);
        ready_rx
            .await
            .map_err(|_| ClientError::ListenerClosed { event: E::NAME })??;
        Ok(waiter)
    }
}

#[async_trait]
impl PaymentSteps for Harness {
    fn owner(&self) -> Pubkey {
        self.owner.pubkey()
    }

    async fn global_state_exists(&self) -> Result<bool> {
        let account = self
            .rpc
            .get_account_with_commitment(&self.program.global_state(), self.commitment)
            .await?
            .value;
        Ok(account.is_some())
    }

    /// Creates the global state and the vault token account.
    async fn initialize(&self) -> Result<()> {
        let ix = self.program.initialize(&self.owner.pubkey(), &self.mint);
        let signature = self.send(ix, &self.owner).await?;
        info!(%signature, "initialize confirmed");

        let state = self.fetch_global_state().await?;
        info!(owner = %state.owner, mint = %state.token_mint, vault = %state.vault, "global state");
        Ok(())
    }

    async fn update_owner(&self, new_owner: Pubkey) -> Result<()> {
        let ix = self.program.update_owner(&self.owner.pubkey(), new_owner);
        let signature = self.send(ix, &self.owner).await?;
        info!(%signature, "update owner confirmed");

        let state = self.fetch_global_state().await?;
        info!(owner = %state.owner, "updated owner");
        Ok(())
    }

    async fn deposit(&self, amount: u64) -> Result<DepositEvent> {
        let user = self.user.pubkey();
        let waiter = self.listen::<DepositEvent>(user).await?;

        let ix = self.program.deposit(&user, &self.mint, amount);
        let signature = self.send(ix, &self.user).await?;
        info!(%signature, amount, "deposit confirmed");

        waiter.wait(self.event_timeout).await
    }

    async fn withdraw(&self, amount: u64) -> Result<WithdrawEvent> {
        let user = self.user.pubkey();
        let waiter = self.listen::<WithdrawEvent>(user).await?;

        let ix = self.program.withdraw(&user, &self.mint, amount);
        let signature = self.send(ix, &self.user).await?;
        info!(%signature, amount, "withdraw confirmed");

        waiter.wait(self.event_timeout).await
    }
}

fn read_keypair(path: &std::path::Path) -> Result<Keypair> {
    read_keypair_file(path).map_err(|e| ClientError::Keypair {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
