use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use spl_payment::events::{DepositEvent, WithdrawEvent};
use tracing::{info, warn};

use crate::config::Plan;
use crate::error::Result;

/// Chain access needed by one harness run.
///
/// Each method performs a single step and returns once it has landed.
/// `deposit` and `withdraw` resolve to the event the program emitted for the
/// harness user.
#[async_trait]
pub trait PaymentSteps: Send + Sync {
    /// Key that signs `initialize` and `update_owner`
    fn owner(&self) -> Pubkey;

    async fn global_state_exists(&self) -> Result<bool>;

    async fn initialize(&self) -> Result<()>;

    async fn update_owner(&self, new_owner: Pubkey) -> Result<()>;

    async fn deposit(&self, amount: u64) -> Result<DepositEvent>;

    async fn withdraw(&self, amount: u64) -> Result<WithdrawEvent>;
}

/// What a completed run observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// False when the global state already existed
    pub initialized: bool,
    pub new_owner: Pubkey,
    pub deposit: DepositEvent,
    pub withdraw: WithdrawEvent,
}

/// Runs the harness steps in order and stops at the first failure.
///
/// Initialize is skipped when the global state exists, so reruns against a
/// long-lived validator succeed. Without `plan.new_owner` ownership is handed
/// back to the current owner.
pub async fn run_steps<S: PaymentSteps + ?Sized>(steps: &S, plan: &Plan) -> Result<RunReport> {
    let initialized = if steps.global_state_exists().await? {
        warn!("global state already initialized, skipping initialize");
        false
    } else {
        steps.initialize().await?;
        true
    };

    let new_owner = plan.new_owner.unwrap_or_else(|| steps.owner());
    steps.update_owner(new_owner).await?;

    let deposit = steps.deposit(plan.deposit_amount).await?;
    info!(?deposit, "deposit observed");

    let withdraw = steps.withdraw(plan.withdraw_amount).await?;
    info!(?withdraw, "withdraw observed");

    Ok(RunReport {
        initialized,
        new_owner,
        deposit,
        withdraw,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::error::ClientError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Exists,
        Initialize,
        UpdateOwner(Pubkey),
        Deposit(u64),
        Withdraw(u64),
    }

    struct FakeChain {
        owner: Pubkey,
        user: Pubkey,
        state_exists: bool,
        deposit_fails: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeChain {
        fn new(state_exists: bool) -> Self {
            Self {
                owner: Pubkey::new_unique(),
                user: Pubkey::new_unique(),
                state_exists,
                deposit_fails: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentSteps for FakeChain {
        fn owner(&self) -> Pubkey {
            self.owner
        }

        async fn global_state_exists(&self) -> Result<bool> {
            self.record(Call::Exists);
            Ok(self.state_exists)
        }

        async fn initialize(&self) -> Result<()> {
            self.record(Call::Initialize);
            Ok(())
        }

        async fn update_owner(&self, new_owner: Pubkey) -> Result<()> {
            self.record(Call::UpdateOwner(new_owner));
            Ok(())
        }

        async fn deposit(&self, amount: u64) -> Result<DepositEvent> {
            self.record(Call::Deposit(amount));
            if self.deposit_fails {
                return Err(ClientError::EventTimeout {
                    event: "DepositEvent",
                    waited: Duration::from_secs(30),
                });
            }
            Ok(DepositEvent {
                user: self.user,
                amount,
                user_total_staked: amount,
                total_in_vault: amount,
                timestamp: 1,
            })
        }

        async fn withdraw(&self, amount: u64) -> Result<WithdrawEvent> {
            self.record(Call::Withdraw(amount));
            Ok(WithdrawEvent {
                user: self.user,
                amount,
                user_total_staked: 0,
                total_in_vault: 0,
                timestamp: 2,
            })
        }
    }

    fn plan() -> Plan {
        Plan {
            new_owner: None,
            deposit_amount: 50_000_000,
            withdraw_amount: 49_000_000,
        }
    }

    #[tokio::test]
    async fn fresh_deployment_runs_every_step_in_order() {
        let chain = FakeChain::new(false);

        let report = run_steps(&chain, &plan()).await.unwrap();

        assert_eq!(
            chain.calls(),
            vec![
                Call::Exists,
                Call::Initialize,
                Call::UpdateOwner(chain.owner),
                Call::Deposit(50_000_000),
                Call::Withdraw(49_000_000),
            ]
        );
        assert!(report.initialized);
        assert_eq!(report.new_owner, chain.owner);
        assert_eq!(report.deposit.amount, 50_000_000);
        assert_eq!(report.withdraw.amount, 49_000_000);
    }

    #[tokio::test]
    async fn existing_global_state_skips_initialize() {
        let chain = FakeChain::new(true);
        let new_owner = Pubkey::new_unique();
        let plan = Plan {
            new_owner: Some(new_owner),
            ..plan()
        };

        let report = run_steps(&chain, &plan).await.unwrap();

        assert!(!report.initialized);
        assert!(!chain.calls().contains(&Call::Initialize));
        assert_eq!(chain.calls()[1], Call::UpdateOwner(new_owner));
    }

    #[tokio::test]
    async fn failed_deposit_stops_the_run() {
        let chain = FakeChain {
            deposit_fails: true,
            ..FakeChain::new(true)
        };

        let err = run_steps(&chain, &plan()).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::EventTimeout {
                event: "DepositEvent",
                ..
            }
        ));
        assert_eq!(chain.calls().last(), Some(&Call::Deposit(50_000_000)));
        assert!(!chain
            .calls()
            .iter()
            .any(|call| matches!(call, Call::Withdraw(_))));
    }
}
