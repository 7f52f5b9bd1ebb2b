use anchor_lang::prelude::Pubkey;
use anchor_lang::Event;
use base64::{engine::general_purpose::STANDARD, Engine};
use spl_payment::events::{DepositEvent, WithdrawEvent};

const PROGRAM_LOG_PREFIX: &str = "Program ";
const PROGRAM_DATA: &str = "Program data: ";

/// An event that belongs to a single user, so a listener can pick out its own.
pub trait UserEvent: Event + Clone + Send + 'static {
    const NAME: &'static str;

    fn user(&self) -> Pubkey;
}

impl UserEvent for DepositEvent {
    const NAME: &'static str = "DepositEvent";

    fn user(&self) -> Pubkey {
        self.user
    }
}

impl UserEvent for WithdrawEvent {
    const NAME: &'static str = "WithdrawEvent";

    fn user(&self) -> Pubkey {
        self.user
    }
}

/// Returns the base64 payloads of `Program data:` lines written while
/// `program_id` was the executing program.
///
/// Data logged by programs it invokes, or by unrelated programs in the same
/// transaction, is skipped.
pub fn program_data<'a>(program_id: &Pubkey, logs: &'a [String]) -> Vec<&'a str> {
    let program_id = program_id.to_string();
    let mut stack: Vec<&str> = Vec::new();
    let mut payloads = Vec::new();

    for line in logs {
        if let Some(data) = line.strip_prefix(PROGRAM_DATA) {
            if stack.last() == Some(&program_id.as_str()) {
                if let Some(payload) = data.split_whitespace().next() {
                    payloads.push(payload);
                }
            }
            continue;
        }

        let Some(rest) = line.strip_prefix(PROGRAM_LOG_PREFIX) else {
            continue;
        };
        let mut words = rest.split_whitespace();
        let (Some(id), Some(action)) = (words.next(), words.next()) else {
            continue;
        };
        match action {
            "invoke" => stack.push(id),
            "success" | "failed:" => {
                stack.pop();
            }
            _ => {}
        }
    }

    payloads
}

/// Decodes one event payload, `None` when it is another event type.
pub fn decode_event<T: Event>(bytes: &[u8]) -> Option<T> {
    let body = bytes.strip_prefix(T::DISCRIMINATOR)?;
    T::try_from_slice(body).ok()
}

/// Every `T` emitted by `program_id` in a transaction's logs, in order.
pub fn events_from_logs<T: Event>(program_id: &Pubkey, logs: &[String]) -> Vec<T> {
    program_data(program_id, logs)
        .into_iter()
        .filter_map(|payload| STANDARD.decode(payload).ok())
        .filter_map(|bytes| decode_event::<T>(&bytes))
        .collect()
}
