use std::future::{self, Future};
use std::sync::Mutex;

use serde_json::{json, Value};
use tokio::sync::broadcast;

use super::provider::{Provider, ProviderEvent, RpcMethod};
use crate::{KarmaError, Result};

const EVENT_CAPACITY: usize = 16;

struct Accounts {
    accounts: Vec<String>,
    authorized: bool,
    chain_id: String,
    reject_requests: bool,
}

/// A provider answering from fixed data.
///
/// Accounts are only exposed through `eth_accounts` once access has
/// been granted, either by `eth_requestAccounts` or up front with
/// [`StaticProvider::authorized`]. Account and chain switches are
/// pushed to subscribers like an injected provider would.
pub struct StaticProvider {
    inner: Mutex<Accounts>,
    events: broadcast::Sender<ProviderEvent>,
}

impl StaticProvider {
    pub fn new<I, S>(accounts: I, chain_id: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Mutex::new(Accounts {
                accounts: accounts.into_iter().map(Into::into).collect(),
                authorized: false,
                chain_id: chain_id.to_owned(),
                reject_requests: false,
            }),
            events,
        }
    }

    /// Treat access as already granted by an earlier session.
    pub fn authorized(self) -> Self {
        self.with(|inner| inner.authorized = true);
        self
    }

    /// Refuse every access request, like a user dismissing the prompt.
    pub fn rejecting(self) -> Self {
        self.with(|inner| inner.reject_requests = true);
        self
    }

    fn with<T>(&self, f: impl FnOnce(&mut Accounts) -> T) -> T {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut inner)
    }

    fn emit(&self, event: ProviderEvent) {
        if self.events.send(event).is_err() {
            log::trace!("provider event dropped, nobody is listening");
        }
    }

    pub fn switch_account(&self, address: &str) {
        let accounts = self.with(|inner| {
            inner.accounts.retain(|a| a != address);
            inner.accounts.insert(0, address.to_owned());
            if inner.authorized {
                inner.accounts.clone()
            } else {
                Vec::new()
            }
        });
        self.emit(ProviderEvent::AccountsChanged(accounts));
    }

    pub fn switch_chain(&self, chain_id: &str) {
        self.with(|inner| inner.chain_id = chain_id.to_owned());
        self.emit(ProviderEvent::ChainChanged(chain_id.to_owned()));
    }

    fn answer(&self, method: RpcMethod) -> Result<Value> {
        self.with(|inner| match method {
            RpcMethod::Accounts if inner.authorized => {
                Ok(json!(inner.accounts))
            }
            RpcMethod::Accounts => Ok(json!([])),
            RpcMethod::ChainId => Ok(json!(inner.chain_id)),
            RpcMethod::RequestAccounts if inner.reject_requests => {
                Err(KarmaError::ConnectionFailed(
                    "User rejected the request.".to_owned(),
                ))
            }
            RpcMethod::RequestAccounts => {
                inner.authorized = true;
                Ok(json!(inner.accounts))
            }
        })
    }
}

impl Provider for StaticProvider {
    fn request(
        &self,
        method: RpcMethod,
    ) -> impl Future<Output = Result<Value>> + Send {
        log::trace!("static provider request {}", method);
        future::ready(self.answer(method))
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accounts_hidden_until_requested() {
        let provider = StaticProvider::new(["0xabc"], "0x1");
        assert_eq!(
            provider.request(RpcMethod::Accounts).await.unwrap(),
            json!([])
        );
        assert_eq!(
            provider.request(RpcMethod::RequestAccounts).await.unwrap(),
            json!(["0xabc"])
        );
        assert_eq!(
            provider.request(RpcMethod::Accounts).await.unwrap(),
            json!(["0xabc"])
        );
    }

    #[tokio::test]
    async fn switches_are_broadcast() {
        let provider = StaticProvider::new(["0xabc"], "0x1").authorized();
        let mut events = provider.subscribe();

        provider.switch_account("0xdef");
        provider.switch_chain("0x89");

        assert_eq!(
            events.recv().await.unwrap(),
            ProviderEvent::AccountsChanged(vec![
                "0xdef".to_owned(),
                "0xabc".to_owned()
            ])
        );
        assert_eq!(
            events.recv().await.unwrap(),
            ProviderEvent::ChainChanged("0x89".to_owned())
        );
    }
}
