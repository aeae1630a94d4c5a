use std::sync::{Arc, RwLock};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use super::provider::{
    parse_accounts, parse_chain_id, Provider, ProviderEvent, RpcMethod,
};
use crate::notice::Notice;
use crate::samples::shorten_address;
use crate::{KarmaError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletState {
    pub address: Option<String>,
    pub is_connected: bool,
    pub chain_id: Option<String>,
    pub connecting: bool,
}

impl WalletState {
    fn connected(address: String, chain_id: String) -> Self {
        Self {
            address: Some(address),
            is_connected: true,
            chain_id: Some(chain_id),
            connecting: false,
        }
    }
}

/// Connects to an optional injected provider and mirrors its accounts
/// and chain into a [`WalletState`].
///
/// Cloning the adapter shares the provider and the state.
pub struct WalletAdapter<P> {
    provider: Option<Arc<P>>,
    state: Arc<RwLock<WalletState>>,
}

impl<P> Clone for WalletAdapter<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<P: Provider> WalletAdapter<P> {
    pub fn new(provider: Option<P>) -> Self {
        Self {
            provider: provider.map(Arc::new),
            state: Arc::new(RwLock::new(WalletState::default())),
        }
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_deref()
    }

    pub fn state(&self) -> WalletState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn update(&self, change: impl FnOnce(&mut WalletState)) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        change(&mut state);
    }

    /// Re-query accounts and chain. The wallet counts as connected when
    /// the provider reports at least one account. Query failures are
    /// logged and leave the state as it was.
    pub async fn refresh(&self) {
        let Some(provider) = self.provider.clone() else {
            return;
        };
        match Self::query(&provider).await {
            Ok((accounts, chain_id)) => {
                let next = match accounts.into_iter().next() {
                    Some(address) => WalletState::connected(address, chain_id),
                    None => WalletState::default(),
                };
                log::debug!("wallet state refreshed: {:?}", next);
                self.update(|state| *state = next);
            }
            Err(err) => {
                log::error!("Failed to get accounts or chainId: {}", err);
            }
        }
    }

    async fn query(provider: &P) -> Result<(Vec<String>, String)> {
        let accounts =
            parse_accounts(provider.request(RpcMethod::Accounts).await?)?;
        let chain_id =
            parse_chain_id(provider.request(RpcMethod::ChainId).await?)?;
        Ok((accounts, chain_id))
    }

    /// Ask the provider for account access.
    pub async fn connect(&self) -> Result<Notice> {
        let Some(provider) = self.provider.clone() else {
            log::warn!("no wallet provider available");
            return Err(KarmaError::ProviderMissing);
        };

        self.update(|state| state.connecting = true);

        match Self::request_access(&provider).await {
            Ok((address, chain_id)) => {
                let notice = Notice::success(
                    "Wallet connected",
                    format!("Connected to {}", shorten_address(&address)),
                );
                log::info!("wallet {} connected on {}", address, chain_id);
                self.update(|state| {
                    *state = WalletState::connected(address, chain_id)
                });
                Ok(notice)
            }
            Err(err) => {
                log::error!("Error connecting to wallet: {}", err);
                self.update(|state| state.connecting = false);
                Err(KarmaError::ConnectionFailed(err.to_string()))
            }
        }
    }

    async fn request_access(provider: &P) -> Result<(String, String)> {
        let accounts = parse_accounts(
            provider.request(RpcMethod::RequestAccounts).await?,
        )?;
        let address = accounts.into_iter().next().ok_or_else(|| {
            KarmaError::ConnectionFailed("no account was granted".to_owned())
        })?;
        let chain_id =
            parse_chain_id(provider.request(RpcMethod::ChainId).await?)?;
        Ok((address, chain_id))
    }

    /// Forget the connection, whatever the previous state was.
    pub fn disconnect(&self) -> Notice {
        self.update(|state| *state = WalletState::default());
        log::info!("wallet disconnected");
        Notice::success(
            "Wallet disconnected",
            "Your wallet has been disconnected",
        )
    }

    /// Follow provider events until the returned handle is dropped.
    ///
    /// An account change re-runs [`refresh`](Self::refresh). A chain
    /// change resets the state and refreshes from scratch. Returns
    /// `None` without a provider. Must be called inside a tokio runtime.
    pub fn watch(&self) -> Option<Subscription> {
        let provider = self.provider.as_ref()?;
        let mut events = provider.subscribe();
        let adapter = self.clone();

        let handle = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        log::debug!("provider event {}", event.name());
                        if let ProviderEvent::ChainChanged(_) = event {
                            adapter.update(|state| {
                                *state = WalletState::default()
                            });
                        }
                        adapter.refresh().await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("missed {} provider events", skipped);
                        adapter.refresh().await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Some(Subscription { handle })
    }
}

/// Owned registration of the provider event listener.
/// Dropping it stops the listener.
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
