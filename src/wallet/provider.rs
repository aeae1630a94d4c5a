use std::fmt;
use std::future::Future;

use serde_json::Value;
use tokio::sync::broadcast;

use crate::{KarmaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    Accounts,
    ChainId,
    RequestAccounts,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::Accounts => "eth_accounts",
            RpcMethod::ChainId => "eth_chainId",
            RpcMethod::RequestAccounts => "eth_requestAccounts",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

impl ProviderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderEvent::AccountsChanged(_) => "accountsChanged",
            ProviderEvent::ChainChanged(_) => "chainChanged",
        }
    }
}

pub trait Provider: Send + Sync + 'static {
    /// Issue a JSON-RPC request and return its raw result.
    fn request(
        &self,
        method: RpcMethod,
    ) -> impl Future<Output = Result<Value>> + Send;

    /// Receive the events the provider pushes from now on.
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}

pub(crate) fn parse_accounts(value: Value) -> Result<Vec<String>> {
    Ok(serde_json::from_value(value)?)
}

pub(crate) fn parse_chain_id(value: Value) -> Result<String> {
    match value {
        Value::String(chain) => Ok(chain),
        _ => Err(KarmaError::Parse),
    }
}
