//! Integration with an injected wallet provider.
//!
//! The provider speaks the usual injected JSON-RPC convention
//! (`eth_accounts`, `eth_chainId`, `eth_requestAccounts`) and pushes
//! `accountsChanged` / `chainChanged` events. [`WalletAdapter`] mirrors
//! that into a [`WalletState`].

mod adapter;
mod provider;
mod static_provider;

pub use adapter::{Subscription, WalletAdapter, WalletState};
pub use provider::{Provider, ProviderEvent, RpcMethod};
pub use static_provider::StaticProvider;
