use clap::Subcommand;
use karmalib::samples::{shorten_address, SAMPLE_WALLET_ADDRESS};
use karmalib::wallet::{StaticProvider, WalletAdapter, WalletState};

use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
pub struct ProviderArgs {
    #[clap(long, default_value = SAMPLE_WALLET_ADDRESS)]
    account: String,
    #[clap(long, default_value = "0x1")]
    chain: String,
    #[clap(
        long,
        action = clap::ArgAction::SetTrue,
        help = "Behave as if no wallet extension is installed"
    )]
    no_provider: bool,
}

impl ProviderArgs {
    fn adapter(
        &self,
        configure: impl FnOnce(StaticProvider) -> StaticProvider,
    ) -> WalletAdapter<StaticProvider> {
        let provider = (!self.no_provider).then(|| {
            configure(StaticProvider::new([self.account.as_str()], &self.chain))
        });
        WalletAdapter::new(provider)
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum Wallet {
    #[command(about = "Request account access from the wallet")]
    Connect {
        #[clap(flatten)]
        provider: ProviderArgs,
        #[clap(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Dismiss the access prompt"
        )]
        reject: bool,
        #[clap(long, help = "Switch to this chain after connecting")]
        switch_chain: Option<String>,
    },
    #[command(about = "Show accounts already authorized for this site")]
    Status {
        #[clap(flatten)]
        provider: ProviderArgs,
        #[clap(
            long,
            action = clap::ArgAction::SetTrue,
            help = "Treat access as granted in an earlier session"
        )]
        authorized: bool,
    },
    #[command(about = "Forget the wallet connection")]
    Disconnect,
}

impl Wallet {
    pub async fn run(&self) -> Result<(), AppError> {
        match self {
            Wallet::Connect {
                provider,
                reject,
                switch_chain,
            } => {
                let adapter = provider.adapter(|p| {
                    if *reject {
                        p.rejecting()
                    } else {
                        p
                    }
                });
                println!("{}", adapter.connect().await?);
                print_state(&adapter.state());

                if let Some(chain) = switch_chain {
                    let _subscription = adapter.watch();
                    if let Some(provider) = adapter.provider() {
                        provider.switch_chain(chain);
                    }
                    settle().await;
                    print_state(&adapter.state());
                }
                Ok(())
            }
            Wallet::Status {
                provider,
                authorized,
            } => {
                let adapter = provider.adapter(|p| {
                    if *authorized {
                        p.authorized()
                    } else {
                        p
                    }
                });
                adapter.refresh().await;
                print_state(&adapter.state());
                Ok(())
            }
            Wallet::Disconnect => {
                let adapter: WalletAdapter<StaticProvider> =
                    WalletAdapter::new(None);
                println!("{}", adapter.disconnect());
                Ok(())
            }
        }
    }
}

/// Let the listener task drain pending provider events.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn print_state(state: &WalletState) {
    match (&state.address, &state.chain_id) {
        (Some(address), Some(chain)) if state.is_connected => {
            println!("Connected: {} on chain {}", shorten_address(address), chain)
        }
        _ => println!("Not connected"),
    }
}
