//! Wallet session management for the Web3Work marketplace.
//!
//! The crate owns one thing: the [`Session`] record of which account is
//! connected, on which [`Network`], and in which [`Role`]. A
//! [`WalletSession`] keeps that record consistent with three collaborators,
//! each behind a trait so hosts can supply their own:
//!
//! * a wallet [`Provider`] (browser-injected wallet, node endpoint, or mock)
//! * a durable [`KeyValueStore`] remembering the session across restarts
//! * a [`Notifier`] showing one-line success/error/info notices
//!
//! ```ignore
//! let mut wallet = WalletSession::new(Some(provider), JsonFileStore::open(path)?, TracingNotifier);
//! wallet.initialize();
//! wallet.connect(Network::Rootstock).await?;
//! let view = wallet.subscribe(); // watch::Receiver<Session> for whoever renders it
//! ```

pub mod address;
pub mod error;
pub mod manager;
pub mod network;
pub mod notify;
pub mod role;
pub mod session;
pub mod store;

pub use address::Address;
pub use error::{Result, SessionError, StoreError};
pub use manager::{EventOutcome, WalletSession};
pub use network::{Network, ParseNetworkError};
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use role::{ParseRoleError, Role};
pub use session::{ConnectionState, NextStep, Session};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use w3w_protocol::ProviderEvent;
pub use w3w_runtime::{MockProvider, Provider};
