//! Wallet provider runtime - capability trait, subscriptions, and backends
//!
//! This crate is the boundary between the session manager and whatever
//! actually answers wallet requests:
//!
//! - **Provider capability**: the [`Provider`] trait (`request` + `subscribe`)
//! - **Subscriptions**: RAII [`Subscription`] handles and the [`EventHub`] fan-out
//! - **Mock backend**: [`MockProvider`], scripted per method, for tests and demos
//! - **HTTP backend** (feature `http`): [`HttpProvider`] speaking JSON-RPC to a node,
//!   plus [`ChainWatcher`] which polls it and raises provider events
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  w3w (core)  │  WalletSession
//! └──────┬───────┘
//!        │ generic over Provider
//! ┌──────▼───────┐
//! │ w3w-runtime  │  This crate
//! │  ┌────────┐  │
//! │  │ Hub    │  │  event fan-out, RAII subscriptions
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ HTTP   │  │  JSON-RPC + polling watcher
//! │  └────────┘  │
//! └──────────────┘
//! ```
//!
//! Browser-injected providers live in the extension crate; they implement
//! the same trait on top of `window.ethereum`.

pub mod error;
pub mod handlers;
#[cfg(feature = "http")]
pub mod http;
pub mod mock;
pub mod provider;
#[cfg(feature = "http")]
pub mod watcher;

pub use error::{Error, Result};
pub use handlers::{EventHub, HandlerId, Subscription, next_handler_id};
#[cfg(feature = "http")]
pub use http::HttpProvider;
pub use mock::MockProvider;
pub use provider::{EventSink, EventStream, Provider, event_channel};
#[cfg(feature = "http")]
pub use watcher::{ChainWatcher, WatchState};
