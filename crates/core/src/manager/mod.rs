//! The wallet session manager.
//!
//! [`WalletSession`] owns the single [`Session`] record and is the only code
//! that mutates it. Every change is published on a `watch` channel, so views
//! hold a [`watch::Receiver`] instead of sharing mutable state.
//!
//! # Event delivery
//!
//! [`initialize`](WalletSession::initialize) subscribes to the provider and
//! keeps the [`Subscription`] for the lifetime of the session. Provider
//! events are queued on a channel and applied by the owner through
//! [`next_event`](WalletSession::next_event) or
//! [`drain_events`](WalletSession::drain_events), so they are processed on
//! the same task as every other operation.
//!
//! # Re-entrancy
//!
//! Mutating operations take `&mut self`; a second `connect` on the same
//! session cannot start while one is suspended at a provider round trip.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use w3w_protocol::{ProviderEvent, SwitchEthereumChainParameter, methods};
use w3w_runtime::{EventStream, Provider, Subscription, event_channel};

use crate::address::Address;
use crate::error::{Result, SessionError};
use crate::network::Network;
use crate::notify::{Notice, Notifier, messages};
use crate::role::Role;
use crate::session::{ConnectionState, Session};
use crate::store::{KeyValueStore, keys};


/// What applying a provider event did to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome", content = "value")]
pub enum EventOutcome {
	/// The wallet exposed no accounts; the session was disconnected.
	Disconnected,
	/// The active account changed to the given address.
	AccountChanged(Address),
	/// The event matched the current session.
	Unchanged,
	/// The chain changed; the session was re-derived from the store.
	Reinitialized(Option<Network>),
	/// No provider is attached, so provider events are not applied.
	Ignored,
}

/// Sets `connecting` while alive and clears it on drop.
///
/// Covers early returns and a dropped `connect` future alike.
struct ConnectingGuard {
	state: Arc<watch::Sender<Session>>,
}

impl ConnectingGuard {
	fn engage(state: &Arc<watch::Sender<Session>>) -> Self {
		state.send_modify(|session| session.connecting = true);
		Self {
			state: Arc::clone(state),
		}
	}
}

impl Drop for ConnectingGuard {
	fn drop(&mut self) {
		self.state.send_modify(|session| session.connecting = false);
	}
}

/// Owns a wallet [`Session`] and keeps it consistent with a provider and a store.
///
/// `provider` is optional: hosts without a wallet still get a working
/// session that reports [`SessionError::ProviderUnavailable`] on connect.
pub struct WalletSession<P, S, N> {
	provider: Option<P>,
	store: S,
	notifier: N,
	state: Arc<watch::Sender<Session>>,
	subscription: Option<Subscription>,
	events: Option<EventStream>,
}

impl<P, S, N> WalletSession<P, S, N>
where
	P: Provider,
	S: KeyValueStore,
	N: Notifier,
{
	/// Assembles a session. Performs no I/O; call [`initialize`](Self::initialize) next.
	pub fn new(provider: Option<P>, store: S, notifier: N) -> Self {
		let (state, _) = watch::channel(Session::default());
		Self {
			provider,
			store,
			notifier,
			state: Arc::new(state),
			subscription: None,
			events: None,
		}
	}

	/// Restores the session from the store and subscribes to provider events.
	///
	/// Calling it again re-reads the store but keeps the existing subscription.
	pub fn initialize(&mut self) {
		self.hydrate();

		if self.subscription.is_some() {
			return;
		}
		if let Some(provider) = &self.provider {
			let (sink, stream) = event_channel();
			let subscription = provider.subscribe(sink);
			debug!(target = "w3w.session", id = subscription.id(), "subscribed to provider events");
			self.subscription = Some(subscription);
			self.events = Some(stream);
		}
	}

	/// Re-derives account, role and network from the store.
	///
	/// Replaces the page reload a browser wallet recommends after a chain change.
	pub fn reinitialize(&mut self) {
		self.hydrate();
		info!(target = "w3w.session", "session reinitialized from store");
	}

	/// Releases the provider subscription. Idempotent; also happens on drop.
	pub fn teardown(&mut self) {
		if let Some(subscription) = self.subscription.take() {
			debug!(target = "w3w.session", id = subscription.id(), "unsubscribing from provider events");
			subscription.unsubscribe();
		}
		self.events = None;
	}

	/// Requests account access and records the account and its network.
	///
	/// When `preferred` differs from the network the wallet is on, a switch
	/// is attempted afterwards. A failed switch is reported on its own and
	/// does not fail the connect.
	pub async fn connect(&mut self, preferred: Network) -> Result<Session> {
		let Some(provider) = self.provider.as_ref() else {
			warn!(target = "w3w.session", "connect requested without a wallet provider");
			self.notifier.notify(Notice::error(messages::PROVIDER_MISSING_ON_CONNECT));
			return Err(SessionError::ProviderUnavailable);
		};

		let connecting = ConnectingGuard::engage(&self.state);
		info!(target = "w3w.session", preferred = %preferred, "connecting wallet");

		let (account, chain_id) = match request_connection(provider).await {
			Ok(granted) => granted,
			Err(err) => {
				error!(target = "w3w.session", error = %err, "error connecting wallet");
				self.notifier.notify(Notice::error(messages::CONNECT_FAILED));
				return Err(err);
			}
		};

		let detected = Network::from_chain_id(&chain_id);
		debug!(target = "w3w.session", account = %account, chain_id = %chain_id, network = %detected, "wallet granted access");
		self.set_account(Some(account));
		self.set_network(Some(detected));

		if preferred != detected {
			if let Err(err) = self.switch_network(preferred).await {
				debug!(target = "w3w.session", error = %err, "keeping detected network after failed switch");
			}
		}

		drop(connecting);
		self.notifier.notify(Notice::success(messages::CONNECTED));
		info!(target = "w3w.session", "wallet connected");
		Ok(self.session())
	}

	/// Asks the wallet to move to `target`, registering the chain first if needed.
	///
	/// On failure the session's network is left as it was.
	pub async fn switch_network(&mut self, target: Network) -> Result<Network> {
		let Some(provider) = self.provider.as_ref() else {
			warn!(target = "w3w.session", "network switch requested without a wallet provider");
			self.notifier.notify(Notice::error(messages::PROVIDER_MISSING));
			return Err(SessionError::ProviderUnavailable);
		};

		if let Err(err) = request_switch(provider, target).await {
			error!(target = "w3w.session", target_network = %target, error = %err, "error switching network");
			self.notifier.notify(Notice::error(messages::SWITCH_FAILED));
			return Err(err);
		}

		self.set_network(Some(target));
		self.notifier.notify(Notice::success(messages::switched(target)));
		info!(target = "w3w.session", network = %target, "network switched");
		Ok(target)
	}

	/// Clears account, role and network and forgets them. Idempotent.
	pub fn disconnect(&mut self) {
		self.state.send_modify(|session| {
			session.account = None;
			session.role = None;
			session.network = None;
		});
		for key in keys::ALL {
			self.forget(key);
		}
		self.notifier.notify(Notice::info(messages::DISCONNECTED));
		info!(target = "w3w.session", "wallet disconnected");
	}

	/// Sets or clears the user's role. Not gated on a connected account.
	pub fn set_role(&mut self, role: Option<Role>) {
		self.state.send_modify(|session| session.role = role);
		match role {
			Some(role) => self.persist(keys::ROLE, role.as_str()),
			None => self.forget(keys::ROLE),
		}
		debug!(target = "w3w.session", role = ?role, "role updated");
	}

	/// Applies one provider event.
	pub fn handle_event(&mut self, event: ProviderEvent) -> EventOutcome {
		if self.provider.is_none() {
			debug!(target = "w3w.session", event = event.name(), "ignoring provider event without a provider");
			return EventOutcome::Ignored;
		}
		debug!(target = "w3w.session", event = event.name(), "provider event");

		match event {
			ProviderEvent::AccountsChanged(accounts) => match accounts.into_iter().next() {
				None => {
					self.disconnect();
					EventOutcome::Disconnected
				}
				Some(first) => {
					let account = Address::new(first);
					let unchanged = self.state.borrow().account.as_ref() == Some(&account);
					if unchanged {
						EventOutcome::Unchanged
					} else {
						info!(target = "w3w.session", account = %account, "active account changed");
						self.set_account(Some(account.clone()));
						EventOutcome::AccountChanged(account)
					}
				}
			},
			ProviderEvent::ChainChanged(chain_id) => {
				let network = Network::from_chain_id(&chain_id);
				info!(target = "w3w.session", chain_id = %chain_id, network = %network, "wallet chain changed");
				self.set_network(Some(network));
				self.reinitialize();
				EventOutcome::Reinitialized(self.state.borrow().network)
			}
		}
	}

	/// Waits for the next provider event and applies it.
	///
	/// Returns `None` when not subscribed or once the provider side is gone.
	pub async fn next_event(&mut self) -> Option<EventOutcome> {
		let event = self.events.as_mut()?.recv().await?;
		Some(self.handle_event(event))
	}

	/// Applies every provider event already queued, without waiting.
	pub fn drain_events(&mut self) -> Vec<EventOutcome> {
		let mut outcomes = Vec::new();
		loop {
			let Some(events) = self.events.as_mut() else { break };
			let Ok(event) = events.try_recv() else { break };
			outcomes.push(self.handle_event(event));
		}
		outcomes
	}

	/// Snapshot of the current session.
	pub fn session(&self) -> Session {
		self.state.borrow().clone()
	}

	pub fn connection_state(&self) -> ConnectionState {
		self.state.borrow().connection_state()
	}

	/// Receiver that sees every change to the session.
	pub fn subscribe(&self) -> watch::Receiver<Session> {
		self.state.subscribe()
	}

	pub fn has_provider(&self) -> bool {
		self.provider.is_some()
	}

	/// Whether provider events are currently being received.
	pub fn is_subscribed(&self) -> bool {
		self.subscription.is_some()
	}

	pub fn provider(&self) -> Option<&P> {
		self.provider.as_ref()
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn notifier(&self) -> &N {
		&self.notifier
	}

	fn hydrate(&mut self) {
		let account = self.store.get(keys::ACCOUNT).filter(|value| !value.is_empty()).map(Address::new);
		let role = self.restore(keys::ROLE, |value| value.parse::<Role>().map_err(|e| e.to_string()));
		let network = self.restore(keys::NETWORK, |value| value.parse::<Network>().map_err(|e| e.to_string()));

		debug!(
			target = "w3w.session",
			account = account.as_ref().map(Address::as_str),
			role = ?role,
			network = ?network,
			"session hydrated"
		);
		self.state.send_modify(|session| {
			session.account = account;
			session.role = role;
			session.network = network;
		});
	}

	fn restore<T>(&self, key: &str, parse: impl FnOnce(&str) -> std::result::Result<T, String>) -> Option<T> {
		let value = self.store.get(key)?;
		match parse(&value) {
			Ok(parsed) => Some(parsed),
			Err(err) => {
				warn!(target = "w3w.session", key, value = %value, error = %err, "ignoring persisted value");
				None
			}
		}
	}

	fn set_account(&mut self, account: Option<Address>) {
		match &account {
			Some(account) => self.persist(keys::ACCOUNT, account.as_str()),
			None => self.forget(keys::ACCOUNT),
		}
		self.state.send_modify(|session| session.account = account);
	}

	fn set_network(&mut self, network: Option<Network>) {
		match network {
			Some(network) => self.persist(keys::NETWORK, network.as_str()),
			None => self.forget(keys::NETWORK),
		}
		self.state.send_modify(|session| session.network = network);
	}

	fn persist(&mut self, key: &str, value: &str) {
		if let Err(err) = self.store.set(key, value) {
			warn!(target = "w3w.store", key, error = %err, "failed to persist session value");
		}
	}

	fn forget(&mut self, key: &str) {
		if let Err(err) = self.store.remove(key) {
			warn!(target = "w3w.store", key, error = %err, "failed to remove session value");
		}
	}
}

impl<P, S, N> std::fmt::Debug for WalletSession<P, S, N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WalletSession")
			.field("session", &*self.state.borrow())
			.field("has_provider", &self.provider.is_some())
			.field("subscribed", &self.subscription.is_some())
			.finish()
	}
}

/// Performs the provider round trips of a connect: account grant, then chain id.
async fn request_connection<P: Provider>(provider: &P) -> Result<(Address, String)> {
	let granted: Vec<String> = provider
		.request_as(methods::ETH_REQUEST_ACCOUNTS, Value::Null)
		.await
		.map_err(SessionError::from_request)?;

	let accounts = if granted.is_empty() {
		provider
			.request_as::<Vec<String>>(methods::ETH_ACCOUNTS, Value::Null)
			.await
			.map_err(SessionError::from_request)?
	} else {
		granted
	};
	let account = accounts.into_iter().next().ok_or(SessionError::NoAccounts)?;

	let chain_id: String = provider
		.request_as(methods::ETH_CHAIN_ID, Value::Null)
		.await
		.map_err(SessionError::from_request)?;

	Ok((Address::new(account), chain_id))
}

/// `wallet_switchEthereumChain`, falling back to one `wallet_addEthereumChain`
/// when the wallet does not know the chain.
async fn request_switch<P: Provider>(provider: &P, target: Network) -> Result<()> {
	let switch = json!([SwitchEthereumChainParameter::new(target.chain_id())]);
	let err = match provider.request(methods::WALLET_SWITCH_ETHEREUM_CHAIN, switch).await {
		Ok(_) => return Ok(()),
		Err(err) => err,
	};

	if !err.is_chain_not_added() {
		return Err(SessionError::SwitchFailed(err));
	}
	let Some(params) = target.add_chain_params() else {
		return Err(SessionError::ChainUnrecognized {
			chain_id: target.chain_id().to_string(),
		});
	};

	debug!(target = "w3w.session", chain_id = target.chain_id(), "chain unknown to wallet, registering it");
	provider
		.request(methods::WALLET_ADD_ETHEREUM_CHAIN, json!([params]))
		.await
		.map_err(SessionError::SwitchFailed)?;
	Ok(())
}
