//! `w3w status` - report the persisted session.

use w3w::{KeyValueStore, Notifier, Provider, WalletSession};

use crate::output::SessionData;

/// Reports the hydrated session. Makes no provider calls.
pub fn execute<P, S, N>(wallet: &WalletSession<P, S, N>) -> SessionData
where
	P: Provider,
	S: KeyValueStore,
	N: Notifier,
{
	SessionData::from(&wallet.session())
}
