//! `w3w disconnect`.

use w3w::{KeyValueStore, Notifier, Provider, WalletSession};

use crate::output::SessionData;

/// Clears the session. Succeeds when already disconnected.
pub fn execute<P, S, N>(wallet: &mut WalletSession<P, S, N>) -> SessionData
where
	P: Provider,
	S: KeyValueStore,
	N: Notifier,
{
	wallet.disconnect();
	SessionData::from(&wallet.session())
}
