//! `w3w role <freelancer|client|none>`.

use tracing::warn;
use w3w::{KeyValueStore, Notifier, Provider, Role, WalletSession};

use crate::output::SessionData;

pub fn execute<P, S, N>(wallet: &mut WalletSession<P, S, N>, role: Option<Role>) -> SessionData
where
	P: Provider,
	S: KeyValueStore,
	N: Notifier,
{
	if role.is_some() && !wallet.session().is_connected() {
		warn!(target = "w3w.cli", "setting a role without a connected wallet");
	}
	wallet.set_role(role);
	SessionData::from(&wallet.session())
}
