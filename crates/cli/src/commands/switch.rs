//! `w3w switch <network>`.

use w3w::{KeyValueStore, Network, Notifier, Provider, WalletSession};

use crate::error::Result;
use crate::output::SessionData;

pub async fn execute<P, S, N>(wallet: &mut WalletSession<P, S, N>, network: Network) -> Result<SessionData>
where
	P: Provider,
	S: KeyValueStore,
	N: Notifier,
{
	wallet.switch_network(network).await?;
	Ok(SessionData::from(&wallet.session()))
}
