//! Provider method names used by the session manager.

/// Prompts the user to grant account access; resolves to the granted addresses.
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
/// Returns already-granted addresses without prompting.
pub const ETH_ACCOUNTS: &str = "eth_accounts";
/// Returns the provider's current chain id as a hex string.
pub const ETH_CHAIN_ID: &str = "eth_chainId";
/// Asks the provider to switch chains. Params: `[SwitchEthereumChainParameter]`.
pub const WALLET_SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";
/// Asks the provider to register a chain. Params: `[AddEthereumChainParameter]`.
pub const WALLET_ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";

/// Provider event fired with the new account list.
pub const EVENT_ACCOUNTS_CHANGED: &str = "accountsChanged";
/// Provider event fired with the new hex chain id.
pub const EVENT_CHAIN_CHANGED: &str = "chainChanged";
