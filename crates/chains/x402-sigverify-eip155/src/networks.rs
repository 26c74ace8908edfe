use x402_sigverify_types::chain::ChainId;

use crate::chain::Eip155ChainReference;
use crate::verify::{VALIDATOR_ADDRESS, ValidatorTarget};

/// Static constructors for well-known EVM networks (eip155 namespace).
///
/// Implemented for [`ChainId`]; [`UniversalValidator`] maps these to validator targets.
///
/// ```
/// use x402_sigverify_types::chain::ChainId;
/// use x402_sigverify_eip155::KnownNetworkEip155;
///
/// let base = ChainId::base();
/// assert_eq!(base.namespace, "eip155");
/// assert_eq!(base.reference, "8453");
/// ```
pub trait KnownNetworkEip155<A> {
    /// Ethereum mainnet (eip155:1)
    fn ethereum() -> A;
    /// Ethereum Sepolia testnet (eip155:11155111)
    fn ethereum_sepolia() -> A;

    /// Base mainnet (eip155:8453)
    fn base() -> A;
    /// Base Sepolia testnet (eip155:84532)
    fn base_sepolia() -> A;

    /// Polygon mainnet (eip155:137)
    fn polygon() -> A;
    /// Polygon Amoy testnet (eip155:80002)
    fn polygon_amoy() -> A;

    /// Avalanche C-Chain mainnet (eip155:43114)
    fn avalanche() -> A;
    /// Avalanche Fuji testnet (eip155:43113)
    fn avalanche_fuji() -> A;

    /// Sei mainnet (eip155:1329)
    fn sei() -> A;
    /// Sei testnet (eip155:1328)
    fn sei_testnet() -> A;

    /// XDC Network (eip155:50)
    fn xdc() -> A;

    /// XRPL EVM (eip155:1440000)
    fn xrpl_evm() -> A;

    /// Peaq (eip155:3338)
    fn peaq() -> A;

    /// IoTeX (eip155:4689)
    fn iotex() -> A;

    /// Celo mainnet (eip155:42220)
    fn celo() -> A;
    /// Celo Sepolia testnet (eip155:11142220)
    fn celo_sepolia() -> A;
}

impl KnownNetworkEip155<ChainId> for ChainId {
    fn ethereum() -> ChainId {
        ChainId::new("eip155", "1")
    }

    fn ethereum_sepolia() -> ChainId {
        ChainId::new("eip155", "11155111")
    }

    fn base() -> ChainId {
        ChainId::new("eip155", "8453")
    }

    fn base_sepolia() -> ChainId {
        ChainId::new("eip155", "84532")
    }

    fn polygon() -> ChainId {
        ChainId::new("eip155", "137")
    }

    fn polygon_amoy() -> ChainId {
        ChainId::new("eip155", "80002")
    }

    fn avalanche() -> ChainId {
        ChainId::new("eip155", "43114")
    }

    fn avalanche_fuji() -> ChainId {
        ChainId::new("eip155", "43113")
    }

    fn sei() -> ChainId {
        ChainId::new("eip155", "1329")
    }

    fn sei_testnet() -> ChainId {
        ChainId::new("eip155", "1328")
    }

    fn xdc() -> ChainId {
        ChainId::new("eip155", "50")
    }

    fn xrpl_evm() -> ChainId {
        ChainId::new("eip155", "1440000")
    }

    fn peaq() -> ChainId {
        ChainId::new("eip155", "3338")
    }

    fn iotex() -> ChainId {
        ChainId::new("eip155", "4689")
    }

    fn celo() -> ChainId {
        ChainId::new("eip155", "42220")
    }

    fn celo_sepolia() -> ChainId {
        ChainId::new("eip155", "11142220")
    }
}

/// Deployment of the EIP-6492 universal validator at [`VALIDATOR_ADDRESS`].
///
/// Networks without a recorded deployment validate deployless, through
/// [`ValidatorTarget::default`].
pub struct UniversalValidator;

impl UniversalValidator {
    /// Validator for a chain: the well-known deployment, or the built-in deployless bytecode.
    pub fn on(chain: Eip155ChainReference) -> ValidatorTarget {
        if Self::is_deployed_on(chain) {
            ValidatorTarget::deployed(VALIDATOR_ADDRESS)
        } else {
            ValidatorTarget::default()
        }
    }

    pub fn is_deployed_on(chain: Eip155ChainReference) -> bool {
        Self::networks().contains(&chain.as_chain_id())
    }

    /// Networks with a recorded deployment.
    pub fn networks() -> Vec<ChainId> {
        vec![
            ChainId::base(),
            ChainId::base_sepolia(),
            ChainId::polygon(),
            ChainId::polygon_amoy(),
            ChainId::avalanche(),
            ChainId::avalanche_fuji(),
            ChainId::sei(),
            ChainId::sei_testnet(),
            ChainId::xdc(),
            ChainId::xrpl_evm(),
            ChainId::peaq(),
            ChainId::iotex(),
            ChainId::celo(),
            ChainId::celo_sepolia(),
        ]
    }
}
