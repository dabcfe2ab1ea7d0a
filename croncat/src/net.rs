//! Known network presets for chains with a CronCat deployment.
//!
//! Each preset bundles the operational constants a fresh run needs: chain
//! ID, a public RPC endpoint, the fee denomination and a workable gas
//! price. Everything can still be overridden through the harness config.

/// A chain the harness knows how to talk to out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Network {
    /// Juno `uni-3` testnet.
    JunoUni3,
    /// A localhost development node (`junod` started with default ports).
    Local,
}

impl Network {
    /// The chain ID passed as `--chain-id`.
    #[must_use]
    pub const fn chain_id(self) -> &'static str {
        match self {
            Self::JunoUni3 => "uni-3",
            Self::Local => "testing",
        }
    }

    /// A default Tendermint RPC endpoint for `--node`.
    #[must_use]
    pub const fn default_rpc(self) -> &'static str {
        match self {
            Self::JunoUni3 => "https://rpc.uni.juno.deuslabs.fi:443",
            Self::Local => "http://localhost:26657",
        }
    }

    /// The native fee denomination.
    #[must_use]
    pub const fn fee_denom(self) -> &'static str {
        match self {
            Self::JunoUni3 | Self::Local => "ujunox",
        }
    }

    /// A gas price accepted by validators on this network.
    #[must_use]
    pub const fn gas_prices(self) -> &'static str {
        match self {
            Self::JunoUni3 | Self::Local => "0.025ujunox",
        }
    }

    /// All known presets.
    pub const ALL: &[Self] = &[Self::JunoUni3, Self::Local];

    /// Look up a preset by its chain ID.
    #[must_use]
    pub fn from_chain_id(chain_id: &str) -> Option<Self> {
        Self::ALL.iter().find(|n| n.chain_id() == chain_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_chain_id() {
        assert_eq!(Network::from_chain_id("uni-3"), Some(Network::JunoUni3));
        assert_eq!(Network::from_chain_id("testing"), Some(Network::Local));
        assert_eq!(Network::from_chain_id("osmosis-1"), None);
    }

    #[test]
    fn gas_prices_are_in_the_fee_denom() {
        for net in Network::ALL {
            assert!(
                net.gas_prices().ends_with(net.fee_denom()),
                "{net:?} gas price denom mismatch"
            );
        }
    }
}
