//! Route access tiers.
//!
//! Routes are gated by a three-tier lattice. The tiers form a total order,
//! and the ordering comparison is the only access-control mechanism: a
//! route is reachable when its required tier is at most the tier the
//! daemon was launched with.

use serde::{Deserialize, Serialize};

/// Which tier of RPC routes a daemon exposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum RpcMode {
    /// Wallet-facing routes only.
    #[default]
    Default,
    /// Adds block explorer routes.
    BlockExplorerEnabled,
    /// Adds detailed explorer routes (full block and transaction dumps).
    AllMethodsEnabled,
}

impl RpcMode {
    /// Message returned when a route sits above the configured tier.
    ///
    /// Names the launch flag that unlocks the route so operators can fix
    /// their command line without reading source.
    pub fn denial_message(required: RpcMode) -> String {
        let flag = if required == RpcMode::AllMethodsEnabled {
            "--enable-blockexplorer-detailed"
        } else {
            "--enable-blockexplorer"
        };

        format!(
            "You do not have permission to access this method. Please relaunch \
             your daemon with the {flag} command line option to access this method."
        )
    }
}
