use std::rc::Rc;

use crate::{
    error::{CdpResult, CdpResultExt},
    oracle::{
        oracle_price::OraclePrice,
        oracle_provider::{Clock, SystemClock, UncheckedOraclePrice},
    },
    state::{asset_registry::AssetRegistry, ids::AssetId},
};

/// Reads and sanitizes the feed of every approved asset.
///
/// Nothing is cached, each call goes back to the feed.
#[derive(Clone)]
pub struct OracleAdapter {
    registry: AssetRegistry,
    clock: Rc<dyn Clock>,
}

impl OracleAdapter {
    pub fn new(registry: AssetRegistry) -> Self {
        Self {
            registry,
            clock: Rc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    #[track_caller]
    pub fn get_price(&self, asset: &AssetId) -> CdpResult<OraclePrice> {
        let registered = self.registry.require_supported(asset)?;
        let price = UncheckedOraclePrice::load(registered.feed())
            .and_then(|unchecked| {
                unchecked.validate(
                    &registered.config().validation,
                    self.clock.unix_timestamp(),
                )
            })
            .with_msg(asset.to_string())?;
        tracing::debug!(%asset, %price, "oracle price read");
        Ok(price)
    }
}

impl std::fmt::Debug for OracleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleAdapter")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
