use std::rc::Rc;

use crate::{
    error::{CdpError, CdpResult, CdpResultExt, ErrorWithContext},
    oracle::oracle_provider::PriceFeed,
    state::{ids::AssetId, risk_config::AssetConfig},
    token::CollateralToken,
};

/// An approved collateral asset with its price feed and token collaborator.
#[derive(Clone)]
pub struct RegisteredAsset {
    config: AssetConfig,
    feed: Rc<dyn PriceFeed>,
    token: Rc<dyn CollateralToken>,
}

impl RegisteredAsset {
    pub fn id(&self) -> &AssetId {
        &self.config.asset
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    pub fn decimals(&self) -> u8 {
        self.config.decimals
    }

    pub fn feed(&self) -> &dyn PriceFeed {
        self.feed.as_ref()
    }

    pub fn token(&self) -> &dyn CollateralToken {
        self.token.as_ref()
    }
}

impl std::fmt::Debug for RegisteredAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredAsset")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Approved collateral assets, fixed at construction.
///
/// Entries keep the order they were registered in, which is also the order positions are
/// valued in.
#[derive(Clone, Debug)]
pub struct AssetRegistry {
    assets: Vec<RegisteredAsset>,
}

impl AssetRegistry {
    /// Builds the registry from co-indexed lists.
    pub fn new(
        configs: Vec<AssetConfig>,
        feeds: Vec<Rc<dyn PriceFeed>>,
        tokens: Vec<Rc<dyn CollateralToken>>,
    ) -> CdpResult<Self> {
        if configs.len() != feeds.len() || configs.len() != tokens.len() {
            return Err(CdpError::LengthMismatch.into());
        }
        if configs.is_empty() {
            return Err(CdpError::EmptyRegistry.into());
        }
        let mut assets: Vec<RegisteredAsset> = Vec::with_capacity(configs.len());
        for ((config, feed), token) in configs.into_iter().zip(feeds).zip(tokens) {
            config.validate().with_msg(config.asset.to_string())?;
            if assets.iter().any(|asset| asset.id() == &config.asset) {
                return Err(ErrorWithContext::from(CdpError::DuplicateAsset))
                    .with_msg(config.asset.to_string());
            }
            assets.push(RegisteredAsset {
                config,
                feed,
                token,
            });
        }
        Ok(Self { assets })
    }

    pub fn get(&self, asset: &AssetId) -> Option<&RegisteredAsset> {
        self.assets.iter().find(|registered| registered.id() == asset)
    }

    /// Lookup for mutating entry points.
    #[track_caller]
    pub fn require_allowed(&self, asset: &AssetId) -> CdpResult<&RegisteredAsset> {
        self.get(asset)
            .ok_or_else(crate::with_context!(CdpError::TokenNotAllowed))
    }

    /// Lookup for price reads.
    #[track_caller]
    pub fn require_supported(&self, asset: &AssetId) -> CdpResult<&RegisteredAsset> {
        self.get(asset)
            .ok_or_else(crate::with_context!(CdpError::UnsupportedAsset))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAsset> {
        self.assets.iter()
    }

    pub fn asset_ids(&self) -> Vec<AssetId> {
        self.assets.iter().map(|asset| *asset.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
