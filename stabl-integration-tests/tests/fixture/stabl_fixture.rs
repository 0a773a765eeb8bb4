use std::{rc::Rc, sync::Once};

use stabl_lib::{
    engine::CdpEngine,
    oracle::{
        oracle_config::OracleValidationConfig,
        oracle_provider::{PriceFeed, RoundData},
    },
    state::{
        ids::{AccountId, AssetId},
        risk_config::{AssetConfig, EngineConfig, RiskParameters},
    },
    test_utils::{FixedClock, MockPriceFeed, MockToken, MOCK_FEED_START},
    token::CollateralToken,
};
use tracing_subscriber::EnvFilter;

use crate::fixture::balance::Balance;

pub const FEED_DECIMALS: u8 = 8;
pub const ETH_PRICE: f64 = 2_000.;
pub const BTC_PRICE: f64 = 30_000.;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(tracing::Level::INFO.into())
                    .from_env_lossy(),
            )
            .with_test_writer()
            .init();
    });
}

/// One engine with ETH (18 decimals) and BTC (8 decimals) collateral, mock tokens and a clock
/// pinned to the feeds' publish time.
pub struct StablFixture {
    engine: CdpEngine,
    pub eth: AssetId,
    pub btc: AssetId,
    pub eth_feed: Rc<MockPriceFeed>,
    pub btc_feed: Rc<MockPriceFeed>,
    pub eth_token: Rc<MockToken>,
    pub btc_token: Rc<MockToken>,
    pub debt_token: Rc<MockToken>,
    pub clock: Rc<FixedClock>,
}

impl StablFixture {
    pub fn new() -> Self {
        Self::build(RiskParameters::default(), OracleValidationConfig::default())
    }

    pub fn with_risk(risk: RiskParameters) -> Self {
        Self::build(risk, OracleValidationConfig::default())
    }

    pub fn with_max_age(max_age: u64) -> Self {
        Self::build(
            RiskParameters::default(),
            OracleValidationConfig::new(max_age),
        )
    }

    fn build(risk: RiskParameters, validation: OracleValidationConfig) -> Self {
        init_tracing();
        let (eth, btc) = (AssetId::new_unique(), AssetId::new_unique());
        let eth_feed = Rc::new(MockPriceFeed::new(FEED_DECIMALS, feed_answer(ETH_PRICE)));
        let btc_feed = Rc::new(MockPriceFeed::new(FEED_DECIMALS, feed_answer(BTC_PRICE)));
        let eth_token = Rc::new(MockToken::default());
        let btc_token = Rc::new(MockToken::default());
        let debt_token = Rc::new(MockToken::default());
        let clock = Rc::new(FixedClock::new(MOCK_FEED_START));
        let config = EngineConfig {
            risk,
            assets: vec![
                AssetConfig::new(eth, 18).with_validation(validation),
                AssetConfig::new(btc, 8).with_validation(validation),
            ],
        };
        let engine = CdpEngine::new(
            config,
            vec![
                eth_feed.clone() as Rc<dyn PriceFeed>,
                btc_feed.clone() as Rc<dyn PriceFeed>,
            ],
            vec![
                eth_token.clone() as Rc<dyn CollateralToken>,
                btc_token.clone() as Rc<dyn CollateralToken>,
            ],
            debt_token.clone(),
        )
        .expect("fixture engine")
        .with_clock(clock.clone());
        StablFixture {
            engine,
            eth,
            btc,
            eth_feed,
            btc_feed,
            eth_token,
            btc_token,
            debt_token,
            clock,
        }
    }

    pub fn engine(&self) -> &CdpEngine {
        &self.engine
    }

    /// A fresh account holding `eth` and `btc` atoms in its wallet.
    pub fn funded_user(&self, eth: u128, btc: u128) -> AccountId {
        let user = AccountId::new_unique();
        if eth > 0 {
            self.eth_token.credit(&user, eth);
        }
        if btc > 0 {
            self.btc_token.credit(&user, btc);
        }
        user
    }

    /// Wallet balances of `user`, outside the engine.
    pub fn fetch_balance(&self, user: &AccountId) -> Balance {
        Balance {
            eth: self.eth_token.balance_of(user),
            btc: self.btc_token.balance_of(user),
            debt: self.debt_token.balance_of(user),
        }
    }

    pub fn push_eth_price(&self, price: f64) {
        self.eth_feed.set_answer(feed_answer(price));
    }

    pub fn push_btc_price(&self, price: f64) {
        self.btc_feed.set_answer(feed_answer(price));
    }

    /// Publishes an ETH round that never completed.
    pub fn open_eth_round(&self) {
        let round = self.eth_feed.round();
        self.eth_feed.set_round(RoundData {
            round_id: round.round_id + 1,
            updated_at: 0,
            ..round
        });
    }
}

pub fn feed_answer(price: f64) -> i128 {
    (price * 10f64.powi(FEED_DECIMALS as i32)).round() as i128
}

#[allow(non_snake_case)]
pub fn ETH(amount: f64) -> u128 {
    (amount * 1e18).round() as u128
}

#[allow(non_snake_case)]
pub fn BTC(amount: f64) -> u128 {
    (amount * 1e8).round() as u128
}

/// The debt asset, 18 decimals.
#[allow(non_snake_case)]
pub fn USD(amount: f64) -> u128 {
    (amount * 1e18).round() as u128
}
