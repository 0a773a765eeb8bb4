//! In-memory collaborators for driving an engine in tests.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
};

use crate::{
    oracle::oracle_provider::{Clock, FeedError, PriceFeed, RoundData},
    state::ids::AccountId,
    token::{CollateralToken, DebtToken, TokenError},
};

pub const FLOAT_RELATIVE_EPSILON: f64 = 1e-6;

#[macro_export]
macro_rules! assert_eq_float {
    ($left:expr, $right:expr, $max_relative_error:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let abs_relative_error = (left_val - right_val).abs() / right_val.abs();
        if abs_relative_error > $max_relative_error {
            panic!(
                "assertion failed: `(left == right)`\n  left: `{:?}`,\n right: `{:?}`,\n max_relative_error: `{}`,\n abs_relative_error: `{:?}`",
                left_val, right_val, $max_relative_error, abs_relative_error
            );
        }
    }};
    ($left:expr, $right:expr) => {
        $crate::assert_eq_float!($left, $right, $crate::test_utils::FLOAT_RELATIVE_EPSILON)
    };
}

/// Timestamp of the first round of every mock feed.
pub const MOCK_FEED_START: u64 = 1_700_000_000;

/// Price feed whose rounds are set by hand.
#[derive(Debug)]
pub struct MockPriceFeed {
    decimals: u8,
    round: Cell<RoundData>,
    failure: RefCell<Option<String>>,
}

impl MockPriceFeed {
    pub fn new(decimals: u8, answer: i128) -> Self {
        Self {
            decimals,
            round: Cell::new(RoundData {
                round_id: 1,
                answer,
                started_at: MOCK_FEED_START,
                updated_at: MOCK_FEED_START,
                answered_in_round: 1,
            }),
            failure: RefCell::new(None),
        }
    }

    /// Publishes `answer` in a new round with the same timestamp.
    pub fn set_answer(&self, answer: i128) {
        let mut round = self.round.get();
        round.round_id += 1;
        round.answered_in_round = round.round_id;
        round.answer = answer;
        self.round.set(round);
    }

    /// Publishes a whole-unit price, scaled to the feed decimals.
    pub fn set_price_units(&self, units: i128) {
        self.set_answer(units * 10i128.pow(self.decimals as u32));
    }

    pub fn set_round(&self, round: RoundData) {
        self.round.set(round);
    }

    pub fn round(&self) -> RoundData {
        self.round.get()
    }

    /// Every read fails with `msg` until [`MockPriceFeed::recover`].
    pub fn fail_with(&self, msg: &str) {
        *self.failure.borrow_mut() = Some(msg.to_string());
    }

    pub fn recover(&self) {
        *self.failure.borrow_mut() = None;
    }
}

impl PriceFeed for MockPriceFeed {
    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn latest_round_data(&self) -> Result<RoundData, FeedError> {
        match self.failure.borrow().as_ref() {
            Some(msg) => Err(FeedError(msg.clone())),
            None => Ok(self.round.get()),
        }
    }
}

/// Entry points of a token collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCall {
    TransferIn,
    TransferOut,
    Mint,
    Burn,
}

/// Token ledger with a single custody account standing for the engine.
#[derive(Debug, Default)]
pub struct MockToken {
    balances: RefCell<BTreeMap<AccountId, u128>>,
    custody: Cell<u128>,
    total_supply: Cell<u128>,
    /// Rejected call, every call when `None`, and the message returned
    rejection: RefCell<Option<(Option<TokenCall>, String)>>,
}

impl MockToken {
    /// Gives `account` freshly created atoms.
    pub fn credit(&self, account: &AccountId, amount: u128) {
        *self.balances.borrow_mut().entry(*account).or_default() += amount;
        self.total_supply.set(self.total_supply.get() + amount);
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances
            .borrow()
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    /// Wallet to wallet transfer, bypassing the engine.
    pub fn send(&self, from: &AccountId, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        self.debit(from, amount)?;
        *self.balances.borrow_mut().entry(*to).or_default() += amount;
        Ok(())
    }

    /// Atoms held on behalf of the engine.
    pub fn custody(&self) -> u128 {
        self.custody.get()
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply.get()
    }

    /// Every call is rejected with `msg` until [`MockToken::accept`].
    pub fn reject_with(&self, msg: &str) {
        *self.rejection.borrow_mut() = Some((None, msg.to_string()));
    }

    /// Only `call` is rejected with `msg` until [`MockToken::accept`].
    pub fn reject_call_with(&self, call: TokenCall, msg: &str) {
        *self.rejection.borrow_mut() = Some((Some(call), msg.to_string()));
    }

    pub fn accept(&self) {
        *self.rejection.borrow_mut() = None;
    }

    fn check_rejection(&self, call: TokenCall) -> Result<(), TokenError> {
        match self.rejection.borrow().as_ref() {
            Some((None, msg)) => Err(TokenError::Rejected(msg.clone())),
            Some((Some(rejected), msg)) if *rejected == call => {
                Err(TokenError::Rejected(msg.clone()))
            }
            _ => Ok(()),
        }
    }

    fn debit(&self, account: &AccountId, amount: u128) -> Result<(), TokenError> {
        let mut balances = self.balances.borrow_mut();
        let balance = balances.entry(*account).or_default();
        if *balance < amount {
            return Err(TokenError::InsufficientFunds {
                available: *balance,
                requested: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }

    fn release(&self, amount: u128) -> Result<(), TokenError> {
        let custody = self.custody.get();
        if custody < amount {
            return Err(TokenError::InsufficientFunds {
                available: custody,
                requested: amount,
            });
        }
        self.custody.set(custody - amount);
        Ok(())
    }
}

impl CollateralToken for MockToken {
    fn transfer_in(&self, from: &AccountId, amount: u128) -> Result<(), TokenError> {
        self.check_rejection(TokenCall::TransferIn)?;
        self.debit(from, amount)?;
        self.custody.set(self.custody.get() + amount);
        Ok(())
    }

    fn transfer_out(&self, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        self.check_rejection(TokenCall::TransferOut)?;
        self.release(amount)?;
        *self.balances.borrow_mut().entry(*to).or_default() += amount;
        Ok(())
    }
}

impl DebtToken for MockToken {
    fn mint(&self, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        self.check_rejection(TokenCall::Mint)?;
        self.credit(to, amount);
        Ok(())
    }

    fn burn(&self, amount: u128) -> Result<(), TokenError> {
        self.check_rejection(TokenCall::Burn)?;
        self.release(amount)?;
        self.total_supply.set(self.total_supply.get() - amount);
        Ok(())
    }
}

#[derive(Debug)]
pub struct FixedClock {
    now: Cell<u64>,
}

impl FixedClock {
    pub fn new(unix_timestamp: u64) -> Self {
        Self {
            now: Cell::new(unix_timestamp),
        }
    }

    pub fn set(&self, unix_timestamp: u64) {
        self.now.set(unix_timestamp);
    }

    pub fn advance(&self, seconds: u64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> u64 {
        self.now.get()
    }
}
