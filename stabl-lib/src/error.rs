use std::ops::Deref;

use crate::math::wad::Wad;

pub type CdpResult<T = ()> = Result<T, ErrorWithContext<CdpError>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("error = {error:?}, msg = {msg:?}, stack = {stack:?}")]
pub struct ErrorWithContext<T> {
    pub error: T,
    pub msg: Vec<DisplayCow>,
    pub stack: Vec<DisplayLocation>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct DisplayLocation(pub &'static std::panic::Location<'static>);

impl std::fmt::Debug for DisplayLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct DisplayCow(pub std::borrow::Cow<'static, str>);

impl std::fmt::Debug for DisplayCow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_ref())
    }
}

impl<T> ErrorWithContext<T> {
    pub fn new(error: T, location: &'static std::panic::Location<'static>) -> Self {
        let mut context = Vec::with_capacity(4);
        context.push(DisplayLocation(location));
        ErrorWithContext {
            error,
            stack: context,
            msg: Vec::with_capacity(2),
        }
    }

    pub fn with_msg(mut self, msg: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        self.msg.push(DisplayCow(msg.into()));
        self
    }
}

impl<T> Deref for ErrorWithContext<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.error
    }
}

impl PartialEq<CdpError> for ErrorWithContext<CdpError> {
    fn eq(&self, other: &CdpError) -> bool {
        self.error == *other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CdpError {
    #[error("addition overflow")]
    AdditionOverflow,
    #[error("subtraction overflow")]
    SubtractionOverflow,
    #[error("multiplication overflow")]
    MultiplicationOverflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("asset is not an approved collateral")]
    TokenNotAllowed,
    #[error("assets and price feeds differ in length")]
    LengthMismatch,
    #[error("asset registered twice")]
    DuplicateAsset,
    #[error("no collateral asset registered")]
    EmptyRegistry,
    #[error("asset decimals are not supported")]
    UnsupportedDecimals,
    #[error("invalid risk parameters")]
    InvalidRiskParameters,
    #[error("token transfer failed")]
    TransferFailed,
    #[error("debt mint failed")]
    MintFailed,
    #[error("operation breaks health factor ({health_factor})")]
    BreaksHealthFactor { health_factor: Wad },
    #[error("position is healthy")]
    HealthFactorOK,
    #[error("liquidation did not improve health factor")]
    HealthFactorNotImproved,
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("asset has no price feed")]
    UnsupportedAsset,
    #[error("stale price")]
    StalePrice,
    #[error("oracle error")]
    OracleError,
    #[error("re-entrant call")]
    Reentrancy,
}

impl CdpError {
    pub fn with_context(
        self,
        location: &'static std::panic::Location<'static>,
    ) -> ErrorWithContext<CdpError> {
        ErrorWithContext::new(self, location)
    }

    pub fn breaks_health_factor(health_factor: Wad) -> Self {
        CdpError::BreaksHealthFactor { health_factor }
    }
}

impl<T> From<T> for ErrorWithContext<T> {
    #[track_caller]
    fn from(error: T) -> Self {
        Self::new(error, std::panic::Location::caller())
    }
}

pub trait CdpResultExt: Sized {
    #[track_caller]
    fn track_caller(self) -> Self;

    fn with_msg(self, msg: impl Into<std::borrow::Cow<'static, str>>) -> Self;
}

impl<T> CdpResultExt for CdpResult<T> {
    #[inline(always)]
    fn track_caller(self) -> Self {
        let caller = std::panic::Location::caller();
        self.map_err(|mut err| {
            err.stack.push(DisplayLocation(caller));
            err
        })
    }

    #[inline(always)]
    fn with_msg(self, msg: impl Into<std::borrow::Cow<'static, str>>) -> Self {
        self.map_err(|mut err| {
            err.msg.push(DisplayCow(msg.into()));
            err
        })
    }
}

#[macro_export]
macro_rules! with_context {
    ( $error:expr) => {{
        let caller = std::panic::Location::caller();
        || $error.with_context(caller)
    }};
}

#[macro_export]
macro_rules! map_context {
    ($error:expr) => {{
        let caller = std::panic::Location::caller();
        |_| $error.with_context(caller)
    }};
}
