pub mod const_assert;
pub mod constant;
pub mod engine;
pub mod error;
pub mod event;
pub mod math;
pub mod metrics;
pub mod operation;
pub mod oracle;
pub mod state;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod token;
