pub mod health;
pub mod liquidation;
pub mod valuation;
