pub mod cdp_engine;
pub mod guard;
pub mod liquidation;
pub mod position_manager;
pub mod query;

pub use cdp_engine::CdpEngine;
