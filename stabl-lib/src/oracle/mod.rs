pub mod oracle_adapter;
pub mod oracle_config;
pub mod oracle_price;
pub mod oracle_provider;
