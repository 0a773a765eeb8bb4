use borsh::{BorshDeserialize, BorshSerialize};

#[derive(Debug, Clone, Copy, Default, BorshSerialize, BorshDeserialize, PartialEq, Eq)]
#[cfg_attr(
    feature = "client",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct OracleValidationConfig {
    /// Max age in seconds from which a round is considered as stale. Disabled when absent.
    #[cfg_attr(feature = "client", serde(default))]
    max_age: Option<u64>,
}

impl OracleValidationConfig {
    pub fn new(max_age: u64) -> Self {
        Self {
            max_age: Some(max_age),
        }
    }

    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }
}
