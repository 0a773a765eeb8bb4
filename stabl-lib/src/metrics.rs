#[cfg(feature = "client")]
pub mod client {
    use crate::{
        constant::DEBT_DECIMALS,
        engine::CdpEngine,
        error::CdpResult,
        state::ids::AccountId,
    };

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CollateralSummary {
        pub asset: String,
        pub amount: f64,
        pub value: f64,
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PositionSummary {
        pub account: String,
        pub debt: f64,
        pub collateral_value: f64,
        /// Infinite for a debt-free position
        pub health_factor: f64,
        pub collateral: Vec<CollateralSummary>,
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SystemSummary {
        pub total_debt: f64,
        pub collateral: Vec<CollateralSummary>,
    }

    fn to_units(atoms: u128, decimals: u8) -> f64 {
        atoms as f64 / 10f64.powi(decimals as i32)
    }

    impl CdpEngine {
        pub fn position_summary(&self, account: &AccountId) -> CdpResult<PositionSummary> {
            let health = self.position_health(account)?;
            let mut collateral = Vec::new();
            for position in self.collateral_positions(account)? {
                let decimals = self.oracle.registry().require_allowed(&position.asset)?.decimals();
                collateral.push(CollateralSummary {
                    asset: position.asset.to_string(),
                    amount: to_units(position.amount, decimals),
                    value: position.value.to_float(),
                });
            }
            Ok(PositionSummary {
                account: account.to_string(),
                debt: to_units(health.debt, DEBT_DECIMALS),
                collateral_value: health.collateral_value.to_float(),
                health_factor: health.health_factor.to_float(),
                collateral,
            })
        }

        /// Prices every asset with a deposit, fails on the first feed that cannot be read.
        pub fn system_summary(&self) -> CdpResult<SystemSummary> {
            let mut collateral = Vec::new();
            for registered in self.oracle.registry().iter() {
                let amount = self.total_deposited(registered.id());
                let value = match amount {
                    0 => 0.0,
                    _ => self.value_of(registered.id(), amount)?.to_float(),
                };
                collateral.push(CollateralSummary {
                    asset: registered.id().to_string(),
                    amount: to_units(amount, registered.decimals()),
                    value,
                });
            }
            Ok(SystemSummary {
                total_debt: to_units(self.total_debt(), DEBT_DECIMALS),
                collateral,
            })
        }
    }

}
