use crate::{
    engine::cdp_engine::{require_amount, CdpEngine},
    error::{CdpError, CdpResult, CdpResultExt, ErrorWithContext},
    event::{CdpEvent, LiquidatedEvent},
    math::{safe_math::SafeMath, wad::Wad},
    operation::{
        health::{calculate_health_factor, is_healthy, position_health},
        liquidation::{compute_seizure, LiquidationOutcome},
        valuation::{amount_from_value, total_collateral_value_with},
    },
    state::{
        ids::{AccountId, AssetId},
        ledgers::Ledgers,
        position::PositionHealth,
    },
};

impl CdpEngine {
    /// Repays `debt_to_cover` of `target`'s debt with the liquidator's debt tokens in exchange
    /// for the equivalent `asset` collateral plus the liquidation bonus.
    ///
    /// Only an unhealthy target can be liquidated and its health must strictly improve. The
    /// liquidator's own ledger entries are left untouched but must be healthy.
    pub fn liquidate(
        &self,
        liquidator: &AccountId,
        target: &AccountId,
        asset: &AssetId,
        debt_to_cover: u128,
    ) -> CdpResult<LiquidationOutcome> {
        self.execute("liquidate", &[*target, *liquidator], || {
            let registered = self.oracle.registry().require_allowed(asset)?;
            let planned =
                self.plan_liquidation(&self.ledgers.borrow(), target, asset, debt_to_cover)?;
            let collateral_seized = planned.collateral_seized()?;
            {
                let mut ledgers = self.ledgers.borrow_mut();
                if collateral_seized > 0 {
                    ledgers.redeem(target, liquidator, asset, collateral_seized)?;
                }
                ledgers.burn(target, liquidator, debt_to_cover)?;
            }

            let health_after = {
                let ledgers = self.ledgers.borrow();
                position_health(&self.oracle, &ledgers, target, &self.params)?
            };
            if health_after.health_factor <= planned.health_before_liquidation.health_factor {
                return Err(CdpError::HealthFactorNotImproved.into());
            }
            self.check_health(liquidator).with_msg("liquidator")?;

            let outcome = LiquidationOutcome {
                health_after_liquidation: health_after,
                ..planned
            };
            self.ledgers
                .borrow_mut()
                .record(CdpEvent::Liquidated(LiquidatedEvent {
                    liquidator: *liquidator,
                    target: *target,
                    asset: *asset,
                    debt_repaid: debt_to_cover,
                    collateral_seized,
                    bonus_collateral: outcome.seizure.bonus_collateral,
                    health_factor_before: outcome.health_before_liquidation.health_factor,
                    health_factor_after: health_after.health_factor,
                }));

            self.pull_and_burn_debt(liquidator, debt_to_cover)?;
            if collateral_seized > 0 {
                self.push_collateral(registered, liquidator, collateral_seized)
                    .map_err(|err| self.remint_debt(err, liquidator, debt_to_cover))?;
            }
            Ok(outcome)
        })
    }

    /// What [`CdpEngine::liquidate`] would do at current prices, without doing it.
    pub fn preview_liquidation(
        &self,
        target: &AccountId,
        asset: &AssetId,
        debt_to_cover: u128,
    ) -> CdpResult<LiquidationOutcome> {
        self.oracle.registry().require_allowed(asset)?;
        let ledgers = self.ledgers.borrow();
        self.plan_liquidation(&ledgers, target, asset, debt_to_cover)
    }

    fn plan_liquidation(
        &self,
        ledgers: &Ledgers,
        target: &AccountId,
        asset: &AssetId,
        debt_to_cover: u128,
    ) -> CdpResult<LiquidationOutcome> {
        require_amount(debt_to_cover)?;
        let health_before = position_health(&self.oracle, ledgers, target, &self.params)?;
        if is_healthy(health_before.health_factor, &self.params) {
            return Err(CdpError::HealthFactorOK.into());
        }
        if health_before.debt < debt_to_cover {
            return Err(ErrorWithContext::from(CdpError::InsufficientBalance))
                .with_msg("debt to cover exceeds target debt");
        }
        let remaining_debt = health_before.debt.safe_sub(debt_to_cover)?;

        // debt atoms are worth their face value in the unit of account
        let base_collateral =
            amount_from_value(&self.oracle, asset, Wad::from_bits(debt_to_cover))?;
        let deposited = ledgers.collateral().balance(target, asset);
        let seizure = compute_seizure(base_collateral, deposited, self.params.liquidation_bonus)?;

        let collateral_value = total_collateral_value_with(
            &self.oracle,
            ledgers.collateral(),
            target,
            Some((asset, deposited.safe_sub(seizure.total()?)?)),
        )?;
        let health_after = PositionHealth {
            debt: remaining_debt,
            collateral_value,
            health_factor: calculate_health_factor(remaining_debt, collateral_value, &self.params)?,
        };
        if health_after.health_factor <= health_before.health_factor {
            return Err(CdpError::HealthFactorNotImproved.into());
        }
        Ok(LiquidationOutcome {
            debt_repaid: debt_to_cover,
            seizure,
            health_before_liquidation: health_before,
            health_after_liquidation: health_after,
        })
    }
}
