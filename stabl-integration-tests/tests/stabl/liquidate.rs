use stabl_lib::{
    error::CdpError,
    event::CdpEvent,
    math::wad::Wad,
    state::{
        ids::{AccountId, AssetId},
        risk_config::RiskParameters,
    },
};

use crate::fixture::stabl_fixture::{StablFixture, BTC, ETH, USD};

/// Alice and Bob deposit 10 ETH each. Alice borrows at the limit, Bob half of it. The
/// liquidator holds a healthy position of its own and the debt tokens to repay with.
fn three_accounts(fixture: &StablFixture) -> anyhow::Result<(AccountId, AccountId, AccountId)> {
    let alice = fixture.funded_user(ETH(10.), 0);
    let bob = fixture.funded_user(ETH(10.), 0);
    let liquidator = fixture.funded_user(ETH(20.), 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&alice, &fixture.eth, ETH(10.), USD(10_000.))?;
    fixture
        .engine()
        .deposit_collateral_and_mint(&bob, &fixture.eth, ETH(10.), USD(5_000.))?;
    fixture
        .engine()
        .deposit_collateral_and_mint(&liquidator, &fixture.eth, ETH(20.), USD(5_000.))?;
    Ok((alice, bob, liquidator))
}

#[test]
fn cant_liquidate_healthy_position() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let (alice, bob, liquidator) = three_accounts(&fixture)?;
    for target in [alice, bob] {
        let err = fixture
            .engine()
            .liquidate(&liquidator, &target, &fixture.eth, USD(100.))
            .unwrap_err();
        assert_eq!(err, CdpError::HealthFactorOK);
    }
    Ok(())
}

#[test]
fn can_partially_liquidate_unhealthy_position() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let (alice, bob, liquidator) = three_accounts(&fixture)?;
    fixture.push_eth_price(1_800.);
    assert!(!fixture.engine().is_healthy(&alice)?);
    assert!(fixture.engine().is_healthy(&bob)?);

    let liquidator_before = fixture.fetch_balance(&liquidator);
    let bob_before = fixture.fetch_balance(&bob);
    let bob_health_before = fixture.engine().health_factor(&bob)?;
    let total_debt_before = fixture.engine().total_debt();
    let outcome = fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(1_000.))?;

    let base = ETH(1.) * 1_000 / 1_800;
    let seized = base * 110 / 100;
    assert_eq!(outcome.seizure.base_collateral, base);
    assert_eq!(outcome.seizure.bonus_collateral, seized - base);
    assert_eq!(outcome.debt_repaid, USD(1_000.));
    assert_eq!(
        outcome.health_before_liquidation.health_factor,
        Wad::from_ratio(9, 10)?
    );
    assert!(
        outcome.health_after_liquidation.health_factor
            > outcome.health_before_liquidation.health_factor
    );

    // target decreased by exactly the repaid debt and the seized collateral
    assert_eq!(fixture.engine().debt(&alice), USD(9_000.));
    assert_eq!(
        fixture.engine().collateral_balance(&alice, &fixture.eth),
        ETH(10.) - seized
    );
    assert_eq!(fixture.engine().total_debt(), total_debt_before - USD(1_000.));
    assert_eq!(fixture.engine().total_debt(), fixture.debt_token.total_supply());

    // bob holds the same collateral as alice and is left alone
    assert_eq!(fixture.engine().debt(&bob), USD(5_000.));
    assert_eq!(fixture.engine().collateral_balance(&bob, &fixture.eth), ETH(10.));
    assert_eq!(fixture.engine().health_factor(&bob)?, bob_health_before);
    assert_eq!(fixture.fetch_balance(&bob), bob_before);

    // liquidator ledger untouched, wallet paid debt and received collateral
    assert_eq!(fixture.engine().debt(&liquidator), USD(5_000.));
    assert_eq!(
        fixture.engine().collateral_balance(&liquidator, &fixture.eth),
        ETH(20.)
    );
    let diff = fixture.fetch_balance(&liquidator).delta(&liquidator_before);
    assert_eq!(diff.eth, seized as i128);
    assert_eq!(diff.debt, -(USD(1_000.) as i128));

    let health = fixture.engine().health_factor(&alice)?;
    assert_eq!(health, outcome.health_after_liquidation.health_factor);
    match fixture.engine().events().last() {
        Some(CdpEvent::Liquidated(event)) => {
            assert_eq!(event.liquidator, liquidator);
            assert_eq!(event.target, alice);
            assert_eq!(event.collateral_seized, seized);
            assert_eq!(event.health_factor_after, health);
        }
        other => panic!("unexpected last event {other:?}"),
    }
    Ok(())
}

#[test]
fn preview_matches_liquidation() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let (alice, _, liquidator) = three_accounts(&fixture)?;
    fixture.push_eth_price(1_900.);
    let events_before = fixture.engine().events().len();
    let preview = fixture
        .engine()
        .preview_liquidation(&alice, &fixture.eth, USD(500.))?;
    assert_eq!(fixture.engine().events().len(), events_before);
    assert_eq!(fixture.engine().debt(&alice), USD(10_000.));
    let outcome = fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(500.))?;
    assert_eq!(preview, outcome);
    Ok(())
}

#[test]
fn bonus_is_capped_by_the_deposit() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let alice = fixture.funded_user(ETH(1.), BTC(1.));
    let liquidator = fixture.funded_user(ETH(20.), 0);
    fixture
        .engine()
        .deposit_collateral(&alice, &fixture.eth, ETH(1.))?;
    fixture
        .engine()
        .deposit_collateral_and_mint(&alice, &fixture.btc, BTC(1.), USD(16_000.))?;
    fixture
        .engine()
        .deposit_collateral_and_mint(&liquidator, &fixture.eth, ETH(20.), USD(2_000.))?;
    fixture.push_btc_price(27_000.);
    assert!(!fixture.engine().is_healthy(&alice)?);

    // 1950 buys 0.975 ETH, the 10% bonus would need 1.0725 and only 1 is deposited
    let outcome = fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(1_950.))?;
    let base = ETH(1.) * 975 / 1_000;
    assert_eq!(outcome.seizure.base_collateral, base);
    assert_eq!(outcome.seizure.bonus_collateral, ETH(1.) - base);
    assert!(!fixture.engine().is_healthy(&alice)?);
    assert_eq!(fixture.engine().collateral_balance(&alice, &fixture.eth), 0);

    // still unhealthy, but no ETH left to seize
    let err = fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(1.))
        .unwrap_err();
    assert_eq!(err, CdpError::InsufficientBalance);
    Ok(())
}

#[test]
fn cant_liquidate_more_than_target_debt() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let (alice, _, liquidator) = three_accounts(&fixture)?;
    fixture.push_eth_price(1_800.);
    let err = fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(10_001.))
        .unwrap_err();
    assert_eq!(err, CdpError::InsufficientBalance);
    Ok(())
}

#[test]
fn liquidation_that_worsens_health_is_rejected() -> anyhow::Result<()> {
    let fixture = StablFixture::with_risk(RiskParameters {
        liquidation_threshold: 80,
        liquidation_bonus: 20,
        min_health_factor: Wad::ONE,
    });
    let alice = fixture.funded_user(ETH(10.), 0);
    let liquidator = fixture.funded_user(ETH(20.), 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&alice, &fixture.eth, ETH(10.), USD(16_000.))?;
    fixture
        .engine()
        .deposit_collateral_and_mint(&liquidator, &fixture.eth, ETH(20.), USD(1_000.))?;
    // 10 ETH at 1500 against 16000: each liquidation hands out more value than it repays
    fixture.push_eth_price(1_500.);
    let err = fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(1_000.))
        .unwrap_err();
    assert_eq!(err, CdpError::HealthFactorNotImproved);
    assert_eq!(fixture.engine().debt(&alice), USD(16_000.));
    Ok(())
}

#[test]
fn unhealthy_liquidator_is_rejected() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let (alice, _, _) = three_accounts(&fixture)?;
    let dave = fixture.funded_user(ETH(1.), 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&dave, &fixture.eth, ETH(1.), USD(1_000.))?;
    fixture.push_eth_price(1_800.);
    // dave is as underwater as alice and cannot liquidate her
    let err = fixture
        .engine()
        .liquidate(&dave, &alice, &fixture.eth, USD(500.))
        .unwrap_err();
    assert_eq!(err, CdpError::breaks_health_factor(Wad::from_ratio(9, 10)?));
    assert_eq!(fixture.engine().debt(&alice), USD(10_000.));
    assert_eq!(fixture.fetch_balance(&dave).debt, USD(1_000.));
    Ok(())
}

#[test]
fn liquidation_needs_a_fresh_price() -> anyhow::Result<()> {
    let fixture = StablFixture::with_max_age(60);
    let (alice, _, liquidator) = three_accounts(&fixture)?;
    fixture.push_eth_price(1_800.);
    fixture.clock.advance(61);
    let err = fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(1_000.))
        .unwrap_err();
    assert_eq!(err, CdpError::StalePrice);
    let err = fixture
        .engine()
        .liquidate(&liquidator, &alice, &AssetId::new_unique(), USD(1_000.))
        .unwrap_err();
    assert_eq!(err, CdpError::TokenNotAllowed);
    Ok(())
}

#[test]
fn failed_collateral_push_gives_the_repayment_back() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let (alice, _, liquidator) = three_accounts(&fixture)?;
    fixture.push_eth_price(1_800.);
    let liquidator_before = fixture.fetch_balance(&liquidator);
    let supply_before = fixture.debt_token.total_supply();
    let custody_before = fixture.eth_token.custody();

    fixture.eth_token.reject_with("frozen");
    let err = fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(1_000.))
        .unwrap_err();
    assert_eq!(err, CdpError::TransferFailed);

    // the burned repayment is minted back to the liquidator
    assert_eq!(fixture.fetch_balance(&liquidator), liquidator_before);
    assert_eq!(fixture.debt_token.total_supply(), supply_before);
    assert_eq!(fixture.debt_token.custody(), 0);
    assert_eq!(fixture.eth_token.custody(), custody_before);
    assert_eq!(fixture.engine().debt(&alice), USD(10_000.));
    assert_eq!(fixture.engine().total_debt(), fixture.debt_token.total_supply());
    assert_eq!(
        fixture.engine().collateral_balance(&alice, &fixture.eth),
        ETH(10.)
    );

    fixture.eth_token.accept();
    fixture
        .engine()
        .liquidate(&liquidator, &alice, &fixture.eth, USD(1_000.))?;
    assert_eq!(fixture.engine().total_debt(), fixture.debt_token.total_supply());
    Ok(())
}
