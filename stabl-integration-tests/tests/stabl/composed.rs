use stabl_lib::{error::CdpError, event::CdpEventTag, math::wad::Wad};

use crate::fixture::stabl_fixture::{StablFixture, ETH, USD};

#[test]
fn deposit_and_mint_in_one_step() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let user = fixture.funded_user(ETH(10.), 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&user, &fixture.eth, ETH(10.), USD(1.))?;
    assert_eq!(fixture.engine().health_factor(&user)?, Wad::from_units(10_000));
    let tags: Vec<CdpEventTag> = fixture.engine().events().iter().map(|e| e.tag()).collect();
    assert_eq!(tags, vec![CdpEventTag::CollateralDeposited, CdpEventTag::DebtMinted]);
    Ok(())
}

#[test]
fn deposit_and_over_mint_moves_nothing() {
    let fixture = StablFixture::new();
    let user = fixture.funded_user(ETH(10.), 0);
    let err = fixture
        .engine()
        .deposit_collateral_and_mint(&user, &fixture.eth, ETH(10.), USD(10_001.))
        .unwrap_err();
    assert!(matches!(*err, CdpError::BreaksHealthFactor { .. }));
    assert_eq!(fixture.engine().collateral_balance(&user, &fixture.eth), 0);
    assert_eq!(fixture.engine().debt(&user), 0);
    assert_eq!(fixture.fetch_balance(&user).eth, ETH(10.));
    assert!(fixture.engine().events().is_empty());
}

#[test]
fn full_exit_with_redeem_and_burn() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let user = fixture.funded_user(ETH(10.), 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&user, &fixture.eth, ETH(10.), USD(10_000.))?;
    // redeeming alone would leave the debt uncovered
    assert!(fixture
        .engine()
        .redeem_collateral(&user, &fixture.eth, ETH(10.))
        .is_err());
    fixture
        .engine()
        .redeem_collateral_and_burn(&user, &fixture.eth, ETH(10.), USD(10_000.))?;
    assert_eq!(fixture.engine().debt(&user), 0);
    assert_eq!(fixture.engine().collateral_balance(&user, &fixture.eth), 0);
    let balance = fixture.fetch_balance(&user);
    assert_eq!(balance.eth, ETH(10.));
    assert_eq!(balance.debt, 0);
    assert_eq!(fixture.debt_token.total_supply(), 0);
    Ok(())
}

#[test]
fn partial_redeem_and_burn_is_checked_after_both() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let user = fixture.funded_user(ETH(10.), 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&user, &fixture.eth, ETH(10.), USD(8_000.))?;
    // 6 ETH back 6000 which covers 8000 - 2000
    fixture
        .engine()
        .redeem_collateral_and_burn(&user, &fixture.eth, ETH(4.), USD(2_000.))?;
    assert_eq!(fixture.engine().health_factor(&user)?, Wad::ONE);
    let err = fixture
        .engine()
        .redeem_collateral_and_burn(&user, &fixture.eth, ETH(2.), USD(1_000.))
        .unwrap_err();
    assert!(matches!(*err, CdpError::BreaksHealthFactor { .. }));
    assert_eq!(fixture.engine().debt(&user), USD(6_000.));
    assert_eq!(fixture.engine().collateral_balance(&user, &fixture.eth), ETH(6.));
    assert_eq!(fixture.fetch_balance(&user).debt, USD(6_000.));
    Ok(())
}
