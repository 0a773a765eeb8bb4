use stabl_lib::{
    error::CdpError,
    event::{CdpEvent, DebtBurnedEvent},
    math::wad::Wad,
};

use crate::fixture::stabl_fixture::{StablFixture, ETH, USD};

#[test]
fn can_burn_debt() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let user = fixture.funded_user(ETH(10.), 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&user, &fixture.eth, ETH(10.), USD(5_000.))?;
    fixture.engine().burn_debt(&user, USD(1_000.))?;
    assert_eq!(fixture.engine().debt(&user), USD(4_000.));
    assert_eq!(fixture.fetch_balance(&user).debt, USD(4_000.));
    assert_eq!(fixture.debt_token.total_supply(), USD(4_000.));
    assert_eq!(fixture.debt_token.custody(), 0);
    assert_eq!(
        fixture.engine().events().last(),
        Some(&CdpEvent::DebtBurned(DebtBurnedEvent {
            on_behalf_of: user,
            payer: user,
            amount: USD(1_000.),
        }))
    );

    fixture.engine().burn_debt(&user, USD(4_000.))?;
    assert_eq!(fixture.engine().debt(&user), 0);
    assert_eq!(fixture.engine().health_factor(&user)?, Wad::MAX);
    Ok(())
}

#[test]
fn cant_burn_more_than_owed() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let user = fixture.funded_user(ETH(10.), 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&user, &fixture.eth, ETH(10.), USD(100.))?;
    // extra debt tokens from elsewhere do not allow burning past the debt
    fixture.debt_token.credit(&user, USD(1.));
    let err = fixture.engine().burn_debt(&user, USD(101.)).unwrap_err();
    assert_eq!(err, CdpError::InsufficientBalance);
    assert_eq!(fixture.engine().debt(&user), USD(100.));
    assert_eq!(fixture.fetch_balance(&user).debt, USD(101.));
    Ok(())
}

#[test]
fn burn_without_tokens_is_rolled_back() -> anyhow::Result<()> {
    let fixture = StablFixture::new();
    let user = fixture.funded_user(ETH(10.), 0);
    let friend = fixture.funded_user(0, 0);
    fixture
        .engine()
        .deposit_collateral_and_mint(&user, &fixture.eth, ETH(10.), USD(100.))?;
    fixture.debt_token.send(&user, &friend, USD(60.))?;
    let err = fixture.engine().burn_debt(&user, USD(50.)).unwrap_err();
    assert_eq!(err, CdpError::TransferFailed);
    assert_eq!(fixture.engine().debt(&user), USD(100.));
    assert_eq!(fixture.engine().total_debt(), USD(100.));
    fixture.engine().burn_debt(&user, USD(40.))?;
    assert_eq!(fixture.engine().debt(&user), USD(60.));
    Ok(())
}

#[test]
fn cant_burn_zero() {
    let fixture = StablFixture::new();
    let user = fixture.funded_user(0, 0);
    assert_eq!(
        fixture.engine().burn_debt(&user, 0).unwrap_err(),
        CdpError::InvalidAmount
    );
}
