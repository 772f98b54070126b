use crate::utils::{floor_div, integer_sqrt};
use crate::ErrorCode;

/// Liquidity share math for the pool engine
///
/// All divisions truncate, so rounding loss always stays with the pool.

/// Calculate the liquidity minted by the first deposit into an empty pool
///
/// `liquidity = floor(sqrt(amount_a * amount_b))`; this fixes the initial
/// exchange rate.
pub fn initial_liquidity(amount_a: u64, amount_b: u64) -> Result<u64, ErrorCode> {
    // u64 * u64 always fits in u128
    let product = u128::from(amount_a) * u128::from(amount_b);
    u64::try_from(integer_sqrt(product)).map_err(|_| ErrorCode::MathOverflow)
}

/// Calculate the liquidity minted by a deposit into a non-empty pool
///
/// Each requested amount implies a share relative to current reserves; the
/// smaller of the two is minted so the deposit can never move the price.
///
/// # Arguments
/// * `amount_a_in`, `amount_b_in` - Requested deposit amounts
/// * `total_supply` - Current total supply of liquidity claims (non-zero)
/// * `reserve_a`, `reserve_b` - Current cached reserves
pub fn liquidity_for_deposit(
    amount_a_in: u64,
    amount_b_in: u64,
    total_supply: u64,
    reserve_a: u64,
    reserve_b: u64,
) -> Result<u64, ErrorCode> {
    let by_a = floor_div(
        u128::from(amount_a_in),
        u128::from(total_supply),
        u128::from(reserve_a),
    )
    .ok_or(ErrorCode::MathOverflow)?;
    let by_b = floor_div(
        u128::from(amount_b_in),
        u128::from(total_supply),
        u128::from(reserve_b),
    )
    .ok_or(ErrorCode::MathOverflow)?;

    u64::try_from(by_a.min(by_b)).map_err(|_| ErrorCode::MathOverflow)
}

/// Calculate the reserve amounts matching a liquidity share
///
/// `amount = liquidity * reserve / total_supply` for each asset, truncating.
/// Used both to derive the amounts actually collected by a deposit and the
/// amounts returned by a withdrawal.
pub fn amounts_for_liquidity(
    liquidity: u64,
    total_supply: u64,
    reserve_a: u64,
    reserve_b: u64,
) -> Result<(u64, u64), ErrorCode> {
    let amount_a = floor_div(
        u128::from(liquidity),
        u128::from(reserve_a),
        u128::from(total_supply),
    )
    .ok_or(ErrorCode::MathOverflow)?;
    let amount_b = floor_div(
        u128::from(liquidity),
        u128::from(reserve_b),
        u128::from(total_supply),
    )
    .ok_or(ErrorCode::MathOverflow)?;

    Ok((
        u64::try_from(amount_a).map_err(|_| ErrorCode::MathOverflow)?,
        u64::try_from(amount_b).map_err(|_| ErrorCode::MathOverflow)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_liquidity() {
        assert_eq!(initial_liquidity(1000, 4000).unwrap(), 2000);
        assert_eq!(initial_liquidity(1000, 2000).unwrap(), 1414);
        assert_eq!(initial_liquidity(1, 1).unwrap(), 1);
    }

    #[test]
    fn test_liquidity_for_deposit_balanced() {
        let minted = liquidity_for_deposit(100, 400, 2000, 1000, 4000).unwrap();
        assert_eq!(minted, 200);
    }

    #[test]
    fn test_liquidity_for_deposit_takes_min() {
        // B-side requests less than the ratio implies, so it binds
        let minted = liquidity_for_deposit(100, 200, 2000, 1000, 4000).unwrap();
        assert_eq!(minted, 100);
    }

    #[test]
    fn test_liquidity_for_deposit_zero_reserve() {
        assert!(matches!(
            liquidity_for_deposit(100, 200, 2000, 0, 4000),
            Err(ErrorCode::MathOverflow)
        ));
    }

    #[test]
    fn test_amounts_for_liquidity() {
        let (a, b) = amounts_for_liquidity(100, 1000, 1000, 2000).unwrap();
        assert_eq!(a, 100);
        assert_eq!(b, 200);
    }

    #[test]
    fn test_amounts_for_full_supply_drain_reserves_exactly() {
        let (a, b) = amounts_for_liquidity(2000, 2000, 1000, 4000).unwrap();
        assert_eq!((a, b), (1000, 4000));
    }

    proptest! {
        #[test]
        fn deposit_then_withdraw_never_profits(
            reserve_a in 1u64..=1_000_000_000_000,
            reserve_b in 1u64..=1_000_000_000_000,
            amount_a_in in 1u64..=1_000_000_000_000,
            amount_b_in in 1u64..=1_000_000_000_000,
        ) {
            let total_supply = integer_sqrt(
                u128::from(reserve_a) * u128::from(reserve_b),
            ) as u64;
            prop_assume!(total_supply > 0);

            let minted = liquidity_for_deposit(
                amount_a_in, amount_b_in, total_supply, reserve_a, reserve_b,
            ).unwrap();
            prop_assume!(minted > 0);

            let (taken_a, taken_b) =
                amounts_for_liquidity(minted, total_supply, reserve_a, reserve_b).unwrap();
            prop_assert!(taken_a <= amount_a_in);
            prop_assert!(taken_b <= amount_b_in);

            let (out_a, out_b) = amounts_for_liquidity(
                minted,
                total_supply + minted,
                reserve_a + taken_a,
                reserve_b + taken_b,
            ).unwrap();
            prop_assert!(out_a <= taken_a);
            prop_assert!(out_b <= taken_b);
        }
    }
}
