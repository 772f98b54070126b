use crate::ErrorCode;

/// Swap math for the pool engine
///
/// The output formula consumes the invariant recorded by the last liquidity
/// operation, not a live recomputation from the passed reserves. The two can
/// differ when the pool's held balances have drifted; the recorded value wins.

/// Calculate the output amount for a given input amount
///
/// `amount_out = ((reserve_in + amount_in) * reserve_out - invariant)
///               / (reserve_in + amount_in)`, truncating division,
/// i.e. `reserve_out - invariant / (reserve_in + amount_in)`.
///
/// # Arguments
/// * `amount_in` - Amount of input asset supplied by the trader
/// * `reserve_in` - Pool's held balance of the input asset
/// * `reserve_out` - Pool's held balance of the output asset
/// * `invariant` - Invariant recorded at the last liquidity operation
///
/// # Returns
/// The output amount as u64; fails with `InsufficientOutput` when the trade
/// truncates to nothing.
pub fn swap_output(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    invariant: u128,
) -> Result<u64, ErrorCode> {
    if amount_in == 0 {
        return Err(ErrorCode::ZeroAmount);
    }

    let new_reserve_in = u128::from(reserve_in)
        .checked_add(u128::from(amount_in))
        .ok_or(ErrorCode::MathOverflow)?;
    let gross = new_reserve_in
        .checked_mul(u128::from(reserve_out))
        .ok_or(ErrorCode::MathOverflow)?;

    // gross <= invariant means the output would truncate to zero or below
    if gross <= invariant {
        return Err(ErrorCode::InsufficientOutput);
    }

    let amount_out = (gross - invariant)
        .checked_div(new_reserve_in)
        .ok_or(ErrorCode::MathOverflow)?;
    if amount_out == 0 {
        return Err(ErrorCode::InsufficientOutput);
    }

    u64::try_from(amount_out).map_err(|_| ErrorCode::MathOverflow)
}
