/// Checked integer helpers shared by the swap and liquidity math.

/// `amount * numerator / denominator`, truncating.
pub fn floor_div(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    amount
        .checked_mul(numerator)?
        .checked_div(denominator)
}

/// Integer square root using the Babylonian method, rounded down.
pub fn integer_sqrt(value: u128) -> u128 {
    if value <= 1 {
        return value;
    }
    let mut x0 = value / 2;
    let mut x1 = (x0 + value / x0) / 2;
    while x1 < x0 {
        x0 = x1;
        x1 = (x0 + value / x0) / 2;
    }
    x0
}
