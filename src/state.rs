#[derive(Debug)]
pub struct DepositResult {
    /// Amount of asset A actually collected
    pub amount_a: u64,
    /// Amount of asset B actually collected
    pub amount_b: u64,

    pub liquidity: u64,
}

#[derive(Debug)]
pub struct WithdrawResult {
    /// Amount of asset A returned
    pub amount_a: u64,
    /// Amount of asset B returned
    pub amount_b: u64,
}
