use anchor_lang::prelude::error_code;

#[error_code]
pub enum ErrorCode {
    #[msg("Asset is not one of the pool's pair")]
    InvalidAsset,
    #[msg("Amount must be strictly positive")]
    ZeroAmount,
    #[msg("Computed output rounds to zero")]
    InsufficientOutput,
    #[msg("Not enough outstanding liquidity")]
    InsufficientLiquidity,
    #[msg("Ledger balance too low")]
    InsufficientFunds,
    #[msg("Pool operation already in progress")]
    Reentrant,
    #[msg("Math overflow")]
    MathOverflow,
}
