use anchor_lang::prelude::Pubkey;
use cp_pool::{
    ErrorCode, InMemoryAssetLedger, InMemoryClaimLedger, InMemoryEventSink, Pool,
};

fn main() -> Result<(), ErrorCode> {
    // Walkthrough of the pool lifecycle against in-memory ledgers

    let pool_address = Pubkey::new_unique();
    let asset_x = Pubkey::new_unique();
    let asset_y = Pubkey::new_unique();
    let trader = Pubkey::new_unique();

    let mut assets = InMemoryAssetLedger::new(pool_address);
    assets.credit(trader, asset_x, 10_000)?;
    assets.credit(trader, asset_y, 10_000)?;
    let mut claims = InMemoryClaimLedger::new();
    let mut events = InMemoryEventSink::new();

    let mut pool = Pool::new(pool_address, asset_x, asset_y)?;

    // First deposit seeds the exchange rate
    let deposit = pool.add_liquidity(&mut assets, &mut claims, &mut events, trader, 1000, 4000)?;
    println!(
        "Deposit: {} LP minted for {} X and {} Y",
        deposit.liquidity, deposit.amount_a, deposit.amount_b
    );

    // Swap 100 X for Y at the constant-product price
    let amount_out = pool.swap(&mut assets, &mut events, trader, asset_x, asset_y, 100)?;
    let (reserve_a, reserve_b) = pool.reserves();
    println!(
        "Swap: 100 X -> {} Y, reserves now ({}, {})",
        amount_out, reserve_a, reserve_b
    );

    // Withdraw everything
    let withdraw =
        pool.remove_liquidity(&mut assets, &mut claims, &mut events, trader, deposit.liquidity)?;
    println!(
        "Withdraw: {} LP -> {} X and {} Y",
        deposit.liquidity, withdraw.amount_a, withdraw.amount_b
    );

    println!("Events recorded: {}", events.events().len());
    Ok(())
}
