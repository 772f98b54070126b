use anchor_lang::prelude::{borsh, AnchorDeserialize, AnchorSerialize, Pubkey};

use crate::events::{EventSink, PoolEvent};
use crate::ledger::{AssetLedger, ClaimLedger};
use crate::state::{DepositResult, WithdrawResult};
use crate::{liquidity, swap, ErrorCode};

/// Constant-product pool engine
///
/// One `Pool` value per asset pair, owned by the hosting context. The engine
/// is the sole mutator of the cached reserves and the invariant; asset and
/// claim balances live in the collaborator ledgers passed into each
/// operation.
///
/// Reserve accounting is deliberately asymmetric: `swap` reads live held
/// balances and resynchronizes the cache from them afterwards, while the
/// liquidity operations trust the cache. Only liquidity operations recompute
/// the invariant; a swap consumes the standing value.
#[derive(Debug, Clone, AnchorSerialize, AnchorDeserialize)]
pub struct Pool {
    address: Pubkey,
    asset_a: Pubkey,
    asset_b: Pubkey,
    reserve_a: u64,
    reserve_b: u64,
    invariant: u128,
    locked: bool,
}

impl Pool {
    /// Create an empty pool for a distinct, valid asset pair
    ///
    /// `address` is the pool's own account identity on the ledgers; claim
    /// units pass through it during withdrawals before being burned.
    pub fn new(address: Pubkey, asset_a: Pubkey, asset_b: Pubkey) -> Result<Self, ErrorCode> {
        if asset_a == asset_b
            || asset_a == Pubkey::default()
            || asset_b == Pubkey::default()
        {
            return Err(ErrorCode::InvalidAsset);
        }
        Ok(Self {
            address,
            asset_a,
            asset_b,
            reserve_a: 0,
            reserve_b: 0,
            invariant: 0,
            locked: false,
        })
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    pub fn asset_a(&self) -> Pubkey {
        self.asset_a
    }

    pub fn asset_b(&self) -> Pubkey {
        self.asset_b
    }

    /// Cached reserves, not a live ledger read
    pub fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    pub fn invariant(&self) -> u128 {
        self.invariant
    }

    /// Exchange `amount_in` of `asset_in` for the maximum output of
    /// `asset_out` the constant-product rule allows
    ///
    /// Reserves are read from the asset ledger's actual held balances, the
    /// output is settled against the invariant recorded by the last liquidity
    /// operation, and the cache is resynchronized from held balances once the
    /// transfers have landed. The invariant itself is not touched.
    pub fn swap(
        &mut self,
        assets: &mut dyn AssetLedger,
        events: &mut dyn EventSink,
        caller: Pubkey,
        asset_in: Pubkey,
        asset_out: Pubkey,
        amount_in: u64,
    ) -> Result<u64, ErrorCode> {
        self.enter()?;
        let result = self.swap_locked(assets, events, caller, asset_in, asset_out, amount_in);
        self.locked = false;
        result
    }

    fn swap_locked(
        &mut self,
        assets: &mut dyn AssetLedger,
        events: &mut dyn EventSink,
        caller: Pubkey,
        asset_in: Pubkey,
        asset_out: Pubkey,
        amount_in: u64,
    ) -> Result<u64, ErrorCode> {
        let valid_pair = (asset_in == self.asset_a && asset_out == self.asset_b)
            || (asset_in == self.asset_b && asset_out == self.asset_a);
        if !valid_pair {
            return Err(ErrorCode::InvalidAsset);
        }
        if amount_in == 0 {
            return Err(ErrorCode::ZeroAmount);
        }

        let reserve_in = assets.pool_balance(asset_in);
        let reserve_out = assets.pool_balance(asset_out);
        let amount_out = swap::swap_output(amount_in, reserve_in, reserve_out, self.invariant)?;

        // The pull must land before the push so a mid-transfer observer never
        // sees output leave against stale balances.
        assets.pull_from_caller(caller, asset_in, amount_in)?;
        if let Err(err) = assets.push_to_caller(caller, asset_out, amount_out) {
            assets.push_to_caller(caller, asset_in, amount_in)?;
            return Err(err);
        }
        self.resync_reserves(assets);

        events.record(PoolEvent::Swapped {
            caller,
            asset_in,
            asset_out,
            amount_in,
            amount_out,
        });
        Ok(amount_out)
    }

    /// Deposit both assets at the pool's current ratio and mint claims
    ///
    /// The requested amounts are ceilings: for a non-empty pool the engine
    /// recomputes the amounts actually collected from the minted share, so
    /// the price ratio never moves. A first deposit is taken in full and
    /// seeds the rate.
    pub fn add_liquidity(
        &mut self,
        assets: &mut dyn AssetLedger,
        claims: &mut dyn ClaimLedger,
        events: &mut dyn EventSink,
        caller: Pubkey,
        amount_a_in: u64,
        amount_b_in: u64,
    ) -> Result<DepositResult, ErrorCode> {
        self.enter()?;
        let result =
            self.add_liquidity_locked(assets, claims, events, caller, amount_a_in, amount_b_in);
        self.locked = false;
        result
    }

    fn add_liquidity_locked(
        &mut self,
        assets: &mut dyn AssetLedger,
        claims: &mut dyn ClaimLedger,
        events: &mut dyn EventSink,
        caller: Pubkey,
        amount_a_in: u64,
        amount_b_in: u64,
    ) -> Result<DepositResult, ErrorCode> {
        if amount_a_in == 0 || amount_b_in == 0 {
            return Err(ErrorCode::ZeroAmount);
        }

        let total_supply = claims.total_supply();
        let (amount_a, amount_b, minted) = if total_supply == 0 {
            let minted = liquidity::initial_liquidity(amount_a_in, amount_b_in)?;
            (amount_a_in, amount_b_in, minted)
        } else {
            let minted = liquidity::liquidity_for_deposit(
                amount_a_in,
                amount_b_in,
                total_supply,
                self.reserve_a,
                self.reserve_b,
            )?;
            let (amount_a, amount_b) = liquidity::amounts_for_liquidity(
                minted,
                total_supply,
                self.reserve_a,
                self.reserve_b,
            )?;
            (amount_a, amount_b, minted)
        };
        if minted == 0 {
            return Err(ErrorCode::InsufficientOutput);
        }

        let reserve_a = self
            .reserve_a
            .checked_add(amount_a)
            .ok_or(ErrorCode::MathOverflow)?;
        let reserve_b = self
            .reserve_b
            .checked_add(amount_b)
            .ok_or(ErrorCode::MathOverflow)?;

        // Engine state commits only once every collaborator call has landed;
        // a transfer that fails midway is unwound before the error surfaces.
        assets.pull_from_caller(caller, self.asset_a, amount_a)?;
        if let Err(err) = assets.pull_from_caller(caller, self.asset_b, amount_b) {
            assets.push_to_caller(caller, self.asset_a, amount_a)?;
            return Err(err);
        }
        if let Err(err) = claims.mint_to(caller, minted) {
            assets.push_to_caller(caller, self.asset_a, amount_a)?;
            assets.push_to_caller(caller, self.asset_b, amount_b)?;
            return Err(err);
        }
        self.commit_reserves(reserve_a, reserve_b);

        events.record(PoolEvent::LiquidityAdded {
            caller,
            amount_a,
            amount_b,
            liquidity: minted,
        });
        Ok(DepositResult {
            amount_a,
            amount_b,
            liquidity: minted,
        })
    }

    /// Burn claim units and return the proportional share of both reserves
    ///
    /// The caller's units move into the pool's own holding before being
    /// destroyed. Amounts round down in the pool's favor.
    pub fn remove_liquidity(
        &mut self,
        assets: &mut dyn AssetLedger,
        claims: &mut dyn ClaimLedger,
        events: &mut dyn EventSink,
        caller: Pubkey,
        liquidity: u64,
    ) -> Result<WithdrawResult, ErrorCode> {
        self.enter()?;
        let result = self.remove_liquidity_locked(assets, claims, events, caller, liquidity);
        self.locked = false;
        result
    }

    fn remove_liquidity_locked(
        &mut self,
        assets: &mut dyn AssetLedger,
        claims: &mut dyn ClaimLedger,
        events: &mut dyn EventSink,
        caller: Pubkey,
        liquidity: u64,
    ) -> Result<WithdrawResult, ErrorCode> {
        if liquidity == 0 {
            return Err(ErrorCode::ZeroAmount);
        }
        let total_supply = claims.total_supply();
        if total_supply == 0 || liquidity > total_supply {
            return Err(ErrorCode::InsufficientLiquidity);
        }

        let (amount_a, amount_b) = liquidity::amounts_for_liquidity(
            liquidity,
            total_supply,
            self.reserve_a,
            self.reserve_b,
        )?;

        let reserve_a = self
            .reserve_a
            .checked_sub(amount_a)
            .ok_or(ErrorCode::MathOverflow)?;
        let reserve_b = self
            .reserve_b
            .checked_sub(amount_b)
            .ok_or(ErrorCode::MathOverflow)?;

        // Same commit discipline as add_liquidity: custody transfer, pushes,
        // and burn must all land before reserves and invariant move.
        claims.transfer(caller, self.address, liquidity)?;
        if let Err(err) = assets.push_to_caller(caller, self.asset_a, amount_a) {
            claims.transfer(self.address, caller, liquidity)?;
            return Err(err);
        }
        if let Err(err) = assets.push_to_caller(caller, self.asset_b, amount_b) {
            assets.pull_from_caller(caller, self.asset_a, amount_a)?;
            claims.transfer(self.address, caller, liquidity)?;
            return Err(err);
        }
        if let Err(err) = claims.burn_from(self.address, liquidity) {
            assets.pull_from_caller(caller, self.asset_a, amount_a)?;
            assets.pull_from_caller(caller, self.asset_b, amount_b)?;
            claims.transfer(self.address, caller, liquidity)?;
            return Err(err);
        }
        self.commit_reserves(reserve_a, reserve_b);

        events.record(PoolEvent::LiquidityRemoved {
            caller,
            amount_a,
            amount_b,
            liquidity,
        });
        Ok(WithdrawResult { amount_a, amount_b })
    }

    fn enter(&mut self) -> Result<(), ErrorCode> {
        if self.locked {
            return Err(ErrorCode::Reentrant);
        }
        self.locked = true;
        Ok(())
    }

    /// Sole mutator of reserves and invariant, used by liquidity operations
    fn commit_reserves(&mut self, reserve_a: u64, reserve_b: u64) {
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.invariant = u128::from(reserve_a) * u128::from(reserve_b);
    }

    /// Re-read held balances after a swap; absorbs any ledger-side drift.
    /// The invariant is deliberately left standing.
    fn resync_reserves(&mut self, assets: &dyn AssetLedger) {
        self.reserve_a = assets.pool_balance(self.asset_a);
        self.reserve_b = assets.pool_balance(self.asset_b);
    }
}
