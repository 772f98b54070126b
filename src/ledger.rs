use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;

use crate::ErrorCode;

/// Collaborator ledgers consumed by the pool engine
///
/// The engine never holds asset balances itself; it moves them through an
/// `AssetLedger` and tracks liquidity claims through a `ClaimLedger`. Both
/// are expected to behave like a standard transferable balance ledger. When
/// a collaborator call fails midway through an operation, the engine unwinds
/// the transfers that already landed before surfacing the error, so a failed
/// operation leaves the ledgers and the pool state untouched.

/// Balance ledger for the two underlying assets
pub trait AssetLedger {
    /// Amount of `asset` currently held by the pool
    fn pool_balance(&self, asset: Pubkey) -> u64;

    /// Move `amount` of `asset` from the caller into the pool
    fn pull_from_caller(
        &mut self,
        caller: Pubkey,
        asset: Pubkey,
        amount: u64,
    ) -> Result<(), ErrorCode>;

    /// Move `amount` of `asset` from the pool to the caller
    fn push_to_caller(
        &mut self,
        caller: Pubkey,
        asset: Pubkey,
        amount: u64,
    ) -> Result<(), ErrorCode>;
}

/// Ledger for the fungible liquidity-claim units
pub trait ClaimLedger {
    fn total_supply(&self) -> u64;

    fn mint_to(&mut self, account: Pubkey, amount: u64) -> Result<(), ErrorCode>;

    fn burn_from(&mut self, account: Pubkey, amount: u64) -> Result<(), ErrorCode>;

    fn transfer(&mut self, from: Pubkey, to: Pubkey, amount: u64) -> Result<(), ErrorCode>;
}

/// In-memory asset ledger, for hosts and tests
#[derive(Debug, Default)]
pub struct InMemoryAssetLedger {
    pool: Pubkey,
    /// (account, asset) -> balance
    balances: BTreeMap<(Pubkey, Pubkey), u64>,
}

impl InMemoryAssetLedger {
    pub fn new(pool: Pubkey) -> Self {
        Self {
            pool,
            balances: BTreeMap::new(),
        }
    }

    pub fn balance_of(&self, account: Pubkey, asset: Pubkey) -> u64 {
        self.balances.get(&(account, asset)).copied().unwrap_or(0)
    }

    pub fn credit(
        &mut self,
        account: Pubkey,
        asset: Pubkey,
        amount: u64,
    ) -> Result<(), ErrorCode> {
        let balance = self.balances.entry((account, asset)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    fn debit(&mut self, account: Pubkey, asset: Pubkey, amount: u64) -> Result<(), ErrorCode> {
        let balance = self
            .balances
            .get_mut(&(account, asset))
            .ok_or(ErrorCode::InsufficientFunds)?;
        *balance = balance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFunds)?;
        Ok(())
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn pool_balance(&self, asset: Pubkey) -> u64 {
        self.balance_of(self.pool, asset)
    }

    fn pull_from_caller(
        &mut self,
        caller: Pubkey,
        asset: Pubkey,
        amount: u64,
    ) -> Result<(), ErrorCode> {
        self.debit(caller, asset, amount)?;
        self.credit(self.pool, asset, amount)
    }

    fn push_to_caller(
        &mut self,
        caller: Pubkey,
        asset: Pubkey,
        amount: u64,
    ) -> Result<(), ErrorCode> {
        self.debit(self.pool, asset, amount)?;
        self.credit(caller, asset, amount)
    }
}

/// In-memory claim-token ledger, for hosts and tests
#[derive(Debug, Default)]
pub struct InMemoryClaimLedger {
    supply: u64,
    balances: BTreeMap<Pubkey, u64>,
}

impl InMemoryClaimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: Pubkey) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }
}

impl ClaimLedger for InMemoryClaimLedger {
    fn total_supply(&self) -> u64 {
        self.supply
    }

    fn mint_to(&mut self, account: Pubkey, amount: u64) -> Result<(), ErrorCode> {
        self.supply = self
            .supply
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let balance = self.balances.entry(account).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    fn burn_from(&mut self, account: Pubkey, amount: u64) -> Result<(), ErrorCode> {
        let balance = self
            .balances
            .get_mut(&account)
            .ok_or(ErrorCode::InsufficientFunds)?;
        *balance = balance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFunds)?;
        self.supply = self
            .supply
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFunds)?;
        Ok(())
    }

    fn transfer(&mut self, from: Pubkey, to: Pubkey, amount: u64) -> Result<(), ErrorCode> {
        let balance = self
            .balances
            .get_mut(&from)
            .ok_or(ErrorCode::InsufficientFunds)?;
        *balance = balance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFunds)?;
        let to_balance = self.balances.entry(to).or_insert(0);
        *to_balance = to_balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }
}
