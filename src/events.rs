use anchor_lang::prelude::{borsh, AnchorDeserialize, AnchorSerialize, Pubkey};

/// Pool notifications
///
/// Every mutating operation emits exactly one event once it has fully
/// settled. The hosting ledger decides what to do with them; the engine only
/// hands them to the sink it was given.

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum PoolEvent {
    /// One asset was exchanged for the other
    Swapped {
        caller: Pubkey,
        asset_in: Pubkey,
        asset_out: Pubkey,
        amount_in: u64,
        amount_out: u64,
    },

    /// Reserves grew and liquidity claims were minted
    LiquidityAdded {
        caller: Pubkey,
        amount_a: u64,
        amount_b: u64,
        liquidity: u64,
    },

    /// Reserves shrank and liquidity claims were burned
    LiquidityRemoved {
        caller: Pubkey,
        amount_a: u64,
        amount_b: u64,
        liquidity: u64,
    },
}

/// Receiver for pool notifications
pub trait EventSink {
    fn record(&mut self, event: PoolEvent);
}

/// Sink that keeps every event in memory, for hosts and tests
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: Vec<PoolEvent>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&mut self, event: PoolEvent) {
        self.events.push(event);
    }
}
