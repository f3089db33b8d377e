//! Lottery accounts: pool-wide ticket state and per-user entries.

use solana_program::pubkey::Pubkey;

use crate::layout::{Cursor, Writer};

pub const LOTTERY_MAGIC: [u8; 8] = *b"LOTTERY!";
pub const LOTTERY_LEN: usize = 152;

pub const LOTTERY_ENTRY_MAGIC: [u8; 8] = *b"LOTENTRY";
pub const LOTTERY_ENTRY_LEN: usize = 88;

/// Lottery round state. `total_tickets` only grows until `drawn` flips;
/// once drawn, `winning_ticket < total_tickets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lottery {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub lottery_vault: Pubkey,
    pub ticket_price: u64,
    pub total_tickets: u64,
    pub prize_pool: u64,
    pub end_time: i64,
    pub winning_ticket: u64,
    pub drawn: bool,
    pub claimed: bool,
}

impl Lottery {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < LOTTERY_LEN || data[..8] != LOTTERY_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        Some(Self {
            pool: cur.pubkey()?,
            authority: cur.pubkey()?,
            lottery_vault: cur.pubkey()?,
            ticket_price: cur.u64()?,
            total_tickets: cur.u64()?,
            prize_pool: cur.u64()?,
            end_time: cur.i64()?,
            winning_ticket: cur.u64()?,
            drawn: cur.bool()?,
            claimed: cur.bool()?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(LOTTERY_LEN);
        w.bytes(&LOTTERY_MAGIC);
        w.pubkey(&self.pool);
        w.pubkey(&self.authority);
        w.pubkey(&self.lottery_vault);
        w.u64(self.ticket_price);
        w.u64(self.total_tickets);
        w.u64(self.prize_pool);
        w.i64(self.end_time);
        w.u64(self.winning_ticket);
        w.bool(self.drawn);
        w.bool(self.claimed);
        w.finish(LOTTERY_LEN)
    }

    /// Whether `entry` holds the winning ticket of a drawn round.
    pub fn is_winner(&self, entry: &LotteryEntry) -> bool {
        self.drawn && entry.contains_ticket(self.winning_ticket)
    }
}

/// A contiguous ticket range bought by one owner. `lottery` is a weak
/// back-reference by pubkey value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotteryEntry {
    pub owner: Pubkey,
    pub lottery: Pubkey,
    pub ticket_start: u64,
    pub ticket_count: u64,
}

impl LotteryEntry {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < LOTTERY_ENTRY_LEN || data[..8] != LOTTERY_ENTRY_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        Some(Self {
            owner: cur.pubkey()?,
            lottery: cur.pubkey()?,
            ticket_start: cur.u64()?,
            ticket_count: cur.u64()?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(LOTTERY_ENTRY_LEN);
        w.bytes(&LOTTERY_ENTRY_MAGIC);
        w.pubkey(&self.owner);
        w.pubkey(&self.lottery);
        w.u64(self.ticket_start);
        w.u64(self.ticket_count);
        w.finish(LOTTERY_ENTRY_LEN)
    }

    pub fn contains_ticket(&self, ticket: u64) -> bool {
        ticket >= self.ticket_start
            && ticket - self.ticket_start < self.ticket_count
    }
}
