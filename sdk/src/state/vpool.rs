//! Virtual-pool bookkeeping for the bonding-curve launch mechanism.

use curve_model::{bonding_buy_tokens, bonding_sell_sol, bonding_spot_price, SlotStatus};
use solana_program::pubkey::Pubkey;

use crate::error::SdkError;
use crate::layout::{Cursor, Writer};

pub const VPOOL_GLOBAL_MAGIC: [u8; 8] = *b"VPGLOBAL";
pub const VPOOL_GLOBAL_LEN: usize = 88;

pub const VPOOL_SLOT_MAGIC: [u8; 8] = *b"VPSLOT!!";
pub const VPOOL_SLOT_LEN: usize = 128;

pub const VPOOL_CLAIM_MAGIC: [u8; 8] = *b"VPCLAIM!";
pub const VPOOL_CLAIM_LEN: usize = 88;

/// Launchpad-wide defaults and slot accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VPoolGlobal {
    pub authority: Pubkey,
    pub base_price: u64,
    pub slope: u64,
    pub graduation_target: u64,
    pub active_slots: u32,
    pub next_slot: u32,
    pub total_graduated: u64,
}

impl VPoolGlobal {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < VPOOL_GLOBAL_LEN || data[..8] != VPOOL_GLOBAL_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        Some(Self {
            authority: cur.pubkey()?,
            base_price: cur.u64()?,
            slope: cur.u64()?,
            graduation_target: cur.u64()?,
            active_slots: cur.u32()?,
            next_slot: cur.u32()?,
            total_graduated: cur.u64()?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(VPOOL_GLOBAL_LEN);
        w.bytes(&VPOOL_GLOBAL_MAGIC);
        w.pubkey(&self.authority);
        w.u64(self.base_price);
        w.u64(self.slope);
        w.u64(self.graduation_target);
        w.u32(self.active_slots);
        w.u32(self.next_slot);
        w.u64(self.total_graduated);
        w.finish(VPOOL_GLOBAL_LEN)
    }
}

/// One virtual pool riding the bonding curve. `tokens_sold` only grows
/// until graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VPoolSlot {
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub status: SlotStatus,
    pub base_price: u64,
    pub slope: u64,
    pub tokens_sold: u64,
    pub sol_raised: u64,
    pub created_at: i64,
    pub graduated_at: i64,
}

impl VPoolSlot {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < VPOOL_SLOT_LEN || data[..8] != VPOOL_SLOT_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        let creator = cur.pubkey()?;
        let mint = cur.pubkey()?;
        let status = SlotStatus::from_u8(cur.u8()?)?;
        cur.skip(7)?;
        Some(Self {
            creator,
            mint,
            status,
            base_price: cur.u64()?,
            slope: cur.u64()?,
            tokens_sold: cur.u64()?,
            sol_raised: cur.u64()?,
            created_at: cur.i64()?,
            graduated_at: cur.i64()?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(VPOOL_SLOT_LEN);
        w.bytes(&VPOOL_SLOT_MAGIC);
        w.pubkey(&self.creator);
        w.pubkey(&self.mint);
        w.u8(self.status as u8);
        w.pad(7);
        w.u64(self.base_price);
        w.u64(self.slope);
        w.u64(self.tokens_sold);
        w.u64(self.sol_raised);
        w.i64(self.created_at);
        w.i64(self.graduated_at);
        w.finish(VPOOL_SLOT_LEN)
    }

    /// Spot price at the current point on the curve.
    pub fn spot_price(&self) -> Result<u128, SdkError> {
        Ok(bonding_spot_price(self.base_price, self.slope, self.tokens_sold)?)
    }

    /// Tokens received for `sol_in` at the current curve position.
    pub fn quote_buy(&self, sol_in: u64) -> Result<u64, SdkError> {
        if self.status != SlotStatus::Active {
            return Err(SdkError::Domain);
        }
        Ok(bonding_buy_tokens(
            sol_in,
            self.base_price,
            self.slope,
            self.tokens_sold,
        )?)
    }

    /// SOL returned for selling `token_amount` back into the curve.
    pub fn quote_sell(&self, token_amount: u64) -> Result<u64, SdkError> {
        if self.status != SlotStatus::Active {
            return Err(SdkError::Domain);
        }
        Ok(bonding_sell_sol(
            token_amount,
            self.base_price,
            self.slope,
            self.tokens_sold,
        )?)
    }

    /// Whether `sol_raised` has crossed the configured raise target.
    pub fn graduation_reached(&self, graduation_target: u64) -> bool {
        self.status == SlotStatus::Active && self.sol_raised >= graduation_target
    }
}

/// Post-flush claim record for a slot participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VPoolClaim {
    pub owner: Pubkey,
    pub slot: Pubkey,
    pub amount: u64,
    pub claimed: bool,
}

impl VPoolClaim {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < VPOOL_CLAIM_LEN || data[..8] != VPOOL_CLAIM_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        Some(Self {
            owner: cur.pubkey()?,
            slot: cur.pubkey()?,
            amount: cur.u64()?,
            claimed: cur.bool()?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(VPOOL_CLAIM_LEN);
        w.bytes(&VPOOL_CLAIM_MAGIC);
        w.pubkey(&self.owner);
        w.pubkey(&self.slot);
        w.u64(self.amount);
        w.bool(self.claimed);
        w.finish(VPOOL_CLAIM_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_slot() -> VPoolSlot {
        VPoolSlot {
            creator: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            status: SlotStatus::Active,
            base_price: 1_000_000,
            slope: 1_000_000_000,
            tokens_sold: 0,
            sol_raised: 0,
            created_at: 1_700_000_000,
            graduated_at: 0,
        }
    }

    #[test]
    fn global_round_trip() {
        let global = VPoolGlobal {
            authority: Pubkey::new_unique(),
            base_price: 1_000_000,
            slope: 500,
            graduation_target: 85_000_000_000,
            active_slots: 12,
            next_slot: 13,
            total_graduated: 4,
        };
        let bytes = global.encode();
        assert_eq!(bytes.len(), VPOOL_GLOBAL_LEN);
        assert_eq!(VPoolGlobal::decode(&bytes), Some(global));
        assert!(VPoolGlobal::decode(&bytes[..VPOOL_GLOBAL_LEN - 1]).is_none());
    }

    #[test]
    fn slot_round_trip_and_status_byte() {
        let slot = sample_slot();
        let bytes = slot.encode();
        assert_eq!(bytes.len(), VPOOL_SLOT_LEN);
        assert_eq!(VPoolSlot::decode(&bytes), Some(slot));

        // An out-of-range status byte invalidates the record.
        let mut corrupt = bytes.clone();
        corrupt[8 + 64] = 9;
        assert!(VPoolSlot::decode(&corrupt).is_none());
    }

    #[test]
    fn quotes_follow_slot_state() {
        let mut slot = sample_slot();
        let tokens = slot.quote_buy(1_000_000_000_000).unwrap();
        assert_eq!(tokens, 732_050);
        slot.status = SlotStatus::Graduated;
        assert_eq!(slot.quote_buy(1), Err(SdkError::Domain));
        assert_eq!(slot.quote_sell(1), Err(SdkError::Domain));
    }

    #[test]
    fn graduation_threshold() {
        let mut slot = sample_slot();
        slot.sol_raised = 84_999_999_999;
        assert!(!slot.graduation_reached(85_000_000_000));
        slot.sol_raised = 85_000_000_000;
        assert!(slot.graduation_reached(85_000_000_000));
        slot.status = SlotStatus::Graduated;
        assert!(!slot.graduation_reached(85_000_000_000));
    }

    #[test]
    fn claim_round_trip() {
        let claim = VPoolClaim {
            owner: Pubkey::new_unique(),
            slot: Pubkey::new_unique(),
            amount: 777,
            claimed: false,
        };
        let bytes = claim.encode();
        assert_eq!(bytes.len(), VPOOL_CLAIM_LEN);
        assert_eq!(VPoolClaim::decode(&bytes), Some(claim));
    }
}
