//! Typed views of on-chain account data.
//!
//! Each record decodes from a fixed little-endian layout behind an 8-byte
//! ASCII discriminator. `decode` returns `None` for a short buffer or a
//! foreign discriminator; that is the expected outcome when probing
//! account types, not an error. Decoded values are immutable snapshots of
//! external state; nothing here mutates or writes back on-chain.

mod candle;
mod farm;
mod lottery;
mod npool;
mod pool;
mod vpool;

pub use candle::{Candle, CANDLE_LEN};
pub use farm::{Farm, UserFarm, FARM_LEN, FARM_MAGIC, USER_FARM_LEN, USER_FARM_MAGIC};
pub use lottery::{
    Lottery, LotteryEntry, LOTTERY_ENTRY_LEN, LOTTERY_ENTRY_MAGIC, LOTTERY_LEN, LOTTERY_MAGIC,
};
pub use npool::{NPool, NPOOL_LEN, NPOOL_MAGIC};
pub use pool::{Pool, DAILY_CANDLES, HOURLY_CANDLES, POOL_BLOOM_LEN, POOL_LEN, POOL_MAGIC};
pub use vpool::{
    VPoolClaim, VPoolGlobal, VPoolSlot, VPOOL_CLAIM_LEN, VPOOL_CLAIM_MAGIC, VPOOL_GLOBAL_LEN,
    VPOOL_GLOBAL_MAGIC, VPOOL_SLOT_LEN, VPOOL_SLOT_MAGIC,
};

use log::trace;

/// Result of probing raw bytes against every core account layout.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountData {
    Pool(Pool),
    NPool(NPool),
    Farm(Farm),
    UserFarm(UserFarm),
    Lottery(Lottery),
    LotteryEntry(LotteryEntry),
    Unrecognized,
}

/// Decode raw account bytes as whichever core record their discriminator
/// claims. Unknown or malformed data yields `Unrecognized`; no probe path
/// raises an error.
pub fn decode_any(data: &[u8]) -> AccountData {
    if data.len() >= 8 {
        let tag = &data[..8];
        if tag == POOL_MAGIC {
            if let Some(pool) = Pool::decode(data) {
                return AccountData::Pool(pool);
            }
        } else if tag == NPOOL_MAGIC {
            if let Some(npool) = NPool::decode(data) {
                return AccountData::NPool(npool);
            }
        } else if tag == FARM_MAGIC {
            if let Some(farm) = Farm::decode(data) {
                return AccountData::Farm(farm);
            }
        } else if tag == USER_FARM_MAGIC {
            if let Some(user) = UserFarm::decode(data) {
                return AccountData::UserFarm(user);
            }
        } else if tag == LOTTERY_MAGIC {
            if let Some(lottery) = Lottery::decode(data) {
                return AccountData::Lottery(lottery);
            }
        } else if tag == LOTTERY_ENTRY_MAGIC {
            if let Some(entry) = LotteryEntry::decode(data) {
                return AccountData::LotteryEntry(entry);
            }
        }
    }
    trace!("account data ({} bytes) matched no known layout", data.len());
    AccountData::Unrecognized
}
