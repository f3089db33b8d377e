//! Delta-encoded OHLC candles.
//!
//! On-chain packing is 12 bytes: open absolute (u32), high/low as unsigned
//! deltas from open (u16), close as a signed delta (i16), volume (u16).
//! Decoding expands losslessly: `high = open + high_delta`,
//! `low = open - low_delta`, `close = open + close_delta`.

use crate::layout::{Cursor, Writer};

pub const CANDLE_LEN: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candle {
    pub open: u64,
    pub high: u64,
    pub low: u64,
    pub close: u64,
    pub volume: u64,
}

impl Candle {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < CANDLE_LEN {
            return None;
        }
        let mut cur = Cursor::new(data);
        let open = cur.u32()? as u64;
        let high_delta = cur.u16()? as u64;
        let low_delta = cur.u16()? as u64;
        let close_delta = cur.i16()? as i64;
        let volume = cur.u16()? as u64;
        Some(Self {
            open,
            high: open + high_delta,
            low: open.saturating_sub(low_delta),
            close: (open as i64 + close_delta).max(0) as u64,
            volume,
        })
    }

    /// Re-pack into the 12-byte delta form. Deltas must fit the packed
    /// widths; values are truncated the way the on-chain writer truncates.
    pub(crate) fn encode_into(&self, w: &mut Writer) {
        w.u32(self.open as u32);
        w.u16(self.high.saturating_sub(self.open) as u16);
        w.u16(self.open.saturating_sub(self.low) as u16);
        w.i16((self.close as i64 - self.open as i64) as i16);
        w.u16(self.volume as u16);
    }
}
