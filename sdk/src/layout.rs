//! Little-endian cursor over raw account bytes.
//!
//! Every read is bounds-checked and returns `Option`, so record decoders
//! compose with `?` and a short or malformed buffer surfaces as `None`
//! rather than a panic. 64-bit unsigned reads zero-extend; there is no
//! sign ambiguity anywhere in the layouts.

use solana_program::pubkey::Pubkey;

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        if end > self.data.len() {
            return None;
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Some(slice)
    }

    pub fn skip(&mut self, n: usize) -> Option<()> {
        self.take(n).map(|_| ())
    }

    /// Next `n` bytes as a sub-slice (nested records).
    pub fn chunk(&mut self, n: usize) -> Option<&'a [u8]> {
        self.take(n)
    }

    pub fn array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.take(N)?.try_into().ok()
    }

    pub fn pubkey(&mut self) -> Option<Pubkey> {
        Some(Pubkey::new_from_array(self.array::<32>()?))
    }

    pub fn u8(&mut self) -> Option<u8> {
        Some(self.take(1)?[0])
    }

    pub fn bool(&mut self) -> Option<bool> {
        Some(self.u8()? != 0)
    }

    pub fn u16(&mut self) -> Option<u16> {
        Some(u16::from_le_bytes(self.array::<2>()?))
    }

    pub fn i16(&mut self) -> Option<i16> {
        Some(i16::from_le_bytes(self.array::<2>()?))
    }

    pub fn u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.array::<4>()?))
    }

    pub fn u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.array::<8>()?))
    }

    pub fn i64(&mut self) -> Option<i64> {
        Some(i64::from_le_bytes(self.array::<8>()?))
    }
}

/// Growable little-endian writer, the exact inverse of [`Cursor`]. Used to
/// build fixtures and by the `encode` halves of the codec.
pub(crate) struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn pad(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    pub fn pubkey(&mut self, key: &Pubkey) {
        self.buf.extend_from_slice(key.as_ref());
    }

    pub fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn bool(&mut self, v: bool) {
        self.buf.push(v as u8);
    }

    pub fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Zero-fill up to `len` and return the buffer.
    pub fn finish(mut self, len: usize) -> Vec<u8> {
        debug_assert!(self.buf.len() <= len);
        self.buf.resize(len, 0);
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reads_what_writer_wrote() {
        let mut w = Writer::with_capacity(64);
        w.u64(u64::MAX);
        w.i64(-42);
        w.u32(7);
        w.u16(300);
        w.i16(-3);
        w.u8(1);
        w.bool(true);
        let buf = w.finish(64);

        let mut c = Cursor::new(&buf);
        assert_eq!(c.u64(), Some(u64::MAX));
        assert_eq!(c.i64(), Some(-42));
        assert_eq!(c.u32(), Some(7));
        assert_eq!(c.u16(), Some(300));
        assert_eq!(c.i16(), Some(-3));
        assert_eq!(c.u8(), Some(1));
        assert_eq!(c.bool(), Some(true));
    }

    #[test]
    fn cursor_rejects_reads_past_end() {
        let buf = [0u8; 7];
        let mut c = Cursor::new(&buf);
        assert_eq!(c.u64(), None);
        let mut c = Cursor::new(&buf);
        assert_eq!(c.skip(4), Some(()));
        assert_eq!(c.u32(), None);
    }

    #[test]
    fn u64_reads_zero_extend() {
        // Top bit set must not sign-extend.
        let buf = 0x8000_0000_0000_0001u64.to_le_bytes();
        let mut c = Cursor::new(&buf);
        let v = c.u64().unwrap();
        assert_eq!(v as u128, 0x8000_0000_0000_0001u128);
    }
}
