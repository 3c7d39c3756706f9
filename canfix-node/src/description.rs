//! The node description: an optional text string streamed, 4 characters at a time, after
//! identification (§4.3).

/// Maximum length of a description's text, not counting the terminating NUL.
///
/// The original C implementation borrows a `char *` of unbounded length; this implementation
/// owns a fixed-capacity buffer instead (explicitly permitted by the Design Notes, as long as
/// the wire-level chunking is preserved byte-for-byte). 252 bytes keeps the terminator-inclusive
/// length a multiple of 4 at the largest size (253 bytes -> 64 four-byte DESC chunks), comfortably
/// above any description seen in MakerPlane node firmware.
pub const MAX_DESCRIPTION_LEN: usize = 252;

/// Errors from [`Description::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionTooLong;

/// An owned, fixed-capacity description string.
#[derive(Clone, Copy)]
pub struct Description {
    buf: [u8; MAX_DESCRIPTION_LEN],
    len: usize,
}

impl Default for Description {
    fn default() -> Self {
        Self::empty()
    }
}

impl Description {
    /// A description with no text set (`set_description` was never called).
    pub const fn empty() -> Self {
        Self {
            buf: [0; MAX_DESCRIPTION_LEN],
            len: 0,
        }
    }

    /// Set the description text. `text` must not contain an embedded NUL byte, and must fit in
    /// [`MAX_DESCRIPTION_LEN`] bytes; the terminator is added implicitly when streaming.
    pub fn set(&mut self, text: &[u8]) -> Result<(), DescriptionTooLong> {
        if text.len() > MAX_DESCRIPTION_LEN {
            return Err(DescriptionTooLong);
        }
        self.buf[..text.len()].copy_from_slice(text);
        self.buf[text.len()..].fill(0);
        self.len = text.len();
        Ok(())
    }

    /// True if no text has been set. An empty description still streams one all-NUL chunk;
    /// `NodeContext::send_identification` uses this to skip the description step entirely when
    /// nothing has ever been set.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of 4-character chunks needed to stream this description, including the
    /// terminator-bearing final chunk.
    pub const fn chunk_count(&self) -> u16 {
        (self.len / 4 + 1) as u16
    }

    /// The 4 bytes of chunk `packet` (0-based), zero-padded past the end of the text.
    ///
    /// Panics if `packet >= chunk_count()`; callers only ever iterate `0..chunk_count()`.
    pub fn chunk(&self, packet: u16) -> [u8; 4] {
        let start = packet as usize * 4;
        let mut out = [0u8; 4];
        for (i, slot) in out.iter_mut().enumerate() {
            let pos = start + i;
            if pos < self.len {
                *slot = self.buf[pos];
            }
        }
        out
    }

    /// Iterate over `(packet, chunk)` pairs in ascending packet order.
    pub fn chunks(&self) -> impl Iterator<Item = (u16, [u8; 4])> + '_ {
        (0..self.chunk_count()).map(move |packet| (packet, self.chunk(packet)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_description_streams_one_zero_chunk() {
        let d = Description::empty();
        let chunks: heapless::Vec<_, 1> = d.chunks().collect();
        assert_eq!(chunks.as_slice(), &[(0, [0, 0, 0, 0])]);
    }

    #[test]
    fn three_byte_text_fits_in_one_chunk_with_terminator() {
        let mut d = Description::empty();
        d.set(b"abc").unwrap();
        let chunks: heapless::Vec<_, 1> = d.chunks().collect();
        assert_eq!(chunks.as_slice(), &[(0, *b"abc\0")]);
    }

    #[test]
    fn four_byte_text_needs_a_second_all_zero_chunk() {
        let mut d = Description::empty();
        d.set(b"abcd").unwrap();
        let chunks: heapless::Vec<_, 2> = d.chunks().collect();
        assert_eq!(chunks.as_slice(), &[(0, *b"abcd"), (1, [0, 0, 0, 0])]);
    }

    #[test]
    fn concatenating_chunks_and_truncating_at_nul_recovers_the_text() {
        let mut d = Description::empty();
        d.set(b"Pitot Tube Airspeed Sensor").unwrap();
        let mut flat = heapless::Vec::<u8, MAX_DESCRIPTION_LEN>::new();
        for (_, chunk) in d.chunks() {
            flat.extend_from_slice(&chunk).unwrap();
        }
        let nul_pos = flat.iter().position(|&b| b == 0).unwrap();
        assert_eq!(&flat[..nul_pos], b"Pitot Tube Airspeed Sensor");
    }

    #[test]
    fn rejects_text_longer_than_capacity() {
        let mut d = Description::empty();
        let too_long = [b'x'; MAX_DESCRIPTION_LEN + 1];
        assert_eq!(d.set(&too_long), Err(DescriptionTooLong));
    }
}
