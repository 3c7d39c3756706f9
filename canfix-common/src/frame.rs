//! The wire-level frame type and its 11-bit identifier.
//!
//! CAN-FiX only ever uses standard (11-bit) identifiers, so unlike a general purpose CAN stack
//! there is no extended-id variant to carry around.

use crate::error::{CanFixError, InvalidIdentifierSnafu};

/// Maximum identifier value for an 11-bit standard CAN identifier.
pub const MAX_ID: u16 = 0x7FF;
/// Maximum number of data bytes in a classic CAN frame.
pub const MAX_DATA_LEN: usize = 8;

/// An 11-bit standard CAN identifier.
///
/// Guaranteed to be in `0..=0x7FF` by construction.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u16);

impl Id {
    /// Construct an `Id`, rejecting values outside the 11-bit range.
    pub fn new(raw: u16) -> Result<Self, CanFixError> {
        if raw > MAX_ID {
            return InvalidIdentifierSnafu { raw }.fail();
        }
        Ok(Self(raw))
    }

    /// The raw numeric value of the identifier.
    pub const fn raw(&self) -> u16 {
        self.0
    }
}

/// A single CAN frame: an identifier plus 0-8 bytes of data.
///
/// `Frame` is a plain value type; there are no ownership relationships between frames, the
/// dispatcher, or the queue. It is always `Copy` so it can be moved in and out of the ring queue
/// without an allocator.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    id: Id,
    data: [u8; MAX_DATA_LEN],
    len: u8,
}

impl Default for Frame {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Frame {
    /// A frame on identifier 0 with no payload, usable as a placeholder in a const-initialized
    /// fixed-size buffer (e.g. the ring queue's backing array).
    pub const fn zeroed() -> Self {
        Self {
            id: Id(0),
            data: [0; MAX_DATA_LEN],
            len: 0,
        }
    }

    /// Build a frame from an identifier and a data slice.
    ///
    /// Returns [`CanFixError::InvalidLength`] if `data` is longer than [`MAX_DATA_LEN`].
    pub fn new(id: Id, data: &[u8]) -> Result<Self, CanFixError> {
        if data.len() > MAX_DATA_LEN {
            return crate::error::InvalidLengthSnafu { len: data.len() }.fail();
        }
        let mut buf = [0u8; MAX_DATA_LEN];
        buf[..data.len()].copy_from_slice(data);
        Ok(Self {
            id,
            data: buf,
            len: data.len() as u8,
        })
    }

    /// The frame's identifier.
    pub const fn id(&self) -> Id {
        self.id
    }

    /// The valid portion of the frame's payload.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    /// The number of valid data bytes (0-8).
    pub const fn len(&self) -> u8 {
        self.len
    }

    /// True if the frame carries no payload.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_rejects_out_of_range() {
        assert!(Id::new(0x7FF).is_ok());
        assert!(Id::new(0x800).is_err());
    }

    #[test]
    fn frame_data_is_trimmed_to_len() {
        let id = Id::new(0x184).unwrap();
        let frame = Frame::new(id, &[1, 2, 3]).unwrap();
        assert_eq!(frame.data(), &[1, 2, 3]);
        assert_eq!(frame.len(), 3);
    }

    #[test]
    fn frame_rejects_oversized_payload() {
        let id = Id::new(0x184).unwrap();
        assert!(Frame::new(id, &[0u8; 9]).is_err());
    }
}
