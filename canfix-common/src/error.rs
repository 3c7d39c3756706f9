//! Error types shared by the frame model and the node core.
//!
//! Every fallible operation in this crate returns one of these variants rather than a bare
//! integer sentinel; nothing here ever panics on a frame-handling path.

use snafu::Snafu;

/// Errors that can be returned from the public API.
///
/// Dispatch-time outcomes that the wire protocol gives no return value for (malformed frames,
/// mis-addressed NSM requests, missing handlers) are not modeled here — they are terminal,
/// logged-only outcomes of dispatch, not `Result`s a caller receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum CanFixError {
    /// An identifier outside the 11-bit standard range was supplied.
    #[snafu(display("identifier {raw:#x} exceeds the 11-bit standard range"))]
    InvalidIdentifier {
        /// The out-of-range value that was supplied.
        raw: u16,
    },

    /// A data slice longer than a CAN frame can hold was supplied.
    #[snafu(display("length {len} exceeds the 8-byte frame payload"))]
    InvalidLength {
        /// The offending length.
        len: usize,
    },

    /// `send_node_status` was called with `len` outside `1..=5`.
    #[snafu(display("node status length {len} is not in 1..=5"))]
    InvalidStatusLength {
        /// The offending length.
        len: usize,
    },

    /// The registered `write_frame` callback reported a nonzero transport result.
    #[snafu(display("transport rejected frame with code {code}"))]
    TransportError {
        /// The nonzero code returned by the transport callback.
        code: i32,
    },

    /// No `write_frame` callback has been registered, so nothing can be transmitted.
    NoTransport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_offending_value() {
        let err = CanFixError::InvalidIdentifier { raw: 0x900 };
        assert_eq!(
            std::format!("{err}"),
            "identifier 0x900 exceeds the 11-bit standard range"
        );
    }
}
