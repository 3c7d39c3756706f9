//! Fixed protocol identifier ranges and opcode numbers.
//!
//! Mirrors the `#define`s in the original `canfix.h`: `NSM_START`, `CH_START`, and the NSM opcode
//! table, named the way a Rust crate names wire constants rather than C macros.

/// First identifier of the Node Specific Message range (`0x6E0..=0x7DF`).
pub const NSM_START: u16 = 0x6E0;
/// First identifier of the Communication Channel range (`0x7E0..=0x7FF`).
pub const CH_START: u16 = 0x7E0;
/// First identifier of the Parameter range (`0x100..=0x6DF`).
pub const PARAMETER_START: u16 = 0x100;
/// Last identifier of the Parameter range, inclusive.
pub const PARAMETER_END: u16 = 0x6DF;
/// Last identifier of the Node Alarm range, inclusive. Node alarms start at `1`.
pub const ALARM_END: u16 = 0xFF;

/// NSM opcodes, carried in `data[0]` of a Node Specific Message.
pub mod nsm_opcode {
    /// Node Identify request/response.
    pub const IDENTIFY: u8 = 0;
    /// Bitrate change request.
    pub const BITRATE: u8 = 1;
    /// Node Set (reassign node id) request.
    pub const NODE_SET: u8 = 2;
    /// Disable Parameter notification.
    pub const DISABLE: u8 = 3;
    /// Enable Parameter notification.
    pub const ENABLE: u8 = 4;
    /// Report request.
    pub const REPORT: u8 = 5;
    /// Node Status, outbound only.
    pub const STATUS: u8 = 6;
    /// Firmware download channel setup request.
    pub const FIRMWARE: u8 = 7;
    /// Two-way channel negotiation request.
    pub const TWOWAY: u8 = 8;
    /// Configuration Set request.
    pub const CONFIG_SET: u8 = 9;
    /// Configuration Get request.
    pub const CONFIG_GET: u8 = 10;
    /// Node description, outbound only.
    pub const DESCRIPTION: u8 = 11;
    /// First of the reserved Parameter Set opcode slots (12..=19).
    pub const PARAMETER_SET_START: u8 = 12;
    /// Last of the reserved Parameter Set opcode slots (12..=19).
    pub const PARAMETER_SET_END: u8 = 19;
}

/// Generic NSM response status/error codes (byte 2 of a response frame).
pub mod nsm_status {
    /// The request succeeded.
    pub const SUCCESS: u8 = 0x00;
    /// Generic error: out-of-range argument, or no handler registered.
    pub const GENERIC_ERROR: u8 = 0x01;
}

/// Reserved Configuration Get/Set error codes (the status byte when it is nonzero).
pub mod config_error {
    /// The requested key is not recognized.
    pub const UNKNOWN_KEY: u8 = 1;
    /// The key exists, but is read only.
    pub const READ_ONLY: u8 = 2;
    /// The supplied value is out of range for the key.
    pub const OUT_OF_RANGE: u8 = 3;
    /// The supplied value has the wrong type/width for the key.
    pub const WRONG_TYPE: u8 = 4;
}

/// Node status report types, carried as the 16-bit `ptype` of a Status NSM frame.
pub mod node_status_type {
    /// General node status bits.
    pub const STATUS: u16 = 0;
    /// Board temperature.
    pub const TEMP: u16 = 1;
    /// Supply voltage.
    pub const VOLT: u16 = 2;
    /// CAN frames transmitted counter.
    pub const CANTX: u16 = 3;
    /// CAN frames received counter.
    pub const CANRX: u16 = 4;
    /// CAN transmit error counter.
    pub const CANTXERR: u16 = 5;
    /// CAN receive error counter.
    pub const CANRXERR: u16 = 6;
    /// CAN receive overrun counter.
    pub const CANRXOVR: u16 = 7;
}

/// Parameter flag bits, packed into the low nibble of wire byte 2.
pub mod parameter_flag {
    /// The value should be annunciated to the pilot.
    pub const ANNUNCIATE: u8 = 0x01;
    /// The value's quality is degraded.
    pub const QUALITY: u8 = 0x02;
    /// The sensor providing the value has failed.
    pub const FAIL: u8 = 0x04;
}
