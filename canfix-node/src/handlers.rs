//! The handler capability set a host registers on a [`NodeContext`](crate::node::NodeContext).
//!
//! Every slot is optional and is a `&'static` function reference rather than a boxed closure, so
//! registering one never allocates. This mirrors the teacher crate's own callback slots (e.g.
//! `NodeMbox::notify_cb`): a `Sync` trait object behind an `AtomicCell`, settable from one
//! execution context and callable from another without extra locking.

use canfix_common::{AtomicCell, Frame, Parameter};

/// Direction of a Communication Channel frame, derived from the low bit of its identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelDirection {
    /// `0x7E0 + 2*channel`: a request frame.
    Request,
    /// `0x7E0 + 2*channel + 1`: a response frame.
    Response,
}

/// The outcome of a Configuration Get handler call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigGetOutcome {
    /// `0` on success, or one of the `config_error` codes.
    pub status: u8,
    /// Number of bytes written into the caller's output buffer. Only meaningful when
    /// `status == 0`.
    pub len: u8,
}

/// Signature of the `write_frame` handler slot.
pub type WriteFrameFn = dyn Fn(Frame) -> i32 + Sync;
/// Signature of the `alarm` handler slot.
pub type AlarmFn = dyn Fn(u8, u16, &[u8]) + Sync;
/// Signature of the `parameter` handler slot.
pub type ParameterFn = dyn Fn(Parameter) + Sync;
/// Signature of the `node_set` handler slot.
pub type NodeSetFn = dyn Fn(u8) + Sync;
/// Signature of the `bitrate` handler slot.
pub type BitrateFn = dyn Fn(u8) + Sync;
/// Signature of the `report` handler slot.
pub type ReportFn = dyn Fn() + Sync;
/// Signature of the `twoway` handler slot.
pub type TwowayFn = dyn Fn(u8, u16) -> u8 + Sync;
/// Signature of the `config_set` handler slot.
pub type ConfigSetFn = dyn Fn(u16, &[u8]) -> u8 + Sync;
/// Signature of the `config_get` handler slot.
pub type ConfigGetFn = dyn Fn(u16, &mut [u8]) -> ConfigGetOutcome + Sync;
/// Signature of the `firmware` handler slot.
pub type FirmwareFn = dyn Fn(u16, u8) -> u8 + Sync;
/// Signature of the `channel` handler slot.
pub type ChannelFn = dyn Fn(u8, ChannelDirection, Frame) + Sync;
/// Signature of the `enable_bitmap_read` handler slot.
pub type EnableBitmapReadFn = dyn Fn(u8) -> u8 + Sync;
/// Signature of the `enable_bitmap_write` handler slot.
pub type EnableBitmapWriteFn = dyn Fn(u8, u8) + Sync;

/// The full set of handler slots. Every field defaults to `None`.
pub struct Handlers {
    pub(crate) write_frame: AtomicCell<Option<&'static WriteFrameFn>>,
    pub(crate) alarm: AtomicCell<Option<&'static AlarmFn>>,
    pub(crate) parameter: AtomicCell<Option<&'static ParameterFn>>,
    pub(crate) node_set: AtomicCell<Option<&'static NodeSetFn>>,
    pub(crate) bitrate: AtomicCell<Option<&'static BitrateFn>>,
    pub(crate) report: AtomicCell<Option<&'static ReportFn>>,
    pub(crate) twoway: AtomicCell<Option<&'static TwowayFn>>,
    pub(crate) config_set: AtomicCell<Option<&'static ConfigSetFn>>,
    pub(crate) config_get: AtomicCell<Option<&'static ConfigGetFn>>,
    pub(crate) firmware: AtomicCell<Option<&'static FirmwareFn>>,
    pub(crate) channel: AtomicCell<Option<&'static ChannelFn>>,
    pub(crate) enable_bitmap_read: AtomicCell<Option<&'static EnableBitmapReadFn>>,
    pub(crate) enable_bitmap_write: AtomicCell<Option<&'static EnableBitmapWriteFn>>,
}

impl Default for Handlers {
    fn default() -> Self {
        Self::new()
    }
}

impl Handlers {
    /// An empty handler set; every slot is `None` until registered.
    pub const fn new() -> Self {
        Self {
            write_frame: AtomicCell::new(None),
            alarm: AtomicCell::new(None),
            parameter: AtomicCell::new(None),
            node_set: AtomicCell::new(None),
            bitrate: AtomicCell::new(None),
            report: AtomicCell::new(None),
            twoway: AtomicCell::new(None),
            config_set: AtomicCell::new(None),
            config_get: AtomicCell::new(None),
            firmware: AtomicCell::new(None),
            channel: AtomicCell::new(None),
            enable_bitmap_read: AtomicCell::new(None),
            enable_bitmap_write: AtomicCell::new(None),
        }
    }
}

macro_rules! setter {
    ($name:ident, $field:ident, $ty:ty) => {
        #[doc = concat!("Register the `", stringify!($field), "` handler.")]
        pub fn $name(&self, f: &'static $ty) {
            self.$field.store(Some(f));
        }
    };
}

impl Handlers {
    setter!(set_write_frame, write_frame, WriteFrameFn);
    setter!(set_alarm, alarm, AlarmFn);
    setter!(set_parameter, parameter, ParameterFn);
    setter!(set_node_set, node_set, NodeSetFn);
    setter!(set_bitrate, bitrate, BitrateFn);
    setter!(set_report, report, ReportFn);
    setter!(set_twoway, twoway, TwowayFn);
    setter!(set_config_set, config_set, ConfigSetFn);
    setter!(set_config_get, config_get, ConfigGetFn);
    setter!(set_firmware, firmware, FirmwareFn);
    setter!(set_channel, channel, ChannelFn);
    setter!(set_enable_bitmap_read, enable_bitmap_read, EnableBitmapReadFn);
    setter!(set_enable_bitmap_write, enable_bitmap_write, EnableBitmapWriteFn);
}
