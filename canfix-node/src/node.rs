//! The node's identity, registered handlers, and public dispatch/encode API (§3, §4.2-4.4, §6).

use canfix_common::{
    constants::{nsm_opcode, NSM_START},
    error::{InvalidStatusLengthSnafu, NoTransportSnafu, TransportSnafu},
    AtomicCell, CanFixError, Frame, Id, Parameter,
};
use defmt_or_log::warn;

use crate::description::{Description, DescriptionTooLong};
use crate::dispatch::{classify, Classification};
use crate::handlers::{ChannelDirection, Handlers};
use crate::nsm;

/// The node's identity and registered handlers: device id, hardware revision, model code,
/// mutable node address, optional description text, and the capability set from §4.5.
///
/// A single `NodeContext` is created once at boot (`NodeContext::init`) and lives for the life of
/// the process. Every field uses interior mutability, so a `&'static NodeContext` can be shared
/// between an interrupt-time producer feeding a [`crate::queue::RingQueue`] and the main-loop
/// consumer that calls [`NodeContext::exec`], matching the single-shared-object model of §5.
pub struct NodeContext {
    node: AtomicCell<u8>,
    device: u8,
    revision: u8,
    model: u32,
    description: AtomicCell<Description>,
    handlers: Handlers,
}

impl NodeContext {
    /// Create a node context. `model` is a 24-bit code; only its low 24 bits reach the wire.
    pub const fn init(node: u8, device: u8, revision: u8, model: u32) -> Self {
        Self {
            node: AtomicCell::new(node),
            device,
            revision,
            model,
            description: AtomicCell::new(Description::empty()),
            handlers: Handlers::new(),
        }
    }

    /// The node's current address.
    pub fn node(&self) -> u8 {
        self.node.load()
    }

    /// This node's immutable device id.
    pub const fn device(&self) -> u8 {
        self.device
    }

    /// This node's immutable hardware revision.
    pub const fn revision(&self) -> u8 {
        self.revision
    }

    /// This node's immutable 24-bit model code.
    pub const fn model(&self) -> u32 {
        self.model
    }

    pub(crate) fn set_node(&self, node: u8) {
        self.node.store(node);
    }

    /// Replace the description text streamed after identification (§4.3). `text` must not
    /// contain an embedded NUL and must fit in [`crate::description::MAX_DESCRIPTION_LEN`] bytes.
    pub fn set_description(&self, text: &[u8]) -> Result<(), DescriptionTooLong> {
        let mut d = Description::empty();
        d.set(text)?;
        self.description.store(d);
        Ok(())
    }

    /// The registered handler slots, for use by `set_*` callers and the NSM machine.
    pub fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn emit(&self, frame: Frame) -> Result<(), CanFixError> {
        let Some(f) = self.handlers.write_frame.load() else {
            return NoTransportSnafu.fail();
        };
        let rc = f(frame);
        if rc != 0 {
            return TransportSnafu { code: rc }.fail();
        }
        Ok(())
    }

    pub(crate) fn nsm_reply(&self, opcode: u8, requester: u8, tail: &[u8]) -> Frame {
        let mut buf = [0u8; 8];
        buf[0] = opcode;
        buf[1] = requester;
        let n = tail.len().min(6);
        buf[2..2 + n].copy_from_slice(&tail[..n]);
        let id = Id::new(NSM_START + self.node() as u16).expect("node id is always in range");
        Frame::new(id, &buf[..2 + n]).expect("nsm replies never exceed 8 bytes")
    }

    /// Main dispatcher entry point (§4.1, §4.2). Classifies `frame` by identifier and routes it
    /// to the alarm, parameter, or NSM handling, emitting any generated reply.
    pub fn exec(&self, frame: Frame) -> Result<(), CanFixError> {
        match classify(frame.id()) {
            Classification::Ignore => Ok(()),
            Classification::Alarm { node } => {
                self.handle_alarm(node, frame.data());
                Ok(())
            }
            Classification::Parameter { kind } => {
                self.handle_parameter(kind, &frame);
                Ok(())
            }
            Classification::NodeSpecific { requester } => {
                if let Some(reply) = nsm::handle(self, requester, frame.data()) {
                    self.emit(reply)?;
                }
                Ok(())
            }
            Classification::Channel { channel, direction } => {
                self.handle_channel(channel, direction, frame);
                Ok(())
            }
        }
    }

    fn handle_alarm(&self, node: u8, data: &[u8]) {
        if data.len() < 2 {
            warn!("dropping malformed alarm frame from node {}", node);
            return;
        }
        let code = u16::from_le_bytes([data[0], data[1]]);
        if let Some(f) = self.handlers.alarm.load() {
            f(node, code, &data[2..]);
        }
    }

    fn handle_parameter(&self, kind: Id, frame: &Frame) {
        let Some(parameter) = Parameter::decode(kind, frame) else {
            warn!("dropping malformed parameter frame {:#x}", kind.raw());
            return;
        };
        if let Some(f) = self.handlers.parameter.load() {
            f(parameter);
        }
    }

    fn handle_channel(&self, channel: u8, direction: ChannelDirection, frame: Frame) {
        if let Some(f) = self.handlers.channel.load() {
            f(channel, direction, frame);
        }
    }

    /// Publish a parameter (§6). The wire `node` byte is overwritten with this node's own
    /// address, regardless of what `parameter.node()` was constructed with.
    pub fn send_parameter(&self, parameter: Parameter) -> Result<(), CanFixError> {
        let frame = parameter.to_frame(self.node());
        self.emit(frame)
    }

    /// Emit identification: a header frame, followed by the chunked description if one has been
    /// set (§4.3). `dest` is echoed back in byte 1 of every frame this call emits; pass `0` for
    /// an unsolicited announcement, or the requester id when answering an Identify request.
    pub fn send_identification(&self, dest: u8) -> Result<(), CanFixError> {
        let model = self.model;
        let header = self.nsm_reply(
            nsm_opcode::IDENTIFY,
            dest,
            &[
                0x01,
                self.device,
                self.revision,
                model as u8,
                (model >> 8) as u8,
                (model >> 16) as u8,
            ],
        );
        self.emit(header)?;

        let description = self.description.load();
        if description.is_empty() {
            return Ok(());
        }
        for (packet, chunk) in description.chunks() {
            let [lo, hi] = packet.to_le_bytes();
            let tail = [lo, hi, chunk[0], chunk[1], chunk[2], chunk[3]];
            self.emit(self.nsm_reply(nsm_opcode::DESCRIPTION, dest, &tail))?;
        }
        Ok(())
    }

    /// Emit a node status report (§4.4). `bytes.len()` must be in `1..=5`.
    pub fn send_node_status(&self, ptype: u16, bytes: &[u8]) -> Result<(), CanFixError> {
        if bytes.is_empty() || bytes.len() > 5 {
            return InvalidStatusLengthSnafu { len: bytes.len() }.fail();
        }
        let [lo, hi] = ptype.to_le_bytes();
        let mut tail = [0u8; 7];
        tail[0] = lo;
        tail[1] = hi;
        tail[2..2 + bytes.len()].copy_from_slice(bytes);
        self.emit(self.nsm_reply(nsm_opcode::STATUS, 0, &tail[..2 + bytes.len()]))
    }
}
