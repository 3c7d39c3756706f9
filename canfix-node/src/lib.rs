//! A node-side implementation of the CAN-FiX protocol: frame classification, the Node Specific
//! Message state machine, and the outbound parameter/identification/status encoders, built for
//! running inside microcontroller firmware without an allocator.
//!
//! The entry point is [`NodeContext`]: create one with [`NodeContext::init`], register the
//! handlers your application cares about through [`NodeContext::handlers`], and feed it inbound
//! frames through [`NodeContext::exec`]. An optional [`RingQueue`] decouples an interrupt-time
//! receiver from a main-loop caller of `exec`.

#![cfg_attr(not(feature = "std"), no_std)]

mod description;
mod dispatch;
pub mod handlers;
mod node;
mod nsm;
mod queue;

pub use description::{Description, DescriptionTooLong, MAX_DESCRIPTION_LEN};
pub use dispatch::{classify, Classification};
pub use handlers::{ChannelDirection, ConfigGetOutcome, Handlers};
pub use node::NodeContext;
pub use queue::{PushOutcome, RingQueue};

pub use canfix_common::{
    constants, AtomicCell, CanFixError, Frame, Id, Parameter, ParameterError, MAX_DATA_LEN,
    MAX_ID, MAX_PARAMETER_DATA_LEN,
};
