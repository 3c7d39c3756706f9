#![cfg_attr(not(feature = "std"), no_std)]

//! Shared wire types for the CAN-FiX node protocol.
//!
//! This crate holds the pieces that both a node-side implementation and any client/test tooling
//! need to agree on: the frame and identifier types, the `Parameter` value type, the fixed
//! protocol constants, and the error enum. It has no opinion on how frames reach the bus.

mod atomic_cell;
pub mod constants;
pub mod error;
mod frame;
mod parameter;

pub use atomic_cell::AtomicCell;
pub use error::CanFixError;
pub use frame::{Frame, Id, MAX_DATA_LEN, MAX_ID};
pub use parameter::{Parameter, ParameterError, MAX_PARAMETER_DATA_LEN};
