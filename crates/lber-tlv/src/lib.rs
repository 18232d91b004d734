#![warn(clippy::pedantic)]

pub mod encode;
pub mod error;
pub mod primitives;
pub mod tag;
pub mod tlv;

pub use error::TlvError;
pub use tlv::{Tlv, TlvRead, read_tlv};
