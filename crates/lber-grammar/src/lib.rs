#![warn(clippy::pedantic)]

pub mod container;
pub mod error;
pub mod fields;
pub mod grammar;
pub mod runner;

pub use container::Container;
pub use error::DecodeError;
pub use grammar::{Action, Grammar, GrammarBuilder, State, Transition, END, INIT};
pub use runner::{decode_one, BerStream, DecodeStatus};
