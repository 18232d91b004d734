#![warn(clippy::pedantic)]

//! The LDAPMessage decoder: one grammar table driving every supported
//! operation, a container that accumulates the message under
//! construction, and three decode entry points layered on the same
//! machinery.
//!
//! ```text
//!   LdapDecoder::decode(..)          one PDU, strict, in-memory
//!   LdapDecoder::session()           resumable, multi-PDU, chunked
//!   StreamingDecoder::new(reader)    async, over tokio::io::AsyncRead
//! ```

pub mod actions;
pub mod container;
pub mod decoder;
pub mod grammar;
pub mod states;
pub mod streaming;

pub use container::LdapMessageContainer;
pub use decoder::{LdapDecoder, PduSession};
pub use grammar::LDAP_MESSAGE;
pub use streaming::StreamingDecoder;
