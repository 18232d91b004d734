#![warn(clippy::pedantic)]

//! The decoded LDAP object model: messages, protocol ops, filters,
//! results, and the minimal LDAP URL parser referrals need.
//!
//! Everything here is plain data — decoding lives in `lber-codec`, the
//! control envelope in `lber-controls`.

pub mod bind;
pub mod entry;
pub mod filter;
pub mod message;
pub mod result;
pub mod search;
pub mod url;

pub use bind::{BindCredentials, BindRequest};
pub use entry::{AttributeValue, PartialAttribute, SearchResultEntry};
pub use filter::Filter;
pub use message::{LdapMessage, ProtocolOp};
pub use result::{LdapResult, ResultCode};
pub use search::{DerefAliases, SearchRequest, SearchScope};
pub use url::{LdapUrl, LdapUrlError};
