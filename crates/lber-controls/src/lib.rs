#![warn(clippy::pedantic)]

//! LDAP control envelope and the value decoders for the controls this
//! workspace understands.
//!
//! A control rides in the optional controls section of an LDAPMessage:
//!
//! ```text
//!   Control ::= SEQUENCE {
//!       controlType   LDAPOID,
//!       criticality   BOOLEAN DEFAULT FALSE,
//!       controlValue  OCTET STRING OPTIONAL }
//! ```
//!
//! The envelope is uniform; the value bytes are control-specific BER.
//! [`registry::value_decoder`] maps a control OID to its value decoder;
//! OIDs without one keep their bytes as [`ControlValue::Raw`].

pub mod control;
pub mod entry_change;
pub mod oid;
pub mod persistent_search;
pub mod registry;

pub use control::{Control, ControlValue};
pub use entry_change::{ChangeType, EntryChange};
pub use persistent_search::PersistentSearch;
