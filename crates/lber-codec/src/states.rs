//! The state space of the LDAPMessage grammar.
//!
//! One flat namespace for every operation: the machine enters an
//! operation's states through the protocolOp tag after `MSG_ID` and
//! leaves them only through the controls section or the end of the PDU.
//! Bind response and search result done share the `RESULT_*` states
//! since both bodies are a plain LDAPResult.

use lber_grammar::{END, INIT, State};

pub const MSG_SEQ: State = 1;
pub const MSG_ID: State = 2;

pub const BIND_SEQ: State = 3;
pub const BIND_VERSION: State = 4;
pub const BIND_NAME: State = 5;
pub const BIND_SIMPLE: State = 6;
pub const BIND_SASL_SEQ: State = 7;
pub const BIND_SASL_MECH: State = 8;
pub const BIND_SASL_CREDS: State = 9;

pub const UNBIND: State = 10;

pub const SR_SEQ: State = 11;
pub const SR_BASE: State = 12;
pub const SR_SCOPE: State = 13;
pub const SR_DEREF: State = 14;
pub const SR_SIZE: State = 15;
pub const SR_TIME: State = 16;
pub const SR_TYPES_ONLY: State = 17;

/// Expecting a filter element: right after typesOnly, or inside a
/// freshly opened AND/OR/NOT set.
pub const FILTER: State = 18;
pub const FILTER_EQ: State = 19;
pub const FILTER_EQ_ATTR: State = 20;
/// A filter element just finished; next is a sibling element or the
/// attribute list.
pub const AFTER_FILTER: State = 21;
pub const SR_ATTRIBUTES: State = 22;

pub const ENTRY_SEQ: State = 23;
pub const ENTRY_DN: State = 24;
pub const ENTRY_ATTRS: State = 25;
pub const ENTRY_ATTR_SEQ: State = 26;
pub const ENTRY_ATTR_TYPE: State = 27;
pub const ENTRY_ATTR_VALS: State = 28;
pub const ENTRY_ATTR_VALUE: State = 29;

pub const RESULT_SEQ: State = 30;
pub const RESULT_CODE: State = 31;
pub const RESULT_MATCHED_DN: State = 32;
pub const RESULT_DIAGNOSTIC: State = 33;
pub const RESULT_REFERRAL_SEQ: State = 34;
pub const RESULT_REFERRAL_URI: State = 35;

pub const CONTROLS: State = 36;
pub const CONTROL_SEQ: State = 37;
pub const CONTROL_OID: State = 38;
pub const CONTROL_CRIT: State = 39;
pub const CONTROL_VALUE: State = 40;

#[must_use]
pub fn state_name(state: State) -> &'static str {
    match state {
        INIT => "INIT",
        MSG_SEQ => "MSG_SEQ",
        MSG_ID => "MSG_ID",
        BIND_SEQ => "BIND_SEQ",
        BIND_VERSION => "BIND_VERSION",
        BIND_NAME => "BIND_NAME",
        BIND_SIMPLE => "BIND_SIMPLE",
        BIND_SASL_SEQ => "BIND_SASL_SEQ",
        BIND_SASL_MECH => "BIND_SASL_MECH",
        BIND_SASL_CREDS => "BIND_SASL_CREDS",
        UNBIND => "UNBIND",
        SR_SEQ => "SR_SEQ",
        SR_BASE => "SR_BASE",
        SR_SCOPE => "SR_SCOPE",
        SR_DEREF => "SR_DEREF",
        SR_SIZE => "SR_SIZE",
        SR_TIME => "SR_TIME",
        SR_TYPES_ONLY => "SR_TYPES_ONLY",
        FILTER => "FILTER",
        FILTER_EQ => "FILTER_EQ",
        FILTER_EQ_ATTR => "FILTER_EQ_ATTR",
        AFTER_FILTER => "AFTER_FILTER",
        SR_ATTRIBUTES => "SR_ATTRIBUTES",
        ENTRY_SEQ => "ENTRY_SEQ",
        ENTRY_DN => "ENTRY_DN",
        ENTRY_ATTRS => "ENTRY_ATTRS",
        ENTRY_ATTR_SEQ => "ENTRY_ATTR_SEQ",
        ENTRY_ATTR_TYPE => "ENTRY_ATTR_TYPE",
        ENTRY_ATTR_VALS => "ENTRY_ATTR_VALS",
        ENTRY_ATTR_VALUE => "ENTRY_ATTR_VALUE",
        RESULT_SEQ => "RESULT_SEQ",
        RESULT_CODE => "RESULT_CODE",
        RESULT_MATCHED_DN => "RESULT_MATCHED_DN",
        RESULT_DIAGNOSTIC => "RESULT_DIAGNOSTIC",
        RESULT_REFERRAL_SEQ => "RESULT_REFERRAL_SEQ",
        RESULT_REFERRAL_URI => "RESULT_REFERRAL_URI",
        CONTROLS => "CONTROLS",
        CONTROL_SEQ => "CONTROL_SEQ",
        CONTROL_OID => "CONTROL_OID",
        CONTROL_CRIT => "CONTROL_CRIT",
        CONTROL_VALUE => "CONTROL_VALUE",
        END => "END",
        _ => "UNKNOWN",
    }
}
