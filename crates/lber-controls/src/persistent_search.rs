//! Persistent Search request control (draft-ietf-ldapext-psearch-03).
//!
//! ```text
//!   PersistentSearch ::= SEQUENCE {
//!       changeTypes  INTEGER,   -- bitmask, add|delete|modify|modDN
//!       changesOnly  BOOLEAN,
//!       returnECs    BOOLEAN }
//! ```

use std::sync::LazyLock;

use lber_grammar::fields::{read_boolean, read_integer};
use lber_grammar::{
    Container, DecodeError, Grammar, GrammarBuilder, INIT, State, decode_one,
};
use lber_tlv::Tlv;
use lber_tlv::encode::{write_boolean, write_integer, write_tlv};
use lber_tlv::tag::universal;

use crate::control::ControlValue;

/// Change-type bits for [`PersistentSearch::change_types`].
pub mod change_type {
    pub const ADD: u8 = 1;
    pub const DELETE: u8 = 2;
    pub const MODIFY: u8 = 4;
    pub const MOD_DN: u8 = 8;
    pub const ALL: u8 = 15;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersistentSearch {
    /// Bitmask of [`change_type`] bits, always in `1..=15`.
    pub change_types: u8,
    /// When true the server sends only changed entries, not the initial
    /// search result set.
    pub changes_only: bool,
    /// When true changed entries carry an Entry Change Notification
    /// control.
    pub return_ecs: bool,
}

impl PersistentSearch {
    /// BER-encode the control value (the bytes inside the envelope's
    /// value OCTET STRING).
    #[must_use]
    pub fn encode_value(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(9);
        write_integer(&mut payload, i64::from(self.change_types));
        write_boolean(&mut payload, self.changes_only);
        write_boolean(&mut payload, self.return_ecs);

        let mut out = Vec::with_capacity(payload.len() + 2);
        write_tlv(&mut out, universal::SEQUENCE, &payload);
        out
    }
}

const SEQ: State = 1;
const CHANGE_TYPES: State = 2;
const CHANGES_ONLY: State = 3;
const RETURN_ECS: State = 4;

fn state_name(state: State) -> &'static str {
    match state {
        INIT => "INIT",
        SEQ => "SEQ",
        CHANGE_TYPES => "CHANGE_TYPES",
        CHANGES_ONLY => "CHANGES_ONLY",
        RETURN_ECS => "RETURN_ECS",
        _ => "UNKNOWN",
    }
}

#[derive(Default)]
struct ValueBuilder {
    change_types: u8,
    changes_only: bool,
    return_ecs: bool,
    end_allowed: bool,
}

impl Container for ValueBuilder {
    fn end_allowed(&self) -> bool {
        self.end_allowed
    }
    fn set_end_allowed(&mut self, allowed: bool) {
        self.end_allowed = allowed;
    }
}

fn open_seq(ctx: &mut ValueBuilder, _tlv: &Tlv<'_>) -> Result<(), DecodeError> {
    ctx.set_end_allowed(false);
    Ok(())
}

fn store_change_types(ctx: &mut ValueBuilder, tlv: &Tlv<'_>) -> Result<(), DecodeError> {
    let mask = read_integer(tlv, "changeTypes", 1, i64::from(change_type::ALL))?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        ctx.change_types = mask as u8;
    }
    Ok(())
}

fn store_changes_only(ctx: &mut ValueBuilder, tlv: &Tlv<'_>) -> Result<(), DecodeError> {
    ctx.changes_only = read_boolean(tlv, "changesOnly")?;
    Ok(())
}

fn store_return_ecs(ctx: &mut ValueBuilder, tlv: &Tlv<'_>) -> Result<(), DecodeError> {
    ctx.return_ecs = read_boolean(tlv, "returnECs")?;
    ctx.set_end_allowed(true);
    Ok(())
}

static GRAMMAR: LazyLock<Grammar<ValueBuilder>> = LazyLock::new(|| {
    GrammarBuilder::new("PersistentSearch", state_name)
        .transition(INIT, universal::SEQUENCE, SEQ, Some(open_seq))
        .transition(SEQ, universal::INTEGER, CHANGE_TYPES, Some(store_change_types))
        .transition(CHANGE_TYPES, universal::BOOLEAN, CHANGES_ONLY, Some(store_changes_only))
        .transition(CHANGES_ONLY, universal::BOOLEAN, RETURN_ECS, Some(store_return_ecs))
        .build()
});

/// Decode a Persistent Search control value.
///
/// # Errors
///
/// Structural failures from the grammar, plus `OutOfRange` naming
/// `changeTypes` when the bitmask is outside `1..=15`.
pub fn decode_value(bytes: &[u8]) -> Result<ControlValue, DecodeError> {
    let mut builder = ValueBuilder::default();
    decode_one(&GRAMMAR, &mut builder, bytes)?;
    Ok(ControlValue::PersistentSearch(PersistentSearch {
        change_types: builder.change_types,
        changes_only: builder.changes_only,
        return_ecs: builder.return_ecs,
    }))
}
