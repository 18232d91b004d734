//! Entry Change Notification response control
//! (draft-ietf-ldapext-psearch-03).
//!
//! ```text
//!   EntryChangeNotification ::= SEQUENCE {
//!       changeType    ENUMERATED { add(1), delete(2), modify(4), modDN(8) },
//!       previousDN    LDAPDN OPTIONAL,  -- modDN only
//!       changeNumber  INTEGER OPTIONAL }
//! ```

use std::sync::LazyLock;

use lber_grammar::fields::{read_enumerated, read_integer};
use lber_grammar::{
    Container, DecodeError, Grammar, GrammarBuilder, INIT, State, decode_one,
};
use lber_tlv::Tlv;
use lber_tlv::encode::{write_enumerated, write_integer, write_tlv};
use lber_tlv::tag::universal;

use crate::control::ControlValue;

/// The kind of modification a changed entry underwent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeType {
    Add,
    Delete,
    Modify,
    ModDn,
}

impl ChangeType {
    fn from_wire(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Add),
            2 => Some(Self::Delete),
            4 => Some(Self::Modify),
            8 => Some(Self::ModDn),
            _ => None,
        }
    }

    fn to_wire(self) -> i64 {
        match self {
            Self::Add => 1,
            Self::Delete => 2,
            Self::Modify => 4,
            Self::ModDn => 8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryChange {
    pub change_type: ChangeType,
    /// The entry's DN before a modDN change. Never set for other change
    /// types.
    pub previous_dn: Option<String>,
    pub change_number: Option<i64>,
}

impl EntryChange {
    /// BER-encode the control value.
    #[must_use]
    pub fn encode_value(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        write_enumerated(&mut payload, self.change_type.to_wire());
        if let Some(dn) = &self.previous_dn {
            write_tlv(&mut payload, universal::OCTET_STRING, dn.as_bytes());
        }
        if let Some(number) = self.change_number {
            write_integer(&mut payload, number);
        }

        let mut out = Vec::with_capacity(payload.len() + 2);
        write_tlv(&mut out, universal::SEQUENCE, &payload);
        out
    }
}

const SEQ: State = 1;
const CHANGE_TYPE: State = 2;
const PREVIOUS_DN: State = 3;
const CHANGE_NUMBER: State = 4;

fn state_name(state: State) -> &'static str {
    match state {
        INIT => "INIT",
        SEQ => "SEQ",
        CHANGE_TYPE => "CHANGE_TYPE",
        PREVIOUS_DN => "PREVIOUS_DN",
        CHANGE_NUMBER => "CHANGE_NUMBER",
        _ => "UNKNOWN",
    }
}

struct ValueBuilder {
    change_type: ChangeType,
    previous_dn: Option<String>,
    change_number: Option<i64>,
    end_allowed: bool,
}

impl Default for ValueBuilder {
    fn default() -> Self {
        Self {
            change_type: ChangeType::Add,
            previous_dn: None,
            change_number: None,
            end_allowed: false,
        }
    }
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

fn store_change_type(ctx: &mut ValueBuilder, tlv: &Tlv<'_>) -> Result<(), DecodeError> {
    let value = read_enumerated(tlv, "changeType", 1, 8)?;
    ctx.change_type = ChangeType::from_wire(value).ok_or(DecodeError::InvalidValue {
        field: "changeType",
        reason: format!("{value} is not one of add(1), delete(2), modify(4), modDN(8)"),
    })?;
    // Both remaining fields are optional.
    ctx.set_end_allowed(true);
    Ok(())
}

fn store_previous_dn(ctx: &mut ValueBuilder, tlv: &Tlv<'_>) -> Result<(), DecodeError> {
    if ctx.change_type != ChangeType::ModDn {
        return Err(DecodeError::InvalidValue {
            field: "previousDN",
            reason: format!(
                "only valid for a modDN change, change type is {:?}",
                ctx.change_type
            ),
        });
    }
    let dn = std::str::from_utf8(tlv.value).map_err(|e| DecodeError::InvalidValue {
        field: "previousDN",
        reason: e.to_string(),
    })?;
    ctx.previous_dn = Some(dn.to_owned());
    Ok(())
}

fn store_change_number(ctx: &mut ValueBuilder, tlv: &Tlv<'_>) -> Result<(), DecodeError> {
    ctx.change_number = Some(read_integer(
        tlv,
        "changeNumber",
        i64::from(i32::MIN),
        i64::from(i32::MAX),
    )?);
    Ok(())
}

static GRAMMAR: LazyLock<Grammar<ValueBuilder>> = LazyLock::new(|| {
    GrammarBuilder::new("EntryChange", state_name)
        .transition(INIT, universal::SEQUENCE, SEQ, Some(open_seq))
        .transition(SEQ, universal::ENUMERATED, CHANGE_TYPE, Some(store_change_type))
        .transition(CHANGE_TYPE, universal::OCTET_STRING, PREVIOUS_DN, Some(store_previous_dn))
        .transition(CHANGE_TYPE, universal::INTEGER, CHANGE_NUMBER, Some(store_change_number))
        .transition(PREVIOUS_DN, universal::INTEGER, CHANGE_NUMBER, Some(store_change_number))
        .build()
});

/// Decode an Entry Change Notification control value.
///
/// # Errors
///
/// Structural failures from the grammar; `InvalidValue` for an unknown
/// change type or a `previousDN` on a change that is not a modDN.
pub fn decode_value(bytes: &[u8]) -> Result<ControlValue, DecodeError> {
    let mut builder = ValueBuilder::default();
    decode_one(&GRAMMAR, &mut builder, bytes)?;
    Ok(ControlValue::EntryChange(EntryChange {
        change_type: builder.change_type,
        previous_dn: builder.previous_dn,
        change_number: builder.change_number,
    }))
}
