//! Grammar actions for the LDAPMessage grammar — one free function per
//! transition that does work.
//!
//! Actions interpret the value bytes of the TLV that fired the
//! transition and mutate the container. They also drive the
//! `end_allowed` flag: an action that satisfies the last mandatory
//! field of the current structure sets it, an action that opens a
//! structure with outstanding mandatory fields clears it.

use lber_controls::{Control, ControlValue, oid, registry};
use lber_grammar::fields::{read_boolean, read_enumerated, read_integer};
use lber_grammar::{Container, DecodeError};
use lber_messages::{
    AttributeValue, BindCredentials, BindRequest, DerefAliases, Filter, LdapResult, LdapUrl,
    PartialAttribute, ProtocolOp, ResultCode, SearchRequest, SearchResultEntry, SearchScope,
};
use lber_tlv::Tlv;
use tracing::{debug, warn};

use crate::container::{CompositeKind, LdapMessageContainer, PendingFilter};

type Ctx = LdapMessageContainer;
type ActionResult = Result<(), DecodeError>;

fn utf8<'a>(field: &'static str, tlv: &Tlv<'a>) -> Result<&'a str, DecodeError> {
    std::str::from_utf8(tlv.value).map_err(|e| DecodeError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}

// ── Envelope ──────────────────────────────────────────────────────────────────

pub fn init_message(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    ctx.set_end_allowed(false);
    Ok(())
}

pub fn store_message_id(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let id = read_integer(tlv, "messageID", 0, i64::from(i32::MAX))?;
    #[allow(clippy::cast_possible_truncation)]
    {
        ctx.message_id = id as i32;
    }
    Ok(())
}

// ── Bind request ──────────────────────────────────────────────────────────────

pub fn init_bind_request(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    debug!(op = "BindRequest", "start operation");
    ctx.op = Some(ProtocolOp::BindRequest(BindRequest::default()));
    Ok(())
}

pub fn store_bind_version(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let version = read_integer(tlv, "version", 1, 127)?;
    #[allow(clippy::cast_possible_truncation)]
    {
        ctx.op_mut()?.bind_request_mut()?.version = version as i32;
    }
    Ok(())
}

pub fn store_bind_name(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let name = utf8("bindDN", tlv)?.to_owned();
    ctx.op_mut()?.bind_request_mut()?.name = name;
    Ok(())
}

pub fn store_simple_credentials(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let credentials = BindCredentials::Simple(tlv.value.to_vec());
    ctx.op_mut()?.bind_request_mut()?.credentials = credentials;
    ctx.set_end_allowed(true);
    Ok(())
}

pub fn open_sasl_credentials(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    ctx.set_end_allowed(false);
    Ok(())
}

pub fn store_sasl_mechanism(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let mechanism = utf8("saslMechanism", tlv)?.to_owned();
    ctx.op_mut()?.bind_request_mut()?.credentials = BindCredentials::Sasl {
        mechanism,
        credentials: None,
    };
    ctx.set_end_allowed(true);
    Ok(())
}

pub fn store_sasl_credentials(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    match &mut ctx.op_mut()?.bind_request_mut()?.credentials {
        BindCredentials::Sasl { credentials, .. } => {
            *credentials = Some(tlv.value.to_vec());
            Ok(())
        }
        BindCredentials::Simple(_) => Err(DecodeError::InvalidValue {
            field: "saslCredentials",
            reason: "credentials outside a SASL bind".to_owned(),
        }),
    }
}

// ── Unbind ────────────────────────────────────────────────────────────────────

pub fn init_unbind(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    if tlv.length != 0 {
        return Err(DecodeError::InvalidValue {
            field: "unbindRequest",
            reason: format!("body must be empty, got {} bytes", tlv.length),
        });
    }
    debug!(op = "UnbindRequest", "start operation");
    ctx.op = Some(ProtocolOp::UnbindRequest);
    ctx.set_end_allowed(true);
    Ok(())
}

// ── Search request ────────────────────────────────────────────────────────────

pub fn init_search_request(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    debug!(op = "SearchRequest", "start operation");
    ctx.op = Some(ProtocolOp::SearchRequest(SearchRequest::default()));
    Ok(())
}

pub fn store_base_object(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let base = utf8("baseObject", tlv)?.to_owned();
    ctx.op_mut()?.search_request_mut()?.base_object = base;
    Ok(())
}

pub fn store_scope(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let raw = read_enumerated(tlv, "scope", 0, 2)?;
    let scope = SearchScope::from_wire(raw).ok_or(DecodeError::OutOfRange {
        field: "scope",
        value: raw,
        min: 0,
        max: 2,
    })?;
    ctx.op_mut()?.search_request_mut()?.scope = scope;
    Ok(())
}

pub fn store_deref(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let raw = read_enumerated(tlv, "derefAliases", 0, 3)?;
    let deref = DerefAliases::from_wire(raw).ok_or(DecodeError::OutOfRange {
        field: "derefAliases",
        value: raw,
        min: 0,
        max: 3,
    })?;
    ctx.op_mut()?.search_request_mut()?.deref = deref;
    Ok(())
}

pub fn store_size_limit(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let limit = read_integer(tlv, "sizeLimit", 0, i64::from(i32::MAX))?;
    #[allow(clippy::cast_possible_truncation)]
    {
        ctx.op_mut()?.search_request_mut()?.size_limit = limit as i32;
    }
    Ok(())
}

pub fn store_time_limit(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let limit = read_integer(tlv, "timeLimit", 0, i64::from(i32::MAX))?;
    #[allow(clippy::cast_possible_truncation)]
    {
        ctx.op_mut()?.search_request_mut()?.time_limit = limit as i32;
    }
    Ok(())
}

pub fn store_types_only(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    ctx.op_mut()?.search_request_mut()?.types_only = read_boolean(tlv, "typesOnly")?;
    Ok(())
}

// ── Filters ───────────────────────────────────────────────────────────────────

fn init_composite(ctx: &mut Ctx, tlv: &Tlv<'_>, kind: CompositeKind) -> ActionResult {
    if tlv.length == 0 {
        let field = match kind {
            CompositeKind::And => "andFilter",
            CompositeKind::Or => "orFilter",
            CompositeKind::Not => "notFilter",
        };
        return Err(DecodeError::EmptySet {
            field,
            tag: tlv.tag,
        });
    }
    ctx.filter_stack.push(PendingFilter::Composite {
        tag: tlv.tag,
        kind,
        children: Vec::new(),
    });
    Ok(())
}

pub fn init_and_filter(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    init_composite(ctx, tlv, CompositeKind::And)
}

pub fn init_or_filter(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    init_composite(ctx, tlv, CompositeKind::Or)
}

pub fn init_not_filter(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    init_composite(ctx, tlv, CompositeKind::Not)
}

pub fn init_equality_filter(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    if tlv.length == 0 {
        return Err(DecodeError::EmptySet {
            field: "equalityMatch",
            tag: tlv.tag,
        });
    }
    ctx.filter_stack.push(PendingFilter::Equality {
        tag: tlv.tag,
        attribute: String::new(),
        value: Vec::new(),
    });
    Ok(())
}

pub fn store_equality_attribute(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let text = utf8("attributeDesc", tlv)?.to_owned();
    match ctx.filter_stack.last_mut() {
        Some(PendingFilter::Equality { attribute, .. }) => {
            *attribute = text;
            Ok(())
        }
        _ => Err(DecodeError::InvalidValue {
            field: "attributeDesc",
            reason: "no equalityMatch under construction".to_owned(),
        }),
    }
}

pub fn store_equality_value(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    match ctx.filter_stack.last_mut() {
        Some(PendingFilter::Equality { value, .. }) => {
            *value = tlv.value.to_vec();
            Ok(())
        }
        _ => Err(DecodeError::InvalidValue {
            field: "assertionValue",
            reason: "no equalityMatch under construction".to_owned(),
        }),
    }
}

pub fn store_present_filter(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let attribute = utf8("presentFilter", tlv)?.to_owned();
    ctx.attach_filter(Filter::Present(attribute))
}

pub fn open_search_attributes(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    if !ctx.filter_stack.is_empty() {
        return Err(DecodeError::InvalidValue {
            field: "attributes",
            reason: "attribute list inside an unfinished filter".to_owned(),
        });
    }
    // An empty list means all user attributes; nothing more is mandatory.
    ctx.set_end_allowed(true);
    Ok(())
}

pub fn store_requested_attribute(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let attribute = utf8("attributeSelector", tlv)?.to_owned();
    ctx.op_mut()?.search_request_mut()?.attributes.push(attribute);
    Ok(())
}

// ── Search result entry ───────────────────────────────────────────────────────

pub fn init_search_entry(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    debug!(op = "SearchResultEntry", "start operation");
    ctx.op = Some(ProtocolOp::SearchResultEntry(SearchResultEntry::default()));
    Ok(())
}

pub fn store_entry_dn(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let dn = utf8("objectName", tlv)?.to_owned();
    ctx.op_mut()?.search_result_entry_mut()?.object_name = dn;
    Ok(())
}

pub fn open_entry_attributes(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    // The attribute list may be empty.
    ctx.set_end_allowed(true);
    Ok(())
}

pub fn open_partial_attribute(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    ctx.current_attribute = Some(PartialAttribute::default());
    ctx.set_end_allowed(false);
    Ok(())
}

pub fn store_attribute_type(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let attr_type = utf8("attributeType", tlv)?.to_owned();
    match ctx.current_attribute.as_mut() {
        Some(attribute) => {
            attribute.attr_type = attr_type;
            Ok(())
        }
        None => Err(DecodeError::InvalidValue {
            field: "attributeType",
            reason: "no partial attribute under construction".to_owned(),
        }),
    }
}

pub fn open_attribute_values(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    // The value set may be empty.
    ctx.set_end_allowed(true);
    Ok(())
}

pub fn store_attribute_value(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let Some(attr_type) = ctx.current_attribute.as_ref().map(|a| a.attr_type.clone()) else {
        return Err(DecodeError::InvalidValue {
            field: "attributeValue",
            reason: "no partial attribute under construction".to_owned(),
        });
    };

    let value = if tlv.value.is_empty() {
        AttributeValue::Text(String::new())
    } else if ctx.is_binary(&attr_type) {
        AttributeValue::Binary(tlv.value.to_vec())
    } else {
        match std::str::from_utf8(tlv.value) {
            Ok(text) => AttributeValue::Text(text.to_owned()),
            // Undeclared binary data; keep the bytes rather than lose them.
            Err(_) => AttributeValue::Binary(tlv.value.to_vec()),
        }
    };

    if let Some(attribute) = ctx.current_attribute.as_mut() {
        attribute.values.push(value);
    }
    Ok(())
}

// ── LDAPResult (bind response, search result done) ────────────────────────────

pub fn init_bind_response(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    debug!(op = "BindResponse", "start operation");
    ctx.op = Some(ProtocolOp::BindResponse(LdapResult::default()));
    Ok(())
}

pub fn init_search_done(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    debug!(op = "SearchResultDone", "start operation");
    ctx.op = Some(ProtocolOp::SearchResultDone(LdapResult::default()));
    Ok(())
}

pub fn store_result_code(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let raw = read_enumerated(tlv, "resultCode", 0, i64::from(u16::MAX))?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        ctx.op_mut()?.result_mut()?.result_code = ResultCode::from_code(raw as u16);
    }
    Ok(())
}

pub fn store_matched_dn(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let dn = utf8("matchedDN", tlv)?.to_owned();
    ctx.op_mut()?.result_mut()?.matched_dn = dn;
    Ok(())
}

pub fn store_diagnostic_message(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let message = utf8("diagnosticMessage", tlv)?.to_owned();
    ctx.op_mut()?.result_mut()?.diagnostic_message = message;
    ctx.set_end_allowed(true);
    Ok(())
}

pub fn open_referral(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    // A referral sequence must carry at least one URI.
    ctx.set_end_allowed(false);
    Ok(())
}

/// Store one referral URI.
///
/// Referral handling keeps a long-standing quirk of the original codec:
/// a syntactically valid URL attached to a result whose code is not
/// REFERRAL is *not* an error — it is logged and replaced with the
/// empty sentinel URL. An unparsable URL, by contrast, is fatal.
pub fn store_referral(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    ctx.set_end_allowed(true);
    let result = ctx.op_mut()?.result_mut()?;

    if tlv.value.is_empty() {
        result.referrals.push(LdapUrl::empty());
        return Ok(());
    }

    let text = utf8("referral", tlv)?;
    let url = LdapUrl::parse(text).map_err(|e| DecodeError::InvalidValue {
        field: "referral",
        reason: e.to_string(),
    })?;

    if result.result_code == ResultCode::Referral {
        result.referrals.push(url);
    } else {
        warn!(
            url = %url,
            code = result.result_code.code(),
            "referral URL on a non-referral result, keeping empty sentinel"
        );
        result.referrals.push(LdapUrl::empty());
    }
    Ok(())
}

// ── Controls ──────────────────────────────────────────────────────────────────

pub fn open_controls(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    // An empty controls section is tolerated.
    ctx.set_end_allowed(true);
    Ok(())
}

pub fn open_control(ctx: &mut Ctx, _tlv: &Tlv<'_>) -> ActionResult {
    ctx.current_control = Some(Control::new(String::new()));
    // controlType is mandatory.
    ctx.set_end_allowed(false);
    Ok(())
}

pub fn store_control_oid(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let text = utf8("controlType", tlv)?;
    if !oid::is_valid(text) {
        return Err(DecodeError::InvalidValue {
            field: "controlType",
            reason: format!("{text:?} is not a dotted-decimal OID"),
        });
    }
    match ctx.current_control.as_mut() {
        Some(control) => {
            control.oid = text.to_owned();
            ctx.set_end_allowed(true);
            Ok(())
        }
        None => Err(DecodeError::InvalidValue {
            field: "controlType",
            reason: "no control under construction".to_owned(),
        }),
    }
}

pub fn store_control_criticality(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let criticality = read_boolean(tlv, "criticality")?;
    match ctx.current_control.as_mut() {
        Some(control) => {
            control.criticality = criticality;
            Ok(())
        }
        None => Err(DecodeError::InvalidValue {
            field: "criticality",
            reason: "no control under construction".to_owned(),
        }),
    }
}

/// Store a control value: empty TLV → explicit empty marker, registered
/// OID → typed decode of the value bytes, anything else → raw copy.
pub fn store_control_value(ctx: &mut Ctx, tlv: &Tlv<'_>) -> ActionResult {
    let Some(control) = ctx.current_control.as_mut() else {
        return Err(DecodeError::InvalidValue {
            field: "controlValue",
            reason: "no control under construction".to_owned(),
        });
    };

    control.value = Some(if tlv.value.is_empty() {
        ControlValue::Raw(Vec::new())
    } else if let Some(decode) = registry::value_decoder(&control.oid) {
        decode(tlv.value)?
    } else {
        ControlValue::Raw(tlv.value.to_vec())
    });
    Ok(())
}
