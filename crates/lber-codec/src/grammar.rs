//! The LDAPMessage grammar singleton.
//!
//! One table covers the whole message space: envelope, every protocol
//! op, the filter subset, and the controls section. The table is built
//! once on first use and shared read-only by every decode session.

use std::sync::LazyLock;

use lber_grammar::{Grammar, GrammarBuilder, INIT, State};
use lber_tlv::tag::{application, context, universal};

use crate::actions;
use crate::container::LdapMessageContainer;
use crate::states::{self, state_name};

type Builder = GrammarBuilder<LdapMessageContainer>;

/// Register the five filter-element transitions out of `from`.
///
/// The same set applies wherever a filter element may start: right
/// after typesOnly, inside a freshly opened composite, and after a
/// sibling element.
fn filter_elements(builder: Builder, from: State) -> Builder {
    builder
        .transition(from, context::FILTER_AND, states::FILTER, Some(actions::init_and_filter))
        .transition(from, context::FILTER_OR, states::FILTER, Some(actions::init_or_filter))
        .transition(from, context::FILTER_NOT, states::FILTER, Some(actions::init_not_filter))
        .transition(from, context::FILTER_EQUALITY, states::FILTER_EQ, Some(actions::init_equality_filter))
        .transition(from, context::FILTER_PRESENT, states::AFTER_FILTER, Some(actions::store_present_filter))
}

/// Register the controls-section entry out of an op-terminal state.
fn controls_entry(builder: Builder, from: State) -> Builder {
    builder.transition(from, context::CONTROLS, states::CONTROLS, Some(actions::open_controls))
}

/// The LDAPMessage grammar.
pub static LDAP_MESSAGE: LazyLock<Grammar<LdapMessageContainer>> = LazyLock::new(|| {
    let mut builder = GrammarBuilder::new("LdapMessage", state_name)
        // Envelope.
        .transition(INIT, universal::SEQUENCE, states::MSG_SEQ, Some(actions::init_message))
        .transition(states::MSG_SEQ, universal::INTEGER, states::MSG_ID, Some(actions::store_message_id))
        // protocolOp dispatch.
        .transition(states::MSG_ID, application::BIND_REQUEST, states::BIND_SEQ, Some(actions::init_bind_request))
        .transition(states::MSG_ID, application::BIND_RESPONSE, states::RESULT_SEQ, Some(actions::init_bind_response))
        .transition(states::MSG_ID, application::UNBIND_REQUEST, states::UNBIND, Some(actions::init_unbind))
        .transition(states::MSG_ID, application::SEARCH_REQUEST, states::SR_SEQ, Some(actions::init_search_request))
        .transition(states::MSG_ID, application::SEARCH_RESULT_ENTRY, states::ENTRY_SEQ, Some(actions::init_search_entry))
        .transition(states::MSG_ID, application::SEARCH_RESULT_DONE, states::RESULT_SEQ, Some(actions::init_search_done))
        // Bind request.
        .transition(states::BIND_SEQ, universal::INTEGER, states::BIND_VERSION, Some(actions::store_bind_version))
        .transition(states::BIND_VERSION, universal::OCTET_STRING, states::BIND_NAME, Some(actions::store_bind_name))
        .transition(states::BIND_NAME, context::SIMPLE_CREDENTIALS, states::BIND_SIMPLE, Some(actions::store_simple_credentials))
        .transition(states::BIND_NAME, context::SASL_CREDENTIALS, states::BIND_SASL_SEQ, Some(actions::open_sasl_credentials))
        .transition(states::BIND_SASL_SEQ, universal::OCTET_STRING, states::BIND_SASL_MECH, Some(actions::store_sasl_mechanism))
        .transition(states::BIND_SASL_MECH, universal::OCTET_STRING, states::BIND_SASL_CREDS, Some(actions::store_sasl_credentials))
        // Search request, up to the filter.
        .transition(states::SR_SEQ, universal::OCTET_STRING, states::SR_BASE, Some(actions::store_base_object))
        .transition(states::SR_BASE, universal::ENUMERATED, states::SR_SCOPE, Some(actions::store_scope))
        .transition(states::SR_SCOPE, universal::ENUMERATED, states::SR_DEREF, Some(actions::store_deref))
        .transition(states::SR_DEREF, universal::INTEGER, states::SR_SIZE, Some(actions::store_size_limit))
        .transition(states::SR_SIZE, universal::INTEGER, states::SR_TIME, Some(actions::store_time_limit))
        .transition(states::SR_TIME, universal::BOOLEAN, states::SR_TYPES_ONLY, Some(actions::store_types_only));

    // Filter elements can start in three places.
    builder = filter_elements(builder, states::SR_TYPES_ONLY);
    builder = filter_elements(builder, states::FILTER);
    builder = filter_elements(builder, states::AFTER_FILTER);

    builder = builder
        .transition(states::FILTER_EQ, universal::OCTET_STRING, states::FILTER_EQ_ATTR, Some(actions::store_equality_attribute))
        .transition(states::FILTER_EQ_ATTR, universal::OCTET_STRING, states::AFTER_FILTER, Some(actions::store_equality_value))
        // Attribute selection after the filter.
        .transition(states::AFTER_FILTER, universal::SEQUENCE, states::SR_ATTRIBUTES, Some(actions::open_search_attributes))
        .transition(states::SR_ATTRIBUTES, universal::OCTET_STRING, states::SR_ATTRIBUTES, Some(actions::store_requested_attribute))
        // Search result entry.
        .transition(states::ENTRY_SEQ, universal::OCTET_STRING, states::ENTRY_DN, Some(actions::store_entry_dn))
        .transition(states::ENTRY_DN, universal::SEQUENCE, states::ENTRY_ATTRS, Some(actions::open_entry_attributes))
        .transition(states::ENTRY_ATTRS, universal::SEQUENCE, states::ENTRY_ATTR_SEQ, Some(actions::open_partial_attribute))
        .transition(states::ENTRY_ATTR_SEQ, universal::OCTET_STRING, states::ENTRY_ATTR_TYPE, Some(actions::store_attribute_type))
        .transition(states::ENTRY_ATTR_TYPE, universal::SET, states::ENTRY_ATTR_VALS, Some(actions::open_attribute_values))
        .transition(states::ENTRY_ATTR_VALS, universal::OCTET_STRING, states::ENTRY_ATTR_VALUE, Some(actions::store_attribute_value))
        .transition(states::ENTRY_ATTR_VALUE, universal::OCTET_STRING, states::ENTRY_ATTR_VALUE, Some(actions::store_attribute_value))
        .transition(states::ENTRY_ATTR_VALS, universal::SEQUENCE, states::ENTRY_ATTR_SEQ, Some(actions::open_partial_attribute))
        .transition(states::ENTRY_ATTR_VALUE, universal::SEQUENCE, states::ENTRY_ATTR_SEQ, Some(actions::open_partial_attribute))
        // LDAPResult tail, shared by bind response and search result done.
        .transition(states::RESULT_SEQ, universal::ENUMERATED, states::RESULT_CODE, Some(actions::store_result_code))
        .transition(states::RESULT_CODE, universal::OCTET_STRING, states::RESULT_MATCHED_DN, Some(actions::store_matched_dn))
        .transition(states::RESULT_MATCHED_DN, universal::OCTET_STRING, states::RESULT_DIAGNOSTIC, Some(actions::store_diagnostic_message))
        .transition(states::RESULT_DIAGNOSTIC, context::REFERRAL, states::RESULT_REFERRAL_SEQ, Some(actions::open_referral))
        .transition(states::RESULT_REFERRAL_SEQ, universal::OCTET_STRING, states::RESULT_REFERRAL_URI, Some(actions::store_referral))
        .transition(states::RESULT_REFERRAL_URI, universal::OCTET_STRING, states::RESULT_REFERRAL_URI, Some(actions::store_referral));

    // The controls section may follow any completed operation.
    for terminal in [
        states::BIND_SIMPLE,
        states::BIND_SASL_MECH,
        states::BIND_SASL_CREDS,
        states::UNBIND,
        states::SR_ATTRIBUTES,
        states::ENTRY_ATTRS,
        states::ENTRY_ATTR_VALS,
        states::ENTRY_ATTR_VALUE,
        states::RESULT_DIAGNOSTIC,
        states::RESULT_REFERRAL_URI,
    ] {
        builder = controls_entry(builder, terminal);
    }

    builder
        .transition(states::CONTROLS, universal::SEQUENCE, states::CONTROL_SEQ, Some(actions::open_control))
        .transition(states::CONTROL_SEQ, universal::OCTET_STRING, states::CONTROL_OID, Some(actions::store_control_oid))
        .transition(states::CONTROL_OID, universal::BOOLEAN, states::CONTROL_CRIT, Some(actions::store_control_criticality))
        .transition(states::CONTROL_OID, universal::OCTET_STRING, states::CONTROL_VALUE, Some(actions::store_control_value))
        .transition(states::CONTROL_CRIT, universal::OCTET_STRING, states::CONTROL_VALUE, Some(actions::store_control_value))
        .transition(states::CONTROL_OID, universal::SEQUENCE, states::CONTROL_SEQ, Some(actions::open_control))
        .transition(states::CONTROL_CRIT, universal::SEQUENCE, states::CONTROL_SEQ, Some(actions::open_control))
        .transition(states::CONTROL_VALUE, universal::SEQUENCE, states::CONTROL_SEQ, Some(actions::open_control))
        .build()
});
