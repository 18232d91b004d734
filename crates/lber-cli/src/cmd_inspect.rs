/// Implementation of `lber inspect`.
///
/// Decodes every PDU in the file with a resumable session (so multiple
/// back-to-back messages in one capture file all appear) and prints one
/// summary block per message:
///
/// ```text
/// PDU 0: messageID=2 SearchRequest
///   base:   ou=people,dc=example,dc=com
///   scope:  WholeSubtree  deref: NeverDerefAliases
///   limits: size=0 time=0 typesOnly=false
///   filter: (&(objectClass=person)(uid=jdoe))
///   attrs:  cn, mail
///   control: 2.16.840.1.113730.3.4.3 critical persistentSearch{...}
/// ```
use std::fs;

use anyhow::{Context, Result};
use lber_codec::LdapDecoder;
use lber_controls::{Control, ControlValue};
use lber_messages::{BindCredentials, LdapMessage, LdapResult, ProtocolOp};

use crate::InspectArgs;

/// Run the `lber inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any PDU fails to
/// decode.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    if args.show_hex {
        print_hex(&bytes);
        println!();
    }

    let mut decoder = LdapDecoder::new();
    for attr in &args.binary_attrs {
        decoder = decoder.with_binary_attribute(attr);
    }

    let mut session = decoder.session();
    let messages = session
        .feed(&bytes)
        .with_context(|| format!("decode failed in {}", args.file.display()))?;
    session.finish().context("file ends mid-PDU")?;

    for (index, message) in messages.iter().enumerate() {
        print_message(index, message);
    }
    Ok(())
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn print_message(index: usize, message: &LdapMessage) {
    println!(
        "PDU {index}: messageID={} {}",
        message.message_id,
        message.op.kind()
    );

    match &message.op {
        ProtocolOp::BindRequest(bind) => {
            println!("  version: {}", bind.version);
            println!("  name:    {}", display_or_empty(&bind.name));
            match &bind.credentials {
                BindCredentials::Simple(password) => {
                    println!("  auth:    simple ({} bytes)", password.len());
                }
                BindCredentials::Sasl {
                    mechanism,
                    credentials,
                } => {
                    let len = credentials.as_ref().map_or(0, Vec::len);
                    println!("  auth:    SASL {mechanism} ({len} credential bytes)");
                }
            }
        }
        ProtocolOp::BindResponse(result) => print_result(result),
        ProtocolOp::UnbindRequest => {}
        ProtocolOp::SearchRequest(request) => {
            println!("  base:   {}", display_or_empty(&request.base_object));
            println!("  scope:  {:?}  deref: {:?}", request.scope, request.deref);
            println!(
                "  limits: size={} time={} typesOnly={}",
                request.size_limit, request.time_limit, request.types_only
            );
            if let Some(filter) = &request.filter {
                println!("  filter: {filter}");
            }
            if !request.attributes.is_empty() {
                println!("  attrs:  {}", request.attributes.join(", "));
            }
        }
        ProtocolOp::SearchResultEntry(entry) => {
            println!("  dn: {}", display_or_empty(&entry.object_name));
            for attribute in &entry.attributes {
                println!(
                    "  attr: {} ({} value{})",
                    attribute.attr_type,
                    attribute.values.len(),
                    if attribute.values.len() == 1 { "" } else { "s" }
                );
            }
        }
        ProtocolOp::SearchResultDone(result) => print_result(result),
    }

    for control in &message.controls {
        println!("  control: {}", render_control(control));
    }
}

fn print_result(result: &LdapResult) {
    println!(
        "  result: {:?} ({})",
        result.result_code,
        result.result_code.code()
    );
    if !result.matched_dn.is_empty() {
        println!("  matchedDN: {}", result.matched_dn);
    }
    if !result.diagnostic_message.is_empty() {
        println!("  diagnostic: {}", result.diagnostic_message);
    }
    for referral in &result.referrals {
        println!("  referral: {referral}");
    }
}

fn render_control(control: &Control) -> String {
    let mut out = control.oid.clone();
    if control.criticality {
        out.push_str(" critical");
    }
    match &control.value {
        None => {}
        Some(ControlValue::Raw(bytes)) => {
            out.push_str(&format!(" raw({} bytes)", bytes.len()));
        }
        Some(ControlValue::PersistentSearch(ps)) => {
            out.push_str(&format!(
                " persistentSearch{{changeTypes={:#06b} changesOnly={} returnECs={}}}",
                ps.change_types, ps.changes_only, ps.return_ecs
            ));
        }
        Some(ControlValue::EntryChange(ec)) => {
            out.push_str(&format!(
                " entryChange{{{:?} previousDN={:?} changeNumber={:?}}}",
                ec.change_type, ec.previous_dn, ec.change_number
            ));
        }
    }
    out
}

fn display_or_empty(s: &str) -> &str {
    if s.is_empty() { "(empty)" } else { s }
}

/// 16-byte-per-line hex dump with an ASCII gutter.
fn print_hex(bytes: &[u8]) {
    for (offset, chunk) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if (0x20..0x7F).contains(&b) {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        println!("{:08x}  {:<47}  {ascii}", offset * 16, hex.join(" "));
    }
}
