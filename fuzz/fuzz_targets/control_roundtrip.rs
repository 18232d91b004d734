#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lber_codec::LdapDecoder;
use lber_controls::{Control, ControlValue};
use lber_tlv::encode::{write_integer, write_tlv};

// Fuzz target: control encode->decode roundtrip.
//
// Builds a structurally valid control from arbitrary parts, attaches it
// to an unbind request, and asserts the decoded control matches what was
// encoded. Registered OIDs are skipped: their values go through a value
// grammar instead of being preserved as raw bytes.
#[derive(Arbitrary, Debug)]
struct ControlParts {
    arcs: Vec<u16>,
    criticality: bool,
    value: Option<Vec<u8>>,
}

fuzz_target!(|parts: ControlParts| {
    if parts.arcs.len() < 2 {
        return;
    }
    let oid = parts
        .arcs
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(".");
    if lber_controls::registry::value_decoder(&oid).is_some() {
        return;
    }

    let mut control = Control::new(&oid);
    if parts.criticality {
        control = control.critical();
    }
    if let Some(value) = &parts.value {
        control = control.with_value(ControlValue::Raw(value.clone()));
    }

    let mut section = Vec::new();
    control.encode(&mut section);

    let mut body = Vec::new();
    write_integer(&mut body, 1);
    write_tlv(&mut body, 0x42, &[]);
    body.extend(wrap(0xA0, &section));

    let pdu = wrap(0x30, &body);
    let decoded = LdapDecoder::new().decode(&pdu).unwrap();
    assert_eq!(decoded.controls, vec![control]);
});

fn wrap(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    write_tlv(&mut out, tag, payload);
    out
}
