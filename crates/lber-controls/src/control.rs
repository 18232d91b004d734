use lber_tlv::encode::{length_len, write_boolean, write_tlv};
use lber_tlv::tag::universal;

use crate::entry_change::EntryChange;
use crate::persistent_search::PersistentSearch;

/// A decoded control value.
///
/// `Raw` keeps the value bytes of controls this workspace has no decoder
/// for. `Raw(vec![])` records a *present but empty* value TLV, which is
/// distinct from [`Control::value`] being `None` (no value field at all).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlValue {
    Raw(Vec<u8>),
    PersistentSearch(PersistentSearch),
    EntryChange(EntryChange),
}

/// One LDAP control: an OID, a criticality flag, and an optional value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    pub oid: String,
    pub criticality: bool,
    pub value: Option<ControlValue>,
}

impl Control {
    /// A non-critical control with no value.
    #[must_use]
    pub fn new(oid: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            criticality: false,
            value: None,
        }
    }

    #[must_use]
    pub fn critical(mut self) -> Self {
        self.criticality = true;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: ControlValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Total encoded size of the control, envelope included.
    #[must_use]
    pub fn compute_length(&self) -> usize {
        let payload = self.payload_length();
        1 + length_len(payload) + payload
    }

    /// Append the BER encoding of the control to `out`.
    ///
    /// The criticality field is omitted when false, per the BER rule for
    /// DEFAULT components.
    pub fn encode(&self, out: &mut Vec<u8>) {
        let mut payload = Vec::with_capacity(self.payload_length());
        write_tlv(&mut payload, universal::OCTET_STRING, self.oid.as_bytes());
        if self.criticality {
            write_boolean(&mut payload, true);
        }
        if let Some(bytes) = self.value_bytes() {
            write_tlv(&mut payload, universal::OCTET_STRING, &bytes);
        }
        write_tlv(out, universal::SEQUENCE, &payload);
    }

    fn payload_length(&self) -> usize {
        let mut len = 1 + length_len(self.oid.len()) + self.oid.len();
        if self.criticality {
            len += 3;
        }
        if let Some(bytes) = self.value_bytes() {
            len += 1 + length_len(bytes.len()) + bytes.len();
        }
        len
    }

    fn value_bytes(&self) -> Option<Vec<u8>> {
        self.value.as_ref().map(|value| match value {
            ControlValue::Raw(bytes) => bytes.clone(),
            ControlValue::PersistentSearch(ps) => ps.encode_value(),
            ControlValue::EntryChange(ec) => ec.encode_value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    #[test]
    fn encodes_minimal_control() {
        let control = Control::new(oid::MANAGE_DSA_IT);
        let mut out = Vec::new();
        control.encode(&mut out);

        // SEQUENCE { OCTET STRING "2.16.840.1.113730.3.4.2" }
        let mut expected = vec![0x30, 0x19, 0x04, 0x17];
        expected.extend_from_slice(oid::MANAGE_DSA_IT.as_bytes());
        assert_eq!(out, expected);
        assert_eq!(control.compute_length(), out.len());
    }

    #[test]
    fn criticality_false_is_omitted_true_is_encoded() {
        let mut plain = Vec::new();
        Control::new("1.2.3").encode(&mut plain);
        assert!(!plain.windows(2).any(|w| w == [0x01, 0x01]));

        let mut critical = Vec::new();
        Control::new("1.2.3").critical().encode(&mut critical);
        assert_eq!(critical.len(), plain.len() + 3);
        assert!(critical.windows(3).any(|w| w == [0x01, 0x01, 0xFF]));
    }

    #[test]
    fn empty_value_tlv_is_present() {
        let control = Control::new("1.2.3").with_value(ControlValue::Raw(Vec::new()));
        let mut out = Vec::new();
        control.encode(&mut out);
        // Ends with a zero-length OCTET STRING for the value.
        assert_eq!(&out[out.len() - 2..], &[0x04, 0x00]);
        assert_eq!(control.compute_length(), out.len());
    }

    #[test]
    fn compute_length_matches_encode_for_long_values() {
        let control =
            Control::new("1.2.3").with_value(ControlValue::Raw(vec![0xAB; 200]));
        let mut out = Vec::new();
        control.encode(&mut out);
        assert_eq!(control.compute_length(), out.len());
    }
}
