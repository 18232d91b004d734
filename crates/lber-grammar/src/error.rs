use lber_tlv::TlvError;

/// Errors that can occur while running a grammar over a TLV stream.
///
/// The taxonomy separates structural failures (the byte stream does not
/// fit the grammar) from semantic ones (a well-formed field carries a
/// value the protocol forbids). Need-more-input is *not* an error — the
/// runner reports it as [`crate::DecodeStatus::NeedMore`] so a caller can
/// resume with the next chunk.
///
/// ```text
///   DecodeError
///   ├── UnexpectedTag         ← no transition for (state, tag)
///   ├── TruncatedPdu          ← input ended where the grammar cannot stop
///   ├── TrailingData          ← bytes left over after a strict decode
///   ├── NestedLengthMismatch  ← inner TLV overruns its enclosing frame
///   ├── EmptySet              ← constructed value that requires ≥1 element
///   ├── OutOfRange            ← integer field outside its allowed range
///   ├── BadPrimitive          ← malformed INTEGER/BOOLEAN encoding
///   ├── WrongContainerKind    ← container accessor used on the wrong op
///   ├── InvalidValue          ← other semantic failures (URL syntax, ...)
///   ├── Tlv(TlvError)         ← from the TLV layer
///   └── Io(std::io::Error)    ← from the async streaming reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The grammar has no transition for this tag in the current state.
    #[error("unexpected tag {tag:#04x} in state {state} of {grammar}")]
    UnexpectedTag {
        grammar: &'static str,
        state: &'static str,
        tag: u8,
    },

    /// Input ended in a state where the grammar does not allow it.
    #[error("truncated PDU: {grammar} cannot end in state {state}")]
    TruncatedPdu {
        grammar: &'static str,
        state: &'static str,
    },

    /// A strict one-shot decode found bytes after the end of the PDU.
    #[error("unexpected data after end of PDU ({extra} bytes)")]
    TrailingData { extra: usize },

    /// A nested TLV's declared length runs past the end of its enclosing
    /// constructed value. The lengths in the stream are inconsistent.
    #[error("TLV with tag {tag:#04x} overruns its enclosing constructed value")]
    NestedLengthMismatch { tag: u8 },

    /// A constructed value that must contain at least one element (an
    /// AND/OR/NOT filter set, a referral URI list) was empty.
    #[error("empty {field}: constructed value {tag:#04x} requires at least one element")]
    EmptySet { field: &'static str, tag: u8 },

    /// An integer field decoded cleanly but lies outside the range the
    /// protocol defines for it.
    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// An INTEGER/BOOLEAN field had a malformed encoding.
    #[error("malformed {field}: {source}")]
    BadPrimitive {
        field: &'static str,
        source: TlvError,
    },

    /// A container accessor was called for a message kind other than the
    /// one under construction.
    #[error("wrong message kind: expected {expected}, found {found}")]
    WrongContainerKind {
        expected: &'static str,
        found: &'static str,
    },

    /// A well-formed field carried a semantically invalid value. The
    /// reason preserves the underlying parse failure verbatim.
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// A TLV-layer failure: bad length encoding, indefinite form.
    #[error(transparent)]
    Tlv(#[from] TlvError),

    /// An I/O error from the underlying reader (streaming decoder).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
