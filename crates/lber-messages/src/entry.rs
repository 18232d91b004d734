/// A SearchResultEntry (RFC 4511 §4.5.2).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResultEntry {
    pub object_name: String,
    pub attributes: Vec<PartialAttribute>,
}

/// One attribute of a returned entry: a description plus zero or more
/// values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialAttribute {
    pub attr_type: String,
    pub values: Vec<AttributeValue>,
}

/// An attribute value: UTF-8 text for ordinary attributes, raw bytes for
/// binary ones (the `;binary` option or a configured binary attribute).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Binary(Vec<u8>),
}

impl AttributeValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    /// The value's bytes regardless of representation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }
}
