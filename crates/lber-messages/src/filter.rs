use std::fmt;

/// A search filter tree, restricted to the subset this workspace
/// decodes: AND, OR, NOT, equalityMatch, and present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// `[0]` — at least one element.
    And(Vec<Filter>),
    /// `[1]` — at least one element.
    Or(Vec<Filter>),
    /// `[2]` — exactly one child.
    Not(Box<Filter>),
    /// `[3]` — attribute equals value.
    EqualityMatch { attribute: String, value: Vec<u8> },
    /// `[7]` — attribute is present.
    Present(String),
}

impl fmt::Display for Filter {
    /// RFC 4515 string rendering. Non-UTF-8 assertion values are shown
    /// byte-escaped (`\xx`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(children) => {
                f.write_str("(&")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            Self::Or(children) => {
                f.write_str("(|")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            Self::Not(child) => write!(f, "(!{child})"),
            Self::EqualityMatch { attribute, value } => {
                write!(f, "({attribute}=")?;
                write_assertion_value(f, value)?;
                f.write_str(")")
            }
            Self::Present(attribute) => write!(f, "({attribute}=*)"),
        }
    }
}

fn write_assertion_value(f: &mut fmt::Formatter<'_>, value: &[u8]) -> fmt::Result {
    for &b in value {
        // RFC 4515 §3: escape the filter metacharacters and anything
        // outside printable ASCII.
        if matches!(b, b'(' | b')' | b'*' | b'\\') || !(0x20..0x7F).contains(&b) {
            write!(f, "\\{b:02x}")?;
        } else {
            write!(f, "{}", b as char)?;
        }
    }
    Ok(())
}
