/// A BindRequest (RFC 4511 §4.2).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindRequest {
    /// Protocol version, `1..=127` on the wire. LDAPv3 is 3.
    pub version: i32,
    /// The DN to authenticate as; empty for anonymous binds.
    pub name: String,
    pub credentials: BindCredentials,
}

impl Default for BindRequest {
    fn default() -> Self {
        Self {
            version: 3,
            name: String::new(),
            credentials: BindCredentials::Simple(Vec::new()),
        }
    }
}

/// The AuthenticationChoice of a bind request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindCredentials {
    /// `[0]` simple password bytes; empty for anonymous or unauthenticated
    /// binds.
    Simple(Vec<u8>),
    /// `[3]` SASL mechanism name plus optional mechanism-specific bytes.
    Sasl {
        mechanism: String,
        credentials: Option<Vec<u8>>,
    },
}

impl BindCredentials {
    #[must_use]
    pub fn is_sasl(&self) -> bool {
        matches!(self, Self::Sasl { .. })
    }
}
