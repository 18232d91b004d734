use std::collections::HashSet;

use lber_grammar::{BerStream, DecodeError, DecodeStatus, decode_one};
use lber_messages::LdapMessage;
use tracing::debug;

use crate::container::LdapMessageContainer;
use crate::grammar::LDAP_MESSAGE;

/// Entry point for decoding LDAPMessages.
///
/// The decoder itself is plain configuration; each `decode` call or
/// [`PduSession`] gets its own container, so one decoder can serve any
/// number of connections.
#[derive(Clone, Debug, Default)]
pub struct LdapDecoder {
    binary_attributes: HashSet<String>,
}

impl LdapDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat values of `attribute` as binary even without the `;binary`
    /// option. Matches on the base attribute description, options
    /// stripped.
    #[must_use]
    pub fn with_binary_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.binary_attributes.insert(attribute.into());
        self
    }

    /// Strict one-shot decode: `buf` must hold exactly one PDU.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]; a partial PDU is `TruncatedPdu` and leftover
    /// bytes are `TrailingData`.
    pub fn decode(&self, buf: &[u8]) -> Result<LdapMessage, DecodeError> {
        let mut container = LdapMessageContainer::new(self.binary_attributes.clone());
        decode_one(&LDAP_MESSAGE, &mut container, buf)?;
        container.take_message()
    }

    /// Start a resumable session for a connection's byte stream.
    #[must_use]
    pub fn session(&self) -> PduSession {
        PduSession {
            stream: BerStream::new(&LDAP_MESSAGE),
            container: LdapMessageContainer::new(self.binary_attributes.clone()),
        }
    }
}

/// A resumable decode session over one connection.
///
/// Bytes go in as they arrive, in whatever chunks the transport
/// delivers; completed messages come out. PDU boundaries need not align
/// with chunk boundaries in either direction.
pub struct PduSession {
    stream: BerStream<LdapMessageContainer>,
    container: LdapMessageContainer,
}

impl PduSession {
    /// Feed a chunk, returning every message it completes.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`] is fatal for the session.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<LdapMessage>, DecodeError> {
        let mut messages = Vec::new();
        let mut chunk = chunk;
        loop {
            match self.stream.feed(chunk, &mut self.container)? {
                DecodeStatus::Complete => {
                    let message = self.container.take_message()?;
                    debug!(
                        message_id = message.message_id,
                        op = message.op.kind(),
                        "message decoded"
                    );
                    messages.push(message);
                    self.container.reset();
                    self.stream.reset();
                    // Leftover bytes stay buffered in the stream.
                    chunk = &[];
                }
                DecodeStatus::NeedMore => break,
            }
        }
        Ok(messages)
    }

    /// Number of buffered bytes belonging to a not-yet-complete PDU.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.stream.buffered()
    }

    /// Signal end-of-input.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TruncatedPdu`] when the connection ended mid-PDU.
    pub fn finish(&self) -> Result<(), DecodeError> {
        self.stream.finish()
    }
}
