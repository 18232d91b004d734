use std::collections::VecDeque;

use lber_grammar::DecodeError;
use lber_messages::LdapMessage;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::decoder::{LdapDecoder, PduSession};

const READ_CHUNK: usize = 8 * 1024;

/// Asynchronous message decoder over any `AsyncRead` source.
///
/// Reads the transport in chunks and yields one decoded message per
/// [`next`](Self::next) call, buffering messages when a single read
/// completes more than one PDU. Backpressure is natural: nothing is
/// read until the caller awaits the next message.
///
/// EOF on a PDU boundary ends the stream cleanly; EOF mid-PDU is
/// [`DecodeError::TruncatedPdu`].
///
/// # Example
///
/// ```rust,no_run
/// use lber_codec::StreamingDecoder;
/// use tokio::io::AsyncRead;
///
/// async fn drain(reader: impl AsyncRead + Unpin) {
///     let mut stream = StreamingDecoder::new(reader);
///     while let Some(message) = stream.next().await.transpose().unwrap() {
///         // Dispatch the message...
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    session: PduSession,
    /// Messages completed by a read but not yet handed out.
    ready: VecDeque<LdapMessage>,
    eof: bool,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    /// Stream with default decoder configuration.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_decoder(&LdapDecoder::new(), reader)
    }

    /// Stream with a configured decoder (binary attributes etc.).
    #[must_use]
    pub fn with_decoder(decoder: &LdapDecoder, reader: R) -> Self {
        Self {
            reader,
            session: decoder.session(),
            ready: VecDeque::new(),
            eof: false,
        }
    }

    /// Read the next message from the stream.
    ///
    /// Returns `Ok(Some(message))` per decoded message, `Ok(None)` on a
    /// clean EOF, or the first error encountered. Errors are terminal:
    /// subsequent calls return `None`.
    pub async fn next(&mut self) -> Option<Result<LdapMessage, DecodeError>> {
        loop {
            if let Some(message) = self.ready.pop_front() {
                return Some(Ok(message));
            }
            if self.eof {
                return None;
            }

            let mut buf = [0u8; READ_CHUNK];
            match self.reader.read(&mut buf).await {
                Err(e) => {
                    self.eof = true;
                    return Some(Err(e.into()));
                }
                Ok(0) => {
                    self.eof = true;
                    if let Err(e) = self.session.finish() {
                        return Some(Err(e));
                    }
                    return None;
                }
                Ok(n) => match self.session.feed(&buf[..n]) {
                    Ok(messages) => self.ready.extend(messages),
                    Err(e) => {
                        self.eof = true;
                        return Some(Err(e));
                    }
                },
            }
        }
    }
}
