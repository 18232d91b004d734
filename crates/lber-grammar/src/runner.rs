use std::mem;

use lber_tlv::tlv::{TlvRead, read_tlv};
use tracing::trace;

use crate::container::Container;
use crate::error::DecodeError;
use crate::grammar::{END, Grammar, State};

/// Outcome of one [`BerStream::feed`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The outermost TLV is fully consumed and the grammar accepts.
    /// Unconsumed bytes (the start of the next PDU) stay buffered.
    Complete,

    /// Input ran out mid-PDU. Feed more bytes to resume; no state is
    /// lost between calls.
    NeedMore,
}

/// A resumable grammar run over a fragmented byte stream.
///
/// The stream owns all decode-run state the TLV layer refuses to keep:
/// the unconsumed byte tail, the current grammar state, the stack of
/// open constructed values, and the end offset of the outermost TLV.
/// One `BerStream` decodes one PDU at a time; call [`BerStream::reset`]
/// to rearm it for the next PDU on the same connection.
///
/// ```text
///   bytes ──► read_tlv ──► transition(state, tag) ──► action(container)
///     ▲                                                     │
///     └──── NeedMore: suspend, resume on next feed ◄────────┘
/// ```
///
/// Decoding never blocks: it only operates on bytes already handed to
/// `feed`, and the caller may abandon the stream at any point since it
/// holds no external resources.
pub struct BerStream<C: Container + 'static> {
    grammar: &'static Grammar<C>,
    state: State,
    /// Unconsumed bytes carried across `feed` calls.
    buf: Vec<u8>,
    /// Absolute stream offset of `buf[0]`.
    pos: u64,
    /// Open constructed values: (absolute end offset, opening tag).
    frames: Vec<(u64, u8)>,
    /// Absolute end offset of the outermost TLV, once its header is read.
    pdu_end: Option<u64>,
    done: bool,
}

impl<C: Container + 'static> BerStream<C> {
    #[must_use]
    pub fn new(grammar: &'static Grammar<C>) -> Self {
        Self {
            grammar,
            state: crate::grammar::INIT,
            buf: Vec::new(),
            pos: 0,
            frames: Vec::new(),
            pdu_end: None,
            done: false,
        }
    }

    /// Append a chunk and run the grammar as far as the bytes allow.
    ///
    /// Returns [`DecodeStatus::Complete`] once the PDU is fully decoded;
    /// bytes beyond the PDU boundary remain buffered for the next run.
    /// Returns [`DecodeStatus::NeedMore`] when the chunk ends mid-PDU.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`] is fatal for the PDU; the recovery policy
    /// (protocol error response, connection close) belongs to the caller.
    pub fn feed(&mut self, chunk: &[u8], container: &mut C) -> Result<DecodeStatus, DecodeError> {
        self.buf.extend_from_slice(chunk);
        if self.done {
            return Ok(DecodeStatus::Complete);
        }

        // Take the buffer out so actions can borrow TLV windows from it
        // while the container is mutated independently.
        let buf = mem::take(&mut self.buf);
        let mut cursor = 0;
        let result = self.run(&buf, &mut cursor, container);
        self.buf = buf[cursor..].to_vec();
        self.pos += cursor as u64;
        result
    }

    fn run(
        &mut self,
        buf: &[u8],
        cursor: &mut usize,
        container: &mut C,
    ) -> Result<DecodeStatus, DecodeError> {
        loop {
            if let Some(end) = self.pdu_end {
                if self.pos + *cursor as u64 == end {
                    if container.end_allowed() {
                        self.done = true;
                        self.state = END;
                        return Ok(DecodeStatus::Complete);
                    }
                    return Err(DecodeError::TruncatedPdu {
                        grammar: self.grammar.name(),
                        state: self.grammar.state_name(self.state),
                    });
                }
            }

            let TlvRead::Complete {
                tlv,
                header_len,
                consumed,
            } = read_tlv(&buf[*cursor..])?
            else {
                return Ok(DecodeStatus::NeedMore);
            };

            // Containment: every TLV must fit its enclosing constructed
            // value and the PDU itself.
            let tlv_end = self.pos + *cursor as u64 + (header_len + tlv.length) as u64;
            if let Some(&(frame_end, _)) = self.frames.last() {
                if tlv_end > frame_end {
                    return Err(DecodeError::NestedLengthMismatch { tag: tlv.tag });
                }
            }
            match self.pdu_end {
                Some(end) if tlv_end > end => {
                    return Err(DecodeError::NestedLengthMismatch { tag: tlv.tag });
                }
                Some(_) => {}
                None => self.pdu_end = Some(tlv_end),
            }

            let transition = self.grammar.transition(self.state, tlv.tag)?;
            let next = transition.next;
            trace!(
                grammar = self.grammar.name(),
                from = self.grammar.state_name(self.state),
                to = self.grammar.state_name(next),
                tag = format_args!("{:#04x}", tlv.tag),
                length = tlv.length,
                "transition"
            );
            if let Some(action) = transition.action {
                action(container, &tlv)?;
            }
            self.state = next;

            if tlv.is_constructed() {
                self.frames.push((tlv_end, tlv.tag));
            }
            *cursor += consumed;

            // Notify the container of every constructed value whose
            // declared bytes are now fully consumed.
            let abs = self.pos + *cursor as u64;
            while let Some(&(frame_end, tag)) = self.frames.last() {
                if frame_end != abs {
                    break;
                }
                self.frames.pop();
                container.close_constructed(tag)?;
            }
        }
    }

    /// Rearm the stream for the next PDU, keeping any buffered bytes
    /// that belong to it.
    pub fn reset(&mut self) {
        self.state = crate::grammar::INIT;
        self.frames.clear();
        self.pdu_end = None;
        self.done = false;
    }

    /// Number of buffered, unconsumed bytes.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Signal end-of-input.
    ///
    /// # Errors
    ///
    /// [`DecodeError::TruncatedPdu`] when the stream holds a partial PDU:
    /// either a grammar run is underway or undecoded bytes are buffered.
    pub fn finish(&self) -> Result<(), DecodeError> {
        if !self.done && (self.pdu_end.is_some() || !self.buf.is_empty()) {
            return Err(DecodeError::TruncatedPdu {
                grammar: self.grammar.name(),
                state: self.grammar.state_name(self.state),
            });
        }
        Ok(())
    }
}

/// Strict one-shot decode: run `grammar` over all of `buf`.
///
/// Used for nested structures whose extent is already known — a
/// control's value bytes must be exactly one complete encoding.
///
/// # Errors
///
/// - [`DecodeError::TruncatedPdu`] when `buf` ends mid-structure.
/// - [`DecodeError::TrailingData`] when bytes follow the structure.
/// - Any error from the grammar's transitions and actions.
pub fn decode_one<C: Container>(
    grammar: &'static Grammar<C>,
    container: &mut C,
    buf: &[u8],
) -> Result<(), DecodeError> {
    let mut stream = BerStream::new(grammar);
    match stream.feed(buf, container)? {
        DecodeStatus::Complete => {
            let extra = stream.buffered();
            if extra > 0 {
                return Err(DecodeError::TrailingData { extra });
            }
            Ok(())
        }
        DecodeStatus::NeedMore => Err(DecodeError::TruncatedPdu {
            grammar: grammar.name(),
            state: grammar.state_name(stream.state),
        }),
    }
}
