use std::collections::HashSet;
use std::mem;

use lber_controls::Control;
use lber_grammar::{Container, DecodeError};
use lber_messages::{Filter, LdapMessage, PartialAttribute, ProtocolOp};
use lber_tlv::tag::universal;
use tracing::debug;

/// A filter node still being built: its children (or operands) arrive
/// before the node's constructed TLV closes.
///
/// The stack of these replaces parent pointers: each open AND/OR/NOT or
/// equalityMatch pushes one, and [`LdapMessageContainer::close_constructed`]
/// pops and attaches it when the runner reports the closing offset.
#[derive(Debug)]
pub(crate) enum PendingFilter {
    Composite {
        /// The opening tag, matched against close notifications.
        tag: u8,
        kind: CompositeKind,
        children: Vec<Filter>,
    },
    Equality {
        tag: u8,
        attribute: String,
        value: Vec<u8>,
    },
}

impl PendingFilter {
    fn tag(&self) -> u8 {
        match self {
            Self::Composite { tag, .. } | Self::Equality { tag, .. } => *tag,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum CompositeKind {
    And,
    Or,
    Not,
}

/// The decode context for one LDAPMessage.
///
/// Grammar actions fill it in field by field; `close_constructed` seals
/// the incremental pieces (filter nodes, partial attributes, controls)
/// as their enclosing TLVs end. After a completed run,
/// [`LdapMessageContainer::take_message`] yields the finished message
/// and [`LdapMessageContainer::reset`] rearms the container for the
/// next PDU, keeping only the binary-attribute configuration.
#[derive(Debug)]
pub struct LdapMessageContainer {
    pub(crate) message_id: i32,
    pub(crate) op: Option<ProtocolOp>,
    pub(crate) controls: Vec<Control>,
    pub(crate) filter_stack: Vec<PendingFilter>,
    pub(crate) current_attribute: Option<PartialAttribute>,
    pub(crate) current_control: Option<Control>,
    binary_attributes: HashSet<String>,
    end_allowed: bool,
}

impl LdapMessageContainer {
    #[must_use]
    pub fn new(binary_attributes: HashSet<String>) -> Self {
        Self {
            message_id: 0,
            op: None,
            controls: Vec::new(),
            filter_stack: Vec::new(),
            current_attribute: None,
            current_control: None,
            binary_attributes,
            end_allowed: false,
        }
    }

    /// Rearm for the next PDU. The binary-attribute set is configuration
    /// and survives.
    pub fn reset(&mut self) {
        self.message_id = 0;
        self.op = None;
        self.controls.clear();
        self.filter_stack.clear();
        self.current_attribute = None;
        self.current_control = None;
        self.end_allowed = false;
    }

    /// Take the completed message out of the container.
    ///
    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when no operation was decoded
    /// (the grammar run did not complete).
    pub fn take_message(&mut self) -> Result<LdapMessage, DecodeError> {
        let op = self.op.take().ok_or(DecodeError::WrongContainerKind {
            expected: "a decoded operation",
            found: "nothing",
        })?;
        Ok(LdapMessage {
            message_id: self.message_id,
            op,
            controls: mem::take(&mut self.controls),
        })
    }

    pub(crate) fn op_mut(&mut self) -> Result<&mut ProtocolOp, DecodeError> {
        self.op.as_mut().ok_or(DecodeError::WrongContainerKind {
            expected: "an operation under construction",
            found: "nothing",
        })
    }

    /// Whether values of `attr_type` should stay raw bytes.
    pub(crate) fn is_binary(&self, attr_type: &str) -> bool {
        let mut options = attr_type.split(';');
        let base = options.next().unwrap_or(attr_type);
        options.any(|opt| opt.eq_ignore_ascii_case("binary"))
            || self.binary_attributes.contains(base)
    }

    /// Attach a finished filter node: as a child of the innermost open
    /// composite, or as the search request's top-level filter.
    pub(crate) fn attach_filter(&mut self, node: Filter) -> Result<(), DecodeError> {
        match self.filter_stack.last_mut() {
            Some(PendingFilter::Composite { children, .. }) => {
                children.push(node);
                Ok(())
            }
            Some(PendingFilter::Equality { .. }) => Err(DecodeError::InvalidValue {
                field: "filter",
                reason: "filter element inside an equalityMatch".to_owned(),
            }),
            None => {
                let request = self.op_mut()?.search_request_mut()?;
                if request.filter.is_some() {
                    return Err(DecodeError::InvalidValue {
                        field: "filter",
                        reason: "more than one top-level filter".to_owned(),
                    });
                }
                request.filter = Some(node);
                Ok(())
            }
        }
    }

    fn seal_filter(&mut self) -> Result<(), DecodeError> {
        let Some(pending) = self.filter_stack.pop() else {
            return Ok(());
        };
        let node = match pending {
            PendingFilter::Composite {
                kind: CompositeKind::And,
                children,
                ..
            } => Filter::And(children),
            PendingFilter::Composite {
                kind: CompositeKind::Or,
                children,
                ..
            } => Filter::Or(children),
            PendingFilter::Composite {
                kind: CompositeKind::Not,
                mut children,
                ..
            } => match (children.pop(), children.is_empty()) {
                (Some(child), true) => Filter::Not(Box::new(child)),
                _ => {
                    return Err(DecodeError::InvalidValue {
                        field: "notFilter",
                        reason: "a NOT filter carries exactly one child".to_owned(),
                    });
                }
            },
            PendingFilter::Equality {
                attribute, value, ..
            } => Filter::EqualityMatch { attribute, value },
        };
        self.attach_filter(node)
    }

    fn seal_control(&mut self) -> Result<(), DecodeError> {
        if let Some(control) = self.current_control.take() {
            debug!(oid = %control.oid, criticality = control.criticality, "control decoded");
            self.controls.push(control);
        }
        Ok(())
    }

    fn seal_attribute(&mut self) -> Result<(), DecodeError> {
        if let Some(attribute) = self.current_attribute.take() {
            let entry = self.op_mut()?.search_result_entry_mut()?;
            entry.attributes.push(attribute);
        }
        Ok(())
    }
}

impl Container for LdapMessageContainer {
    fn end_allowed(&self) -> bool {
        self.end_allowed
    }

    fn set_end_allowed(&mut self, allowed: bool) {
        self.end_allowed = allowed;
    }

    fn close_constructed(&mut self, tag: u8) -> Result<(), DecodeError> {
        // Filter nodes first: their tags (0xA0-0xA3) collide with the
        // controls section and SASL/referral sequences, but those never
        // close while a filter is still open.
        if self
            .filter_stack
            .last()
            .is_some_and(|pending| pending.tag() == tag)
        {
            return self.seal_filter();
        }

        if tag == universal::SEQUENCE {
            if self.current_control.is_some() {
                return self.seal_control();
            }
            if self.current_attribute.is_some() {
                return self.seal_attribute();
            }
        }

        // Everything else (outer message sequence, attribute lists,
        // SASL and referral sequences, the controls section) needs no
        // bookkeeping on close.
        Ok(())
    }
}
