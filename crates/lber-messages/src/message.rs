use lber_controls::Control;
use lber_grammar::DecodeError;

use crate::bind::BindRequest;
use crate::entry::SearchResultEntry;
use crate::result::LdapResult;
use crate::search::SearchRequest;

/// One complete LDAPMessage: envelope id, the operation, and any
/// attached controls.
#[derive(Clone, Debug, PartialEq)]
pub struct LdapMessage {
    pub message_id: i32,
    pub op: ProtocolOp,
    pub controls: Vec<Control>,
}

/// The protocolOp CHOICE, restricted to the operations this workspace
/// decodes.
#[derive(Clone, Debug, PartialEq)]
pub enum ProtocolOp {
    BindRequest(BindRequest),
    BindResponse(LdapResult),
    UnbindRequest,
    SearchRequest(SearchRequest),
    SearchResultEntry(SearchResultEntry),
    SearchResultDone(LdapResult),
}

impl ProtocolOp {
    /// The operation's name, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BindRequest(_) => "BindRequest",
            Self::BindResponse(_) => "BindResponse",
            Self::UnbindRequest => "UnbindRequest",
            Self::SearchRequest(_) => "SearchRequest",
            Self::SearchResultEntry(_) => "SearchResultEntry",
            Self::SearchResultDone(_) => "SearchResultDone",
        }
    }

    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when this is not a bind request.
    pub fn bind_request(&self) -> Result<&BindRequest, DecodeError> {
        match self {
            Self::BindRequest(op) => Ok(op),
            other => Err(wrong_kind("BindRequest", other)),
        }
    }

    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when this is not a bind request.
    pub fn bind_request_mut(&mut self) -> Result<&mut BindRequest, DecodeError> {
        match self {
            Self::BindRequest(op) => Ok(op),
            other => Err(wrong_kind("BindRequest", other)),
        }
    }

    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when this is not a search request.
    pub fn search_request(&self) -> Result<&SearchRequest, DecodeError> {
        match self {
            Self::SearchRequest(op) => Ok(op),
            other => Err(wrong_kind("SearchRequest", other)),
        }
    }

    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when this is not a search request.
    pub fn search_request_mut(&mut self) -> Result<&mut SearchRequest, DecodeError> {
        match self {
            Self::SearchRequest(op) => Ok(op),
            other => Err(wrong_kind("SearchRequest", other)),
        }
    }

    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when this is not a search
    /// result entry.
    pub fn search_result_entry(&self) -> Result<&SearchResultEntry, DecodeError> {
        match self {
            Self::SearchResultEntry(op) => Ok(op),
            other => Err(wrong_kind("SearchResultEntry", other)),
        }
    }

    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when this is not a search
    /// result entry.
    pub fn search_result_entry_mut(&mut self) -> Result<&mut SearchResultEntry, DecodeError> {
        match self {
            Self::SearchResultEntry(op) => Ok(op),
            other => Err(wrong_kind("SearchResultEntry", other)),
        }
    }

    /// The LDAPResult of a response op (bind response or search result
    /// done).
    ///
    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when this op carries no result.
    pub fn result(&self) -> Result<&LdapResult, DecodeError> {
        match self {
            Self::BindResponse(result) | Self::SearchResultDone(result) => Ok(result),
            other => Err(wrong_kind("LdapResult", other)),
        }
    }

    /// # Errors
    ///
    /// [`DecodeError::WrongContainerKind`] when this op carries no result.
    pub fn result_mut(&mut self) -> Result<&mut LdapResult, DecodeError> {
        match self {
            Self::BindResponse(result) | Self::SearchResultDone(result) => Ok(result),
            other => Err(wrong_kind("LdapResult", other)),
        }
    }
}

fn wrong_kind(expected: &'static str, found: &ProtocolOp) -> DecodeError {
    DecodeError::WrongContainerKind {
        expected,
        found: found.kind(),
    }
}
