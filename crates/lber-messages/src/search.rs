use crate::filter::Filter;

/// Search scope (RFC 4511 §4.5.1.2), wire values `0..=2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    BaseObject,
    SingleLevel,
    WholeSubtree,
}

impl SearchScope {
    #[must_use]
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::BaseObject),
            1 => Some(Self::SingleLevel),
            2 => Some(Self::WholeSubtree),
            _ => None,
        }
    }
}

/// Alias dereferencing policy (RFC 4511 §4.5.1.3), wire values `0..=3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DerefAliases {
    #[default]
    NeverDerefAliases,
    DerefInSearching,
    DerefFindingBaseObj,
    DerefAlways,
}

impl DerefAliases {
    #[must_use]
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::NeverDerefAliases),
            1 => Some(Self::DerefInSearching),
            2 => Some(Self::DerefFindingBaseObj),
            3 => Some(Self::DerefAlways),
            _ => None,
        }
    }
}

/// A SearchRequest (RFC 4511 §4.5.1), restricted to the filter subset
/// this workspace decodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub base_object: String,
    pub scope: SearchScope,
    pub deref: DerefAliases,
    /// Maximum number of entries to return; 0 means no client limit.
    pub size_limit: i32,
    /// Time limit in seconds; 0 means no client limit.
    pub time_limit: i32,
    pub types_only: bool,
    pub filter: Option<Filter>,
    /// Requested attribute descriptions; empty means all user attributes.
    pub attributes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_wire_values() {
        assert_eq!(SearchScope::from_wire(0), Some(SearchScope::BaseObject));
        assert_eq!(SearchScope::from_wire(2), Some(SearchScope::WholeSubtree));
        assert_eq!(SearchScope::from_wire(3), None);
    }

    #[test]
    fn deref_wire_values() {
        assert_eq!(DerefAliases::from_wire(3), Some(DerefAliases::DerefAlways));
        assert_eq!(DerefAliases::from_wire(4), None);
        assert_eq!(DerefAliases::from_wire(-1), None);
    }
}
