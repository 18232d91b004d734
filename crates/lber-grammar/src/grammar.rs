use std::collections::HashMap;

use lber_tlv::Tlv;

use crate::container::Container;
use crate::error::DecodeError;

/// A position in a decode automaton.
///
/// Every grammar defines its own enumerated state space as constants,
/// plus the two reserved states [`INIT`] and [`END`].
pub type State = u16;

/// The state every grammar starts in.
pub const INIT: State = 0;

/// Reserved accepting sentinel. No transitions leave it.
pub const END: State = State::MAX;

/// A per-transition callback: interprets the TLV's value bytes and
/// mutates the container.
///
/// Plain function values, not trait objects — one grammar table is built
/// once and shared, so there is nothing to capture.
pub type Action<C> = fn(&mut C, &Tlv<'_>) -> Result<(), DecodeError>;

/// One cell of the transition table.
#[derive(Clone, Copy, Debug)]
pub struct Transition<C> {
    /// State the machine moves to.
    pub next: State,

    /// Side effect to run when the transition fires, if any.
    pub action: Option<Action<C>>,
}

/// A grammar: the immutable transition table for one message or control
/// type, plus naming for diagnostics.
///
/// This is a Mealy machine over `(state, tag)` — transitions carry side
/// effects (the action) in addition to moving state. Tables are built
/// once at startup (typically behind a `LazyLock`) and are read-only
/// afterwards, so any number of decode sessions can share one.
pub struct Grammar<C> {
    name: &'static str,
    transitions: HashMap<(State, u8), Transition<C>>,
    state_name: fn(State) -> &'static str,
}

impl<C: Container> Grammar<C> {
    /// The grammar's name, used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable name of a state.
    #[must_use]
    pub fn state_name(&self, state: State) -> &'static str {
        (self.state_name)(state)
    }

    /// Look up the transition for `(state, tag)`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedTag`] when no transition is registered —
    /// a missing cell is always an error, never a silent no-op.
    pub fn transition(&self, state: State, tag: u8) -> Result<&Transition<C>, DecodeError> {
        self.transitions
            .get(&(state, tag))
            .ok_or(DecodeError::UnexpectedTag {
                grammar: self.name,
                state: self.state_name(state),
                tag,
            })
    }
}

/// Builder for [`Grammar`] tables.
///
/// Registering the same `(state, tag)` cell twice is a programming error
/// in the grammar definition and panics at construction time.
pub struct GrammarBuilder<C> {
    name: &'static str,
    transitions: HashMap<(State, u8), Transition<C>>,
    state_name: fn(State) -> &'static str,
}

impl<C: Container> GrammarBuilder<C> {
    #[must_use]
    pub fn new(name: &'static str, state_name: fn(State) -> &'static str) -> Self {
        Self {
            name,
            transitions: HashMap::new(),
            state_name,
        }
    }

    /// Register a transition from `from` on `tag` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if the `(from, tag)` cell is already registered.
    #[must_use]
    pub fn transition(mut self, from: State, tag: u8, to: State, action: Option<Action<C>>) -> Self {
        let previous = self
            .transitions
            .insert((from, tag), Transition { next: to, action });
        assert!(
            previous.is_none(),
            "duplicate transition in {}: state {} on tag {tag:#04x}",
            self.name,
            (self.state_name)(from),
        );
        self
    }

    #[must_use]
    pub fn build(self) -> Grammar<C> {
        Grammar {
            name: self.name,
            transitions: self.transitions,
            state_name: self.state_name,
        }
    }
}
