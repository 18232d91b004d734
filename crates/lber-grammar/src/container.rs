use crate::error::DecodeError;

/// The mutable decode context a grammar run builds into.
///
/// A container owns everything under construction for one PDU: the
/// partially built message or control, whatever intermediate stacks the
/// grammar needs, and the `end_allowed` flag that gates clean
/// termination. One container serves one decode run at a time; the
/// immutable grammar tables are the only thing shared between sessions.
pub trait Container {
    /// Whether the grammar may stop cleanly at the current point.
    ///
    /// Actions flip this as fields are satisfied: an action that
    /// completes the last mandatory field of a structure sets it, an
    /// action that opens a structure with outstanding mandatory fields
    /// clears it. The runner checks it once the outermost TLV's bytes
    /// are consumed; ending anywhere else is a truncated PDU.
    fn end_allowed(&self) -> bool;

    /// Set the `end_allowed` flag. See [`Container::end_allowed`].
    fn set_end_allowed(&mut self, allowed: bool);

    /// Called by the runner when an open constructed TLV has had all of
    /// its declared value bytes consumed. `tag` is the tag that opened
    /// the structure.
    ///
    /// Containers that build trees incrementally (filter nodes,
    /// attribute lists, control sequences) pop their pending stacks
    /// here; the default does nothing.
    ///
    /// # Errors
    ///
    /// Implementations return a [`DecodeError`] when the closing
    /// structure is incomplete or inconsistent.
    fn close_constructed(&mut self, tag: u8) -> Result<(), DecodeError> {
        let _ = tag;
        Ok(())
    }
}
