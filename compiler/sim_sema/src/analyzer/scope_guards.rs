//! Frame push/pop around a closure.
//!
//! Errors propagate as `Err`, never by unwinding, so popping after the
//! closure returns restores the stack on every path.

use super::Analyzer;
use crate::scope::Frame;

impl Analyzer<'_> {
    /// Run `f` with `frame` pushed.
    pub(crate) fn with_frame<T, F>(&mut self, frame: Frame, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        let depth = self.scopes.depth();
        self.scopes.push(frame);

        let result = f(self);

        self.scopes.pop();
        debug_assert_eq!(self.scopes.depth(), depth, "unbalanced scope frames");
        result
    }
}
