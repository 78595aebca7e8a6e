//! Undo and redo stacks.

use crate::operation::Operation;

/// Linear undo/redo history of reversible operations.
///
/// The undo stack holds, most recent last, the operations that reverse each
/// recorded mutation. Recording a new mutation discards the redo stack.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    undo: Vec<Operation>,
    redo: Vec<Operation>,
}

impl CommandLog {
    /// Empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Record the inverse of a fresh mutation, invalidating redo history.
    pub fn record(&mut self, inverse: Operation) {
        self.redo.clear();
        self.undo.push(inverse);
    }

    /// Take the most recent undo entry.
    pub fn pop_undo(&mut self) -> Option<Operation> {
        self.undo.pop()
    }

    /// Push onto the undo stack without touching redo history.
    pub fn push_undo(&mut self, op: Operation) {
        self.undo.push(op);
    }

    /// Take the most recent redo entry.
    pub fn pop_redo(&mut self) -> Option<Operation> {
        self.redo.pop()
    }

    /// Push onto the redo stack.
    pub fn push_redo(&mut self, op: Operation) {
        self.redo.push(op);
    }

    /// Next operation [`pop_undo`](Self::pop_undo) would return.
    #[must_use]
    pub fn peek_undo(&self) -> Option<&Operation> {
        self.undo.last()
    }

    /// Next operation [`pop_redo`](Self::pop_redo) would return.
    #[must_use]
    pub fn peek_redo(&self) -> Option<&Operation> {
        self.redo.last()
    }

    /// Whether an undo is possible.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo is possible.
    #[must_use]
    pub const fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Depth of the undo stack.
    #[must_use]
    pub const fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Depth of the redo stack.
    #[must_use]
    pub const fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delete(name: &str) -> Operation {
        Operation::DeleteRepository { name: name.into() }
    }

    #[test]
    fn starts_empty() {
        let mut log = CommandLog::new();
        assert!(!log.can_undo());
        assert!(!log.can_redo());
        assert!(log.pop_undo().is_none());
        assert!(log.pop_redo().is_none());
    }

    #[test]
    fn record_clears_redo() {
        let mut log = CommandLog::new();
        log.record(delete("a"));
        let op = log.pop_undo().expect("undo entry");
        log.push_redo(op);
        assert_eq!(log.redo_len(), 1);

        log.record(delete("b"));
        assert_eq!(log.redo_len(), 0);
        assert_eq!(log.undo_len(), 1);
        assert_eq!(log.peek_undo(), Some(&delete("b")));
    }

    #[test]
    fn push_undo_keeps_redo() {
        let mut log = CommandLog::new();
        log.push_redo(delete("a"));
        log.push_undo(delete("b"));
        assert_eq!(log.peek_redo(), Some(&delete("a")));
        log.clear();
        assert_eq!((log.undo_len(), log.redo_len()), (0, 0));
    }
}
