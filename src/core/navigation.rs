//! Branching back/forward history over view states.
//!
//! [`NavigationStack`] behaves like a browser history: an ordered list of entries plus
//! a cursor at the active one. Pushing after going back discards the abandoned forward
//! branch. Moving past either end is not an error, it simply returns `None`.

use crate::core::state::ViewState;

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationStack<T = ViewState> {
    entries: Vec<T>,
    /// Index of the active entry, `None` when empty
    cursor: Option<usize>,
}

impl<T> Default for NavigationStack<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }
}

impl<T> NavigationStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `state` after the cursor, dropping any forward branch first
    pub fn push(&mut self, state: T) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        if keep < self.entries.len() {
            log::debug!(
                "Discarding {} forward history entries",
                self.entries.len() - keep
            );
            self.entries.truncate(keep);
        }
        self.entries.push(state);
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn back(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    pub fn forward(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
