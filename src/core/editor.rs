//! Dialog editing state.
//!
//! Every modal editor in the builder (trigger, communication, campaign name)
//! is either closed or editing exactly one draft. Committing or discarding
//! always returns the editor to [`Editor::Closed`].

/// A modal editor holding at most one draft.
#[derive(Debug, Clone, PartialEq)]
pub enum Editor<T> {
    /// No dialog open.
    Closed,
    /// Dialog open with an in-progress draft.
    Editing(T),
}

impl<T> Editor<T> {
    /// Open the editor with `draft`, replacing any draft already open.
    pub fn open(&mut self, draft: T) {
        *self = Editor::Editing(draft);
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Editor::Editing(_))
    }

    pub fn draft(&self) -> Option<&T> {
        match self {
            Editor::Editing(draft) => Some(draft),
            Editor::Closed => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut T> {
        match self {
            Editor::Editing(draft) => Some(draft),
            Editor::Closed => None,
        }
    }

    /// Close the editor and hand back the draft (commit path).
    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, Editor::Closed) {
            Editor::Editing(draft) => Some(draft),
            Editor::Closed => None,
        }
    }

    /// Close the editor and drop the draft (discard path).
    pub fn close(&mut self) {
        *self = Editor::Closed;
    }
}

impl<T> Default for Editor<T> {
    fn default() -> Self {
        Editor::Closed
    }
}
