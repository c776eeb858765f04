//! Modal overlays

/// An overlay drawn on top of the active view
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Keyboard shortcut reference
    Help,
}

/// Overlays in draw order; only the top one receives keys
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Open `modal`, or close it if it is already on top
    pub fn toggle(&mut self, modal: Modal) {
        if self.top() == Some(&modal) {
            self.stack.pop();
        } else {
            self.stack.push(modal);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
