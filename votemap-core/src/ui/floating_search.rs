use std::time::Duration;

/// Delay before the input is focused after expanding,
/// so that the expand transition can finish.
pub const FOCUS_DELAY: Duration = Duration::from_millis(300);

/// Something the view has to do after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEffect {
    FocusInput { after: Duration },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FloatingSearch {
    expanded: bool,
}

impl FloatingSearch {
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) -> Option<SearchEffect> {
        self.expanded = !self.expanded;
        self.expanded
            .then_some(SearchEffect::FocusInput { after: FOCUS_DELAY })
    }

    pub fn escape(&mut self) {
        self.expanded = false;
    }

    /// A mouse down somewhere in the document.
    pub fn pointer_down(&mut self, inside: bool) {
        if !inside {
            self.expanded = false;
        }
    }
}
