//! Session-history position for engines that don't expose `canGoBack`.
//!
//! The page's injected bridge script reports its index after every
//! document load, `pushState`/`replaceState`, hash change, and `popstate`.
//! Those reports are authoritative; the shell only steps the index down
//! between pressing back and the page's next report.
#![cfg_attr(not(feature = "native"), allow(dead_code))]

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageHistory {
    index: usize,
}

impl PageHistory {
    /// Applies a position reported by the page.
    pub fn report(&mut self, index: usize) {
        self.index = index;
    }

    pub const fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Moves ahead of the engine's `history.back()` so a second back press
    /// before the page reports again doesn't overshoot.
    pub fn step_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_cannot_go_back() {
        let mut history = PageHistory::default();
        history.report(0);
        assert!(!history.can_go_back());
        assert!(!history.step_back());
    }

    #[test]
    fn page_initiated_back_is_followed() {
        let mut history = PageHistory::default();
        // home -> cart -> home as three separate documents
        history.report(0);
        history.report(1);
        history.report(2);
        // page links back twice through `history.back()`
        history.report(1);
        history.report(0);

        assert!(!history.can_go_back());
        assert!(!history.step_back());
    }

    #[test]
    fn same_document_entries_count_as_history() {
        let mut history = PageHistory::default();
        history.report(0);
        // pushState or a hash change in a single-page app
        history.report(1);

        assert!(history.can_go_back());
    }

    #[test]
    fn back_key_then_new_document_reports_its_own_index() {
        let mut history = PageHistory::default();
        history.report(0);
        history.report(1);

        assert!(history.step_back());
        // returned to index 0, then the user follows a link to /about
        history.report(0);
        history.report(1);

        assert!(history.can_go_back());
        assert!(history.step_back());
        assert!(!history.can_go_back());
    }

    #[test]
    fn repeated_back_before_report_does_not_overshoot() {
        let mut history = PageHistory::default();
        history.report(1);

        assert!(history.step_back());
        assert!(!history.step_back());
    }

    #[test]
    fn reset_forgets_position() {
        let mut history = PageHistory::default();
        history.report(4);
        history.reset();
        assert!(!history.can_go_back());
    }
}
