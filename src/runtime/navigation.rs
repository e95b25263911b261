/// Which dropdown row is active and whether the dropdown is open at all.
///
/// Invariant: while open over a non-empty result set, `active_index` stays in
/// range; any result-set shape change or close resets it to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    active_index: usize,
    open: bool,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// The result set changed shape: open at the top when rows exist and the
    /// input is focused, otherwise close.
    pub(crate) fn sync(&mut self, result_len: usize, focused: bool) {
        if result_len > 0 && focused {
            self.open = true;
            self.active_index = 0;
        } else {
            self.close();
        }
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
        self.active_index = 0;
    }

    /// ArrowDown. Wraps when the index reaches `len - 2`, as shipped: the
    /// last row is reachable only via ArrowUp.
    pub(crate) fn move_down(&mut self, result_len: usize) -> Option<usize> {
        if !self.open || result_len == 0 {
            return None;
        }
        self.active_index = if self.active_index + 2 >= result_len {
            0
        } else {
            self.active_index + 1
        };
        Some(self.active_index)
    }

    /// ArrowUp. Wraps from the top to the last row.
    pub(crate) fn move_up(&mut self, result_len: usize) -> Option<usize> {
        if !self.open || result_len == 0 {
            return None;
        }
        self.active_index = if self.active_index == 0 {
            result_len - 1
        } else {
            self.active_index - 1
        };
        Some(self.active_index)
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationState;

    fn open_over(len: usize) -> NavigationState {
        let mut nav = NavigationState::new();
        nav.sync(len, true);
        nav
    }

    #[test]
    fn sync_opens_at_the_top_only_while_focused() {
        let mut nav = NavigationState::new();
        nav.sync(3, false);
        assert!(!nav.is_open());

        nav.sync(3, true);
        assert!(nav.is_open());
        assert_eq!(nav.active_index(), 0);

        nav.sync(0, true);
        assert!(!nav.is_open());
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn arrow_down_wraps_at_len_minus_two() {
        // Three rows: 0 -> 1, then 1 (== len - 2) wraps to 0. Row 2 is never
        // reached going down.
        let mut nav = open_over(3);
        assert_eq!(nav.move_down(3), Some(1));
        assert_eq!(nav.move_down(3), Some(0));
        assert_eq!(nav.move_down(3), Some(1));
    }

    #[test]
    fn arrow_up_wraps_to_the_last_row() {
        let mut nav = open_over(3);
        assert_eq!(nav.move_up(3), Some(2));
        assert_eq!(nav.move_up(3), Some(1));
        assert_eq!(nav.move_up(3), Some(0));
        assert_eq!(nav.move_up(3), Some(2));
    }

    #[test]
    fn single_row_pins_to_index_zero() {
        let mut nav = open_over(1);
        assert_eq!(nav.move_down(1), Some(0));
        assert_eq!(nav.move_up(1), Some(0));
    }

    #[test]
    fn arrows_ignore_a_closed_dropdown() {
        let mut nav = NavigationState::new();
        assert_eq!(nav.move_down(3), None);
        assert_eq!(nav.move_up(3), None);
    }

    #[test]
    fn close_resets_the_index() {
        let mut nav = open_over(3);
        nav.move_up(3);
        assert_eq!(nav.active_index(), 2);
        nav.close();
        assert!(!nav.is_open());
        assert_eq!(nav.active_index(), 0);
    }
}
