/// Position over the selected questions. Out-of-range moves are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    index: usize,
    len: usize,
}

impl Navigation {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Starts at `index`, clamped into range.
    pub fn at(len: usize, index: usize) -> Self {
        Self {
            index: index.min(len.saturating_sub(1)),
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.len > 0 && self.index == self.len - 1
    }

    /// Returns true if the index moved.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.len {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.len && index != self.index {
            self.index = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_clamped() {
        let mut nav = Navigation::new(5);
        assert!(!nav.previous());
        assert_eq!(nav.index(), 0);

        let mut nav = Navigation::at(5, 4);
        assert!(nav.is_last());
        assert!(!nav.next());
        assert_eq!(nav.index(), 4);

        assert!(!nav.jump_to(10));
        assert_eq!(nav.index(), 4);
        assert!(nav.jump_to(2));
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_restored_index_is_clamped() {
        assert_eq!(Navigation::at(3, 9).index(), 2);
        assert_eq!(Navigation::at(0, 9).index(), 0);
        assert!(!Navigation::new(0).is_last());
    }
}
