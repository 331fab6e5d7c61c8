use crate::text::Text;

/// Position inside a [`Text`]: line index and column in codepoints.
///
/// Ordering is document order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark {
    pub line: usize,
    pub col: usize,
}

impl Mark {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Two marks plus which of them moves under keyboard input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Selection {
    pub range: [Mark; 2],
    /// Index of the active end, 0 or 1.
    pub end: usize,
    /// Pixel x of the active end within its line, set by horizontal moves
    /// and kept for vertical ones.
    pub cursor_x: f32,
}

impl Selection {
    pub fn caret(mark: Mark) -> Self {
        Self {
            range: [mark, mark],
            end: 1,
            cursor_x: 0.0,
        }
    }

    pub fn all(text: &Text) -> Self {
        let mut sel = Self::default();
        sel.select_all(text);
        sel
    }

    pub fn select_all(&mut self, text: &Text) {
        self.range = [Mark::default(), text.end_mark()];
        self.end = 1;
    }

    pub fn is_empty(&self) -> bool {
        self.range[0] == self.range[1]
    }

    pub fn active(&self) -> Mark {
        self.range[self.end]
    }

    pub fn anchor(&self) -> Mark {
        self.range[1 - self.end]
    }

    pub fn set_active(&mut self, mark: Mark) {
        self.range[self.end] = mark;
    }

    /// Collapse to a caret at `mark`.
    pub fn collapse_to(&mut self, mark: Mark) {
        self.range = [mark, mark];
    }

    /// Swap the ends when they are out of document order; the active index
    /// follows the swap.
    pub fn fix_order(&mut self) {
        if self.range[0] > self.range[1] {
            self.range.swap(0, 1);
            self.end = 1 - self.end;
        }
    }

    pub fn is_valid(&self, text: &Text) -> bool {
        self.end <= 1 && self.range.iter().all(|&m| text.mark_is_valid(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_order_is_lexicographic() {
        assert!(Mark::new(0, 9) < Mark::new(1, 0));
        assert!(Mark::new(2, 1) > Mark::new(2, 0));
    }

    #[test]
    fn test_fix_order_swaps_and_flips_end() {
        let mut sel = Selection {
            range: [Mark::new(1, 4), Mark::new(0, 2)],
            end: 1,
            cursor_x: 0.0,
        };
        sel.fix_order();
        assert_eq!(sel.range, [Mark::new(0, 2), Mark::new(1, 4)]);
        assert_eq!(sel.end, 0);

        // already ordered: untouched
        sel.fix_order();
        assert_eq!(sel.end, 0);
        assert_eq!(sel.active(), Mark::new(0, 2));
    }

    #[test]
    fn test_select_all() {
        let text = Text::new("abc\nde");
        let sel = Selection::all(&text);
        assert_eq!(sel.range, [Mark::new(0, 0), Mark::new(1, 2)]);
        assert_eq!(sel.end, 1);
        assert!(sel.is_valid(&text));
    }
}
