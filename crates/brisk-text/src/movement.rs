//! Caret movement over a [`Text`].
//!
//! Horizontal steps move by one grapheme cluster (columns still count
//! codepoints, so a cluster of several codepoints is skipped as a unit).
//! Word steps scan within the current line and stop at the first change
//! between whitespace, word characters (alphanumeric or `_`) and other
//! punctuation, except that a single leading whitespace is skipped over.

use unicode_segmentation::UnicodeSegmentation;

use crate::mark::{Mark, Selection};
use crate::text::Text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Word,
    Other,
}

fn classify(ch: char) -> CharClass {
    if ch == ' ' || ch == '\t' {
        CharClass::Whitespace
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Other
    }
}

/// Number of codepoints a word step from `mark` covers. Zero at a line edge.
fn word_step(text: &Text, mark: Mark, dir: Direction) -> usize {
    let line = text.line(mark.line);
    let split = line.char_indices().nth(mark.col).map_or(line.len(), |(i, _)| i);
    let chars: Box<dyn Iterator<Item = char>> = match dir {
        Direction::Right => Box::new(line[split..].chars()),
        Direction::Left => Box::new(line[..split].chars().rev()),
    };

    let mut prev = CharClass::Other;
    let mut moved = 0;
    for (i, ch) in chars.enumerate() {
        let class = classify(ch);
        if i > 0 {
            let boundary = match (prev, class) {
                (CharClass::Word, CharClass::Other) | (CharClass::Other, CharClass::Word) => true,
                (CharClass::Word | CharClass::Other, CharClass::Whitespace) => true,
                (CharClass::Whitespace, CharClass::Word | CharClass::Other) => i > 1,
                _ => false,
            };
            if boundary {
                break;
            }
        }
        prev = class;
        moved += 1;
    }
    moved
}

/// Codepoints in the grapheme cluster next to `mark` in `dir`, or `None`
/// at a line edge.
fn grapheme_step(text: &Text, mark: Mark, dir: Direction) -> Option<usize> {
    let line = text.line(mark.line);
    let split = line.char_indices().nth(mark.col).map_or(line.len(), |(i, _)| i);
    let cluster = match dir {
        Direction::Right => line[split..].graphemes(true).next(),
        Direction::Left => line[..split].graphemes(true).next_back(),
    };
    cluster.map(|g| g.chars().count())
}

/// Move `mark` one grapheme (or one word with `by_word`) in `dir`,
/// wrapping to the neighbouring line at line edges.
pub fn move_mark_h(mark: &mut Mark, text: &Text, dir: Direction, by_word: bool) {
    if by_word {
        let n = word_step(text, *mark, dir);
        if n > 0 {
            match dir {
                Direction::Right => mark.col += n,
                Direction::Left => mark.col -= n,
            }
            return;
        }
    }

    match (dir, grapheme_step(text, *mark, dir)) {
        (Direction::Right, Some(n)) => mark.col += n,
        (Direction::Left, Some(n)) => mark.col -= n,
        (Direction::Right, None) => {
            if mark.line < text.last_line() {
                *mark = Mark::new(mark.line + 1, 0);
            }
        }
        (Direction::Left, None) => {
            if mark.line > 0 {
                let line = mark.line - 1;
                *mark = Mark::new(line, text.line_len(line));
            }
        }
    }
}

/// Arrow-key handling. Without `shift` a non-empty selection collapses to
/// its edge in the direction of travel instead of moving.
pub fn move_selection_h(sel: &mut Selection, text: &Text, dir: Direction, shift: bool, by_word: bool) {
    if !shift && !sel.is_empty() {
        match dir {
            Direction::Right => sel.range[0] = sel.range[1],
            Direction::Left => sel.range[1] = sel.range[0],
        }
        return;
    }

    let mut active = sel.active();
    move_mark_h(&mut active, text, dir, by_word);
    sel.set_active(active);
    if !shift {
        sel.range[1 - sel.end] = active;
    }
    sel.fix_order();
    tracing::trace!(line = active.line, col = active.col, shift, "caret moved");
}

/// Move the active end to the start of its line.
pub fn home(sel: &mut Selection, shift: bool) {
    let mut active = sel.active();
    active.col = 0;
    place_active(sel, active, shift);
}

/// Move the active end to the end of its line.
pub fn end(sel: &mut Selection, text: &Text, shift: bool) {
    let mut active = sel.active();
    active.col = text.line_len(active.line);
    place_active(sel, active, shift);
}

fn place_active(sel: &mut Selection, active: Mark, shift: bool) {
    sel.set_active(active);
    if !shift {
        sel.range[1 - sel.end] = active;
    }
    sel.fix_order();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(text: &str, mark: Mark, dir: Direction, by_word: bool) -> Mark {
        let text = Text::new(text);
        let mut m = mark;
        move_mark_h(&mut m, &text, dir, by_word);
        m
    }

    #[test]
    fn test_word_right_stops_before_whitespace() {
        assert_eq!(step("foo bar", Mark::new(0, 0), Direction::Right, true), Mark::new(0, 3));
    }

    #[test]
    fn test_single_leading_space_is_skipped() {
        assert_eq!(step("foo bar", Mark::new(0, 3), Direction::Right, true), Mark::new(0, 7));
        // two spaces: the run of whitespace is its own word
        assert_eq!(step("foo  bar", Mark::new(0, 3), Direction::Right, true), Mark::new(0, 5));
    }

    #[test]
    fn test_word_boundary_between_word_and_punctuation() {
        assert_eq!(step("a.b(c)", Mark::new(0, 0), Direction::Right, true), Mark::new(0, 1));
        assert_eq!(step("a.b(c)", Mark::new(0, 1), Direction::Right, true), Mark::new(0, 2));
        assert_eq!(step("foo_bar9 x", Mark::new(0, 0), Direction::Right, true), Mark::new(0, 8));
    }

    #[test]
    fn test_word_left() {
        assert_eq!(step("foo bar", Mark::new(0, 7), Direction::Left, true), Mark::new(0, 4));
        assert_eq!(step("foo bar", Mark::new(0, 4), Direction::Left, true), Mark::new(0, 0));
    }

    #[test]
    fn test_word_step_at_line_edge_crosses_line() {
        assert_eq!(step("ab\ncd", Mark::new(0, 2), Direction::Right, true), Mark::new(1, 0));
        assert_eq!(step("ab\ncd", Mark::new(1, 0), Direction::Left, true), Mark::new(0, 2));
    }

    #[test]
    fn test_grapheme_cluster_moves_as_unit() {
        // e + combining acute accent
        let s = "e\u{301}x";
        assert_eq!(step(s, Mark::new(0, 0), Direction::Right, false), Mark::new(0, 2));
        assert_eq!(step(s, Mark::new(0, 2), Direction::Left, false), Mark::new(0, 0));
    }

    #[test]
    fn test_text_edges_do_not_move() {
        assert_eq!(step("ab", Mark::new(0, 0), Direction::Left, false), Mark::new(0, 0));
        assert_eq!(step("ab", Mark::new(0, 2), Direction::Right, false), Mark::new(0, 2));
    }

    #[test]
    fn test_arrow_collapses_selection_without_shift() {
        let text = Text::new("hello");
        let mut sel = Selection::all(&text);
        move_selection_h(&mut sel, &text, Direction::Left, false, false);
        assert_eq!(sel.range, [Mark::new(0, 0), Mark::new(0, 0)]);

        let mut sel = Selection::all(&text);
        move_selection_h(&mut sel, &text, Direction::Right, false, false);
        assert_eq!(sel.range, [Mark::new(0, 5), Mark::new(0, 5)]);
    }

    #[test]
    fn test_shift_arrow_extends_and_reorders() {
        let text = Text::new("hello");
        let mut sel = Selection::caret(Mark::new(0, 2));
        sel.end = 0;
        move_selection_h(&mut sel, &text, Direction::Right, true, false);
        move_selection_h(&mut sel, &text, Direction::Right, true, false);
        assert_eq!(sel.range, [Mark::new(0, 2), Mark::new(0, 4)]);
        assert_eq!(sel.active(), Mark::new(0, 4));
    }

    #[test]
    fn test_home_and_end() {
        let text = Text::new("one\ntwo three");
        let mut sel = Selection::caret(Mark::new(1, 4));
        end(&mut sel, &text, true);
        assert_eq!(sel.range, [Mark::new(1, 4), Mark::new(1, 9)]);
        home(&mut sel, false);
        assert_eq!(sel.range, [Mark::new(1, 0), Mark::new(1, 0)]);
    }
}
