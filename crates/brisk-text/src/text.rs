use crate::mark::Mark;

/// UTF-8 text with an index of line starts.
///
/// `line_offsets[i]` is the byte offset where line `i + 1` begins, i.e. one
/// past its preceding `'\n'`. Line content never includes the newline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    buf: String,
    line_offsets: Vec<usize>,
}

impl Text {
    pub fn new(value: &str) -> Self {
        let mut text = Self::default();
        text.set(value);
        text
    }

    /// Replace the whole contents.
    pub fn set(&mut self, value: &str) {
        self.buf.clear();
        self.buf.push_str(value);
        self.line_offsets = line_starts(value, 0).collect();
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn line_offsets(&self) -> &[usize] {
        &self.line_offsets
    }

    /// Number of lines; an empty text has one empty line.
    pub fn line_count(&self) -> usize {
        self.line_offsets.len() + 1
    }

    /// Index of the last line.
    pub fn last_line(&self) -> usize {
        self.line_offsets.len()
    }

    pub fn line_start(&self, line: usize) -> usize {
        if line == 0 { 0 } else { self.line_offsets[line - 1] }
    }

    pub fn line_end(&self, line: usize) -> usize {
        if line < self.line_offsets.len() {
            self.line_offsets[line] - 1
        } else {
            self.buf.len()
        }
    }

    pub fn line(&self, line: usize) -> &str {
        &self.buf[self.line_start(line)..self.line_end(line)]
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        (0..self.line_count()).map(|i| self.line(i))
    }

    /// Number of codepoints on `line`.
    pub fn line_len(&self, line: usize) -> usize {
        self.line(line).chars().count()
    }

    pub fn end_mark(&self) -> Mark {
        let line = self.last_line();
        Mark::new(line, self.line_len(line))
    }

    pub fn mark_is_valid(&self, mark: Mark) -> bool {
        mark.line <= self.last_line() && mark.col <= self.line_len(mark.line)
    }

    /// Byte offset of `mark`, scanning the codepoints of its line.
    /// Columns past the end of the line land on the line end.
    pub fn byte_offset(&self, mark: Mark) -> usize {
        let start = self.line_start(mark.line);
        self.line(mark.line)
            .char_indices()
            .nth(mark.col)
            .map(|(offset, _)| start + offset)
            .unwrap_or_else(|| self.line_end(mark.line))
    }

    /// Mark at byte `offset`, which must sit on a char boundary.
    pub fn mark_from_byte_offset(&self, offset: usize) -> Mark {
        let line = self.line_offsets.partition_point(|&start| start <= offset);
        let start = self.line_start(line);
        Mark::new(line, self.buf[start..offset].chars().count())
    }

    /// Text between two marks, in either order.
    pub fn slice(&self, a: Mark, b: Mark) -> &str {
        let (a, b) = (self.byte_offset(a), self.byte_offset(b));
        &self.buf[a.min(b)..a.max(b)]
    }

    /// Erase `from..to` and insert `with` in its place. Returns the mark at
    /// the end of the inserted text.
    pub fn replace(&mut self, from: Mark, to: Mark, with: &str) -> Mark {
        let (from, to) = if to < from { (to, from) } else { (from, to) };
        debug_assert!(self.mark_is_valid(from) && self.mark_is_valid(to), "mark outside text");

        let start = self.byte_offset(from);
        let end = self.byte_offset(to);
        let removed = end - start;
        self.buf.replace_range(start..end, "");
        self.line_offsets.drain(from.line..to.line);
        for offset in &mut self.line_offsets[from.line..] {
            *offset -= removed;
        }

        self.buf.insert_str(start, with);
        for offset in &mut self.line_offsets[from.line..] {
            *offset += with.len();
        }
        let inserted: Vec<usize> = line_starts(with, start).collect();
        let inserted_lines = inserted.len();
        self.line_offsets.splice(from.line..from.line, inserted);

        let last_inserted = with.rsplit('\n').next().unwrap_or("");
        let col = last_inserted.chars().count();
        if inserted_lines == 0 {
            Mark::new(from.line, from.col + col)
        } else {
            Mark::new(from.line + inserted_lines, col)
        }
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Text::new(value)
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.buf)
    }
}

fn line_starts(s: &str, base: usize) -> impl Iterator<Item = usize> + '_ {
    s.match_indices('\n').map(move |(i, _)| base + i + 1)
}
