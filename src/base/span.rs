//! Byte-offset ranges and line/column conversion.
//!
//! Everything inside the engine is addressed by byte offsets
//! ([`TextSize`], [`TextRange`]). Editors speak line/column with UTF-16
//! columns, so [`LineIndex`] converts between the two at the boundary.

use rustc_hash::FxHashMap;

use super::{Position, Span};

pub use text_size::{TextRange, TextSize};

/// A line/column pair with the column counted in UTF-8 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WideChar {
    /// Start offset relative to the line start.
    start: TextSize,
    /// End offset relative to the line start.
    end: TextSize,
}

impl WideChar {
    fn len(&self) -> TextSize {
        self.end - self.start
    }

    fn len_utf16(&self) -> u32 {
        if u32::from(self.len()) == 4 { 2 } else { 1 }
    }
}

/// Maps byte offsets to line/column positions and back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line.
    line_starts: Vec<TextSize>,
    /// Non-ASCII characters per line, for UTF-16 column conversion.
    wide_chars: FxHashMap<u32, Vec<WideChar>>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        let mut wide_chars = FxHashMap::default();
        let mut line_wide = Vec::new();
        let mut line = 0u32;

        for (idx, c) in text.char_indices() {
            let offset = TextSize::from(idx as u32);
            if c == '\n' {
                if !line_wide.is_empty() {
                    wide_chars.insert(line, std::mem::take(&mut line_wide));
                }
                line += 1;
                line_starts.push(offset + TextSize::of(c));
                continue;
            }
            if !c.is_ascii() {
                let line_start = line_starts[line_starts.len() - 1];
                let start = offset - line_start;
                line_wide.push(WideChar {
                    start,
                    end: start + TextSize::of(c),
                });
            }
        }
        if !line_wide.is_empty() {
            wide_chars.insert(line, line_wide);
        }

        Self {
            line_starts,
            wide_chars,
            len: TextSize::of(text),
        }
    }

    /// Number of lines (a trailing newline opens a final empty line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line/column (UTF-8 column) of an offset. Offsets past the end clamp.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Offset of a line/column (UTF-8 column). Columns past the line end clamp.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(line_col.line as usize)?;
        let line_end = self
            .line_starts
            .get(line_col.line as usize + 1)
            .copied()
            .unwrap_or(self.len);
        Some((start + TextSize::from(line_col.col)).min(line_end))
    }

    /// Convert a UTF-8 column to a UTF-16 column on the same line.
    pub fn to_utf16(&self, line_col: LineCol) -> LineCol {
        let mut col = line_col.col;
        if let Some(wide) = self.wide_chars.get(&line_col.line) {
            for c in wide {
                if u32::from(c.end) <= line_col.col {
                    col -= u32::from(c.len()) - c.len_utf16();
                } else {
                    break;
                }
            }
        }
        LineCol {
            line: line_col.line,
            col,
        }
    }

    /// Convert a UTF-16 column to a UTF-8 column on the same line.
    pub fn to_utf8(&self, line_col: LineCol) -> LineCol {
        let mut col = line_col.col;
        if let Some(wide) = self.wide_chars.get(&line_col.line) {
            for c in wide {
                if col > u32::from(c.start) {
                    col += u32::from(c.len()) - c.len_utf16();
                } else {
                    break;
                }
            }
        }
        LineCol {
            line: line_col.line,
            col,
        }
    }

    /// Editor position (UTF-16 column) of an offset.
    pub fn position(&self, offset: TextSize) -> Position {
        let LineCol { line, col } = self.to_utf16(self.line_col(offset));
        Position::new(line, col)
    }

    /// Offset of an editor position (UTF-16 column).
    pub fn offset_at(&self, position: Position) -> Option<TextSize> {
        self.offset(self.to_utf8(LineCol {
            line: position.line,
            col: position.column,
        }))
    }

    /// Editor span of a byte range.
    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }
}
