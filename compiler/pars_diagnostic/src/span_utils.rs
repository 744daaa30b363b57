//! Line and column lookup for spans.
//!
//! Error values carry 1-based line/column positions. They are computed from
//! byte spans through a [`LineOffsetTable`] built once per source file.

use pars_ir::Span;

/// Pre-computed line start offsets for O(log L) lookups.
///
/// ```
/// use pars_diagnostic::LineOffsetTable;
///
/// let source = "let a = 1\nlet b = a";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 14), (2, 5));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Scan the source once for newlines.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based `(line, column)`; the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// A named source text with its line table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    text: String,
    lines: LineOffsetTable,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        SourceFile {
            name: name.into(),
            text,
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based `(line, column)` of the span start.
    pub fn position(&self, span: Span) -> (u32, u32) {
        self.lines.offset_to_line_col(&self.text, span.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_columns() {
        let source = "hello world";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
        assert_eq!(table.offset_to_line_col(source, 6), (1, 7));
        assert_eq!(table.line_count(), 1);
    }

    #[test]
    fn lines_after_newlines() {
        let source = "abc\ndefgh\nij";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_from_offset(3), 1);
        assert_eq!(table.line_from_offset(4), 2);
        assert_eq!(table.offset_to_line_col(source, 7), (2, 4));
        assert_eq!(table.offset_to_line_col(source, 11), (3, 2));
    }

    #[test]
    fn columns_count_characters() {
        let source = "\"é\" + x";
        let table = LineOffsetTable::build(source);
        // 'x' sits after a two-byte character
        assert_eq!(table.offset_to_line_col(source, 7), (1, 7));
    }

    #[test]
    fn source_file_positions() {
        let file = SourceFile::new("main.pars", "let a = 1\n  missing");
        assert_eq!(file.position(Span::new(12, 19)), (2, 3));
        assert_eq!(file.name(), "main.pars");
    }
}
