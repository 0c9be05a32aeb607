/// A line/column source position.
///
/// Positions compare by line first, then column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    /// Line in the source file, 0-based.
    pub line: u32,
    /// Column in the source file, 0-based.
    ///
    /// The column is given in UTF-16 code points.
    pub column: u32,
}

impl SourcePosition {
    /// Create a new SourcePosition with the given line/column.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A Source Context allowing fast line/column to byte offset remapping.
///
/// The line offset table is built once, up front; converting a position then
/// only ever touches the single line it addresses.
#[derive(Debug)]
pub struct SourceContext<T> {
    src: T,
    line_offsets: Vec<u32>,
}

/// An Error that can happen when building a [`SourceContext`].
#[derive(Debug, thiserror::Error)]
#[error("source could not be converted to source context")]
pub struct SourceContextError(());

impl<T: AsRef<str>> SourceContext<T> {
    /// Construct a new Source Context from the given `src` buffer.
    pub fn new(src: T) -> Result<Self, SourceContextError> {
        let buf = src.as_ref();
        let len: u32 = buf.len().try_into().map_err(|_| SourceContextError(()))?;

        // `line_offsets[n]` is the start of line `n + 1`, the last entry is
        // the total length of the buffer.
        let mut line_offsets: Vec<u32> = buf
            .match_indices('\n')
            .map(|(idx, _)| idx as u32 + 1)
            .collect();
        line_offsets.push(len);

        Ok(Self { src, line_offsets })
    }

    /// The total length of the source, in bytes.
    pub fn len(&self) -> u32 {
        self.line_offsets.last().copied().unwrap_or(0)
    }

    /// Returns `true` if the underlying source is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts the given line/column to the corresponding byte offset inside the source.
    ///
    /// The column is interpreted in UTF-16 code points. A column past the end
    /// of its line clamps to the end of that line, before its line
    /// terminator. A line past the end of the source clamps to the end of the
    /// source. Slightly-off mappings thus still yield a usable offset.
    pub fn position_to_offset(&self, position: SourcePosition) -> u32 {
        let SourcePosition { line, column } = position;

        let to = match self.line_offsets.get(line as usize) {
            Some(to) => *to,
            None => return self.len(),
        };
        let from = if line == 0 {
            0
        } else {
            self.line_offsets[line as usize - 1]
        };

        let line = match self.src.as_ref().get(from as usize..to as usize) {
            Some(line) => line,
            None => return self.len(),
        };
        let line = line.trim_end_matches(|c| matches!(c, '\r' | '\n'));

        let mut byte_offset = from;
        let mut utf16_offset = 0;
        for c in line.chars() {
            if utf16_offset >= column {
                break;
            }
            utf16_offset += c.len_utf16() as u32;
            byte_offset += c.len_utf8() as u32;
        }

        byte_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_ascii_positions() {
        let ctx = SourceContext::new("let n=1;\nlet m=2;").unwrap();

        assert_eq!(ctx.position_to_offset(SourcePosition::new(0, 0)), 0);
        assert_eq!(ctx.position_to_offset(SourcePosition::new(0, 4)), 4);
        assert_eq!(ctx.position_to_offset(SourcePosition::new(1, 0)), 9);
        assert_eq!(ctx.position_to_offset(SourcePosition::new(1, 4)), 13);
    }

    #[test]
    fn counts_columns_in_utf16() {
        // `𝒳` is two UTF-16 code points but four UTF-8 bytes
        let ctx = SourceContext::new("𝒳x=1;").unwrap();

        assert_eq!(ctx.position_to_offset(SourcePosition::new(0, 2)), 4);
        assert_eq!(ctx.position_to_offset(SourcePosition::new(0, 3)), 5);
    }

    #[test]
    fn clamps_out_of_range_positions() {
        let ctx = SourceContext::new("ab\ncd").unwrap();

        // column past the line end clamps to before the line terminator
        assert_eq!(ctx.position_to_offset(SourcePosition::new(0, 99)), 2);
        // line past the source end clamps to the source end
        assert_eq!(ctx.position_to_offset(SourcePosition::new(7, 0)), 5);
    }

    #[test]
    fn column_clamp_excludes_the_line_terminator() {
        let ctx = SourceContext::new("ab\r\ncd\n").unwrap();

        assert_eq!(ctx.position_to_offset(SourcePosition::new(0, 99)), 2);
        assert_eq!(ctx.position_to_offset(SourcePosition::new(1, 99)), 6);
        // a column addressing the terminator itself is still reachable
        assert_eq!(ctx.position_to_offset(SourcePosition::new(0, 2)), 2);
    }

    #[test]
    fn handles_trailing_newline() {
        let ctx = SourceContext::new("ab\n").unwrap();

        assert_eq!(ctx.position_to_offset(SourcePosition::new(1, 0)), 3);
    }
}
