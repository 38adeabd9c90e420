//! Per-file context for the analyzer.

use std::path::{Path, PathBuf};

/// Context for one source file being analyzed.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        // A single-file root strips to an empty path.
        let relative_path = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => path.to_path_buf(),
        };

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Calculates byte offset for a given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-indexed line number
    /// * `column` - 0-indexed byte column
    ///
    /// # Returns
    ///
    /// Byte offset from the start of the file, or the file length if out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.content.split_inclusive('\n').enumerate() {
            if i + 1 == line {
                return offset + column.min(line_content.len());
            }
            offset += line_content.len();
        }

        offset
    }

    /// Returns `(offset, length)` of the span from `line:column` to the end
    /// of that line, excluding the line terminator.
    #[must_use]
    pub fn span_for(&self, line: usize, column: usize) -> (usize, usize) {
        let offset = self.offset_for(line, column);
        let rest = &self.content[offset.min(self.content.len())..];
        let length = rest.find(['\r', '\n']).unwrap_or(rest.len());
        (offset, length)
    }
}
