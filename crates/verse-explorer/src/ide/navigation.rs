use std::path::PathBuf;

/// Zero-based line and UTF-16 column.
///
/// Ordering is line-major, which is what range containment relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IdePosition {
    pub line: u32,
    pub character: u32,
}

impl IdePosition {
    pub const fn new(
        line: u32,
        character: u32,
    ) -> Self {
        Self {
            line,
            character,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IdeRange {
    pub start: IdePosition,
    pub end: IdePosition,
}

impl IdeRange {
    pub const fn new(
        start: IdePosition,
        end: IdePosition,
    ) -> Self {
        Self {
            start,
            end,
        }
    }

    /// Both ends inclusive.
    pub fn contains(
        &self,
        position: IdePosition,
    ) -> bool {
        self.start <= position && position <= self.end
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// The same range widened to start at column 0 of its first line.
    pub fn from_line_start(&self) -> Self {
        Self::new(IdePosition::new(self.start.line, 0), self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdeLocation {
    pub file_path: PathBuf,
    pub range: IdeRange,
}

impl IdeLocation {
    pub fn new(
        file_path: impl Into<PathBuf>,
        range: IdeRange,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            range,
        }
    }
}
