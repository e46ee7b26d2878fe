use std::fmt;

/// A location in source text.
///
/// All three coordinates are zero-indexed. `index` counts characters (not
/// bytes) from the start of the source. They are only converted to the
/// one-indexed form at the diagnostic boundary (see [`fmt::Display`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Character offset from the start of the source.
    pub index:  usize,
    /// Line number, starting at zero.
    pub line:   usize,
    /// Column within the line, starting at zero.
    pub column: usize,
}

impl Position {
    /// Creates a position from raw zero-indexed coordinates.
    #[must_use]
    pub const fn new(index: usize, line: usize, column: usize) -> Self {
        Self { index, line, column }
    }

    /// Moves the position past `ch`.
    ///
    /// A newline bumps the line and resets the column; every other
    /// character moves one column to the right.
    ///
    /// # Example
    /// ```
    /// use quill::position::Position;
    ///
    /// let mut pos = Position::default();
    /// pos.advance('a');
    /// pos.advance('\n');
    /// pos.advance('b');
    ///
    /// assert_eq!(pos, Position::new(3, 1, 1));
    /// ```
    pub const fn advance(&mut self, ch: char) {
        self.index += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// The source extent of a token or syntax node, `left` inclusive and
/// `right` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Where the construct starts.
    pub left:  Position,
    /// Just past where the construct ends.
    pub right: Position,
}

impl Span {
    #[must_use]
    pub const fn new(left: Position, right: Position) -> Self {
        Self { left, right }
    }

    /// Returns the smallest span covering both `self` and `other`.
    #[must_use]
    pub fn to(self, other: Self) -> Self {
        Self { left:  self.left.min(other.left),
               right: self.right.max(other.right), }
    }
}
