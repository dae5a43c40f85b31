//! Generic rows read from a spreadsheet, before any mapping is applied.

use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Text(String),
  Number(f64),
  Empty,
}

impl Cell {
  pub fn is_blank(&self) -> bool {
    match self {
      Self::Text(s) => s.trim().is_empty(),
      Self::Number(_) => false,
      Self::Empty => true,
    }
  }

  /// The cell as text, or `None` when it is blank.
  pub fn text(&self) -> Option<String> {
    (!self.is_blank()).then(|| self.to_string())
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Text(s) => f.write_str(s),
      Self::Number(n) => write!(f, "{n}"),
      Self::Empty => Ok(()),
    }
  }
}

impl From<&str> for Cell {
  fn from(s: &str) -> Self {
    if s.is_empty() {
      Self::Empty
    } else {
      Self::Text(s.to_owned())
    }
  }
}

/// An ordered mapping from column name to cell. Column order follows the
/// source file's header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
  cells: Vec<(String, Cell)>,
}

impl Row {
  pub fn new() -> Self { Self::default() }

  /// Set `column` to `cell`, replacing an existing value in place.
  pub fn insert(&mut self, column: impl Into<String>, cell: Cell) {
    let column = column.into();
    match self.cells.iter_mut().find(|(name, _)| *name == column) {
      Some((_, slot)) => *slot = cell,
      None => self.cells.push((column, cell)),
    }
  }

  /// Builder-style [`insert`](Self::insert).
  pub fn with(mut self, column: impl Into<String>, cell: impl Into<Cell>) -> Self {
    self.insert(column, cell.into());
    self
  }

  pub fn get(&self, column: &str) -> Option<&Cell> {
    self
      .cells
      .iter()
      .find_map(|(name, cell)| (name == column).then_some(cell))
  }

  /// Column names in header order.
  pub fn columns(&self) -> impl Iterator<Item = &str> {
    self.cells.iter().map(|(name, _)| name.as_str())
  }

  pub fn len(&self) -> usize { self.cells.len() }

  pub fn is_empty(&self) -> bool { self.cells.is_empty() }
}
