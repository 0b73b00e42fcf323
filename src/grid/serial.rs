//! Linear 81-character grid serialization and console rendering

use std::fmt;

use crate::grid::board::{EMPTY, Grid};
use crate::grid::coords;
use crate::io::error::{GridError, Result};

impl Grid {
    /// Serialize the grid as 81 characters in row-major order
    ///
    /// Digits render as `'1'`-`'9'`, empty cells as `'.'`.
    pub fn to_line_string(&self) -> String {
        let mut out = String::with_capacity(coords::GRID_CELLS);
        for cell in 0..coords::GRID_CELLS {
            let digit = self.get(cell);
            out.push(if digit == EMPTY {
                '.'
            } else {
                char::from(b'0' + digit)
            });
        }
        out
    }

    /// Rebuild a grid from an 81-character row-major sequence
    ///
    /// Characters `'1'`-`'9'` become digits; `'0'` and every other character
    /// become empty cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::MalformedGridString`] when the input does not
    /// hold exactly 81 characters.
    pub fn from_line_string(text: &str) -> Result<Self> {
        let length = text.chars().count();
        if length != coords::GRID_CELLS {
            return Err(GridError::MalformedGridString { length });
        }

        let mut grid = Self::new();
        for (cell, c) in text.chars().enumerate() {
            if let Some(digit) = c.to_digit(10).filter(|&d| d >= 1) {
                grid.put(cell, digit as u8);
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    /// Render the boxed console layout, with `'#'` marking empty cells
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..coords::LINE_CELLS {
            if row > 0 && row % coords::SEGMENTS == 0 {
                writeln!(f, "------+-------+------")?;
            }
            let mut line = String::with_capacity(24);
            for (col, &cell) in coords::row_cells(row).iter().enumerate() {
                if col > 0 && col % coords::SEGMENTS == 0 {
                    line.push_str("| ");
                }
                let digit = self.get(cell);
                line.push(if digit == EMPTY {
                    '#'
                } else {
                    char::from(b'0' + digit)
                });
                line.push(' ');
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_string_round_trip() {
        let text = "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let Ok(grid) = Grid::from_line_string(text) else {
            unreachable!("81 characters parse");
        };
        assert!(grid.validate());
        assert_eq!(grid.to_line_string(), text);
    }

    #[test]
    fn zeros_and_junk_parse_as_empty() {
        let text: String = "5".chars().chain("0.x".chars().cycle()).take(81).collect();
        let Ok(grid) = Grid::from_line_string(&text) else {
            unreachable!("81 characters parse");
        };
        let Ok(first) = grid.digit(0) else {
            unreachable!("cell 0 in range");
        };
        assert_eq!(first, 5);
        assert_eq!(grid.to_line_string().matches('.').count(), 80);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            Grid::from_line_string("123"),
            Err(GridError::MalformedGridString { length: 3 })
        ));
    }

    #[test]
    fn display_marks_empty_cells() {
        let grid = Grid::new();
        let rendered = grid.to_string();
        assert!(rendered.contains('#'));
        assert!(rendered.contains("------+-------+------"));
    }
}
