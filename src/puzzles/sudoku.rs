//! Locked album: a 5x5 jigsaw Sudoku.
//!
//! The on-screen instructions ask for 1-5 once per row, column and
//! coloured region, but nothing is validated while the player types. The
//! only check is the explicit one, and it compares the grid cell-for-cell
//! against the known solution.

use serde::Serialize;

pub const SIZE: usize = 5;

pub type Grid = [[u8; SIZE]; SIZE];

pub const REGIONS: Grid = [
    [0, 0, 1, 1, 1],
    [0, 2, 2, 1, 1],
    [0, 2, 2, 3, 1],
    [0, 2, 3, 3, 4],
    [2, 2, 3, 4, 4],
];

/// Starting grid; non-zero cells are givens.
pub const PUZZLE: Grid = [
    [1, 0, 3, 0, 5],
    [0, 4, 0, 2, 0],
    [5, 0, 2, 3, 0],
    [0, 5, 0, 0, 3],
    [2, 0, 4, 5, 0],
];

pub const SOLUTION: Grid = [
    [1, 2, 3, 4, 5],
    [3, 4, 5, 2, 1],
    [5, 1, 2, 3, 4],
    [4, 5, 1, 2, 3],
    [2, 3, 4, 5, 1],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SudokuVerdict {
    Solved,
    InvalidSolution,
}

#[derive(Clone, Debug)]
pub struct SudokuBoard {
    cells: Grid,
    selected: Option<(usize, usize)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SudokuSnapshot {
    pub cells: Grid,
    pub givens: [[bool; SIZE]; SIZE],
    pub regions: Grid,
    pub selected: Option<(usize, usize)>,
    pub complete: bool,
}

impl Default for SudokuBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SudokuBoard {
    pub fn new() -> Self {
        Self {
            cells: PUZZLE,
            selected: None,
        }
    }

    pub fn is_given(row: usize, col: usize) -> bool {
        row < SIZE && col < SIZE && PUZZLE[row][col] != 0
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    /// Select a cell for entry. Givens and out-of-range cells are ignored.
    pub fn select_cell(&mut self, row: usize, col: usize) -> bool {
        if !Self::is_editable(row, col) {
            return false;
        }
        self.selected = Some((row, col));
        true
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: u8) -> bool {
        if !Self::is_editable(row, col) || !(1..=SIZE as u8).contains(&value) {
            return false;
        }
        self.cells[row][col] = value;
        true
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) -> bool {
        if !Self::is_editable(row, col) {
            return false;
        }
        self.cells[row][col] = 0;
        true
    }

    /// Numpad entry into the selected cell.
    pub fn enter_digit(&mut self, value: u8) -> bool {
        match self.selected {
            Some((r, c)) => self.set_cell(r, c, value),
            None => false,
        }
    }

    pub fn delete_digit(&mut self) -> bool {
        match self.selected {
            Some((r, c)) => self.clear_cell(r, c),
            None => false,
        }
    }

    /// Every cell filled. Gates the check button; never auto-validates.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v != 0)
    }

    pub fn check_solution(&self) -> SudokuVerdict {
        if self.cells == SOLUTION {
            SudokuVerdict::Solved
        } else {
            SudokuVerdict::InvalidSolution
        }
    }

    pub fn snapshot(&self) -> SudokuSnapshot {
        let mut givens = [[false; SIZE]; SIZE];
        for (r, row) in givens.iter_mut().enumerate() {
            for (c, g) in row.iter_mut().enumerate() {
                *g = Self::is_given(r, c);
            }
        }
        SudokuSnapshot {
            cells: self.cells,
            givens,
            regions: REGIONS,
            selected: self.selected,
            complete: self.is_complete(),
        }
    }

    fn is_editable(row: usize, col: usize) -> bool {
        row < SIZE && col < SIZE && !Self::is_given(row, col)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Edit {
        Set(usize, usize, u8),
        Clear(usize, usize),
        Select(usize, usize),
        Enter(u8),
        Delete,
    }

    fn arb_edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (0usize..6, 0usize..6, 0u8..7).prop_map(|(r, c, v)| Edit::Set(r, c, v)),
            (0usize..6, 0usize..6).prop_map(|(r, c)| Edit::Clear(r, c)),
            (0usize..6, 0usize..6).prop_map(|(r, c)| Edit::Select(r, c)),
            (0u8..7).prop_map(Edit::Enter),
            Just(Edit::Delete),
        ]
    }

    proptest! {
        #[test]
        fn prop_givens_never_change(edits in proptest::collection::vec(arb_edit(), 0..80)) {
            let mut b = SudokuBoard::new();
            for e in edits {
                match e {
                    Edit::Set(r, c, v) => { b.set_cell(r, c, v); }
                    Edit::Clear(r, c) => { b.clear_cell(r, c); }
                    Edit::Select(r, c) => { b.select_cell(r, c); }
                    Edit::Enter(v) => { b.enter_digit(v); }
                    Edit::Delete => { b.delete_digit(); }
                }
            }
            for r in 0..SIZE {
                for c in 0..SIZE {
                    if PUZZLE[r][c] != 0 {
                        prop_assert_eq!(b.cells()[r][c], PUZZLE[r][c]);
                    }
                    prop_assert!(b.cells()[r][c] <= SIZE as u8);
                }
            }
        }

        #[test]
        fn prop_solved_iff_equal(edits in proptest::collection::vec((0usize..5, 0usize..5, 1u8..6), 0..40)) {
            let mut b = SudokuBoard::new();
            for r in 0..SIZE {
                for c in 0..SIZE {
                    b.set_cell(r, c, SOLUTION[r][c]);
                }
            }
            for (r, c, v) in edits {
                b.set_cell(r, c, v);
            }
            let solved = b.check_solution() == SudokuVerdict::Solved;
            prop_assert_eq!(solved, *b.cells() == SOLUTION);
        }
    }
}
