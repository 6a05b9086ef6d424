//! Locked note: a 5x5 Minesweeper with a fixed mine layout.

use serde::Serialize;

pub const GRID_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighboring_mines: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    InProgress,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Ignored,
    FlagToggled,
    Revealed(usize),
    MineHit,
    Won,
}

pub type Board = [[Cell; GRID_SIZE]; GRID_SIZE];

#[derive(Clone, Debug)]
pub struct MineField {
    layout: Vec<(usize, usize)>,
    board: Board,
    state: FieldState,
    flag_mode: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MinesweeperSnapshot {
    pub board: Board,
    pub state: FieldState,
    pub flag_mode: bool,
    pub mine_count: usize,
    pub flags_placed: usize,
}

/// In-bounds 8-neighbourhood of `(r, c)`.
fn neighbors(r: usize, c: usize) -> impl Iterator<Item = (usize, usize)> {
    (-1i32..=1)
        .flat_map(|dr| (-1i32..=1).map(move |dc| (dr, dc)))
        .filter(|&(dr, dc)| dr != 0 || dc != 0)
        .filter_map(move |(dr, dc)| {
            let nr = r as i32 + dr;
            let nc = c as i32 + dc;
            let size = GRID_SIZE as i32;
            (nr >= 0 && nr < size && nc >= 0 && nc < size).then(|| (nr as usize, nc as usize))
        })
}

/// Lay mines and compute every neighbour count.
pub fn generate_board(mines: &[(usize, usize)]) -> Board {
    let mut board = [[Cell::default(); GRID_SIZE]; GRID_SIZE];
    for &(r, c) in mines {
        if r < GRID_SIZE && c < GRID_SIZE {
            board[r][c].is_mine = true;
        }
    }
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            if board[r][c].is_mine {
                continue;
            }
            board[r][c].neighboring_mines =
                neighbors(r, c).filter(|&(nr, nc)| board[nr][nc].is_mine).count() as u8;
        }
    }
    board
}

/// Reveal `(r, c)` and, through zero-count cells, everything connected to
/// it. Numbered cells are revealed but stop the spread. Returns how many
/// cells were newly revealed.
pub fn flood_reveal(board: &mut Board, r: usize, c: usize) -> usize {
    let mut stack = vec![(r, c)];
    let mut revealed = 0;
    while let Some((r, c)) = stack.pop() {
        if r >= GRID_SIZE || c >= GRID_SIZE {
            continue;
        }
        let cell = &mut board[r][c];
        if cell.is_revealed || cell.is_mine {
            continue;
        }
        cell.is_revealed = true;
        revealed += 1;
        if cell.neighboring_mines == 0 {
            stack.extend(neighbors(r, c));
        }
    }
    revealed
}

impl MineField {
    pub fn new(mines: &[(usize, usize)]) -> Self {
        Self {
            layout: mines.to_vec(),
            board: generate_board(mines),
            state: FieldState::InProgress,
            flag_mode: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    pub fn toggle_flag_mode(&mut self) {
        self.flag_mode = !self.flag_mode;
    }

    pub fn mine_count(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_mine).count()
    }

    /// Flags still standing. A flood can sweep over a flagged cell.
    pub fn flags_placed(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|c| c.is_flagged && !c.is_revealed)
            .count()
    }

    pub fn revealed_count(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_revealed).count()
    }

    pub fn press(&mut self, r: usize, c: usize) -> PressOutcome {
        if self.state != FieldState::InProgress || r >= GRID_SIZE || c >= GRID_SIZE {
            return PressOutcome::Ignored;
        }
        let cell = &mut self.board[r][c];
        if cell.is_revealed {
            return PressOutcome::Ignored;
        }

        if self.flag_mode {
            cell.is_flagged = !cell.is_flagged;
            return PressOutcome::FlagToggled;
        }
        if cell.is_flagged {
            return PressOutcome::Ignored;
        }

        if cell.is_mine {
            self.state = FieldState::Lost;
            for cell in self.board.iter_mut().flatten().filter(|c| c.is_mine) {
                cell.is_revealed = true;
            }
            return PressOutcome::MineHit;
        }

        let n = flood_reveal(&mut self.board, r, c);
        if self.revealed_count() == GRID_SIZE * GRID_SIZE - self.mine_count() {
            self.state = FieldState::Won;
            return PressOutcome::Won;
        }
        PressOutcome::Revealed(n)
    }

    /// Fresh board from the same layout, reveal mode, back in progress.
    pub fn restart(&mut self) {
        self.board = generate_board(&self.layout);
        self.state = FieldState::InProgress;
        self.flag_mode = false;
    }

    pub fn snapshot(&self) -> MinesweeperSnapshot {
        MinesweeperSnapshot {
            board: self.board,
            state: self.state,
            flag_mode: self.flag_mode,
            mine_count: self.mine_count(),
            flags_placed: self.flags_placed(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::{BTreeSet, VecDeque};

    fn arb_layout() -> impl Strategy<Value = Vec<(usize, usize)>> {
        proptest::collection::btree_set((0..GRID_SIZE, 0..GRID_SIZE), 1..8)
            .prop_map(|s| s.into_iter().collect())
    }

    /// Reference flood: breadth-first over zero cells, as the classic game defines it.
    fn expected_region(board: &Board, r: usize, c: usize) -> BTreeSet<(usize, usize)> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([(r, c)]);
        while let Some((r, c)) = queue.pop_front() {
            if board[r][c].is_mine || !seen.insert((r, c)) {
                continue;
            }
            if board[r][c].neighboring_mines == 0 {
                queue.extend(neighbors(r, c));
            }
        }
        seen
    }

    proptest! {
        #[test]
        fn prop_counts_match_neighbours(layout in arb_layout()) {
            let board = generate_board(&layout);
            for r in 0..GRID_SIZE {
                for c in 0..GRID_SIZE {
                    if board[r][c].is_mine {
                        continue;
                    }
                    let n = neighbors(r, c).filter(|p| layout.contains(p)).count();
                    prop_assert_eq!(board[r][c].neighboring_mines as usize, n);
                }
            }
        }

        #[test]
        fn prop_flood_region_bounded_by_numbers(layout in arb_layout(), r in 0..GRID_SIZE, c in 0..GRID_SIZE) {
            let board = generate_board(&layout);
            prop_assume!(!board[r][c].is_mine);
            let mut flooded = board;
            let n = flood_reveal(&mut flooded, r, c);
            let got: BTreeSet<_> = (0..GRID_SIZE)
                .flat_map(|r| (0..GRID_SIZE).map(move |c| (r, c)))
                .filter(|&(r, c)| flooded[r][c].is_revealed)
                .collect();
            prop_assert_eq!(n, got.len());
            prop_assert_eq!(&got, &expected_region(&board, r, c));
            // Every revealed cell that borders an unrevealed one must be numbered.
            for &(r, c) in &got {
                if neighbors(r, c).any(|(nr, nc)| !flooded[nr][nc].is_revealed) {
                    prop_assert!(flooded[r][c].neighboring_mines > 0);
                }
            }
        }

        #[test]
        fn prop_revealing_all_safe_cells_wins(layout in arb_layout()) {
            let mut f = MineField::new(&layout);
            for r in 0..GRID_SIZE {
                for c in 0..GRID_SIZE {
                    if !layout.contains(&(r, c)) {
                        f.press(r, c);
                    }
                }
            }
            prop_assert_eq!(f.state(), FieldState::Won);
            prop_assert_eq!(f.revealed_count(), GRID_SIZE * GRID_SIZE - layout.len());
        }
    }
}
