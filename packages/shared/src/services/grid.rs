use crate::models::game::{Mark, Move};

const SIZE: usize = 3;

/// Verdict for a set of recorded moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoWinnerYet,
    Draw,
    Winner(Mark),
}

/// The 3x3 board materialized from a game's moves. Holds no state beyond one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<Mark>; SIZE]; SIZE],
}

impl Grid {
    /// Moves are assumed to occupy distinct cells; out-of-range moves are skipped.
    pub fn from_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> Self {
        let mut cells = [[None; SIZE]; SIZE];
        for game_move in moves {
            if let Some(cell) = cells
                .get_mut(game_move.row as usize)
                .and_then(|row| row.get_mut(game_move.column as usize))
            {
                *cell = Some(game_move.mark);
            }
        }
        Grid { cells }
    }

    pub fn cells(&self) -> &[[Option<Mark>; SIZE]; SIZE] {
        &self.cells
    }

    /// Rows are checked before columns, columns before diagonals.
    pub fn outcome(&self) -> Outcome {
        if let Some(mark) = self
            .row_winner()
            .or_else(|| self.column_winner())
            .or_else(|| self.diagonal_winner())
        {
            return Outcome::Winner(mark);
        }

        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::NoWinnerYet
        }
    }

    fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    fn row_winner(&self) -> Option<Mark> {
        (0..SIZE).find_map(|r| line_winner((0..SIZE).map(|c| self.cells[r][c])))
    }

    fn column_winner(&self) -> Option<Mark> {
        (0..SIZE).find_map(|c| line_winner((0..SIZE).map(|r| self.cells[r][c])))
    }

    fn diagonal_winner(&self) -> Option<Mark> {
        line_winner((0..SIZE).map(|i| self.cells[i][i]))
            .or_else(|| line_winner((0..SIZE).map(|i| self.cells[i][SIZE - 1 - i])))
    }
}

/// The mark filling every cell of the line, if there is one.
fn line_winner(mut line: impl Iterator<Item = Option<Mark>>) -> Option<Mark> {
    let first = line.next()??;
    line.all(|cell| cell == Some(first)).then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::Position;
    use rstest::rstest;

    const O: Option<Mark> = Some(Mark::Nought);
    const X: Option<Mark> = Some(Mark::Cross);
    const E: Option<Mark> = None;

    fn moves_from(cells: [[Option<Mark>; 3]; 3]) -> Vec<Move> {
        let mut moves = vec![];
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(mark) = cell {
                    let position = Position::new(r as u8, c as u8).unwrap();
                    moves.push(Move::new("game", "player", position, *mark));
                }
            }
        }
        moves
    }

    fn evaluate(cells: [[Option<Mark>; 3]; 3]) -> Outcome {
        Grid::from_moves(&moves_from(cells)).outcome()
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(Grid::from_moves(std::iter::empty()).outcome(), Outcome::NoWinnerYet);
    }

    #[test]
    fn test_from_moves_places_marks() {
        let grid = Grid::from_moves(&moves_from([[O, E, E], [E, X, E], [E, E, E]]));
        assert_eq!(grid.cells()[0][0], O);
        assert_eq!(grid.cells()[1][1], X);
        assert_eq!(grid.cells()[2][2], E);
    }

    #[rstest]
    #[case::top_row([[O, O, O], [X, X, E], [E, E, E]], Mark::Nought)]
    #[case::middle_row([[O, O, E], [X, X, X], [O, E, E]], Mark::Cross)]
    #[case::bottom_row([[X, X, E], [E, E, E], [O, O, O]], Mark::Nought)]
    #[case::left_column([[X, O, E], [X, O, E], [X, E, E]], Mark::Cross)]
    #[case::middle_column([[X, O, E], [X, O, E], [E, O, E]], Mark::Nought)]
    #[case::right_column([[O, E, X], [O, E, X], [E, E, X]], Mark::Cross)]
    #[case::main_diagonal([[O, X, E], [X, O, E], [E, E, O]], Mark::Nought)]
    #[case::anti_diagonal([[O, O, X], [E, X, E], [X, E, E]], Mark::Cross)]
    fn test_complete_line_wins(#[case] cells: [[Option<Mark>; 3]; 3], #[case] mark: Mark) {
        assert_eq!(evaluate(cells), Outcome::Winner(mark));
    }

    #[rstest]
    #[case::two_in_a_row([[O, O, E], [X, X, E], [E, E, E]])]
    #[case::mixed_line([[O, X, O], [E, E, E], [E, E, E]])]
    #[case::nearly_full([[O, X, O], [O, X, X], [X, O, E]])]
    fn test_incomplete_board_is_not_a_draw(#[case] cells: [[Option<Mark>; 3]; 3]) {
        assert_eq!(evaluate(cells), Outcome::NoWinnerYet);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        assert_eq!(evaluate([[O, X, O], [O, X, X], [X, O, O]]), Outcome::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_a_win() {
        assert_eq!(
            evaluate([[X, X, X], [O, O, X], [X, O, O]]),
            Outcome::Winner(Mark::Cross)
        );
    }

    /// Every one of the 3^9 boards, checked against a direct scan of the eight lines.
    #[test]
    fn test_exhaustive_against_line_table() {
        const LINES: [[(usize, usize); 3]; 8] = [
            [(0, 0), (0, 1), (0, 2)],
            [(1, 0), (1, 1), (1, 2)],
            [(2, 0), (2, 1), (2, 2)],
            [(0, 0), (1, 0), (2, 0)],
            [(0, 1), (1, 1), (2, 1)],
            [(0, 2), (1, 2), (2, 2)],
            [(0, 0), (1, 1), (2, 2)],
            [(0, 2), (1, 1), (2, 0)],
        ];

        for code in 0..3usize.pow(9) {
            let mut cells = [[E; 3]; 3];
            let mut rest = code;
            for cell in cells.iter_mut().flatten() {
                *cell = [E, O, X][rest % 3];
                rest /= 3;
            }

            let expected = LINES
                .iter()
                .find_map(|&line| {
                    let [a, b, c] = line.map(|(r, col)| cells[r][col]);
                    match a {
                        Some(mark) if b == a && c == a => Some(Outcome::Winner(mark)),
                        _ => None,
                    }
                })
                .unwrap_or_else(|| {
                    if cells.iter().flatten().all(Option::is_some) {
                        Outcome::Draw
                    } else {
                        Outcome::NoWinnerYet
                    }
                });

            assert_eq!(evaluate(cells), expected, "board {:?}", cells);
        }
    }
}
