//! Movement and collision queries over a board and a piece.
//!
//! Queries never fail: an illegal move or rotation is a `false` answer and the
//! piece is left as it was.

use crate::board::Board;
use crate::pieces::{absolute_blocks, Piece, Shape};
use crate::types::{CellValue, Direction, Spin};

/// Which one-cell moves are currently legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Moves {
    pub left: bool,
    pub right: bool,
    pub down: bool,
}

impl Moves {
    pub fn allows(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Down => self.down,
        }
    }
}

/// Check the cells next to a piece's extremity blocks.
///
/// A direction is legal iff every extremity block for it has a neighbour that
/// is neither `Locked` nor `Border`. An empty extremity set answers `false`.
pub fn can_move(board: &Board, piece: &Piece) -> Moves {
    Moves {
        left: can_move_toward(board, piece, Direction::Left),
        right: can_move_toward(board, piece, Direction::Right),
        down: can_move_toward(board, piece, Direction::Down),
    }
}

fn can_move_toward(board: &Board, piece: &Piece, direction: Direction) -> bool {
    let set = piece.extremities().for_direction(direction);
    if set.is_empty() {
        return false;
    }
    let (dr, dc) = direction.delta();
    let blocks = piece.blocks();
    set.iter().all(|&i| {
        let (row, col) = blocks[i as usize];
        board.is_free(row + dr, col + dc)
    })
}

/// True iff `proposed` at the piece's position lands only on `Empty` or
/// `Active` cells.
pub fn can_rotate(board: &Board, piece: &Piece, proposed: &Shape) -> bool {
    let (row, col) = piece.position();
    absolute_blocks(proposed, row, col)
        .iter()
        .all(|&(r, c)| matches!(board.get(r, c), CellValue::Empty | CellValue::Active(_)))
}

/// Move the piece one cell if the move is legal
pub fn try_move(board: &Board, piece: &mut Piece, direction: Direction) -> bool {
    if !can_move(board, piece).allows(direction) {
        return false;
    }
    piece.translate(direction);
    true
}

/// Rotate the piece in place if the rotated shape fits. No wall kicks.
pub fn try_rotate(board: &Board, piece: &mut Piece, spin: Spin) -> bool {
    let proposed = piece.shape().rotated(spin);
    if !can_rotate(board, piece, &proposed) {
        return false;
    }
    piece.set_shape(proposed);
    true
}

/// Commit the piece to the board as `Locked` cells
pub fn lock(board: &mut Board, piece: &Piece) {
    board.lock(piece);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::FLOOR_ROW;
    use crate::types::ShapeKind;

    #[test]
    fn test_fresh_piece_can_move_everywhere() {
        let board = Board::new();
        let piece = Piece::spawn(ShapeKind::T);
        assert_eq!(
            can_move(&board, &piece),
            Moves {
                left: true,
                right: true,
                down: true
            }
        );
    }

    #[test]
    fn test_down_checks_only_bottom_blocks_of_l() {
        // L at (5,4) covers (5,3) (5,4) (5,5) and the hook at (6,3).
        let piece = Piece::new(Shape::canonical(ShapeKind::L), 5, 4);

        let mut board = Board::new();
        board.set(6, 4, CellValue::Locked(2));
        assert!(!can_move(&board, &piece).down);

        let mut board = Board::new();
        board.set(7, 3, CellValue::Locked(2));
        assert!(!can_move(&board, &piece).down);

        // Two rows under the hook is not adjacent.
        let mut board = Board::new();
        board.set(8, 3, CellValue::Locked(2));
        assert!(can_move(&board, &piece).down);
    }

    #[test]
    fn test_active_cells_do_not_block() {
        let mut board = Board::new();
        let piece = Piece::spawn(ShapeKind::O);
        board.draw_active(&piece);
        let rotated = piece.shape().rotated(Spin::Clockwise);
        assert!(can_rotate(&board, &piece, &rotated));
        board.set(2, piece.position().1, CellValue::Active(1));
        assert!(can_move(&board, &piece).down);
    }

    #[test]
    fn test_try_rotate_rejected_against_wall() {
        let board = Board::new();
        // Vertical I hugging the left wall: rotating back to horizontal would
        // put a block at column -1.
        let vertical = Shape::canonical(ShapeKind::I).rotated(Spin::Clockwise);
        let mut piece = Piece::new(vertical, 5, 0);
        let before = piece.clone();
        assert!(!try_rotate(&board, &mut piece, Spin::CounterClockwise));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_try_move_down_to_floor() {
        let board = Board::new();
        let mut piece = Piece::spawn(ShapeKind::O);
        let mut steps = 0;
        while try_move(&board, &mut piece, Direction::Down) {
            steps += 1;
        }
        assert_eq!(steps, (FLOOR_ROW - 2) as usize);
        assert!(!can_move(&board, &piece).down);
    }

    #[test]
    fn test_lock_is_idempotent() {
        let mut board = Board::new();
        let piece = Piece::new(Shape::canonical(ShapeKind::S), 18, 4);
        lock(&mut board, &piece);
        let once = board.clone();
        lock(&mut board, &piece);
        assert_eq!(board, once);
        assert_eq!(board.locked_count(), 4);
    }
}
