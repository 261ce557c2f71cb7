//! Pieces module - tetromino shapes, live pieces and extremity sets
//!
//! A [`Shape`] is four `(row, col)` offsets around a rotation origin. A
//! [`Piece`] places a shape on the board and caches its absolute blocks plus
//! the extremity sets collision checks look at.

use arrayvec::ArrayVec;

use crate::types::{ColorId, Direction, ShapeKind, Spin, SPAWN_COL, SPAWN_ROW};

/// Offset of a single block relative to the piece origin, `(row, col)`
pub type BlockOffset = (i8, i8);

/// Absolute board coordinates of the four blocks, `(row, col)`
pub type Blocks = [(i16, i16); 4];

/// Indices into a piece's blocks (at most four)
pub type ExtremitySet = ArrayVec<u8, 4>;

/// Immutable block layout for one orientation of a tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    offsets: [BlockOffset; 4],
}

const I_SHAPE: Shape = Shape::new(ShapeKind::I, [(0, -1), (0, 0), (0, 1), (0, 2)]);
const O_SHAPE: Shape = Shape::new(ShapeKind::O, [(0, 0), (0, 1), (1, 0), (1, 1)]);
const T_SHAPE: Shape = Shape::new(ShapeKind::T, [(0, -1), (0, 0), (0, 1), (1, 0)]);
const S_SHAPE: Shape = Shape::new(ShapeKind::S, [(0, 0), (0, 1), (1, -1), (1, 0)]);
const Z_SHAPE: Shape = Shape::new(ShapeKind::Z, [(0, -1), (0, 0), (1, 0), (1, 1)]);
const J_SHAPE: Shape = Shape::new(ShapeKind::J, [(0, -1), (0, 0), (0, 1), (1, 1)]);
const L_SHAPE: Shape = Shape::new(ShapeKind::L, [(0, -1), (0, 0), (0, 1), (1, -1)]);

impl Shape {
    pub const fn new(kind: ShapeKind, offsets: [BlockOffset; 4]) -> Self {
        Self { kind, offsets }
    }

    /// Spawn orientation of a kind. Every block sits at row offset 0 or 1.
    pub fn canonical(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::I => I_SHAPE,
            ShapeKind::O => O_SHAPE,
            ShapeKind::T => T_SHAPE,
            ShapeKind::S => S_SHAPE,
            ShapeKind::Z => Z_SHAPE,
            ShapeKind::J => J_SHAPE,
            ShapeKind::L => L_SHAPE,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> ColorId {
        self.kind.color()
    }

    pub fn offsets(&self) -> &[BlockOffset; 4] {
        &self.offsets
    }

    /// Turn the shape 90° around its origin.
    ///
    /// Clockwise maps `(r, c)` to `(c, -r)`, counter-clockwise maps it to
    /// `(-c, r)`. The O shape is returned unchanged.
    pub fn rotated(&self, spin: Spin) -> Self {
        if self.kind == ShapeKind::O {
            return *self;
        }
        let mut offsets = self.offsets;
        for o in offsets.iter_mut() {
            let (r, c) = *o;
            *o = match spin {
                Spin::Clockwise => (c, -r),
                Spin::CounterClockwise => (-c, r),
            };
        }
        Self::new(self.kind, offsets)
    }

    /// Same cells regardless of offset order
    pub fn same_blocks(&self, other: &Shape) -> bool {
        self.offsets.iter().all(|o| other.offsets.contains(o))
            && other.offsets.iter().all(|o| self.offsets.contains(o))
    }
}

/// Boundary blocks of a piece for each movement direction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extremities {
    pub left: ExtremitySet,
    pub right: ExtremitySet,
    pub down: ExtremitySet,
}

impl Extremities {
    pub fn for_direction(&self, direction: Direction) -> &ExtremitySet {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
        }
    }
}

/// Find the blocks that bound a shape on the left, right and bottom.
///
/// A block is a left extremity iff no other block in its row has a smaller
/// column (right: larger column). It is a down extremity iff no other block in
/// its column has a larger row. Only these blocks can collide when the piece
/// moves that way.
pub fn compute_extremities(shape: &Shape) -> Extremities {
    let offsets = shape.offsets();
    let mut out = Extremities::default();

    for (i, &(r, c)) in offsets.iter().enumerate() {
        let others = offsets
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, o)| *o);

        let mut left = true;
        let mut right = true;
        let mut down = true;
        for (or, oc) in others {
            if or == r && oc < c {
                left = false;
            }
            if or == r && oc > c {
                right = false;
            }
            if oc == c && or > r {
                down = false;
            }
        }

        if left {
            out.left.push(i as u8);
        }
        if right {
            out.right.push(i as u8);
        }
        if down {
            out.down.push(i as u8);
        }
    }

    out
}

/// A live piece on the board.
///
/// Blocks and extremities are recomputed by every mutator, so they never
/// disagree with `shape` and `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    shape: Shape,
    row: i16,
    col: i16,
    blocks: Blocks,
    extremities: Extremities,
}

impl Piece {
    pub fn new(shape: Shape, row: i16, col: i16) -> Self {
        Self {
            shape,
            row,
            col,
            blocks: absolute_blocks(&shape, row, col),
            extremities: compute_extremities(&shape),
        }
    }

    /// Canonical shape of `kind` at the spawn position
    pub fn spawn(kind: ShapeKind) -> Self {
        Self::new(Shape::canonical(kind), SPAWN_ROW, SPAWN_COL)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn color(&self) -> ColorId {
        self.shape.color()
    }

    /// Origin as `(row, col)`
    pub fn position(&self) -> (i16, i16) {
        (self.row, self.col)
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn extremities(&self) -> &Extremities {
        &self.extremities
    }

    pub fn set_position(&mut self, row: i16, col: i16) {
        self.row = row;
        self.col = col;
        self.blocks = absolute_blocks(&self.shape, row, col);
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.blocks = absolute_blocks(&shape, self.row, self.col);
        self.extremities = compute_extremities(&shape);
    }

    /// Shift by one cell. Collision is the caller's concern.
    pub fn translate(&mut self, direction: Direction) {
        let (dr, dc) = direction.delta();
        self.set_position(self.row + dr, self.col + dc);
    }
}

/// Board coordinates of `shape` with its origin at `(row, col)`
pub fn absolute_blocks(shape: &Shape, row: i16, col: i16) -> Blocks {
    let mut out = [(0i16, 0i16); 4];
    for (slot, &(dr, dc)) in out.iter_mut().zip(shape.offsets().iter()) {
        *slot = (row + dr as i16, col + dc as i16);
    }
    out
}
