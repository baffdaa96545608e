//! D4 symmetry group operations for board comparison and canonicalization

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Cell};

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to apply reflection
    pub reflection: bool,
}

impl D4Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        D4Transform {
            rotation: 0,
            reflection: false,
        }
    }

    /// Get all 8 D4 transforms
    pub fn all() -> Vec<D4Transform> {
        let mut transforms = Vec::with_capacity(8);
        for rotation in [0, 90, 180, 270] {
            transforms.push(D4Transform {
                rotation,
                reflection: false,
            });
            transforms.push(D4Transform {
                rotation,
                reflection: true,
            });
        }
        transforms
    }

    /// Apply transform to a position (0-8).
    ///
    /// Reflection (across the vertical axis) is applied before rotation
    /// (clockwise); the composition enumerates the full D4 set.
    pub fn transform_position(&self, pos: usize) -> usize {
        let (mut row, mut col) = (pos / 3, pos % 3);

        if self.reflection {
            col = 2 - col;
        }

        for _ in 0..(self.rotation / 90) {
            let new_row = col;
            let new_col = 2 - row;
            row = new_row;
            col = new_col;
        }

        row * 3 + col
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            // Reflect-then-rotate elements are involutions
            *self
        } else {
            D4Transform {
                rotation: (360 - self.rotation) % 360,
                reflection: false,
            }
        }
    }
}

impl BoardState {
    /// Apply a D4 transform to the board
    pub fn transform(&self, t: &D4Transform) -> Self {
        let mut cells = [Cell::Empty; 9];
        for i in 0..9 {
            cells[t.transform_position(i)] = self.cells[i];
        }
        BoardState {
            cells,
            to_move: self.to_move,
        }
    }

    /// Get the canonical (lexicographically minimal) form under D4 symmetry
    pub fn canonical(&self) -> Self {
        let mut best_state = *self;
        let mut best_encoding = self.encode();

        for transform in D4Transform::all() {
            let transformed = self.transform(&transform);
            let encoding = transformed.encode();
            if encoding < best_encoding {
                best_encoding = encoding;
                best_state = transformed;
            }
        }

        best_state
    }
}

/// True if some D4 transform maps `a` onto `b` (cells and turn both match).
///
/// Reflexive (the identity is in the set) and symmetric (the set is closed
/// under inverses). Used by MCTS expansion to drop duplicate children; the
/// pruning is an optimization and never affects search correctness.
pub fn boards_equivalent(a: &BoardState, b: &BoardState) -> bool {
    D4Transform::all().iter().any(|t| a.transform(t) == *b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_transform_position_rotation() {
        let rot90 = D4Transform {
            rotation: 90,
            reflection: false,
        };
        // Top-left corner maps to top-right under a clockwise quarter turn
        assert_eq!(rot90.transform_position(0), 2);
        // Center is fixed by every transform
        for t in D4Transform::all() {
            assert_eq!(t.transform_position(4), 4);
        }
    }

    #[test]
    fn test_inverse_roundtrip() {
        for t in D4Transform::all() {
            let inv = t.inverse();
            for pos in 0..9 {
                assert_eq!(inv.transform_position(t.transform_position(pos)), pos);
            }
        }
    }

    #[test]
    fn test_corner_moves_share_canonical_form() {
        let a = BoardState::new().make_move(0).unwrap();
        let b = BoardState::new().make_move(2).unwrap();
        assert_eq!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_boards_equivalent_rotation() {
        let a = BoardState::from_string("X........_O").unwrap();
        let b = BoardState::from_string("..X......_O").unwrap();
        assert!(boards_equivalent(&a, &b));
    }

    #[test]
    fn test_boards_equivalent_reflexive_symmetric() {
        let a = BoardState::from_string("XO..X...._O").unwrap();
        let b = a.transform(&D4Transform {
            rotation: 270,
            reflection: true,
        });
        assert!(boards_equivalent(&a, &a));
        assert!(boards_equivalent(&a, &b));
        assert!(boards_equivalent(&b, &a));
    }

    #[test]
    fn test_piece_swap_not_equivalent() {
        // Swapping X and O is not a spatial symmetry
        let a = BoardState::new().make_move(0).unwrap();
        let mut swapped = a;
        swapped.cells[0] = Player::O.to_cell();
        assert!(!boards_equivalent(&a, &swapped));
    }

    #[test]
    fn test_turn_mismatch_not_equivalent() {
        let a = BoardState::from_string("X........_O").unwrap();
        let mut b = a;
        b.to_move = Player::X;
        assert!(!boards_equivalent(&a, &b));
    }
}
