//! This module defines the [Piece] enumeration and any associated
//! functionality.

use crate::error::{FenError, FenResult};

use serde::{Deserialize, Serialize};

/// An enumeration of the different kinds of pieces on the board. Does not
/// encode the [Player](crate::player::Player) who owns the piece. This can be
/// converted to a [usize] to obtain the piece index.
#[repr(usize)]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Piece {

    /// A pawn. Moves forwards by one square without taking, or by two from
    /// its starting rank, and takes on squares that are forward and
    /// diagonally adjacent. Can take "en passant" directly behind an enemy
    /// pawn that just advanced two squares.
    Pawn = 0,

    /// A knight. Moves and takes on all squares that have a distance of two
    /// on one axis and a distance of one on the other axis.
    Knight = 1,

    /// A bishop. Moves and takes by sliding diagonally, but not through
    /// other pieces.
    Bishop = 2,

    /// A rook. Moves and takes by sliding horizontally or vertically, but
    /// not through other pieces.
    Rook = 3,

    /// A queen. Moves and takes by sliding horizontally, vertically, or
    /// diagonally, but not through other pieces.
    Queen = 4,

    /// A king. Moves and takes on all squares orthogonally or diagonally
    /// adjacent to its location.
    King = 5
}

impl Piece {

    /// Reads the piece kind from a character representing that piece in FEN
    /// notation, in upper or lower case.
    ///
    /// # Errors
    ///
    /// [FenError::InvalidPiece] if the character is not a valid piece
    /// abbreviation (P, N, B, R, Q, or K in either case).
    pub fn from_fen_char(c: char) -> FenResult<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Ok(Piece::Pawn),
            'n' => Ok(Piece::Knight),
            'b' => Ok(Piece::Bishop),
            'r' => Ok(Piece::Rook),
            'q' => Ok(Piece::Queen),
            'k' => Ok(Piece::King),
            _ => Err(FenError::InvalidPiece(c))
        }
    }

    /// Converts this piece into its lower case FEN abbreviation.
    pub fn to_fen_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k'
        }
    }
}

/// The number of different pieces, i.e. the length of [PIECES].
pub const PIECE_COUNT: usize = 6;

/// A list containing all [Piece]s in order of their indices.
pub const PIECES: [Piece; PIECE_COUNT] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King
];
