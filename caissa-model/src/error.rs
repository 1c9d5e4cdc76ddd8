//! This module defines all error types that could not be localized to a
//! specific module.

use crate::board::Square;

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

/// An enumeration of the different errors that can occur when parsing FEN
/// strings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FenError {

    /// Indicates that the board representation contained some character which
    /// does not represent any valid piece or gap. The character in question
    /// is provided.
    InvalidPiece(char),

    /// Indicates that the part of the FEN notation which specifies the player
    /// to move is invalid, that is, neither `"w"` nor `"b"`. The full turn
    /// specifier is provided.
    InvalidTurn(String),

    /// Indicates that the part of the FEN notation which specifies castling
    /// rights is malformed. It is expected to be either `"-"` or a non-empty
    /// string of `'k'`, `'q'`, `'K'`, and `'Q'`. The full castling rights
    /// specifier is provided.
    InvalidCastlingRight(String),

    /// Indicates that the part of the FEN notation which specifies the en
    /// passant target is malformed. It is expected to be either `"-"` or the
    /// name of the target square in algebraic coordinates. The full en
    /// passant target specifier is provided.
    InvalidEnPassantTarget(String),

    /// Indicates that the part of the FEN notation which specifies the state
    /// of the half move clock could not be parsed to a valid integer.
    ParseHalfMoveClockError {

        /// The part of the FEN notation specifying the half move clock.
        part: String,

        /// The [ParseIntError] raised while parsing the part as a [usize].
        error: ParseIntError
    },

    /// Indicates that the part of the FEN notation which specifies the state
    /// of the full move counter could not be parsed to a valid integer.
    ParseFullMoveNumberError {

        /// The part of the FEN notation specifying the full move counter.
        part: String,

        /// The [ParseIntError] raised while parsing the part as a [usize].
        error: ParseIntError
    },

    /// Indicates that one rank in the board representation had an incorrect
    /// size, i.e. too many or too few fields. The string representing that
    /// rank is provided.
    WrongRankSize(String),

    /// Indicates that the board representation had an incorrect number of
    /// ranks. The string representing the board is provided.
    WrongRankCount(String),

    /// Indicates that the FEN had an incorrect number of parts. A position
    /// FEN has four parts, a game FEN six. The full FEN string is provided.
    WrongPartCount(String)
}

impl Display for FenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FenError::InvalidPiece(c) =>
                write!(f, "invalid piece char: \'{}\'", c),
            FenError::InvalidTurn(fen) =>
                write!(f, "invalid turn specifier: \"{}\"", fen),
            FenError::InvalidCastlingRight(fen) =>
                write!(f, "invalid castling rights specifier: \"{}\"", fen),
            FenError::InvalidEnPassantTarget(fen) =>
                write!(f, "invalid en passant target square: \"{}\"", fen),
            FenError::ParseHalfMoveClockError { part, error } =>
                write!(f, "error parsing \"{}\" as half move clock: {}", part,
                    error),
            FenError::ParseFullMoveNumberError { part, error } =>
                write!(f, "error parsing \"{}\" as full move number: {}", part,
                    error),
            FenError::WrongRankSize(rank) =>
                write!(f, "wrong rank size: \"{}\"", rank),
            FenError::WrongRankCount(board) =>
                write!(f, "wrong rank count: \"{}\"", board),
            FenError::WrongPartCount(fen) =>
                write!(f, "wrong part count: \"{}\"", fen)
        }
    }
}

impl Error for FenError { }

/// Syntactic sugar for `Result<T, FenError>`.
pub type FenResult<T = ()> = Result<T, FenError>;

/// An enumeration of the different kinds of errors that can occur when
/// parsing [Square](crate::board::Square)s. All of these are raised before
/// any board lookup happens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SquareError {

    /// Indicates that a string could not be parsed as algebraic square
    /// coordinates (a file letter `'a'..'h'` followed by a rank digit
    /// `'1'..'8'`). The full string is provided.
    MalformedCoordinate(String)
}

impl Display for SquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::MalformedCoordinate(s) =>
                write!(f, "malformed square coordinate: \"{}\"", s)
        }
    }
}

impl Error for SquareError { }

/// Syntactic sugar for `Result<T, SquareError>`.
pub type SquareResult<T = ()> = Result<T, SquareError>;

/// An enumeration of the different reasons for which a requested move can be
/// rejected. A rejection leaves the game state unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveError {

    /// Indicates that the origin square holds no piece at all.
    NoPiece(Square),

    /// Indicates that the origin square holds a piece of the player whose
    /// turn it is not.
    OpponentPiece(Square),

    /// Indicates that the requested move is not contained in the legal move
    /// set of the current position.
    Illegal {

        /// The origin [Square] of the rejected move.
        origin: Square,

        /// The destination [Square] of the rejected move.
        destination: Square
    }
}

impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NoPiece(square) =>
                write!(f, "no piece on {}", square),
            MoveError::OpponentPiece(square) =>
                write!(f, "piece on {} does not belong to the moving player",
                    square),
            MoveError::Illegal { origin, destination } =>
                write!(f, "piece on {} cannot move to {}", origin,
                    destination)
        }
    }
}

impl Error for MoveError { }

/// Syntactic sugar for `Result<T, MoveError>`.
pub type MoveResult<T = ()> = Result<T, MoveError>;
