//! This module defines the [Player] enumeration and any associated
//! functionality.

use crate::board::{Bitboard, Rank, BOARD_WIDTH};
use crate::error::{FenError, FenResult};

use serde::{Deserialize, Serialize};

/// An enumeration of the two different players. This can be converted to a
/// [usize] to obtain the player index.
#[repr(usize)]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Player {

    /// The white player who initially occupies the lower ranks and starts
    /// the game.
    White = 0,

    /// The black player who initially occupies the upper ranks and plays
    /// second every round.
    Black = 1
}

impl Player {

    /// Gets the opponent who plays against this player, i.e. the other
    /// player.
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White
        }
    }

    /// Gets the [Rank] on which this player's non-pawn pieces start the
    /// game, i.e. the first rank for white and the eighth rank for black.
    pub fn back_rank(self) -> Rank {
        match self {
            Player::White => Rank::R1,
            Player::Black => Rank::R8
        }
    }

    /// Reads the player whose turn it is from the part specifying that
    /// information in the FEN notation of a position, i.e. `"w"` or `"b"`.
    ///
    /// # Errors
    ///
    /// [FenError::InvalidTurn] if `fen` is neither `"w"` nor `"b"`.
    pub fn from_fen_turn_specifier(fen: &str) -> FenResult<Player> {
        match fen {
            "w" => Ok(Player::White),
            "b" => Ok(Player::Black),
            _ => Err(FenError::InvalidTurn(fen.to_owned()))
        }
    }

    /// Reads the player who a piece belongs to from the char representing
    /// that piece in the FEN notation of a position. Upper case characters
    /// represent [Player::White]'s pieces, lower case characters belong to
    /// [Player::Black].
    pub fn from_fen_piece_char(c: char) -> Player {
        if c.is_uppercase() {
            Player::White
        }
        else {
            Player::Black
        }
    }

    /// Gets the FEN character encoding that it is this player's turn, i.e.
    /// `'w'` or `'b'`.
    pub fn to_fen_turn_char(self) -> char {
        match self {
            Player::White => 'w',
            Player::Black => 'b'
        }
    }

    /// Converts a FEN piece char to one representing a piece owned by this
    /// player, that is, encodes this player on the given character's casing.
    pub fn convert_fen_piece_char(self, c: char) -> char {
        match self {
            Player::White => c.to_ascii_uppercase(),
            Player::Black => c.to_ascii_lowercase()
        }
    }
}

/// The number of different players participating in a Chess game. This is the
/// length of [PLAYERS].
pub const PLAYER_COUNT: usize = 2;

/// A list of all [Player]s, i.e. [Player::White] and [Player::Black].
pub const PLAYERS: [Player; PLAYER_COUNT] = [
    Player::White,
    Player::Black
];

/// A compile-time view on one player, allowing pawn-direction logic to be
/// monomorphized per color instead of branching on every shift.
pub(crate) trait StaticPlayer {

    /// The rank a pawn of this player reaches with a double push.
    const FOURTH_RANK: Bitboard;

    /// The rank from which a pawn of this player promotes on its next
    /// forward move.
    const SEVENTH_RANK: Bitboard;

    /// Shifts all squares in the given bitboard one rank towards the
    /// opponent's side. Squares shifted off the board are dropped.
    fn forward(bitboard: Bitboard) -> Bitboard;

    /// Shifts all squares in the given bitboard one rank towards this
    /// player's own side. Squares shifted off the board are dropped.
    fn back(bitboard: Bitboard) -> Bitboard;
}

pub(crate) struct White;

impl StaticPlayer for White {

    const FOURTH_RANK: Bitboard = Bitboard::of_rank(Rank::R4);
    const SEVENTH_RANK: Bitboard = Bitboard::of_rank(Rank::R7);

    fn forward(bitboard: Bitboard) -> Bitboard {
        bitboard << BOARD_WIDTH
    }

    fn back(bitboard: Bitboard) -> Bitboard {
        bitboard >> BOARD_WIDTH
    }
}

pub(crate) struct Black;

impl StaticPlayer for Black {

    const FOURTH_RANK: Bitboard = Bitboard::of_rank(Rank::R5);
    const SEVENTH_RANK: Bitboard = Bitboard::of_rank(Rank::R2);

    fn forward(bitboard: Bitboard) -> Bitboard {
        bitboard >> BOARD_WIDTH
    }

    fn back(bitboard: Bitboard) -> Bitboard {
        bitboard << BOARD_WIDTH
    }
}
