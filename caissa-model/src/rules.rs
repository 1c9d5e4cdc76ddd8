//! This module defines constants and predicates for the game-ending rules of
//! Chess: the outcome classification, the fifty move rule threshold, and the
//! insufficient mating material test.

use serde::{Deserialize, Serialize};

use crate::board::{Bitboard, Board};
use crate::piece::Piece;
use crate::player::Player;

/// The number of half-moves without progress (no capture and no pawn move)
/// after which the game is drawn by the "fifty move rule".
pub const DRAW_NO_PROGRESS_COUNT: usize = 100;

/// A list of all piece kinds a pawn may promote to.
pub const PROMOTABLE: [Piece; 4] = [
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen
];

/// The way a finished game ended.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Outcome {

    /// The player whose turn it is is in check and has no legal moves. The
    /// opponent wins.
    Checkmate,

    /// The player whose turn it is is not in check but has no legal moves.
    /// The game is drawn.
    Stalemate,

    /// The game is drawn by rule, i.e. by the fifty move rule or by
    /// insufficient mating material.
    Draw
}

/// Indicates whether the bishops on the board occupy squares of both colors.
/// All bishops are considered, regardless of their owner.
pub fn bishops_on_opposite_colors(board: &Board) -> bool {
    let bishops = board.of_kind(Piece::Bishop);

    !bishops.is_disjoint(Bitboard::LIGHT_SQUARES) &&
        !bishops.is_disjoint(Bitboard::DARK_SQUARES)
}

/// Indicates whether all of the given player's pieces are of the kinds in
/// the given bitboard of piece-kind squares.
fn only_of(board: &Board, player: Player, kinds: Bitboard) -> bool {
    board.of_player(player).is_subset(kinds)
}

/// Determines whether the given player lacks the material to ever deliver
/// mate, considering the opponent's material:
///
/// * a lone king is never mating material;
/// * a king with a single knight cannot force mate against bare kings and
///   queens (an opponent rook, bishop, knight, or pawn can still be walled
///   in with);
/// * a king with bishops only cannot mate if all bishops on the board stand
///   on same-colored squares and the opponent has neither knight nor pawn.
pub fn insufficient_mating_material(board: &Board, player: Player) -> bool {
    let kings = board.of_kind(Piece::King);
    let opponent = player.opponent();

    if only_of(board, player, kings) {
        return true;
    }

    if only_of(board, player, kings | board.of_kind(Piece::Knight)) {
        let non_kings = board.of_player(player) - kings;

        return non_kings.count() == 1 &&
            only_of(board, opponent, kings | board.of_kind(Piece::Queen));
    }

    if only_of(board, player, kings | board.of_kind(Piece::Bishop)) {
        return !bishops_on_opposite_colors(board) &&
            board.of_player_and_kind(opponent, Piece::Knight).is_empty() &&
            board.of_player_and_kind(opponent, Piece::Pawn).is_empty();
    }

    false
}
