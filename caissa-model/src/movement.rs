//! This module defines the [Move] type which represents a single ply a
//! player can make in a given position, and the legality engine accessible
//! through [legal_moves] and [legal_moves_from].
//!
//! Generation runs as a small state machine: determine the checkers of the
//! side to move, branch on their count (free generation, single-check
//! evasions, or king-moves-only on double check), then filter the candidates
//! through the slider-blocker pin test. En passant captures get a dedicated
//! exposure check, since they can uncover the king along a line ordinary pin
//! logic does not model.

use log::trace;

use serde::{Deserialize, Serialize};

use crate::attacks;
use crate::board::{Bitboard, Board, File, Square};
use crate::piece::Piece;
use crate::player::{Black, Player, StaticPlayer, White};
use crate::rules::PROMOTABLE;
use crate::state::{Position, Side};

/// Represents a move made by a single player. In technical Chess
/// terminology, this is referred to as a ply or half-move.
///
/// Different kinds of moves are realized as different variants, although
/// most moves - including captures - are covered by [Move::Ordinary].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Move {

    /// Any move of one piece to one destination square which afterwards
    /// holds the moved, unchanged piece. This includes captures on the
    /// destination square.
    Ordinary {

        /// The kind of [Piece] that is moved.
        piece: Piece,

        /// The [Square] the piece departs from.
        origin: Square,

        /// The [Square] the piece arrives on.
        destination: Square,

        /// The kind of [Piece] captured on the destination square, if any.
        captured: Option<Piece>
    },

    /// An en passant capture, where a pawn moves behind an enemy pawn that
    /// just advanced two squares and captures it. This is not
    /// [Move::Ordinary] as the captured pawn does not stand on the
    /// destination square.
    EnPassant {

        /// The [Square] the capturing pawn departs from.
        origin: Square,

        /// The [Square] the capturing pawn arrives on.
        destination: Square,

        /// The [Square] of the captured pawn. This differs from the
        /// destination: it shares the destination's file and the origin's
        /// rank.
        capture: Square
    },

    /// A move that promotes a pawn on the opponent's back rank. This is not
    /// [Move::Ordinary] as the piece that arrives at the destination differs
    /// from the one that departed.
    Promotion {

        /// The [Square] the promoting pawn departs from.
        origin: Square,

        /// The [Square] the new piece arrives on.
        destination: Square,

        /// The kind of [Piece] the pawn becomes.
        promotion: Piece,

        /// The kind of [Piece] captured on the destination square, if any.
        captured: Option<Piece>
    },

    /// A castle move, where king and rook move simultaneously. Both piece
    /// relocations are carried by this single move value.
    Castle {

        /// The [Square] the king departs from.
        king: Square,

        /// The [Square] the king arrives on.
        king_destination: Square,

        /// The [Square] the rook departs from.
        rook: Square,

        /// The [Square] the rook arrives on.
        rook_destination: Square
    }
}

impl Move {

    /// Gets the kind of [Piece] that makes this move. For castle moves this
    /// is the king.
    pub fn piece(&self) -> Piece {
        match self {
            Move::Ordinary { piece, .. } => *piece,
            Move::EnPassant { .. } => Piece::Pawn,
            Move::Promotion { .. } => Piece::Pawn,
            Move::Castle { .. } => Piece::King
        }
    }

    /// Gets the origin [Square] of the moved piece. For castle moves this is
    /// the king's origin.
    pub fn origin(&self) -> Square {
        match self {
            Move::Ordinary { origin, .. } => *origin,
            Move::EnPassant { origin, .. } => *origin,
            Move::Promotion { origin, .. } => *origin,
            Move::Castle { king, .. } => *king
        }
    }

    /// Gets the destination [Square] of the moved piece. For castle moves
    /// this is the king's destination.
    pub fn destination(&self) -> Square {
        match self {
            Move::Ordinary { destination, .. } => *destination,
            Move::EnPassant { destination, .. } => *destination,
            Move::Promotion { destination, .. } => *destination,
            Move::Castle { king_destination, .. } => *king_destination
        }
    }

    /// Gets the [Square] of the captured piece, if this move captures. This
    /// differs from the destination only for en passant captures.
    pub fn capture_square(&self) -> Option<Square> {
        match self {
            Move::Ordinary { destination, captured: Some(_), .. } =>
                Some(*destination),
            Move::EnPassant { capture, .. } => Some(*capture),
            Move::Promotion { destination, captured: Some(_), .. } =>
                Some(*destination),
            _ => None
        }
    }

    /// Gets the kind of [Piece] a promoting pawn becomes, or `None` if this
    /// move is no promotion.
    pub fn promotion(&self) -> Option<Piece> {
        match self {
            Move::Promotion { promotion, .. } => Some(*promotion),
            _ => None
        }
    }

    /// Indicates whether this move captures a piece.
    pub fn is_capture(&self) -> bool {
        self.capture_square().is_some()
    }

    /// Indicates whether this move is an en passant capture.
    pub fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }

    /// Indicates whether this move is a castle move.
    pub fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }
}

/// Indicates whether the player whose turn it is is currently in check.
pub fn is_check(position: &Position) -> bool {
    position.board().is_check(position.turn())
}

/// Returns a list of all legal moves that are available in the given
/// position, according to all the rules of chess. The active player is taken
/// from the position.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let board = position.board();
    let player = position.turn();
    let player_bb = board.of_player(player);
    let king = match board.king_square(player) {
        Some(king) => king,
        None => return Vec::new()
    };

    let checkers = board.attackers(king, player.opponent());
    let mut moves = Vec::new();
    let mut en_passant = Vec::new();

    if checkers.is_empty() {
        let mask = !player_bb;

        generate_pawn_moves(&mut moves, board, player, mask);
        generate_knight_moves(&mut moves, board, player, mask);
        generate_slider_moves(
            &mut moves, board, player, mask, Piece::Bishop,
            attacks::bishop_attacks);
        generate_slider_moves(
            &mut moves, board, player, mask, Piece::Rook,
            attacks::rook_attacks);
        generate_slider_moves(
            &mut moves, board, player, mask, Piece::Queen,
            attacks::queen_attacks);
        generate_safe_king_moves(&mut moves, board, player, king, mask);
        generate_castle_moves(&mut moves, position, player, king);
        generate_en_passant_moves(
            &mut en_passant, position, player, Bitboard::FULL,
            Bitboard::FULL);
    }
    else if let Some(checker) = checkers.single() {
        // Single check: king moves, captures of the checker, and blocks of
        // the checking line.

        let block_mask = attacks::between(king, checker) | checkers;

        generate_safe_king_moves(&mut moves, board, player, king, !player_bb);
        generate_pawn_moves(&mut moves, board, player, block_mask);
        generate_knight_moves(&mut moves, board, player, block_mask);
        generate_slider_moves(
            &mut moves, board, player, block_mask, Piece::Bishop,
            attacks::bishop_attacks);
        generate_slider_moves(
            &mut moves, board, player, block_mask, Piece::Rook,
            attacks::rook_attacks);
        generate_slider_moves(
            &mut moves, board, player, block_mask, Piece::Queen,
            attacks::queen_attacks);
        generate_en_passant_moves(
            &mut en_passant, position, player, checkers,
            attacks::between(king, checker));
    }
    else {
        // Double check: only the king can move.

        generate_safe_king_moves(&mut moves, board, player, king, !player_bb);
    }

    let has_en_passant = !en_passant.is_empty();
    moves.append(&mut en_passant);

    let blockers = board.slider_blockers(king, player);

    if !blockers.is_empty() || has_en_passant {
        moves.retain(|mov| is_safe(board, player, king, blockers, mov));
    }

    moves
}

/// Returns the subset of [legal_moves] whose moved piece departs from the
/// given origin square.
pub fn legal_moves_from(position: &Position, origin: Square) -> Vec<Move> {
    legal_moves(position).into_iter()
        .filter(|mov| mov.origin() == origin)
        .collect()
}

/// Decides whether a candidate move leaves the own king safe. King moves and
/// castles were already proven safe during generation. En passant gets a
/// dedicated scan with both pawns removed from the occupancy; every other
/// move is only constrained if its origin is one of the own slider blockers,
/// in which case it must stay on the line through the king.
fn is_safe(board: &Board, player: Player, king: Square, blockers: Bitboard,
        mov: &Move) -> bool {
    match *mov {
        Move::EnPassant { origin, destination, capture } => {
            let occupied = board.occupied()
                ^ Bitboard::singleton(origin)
                ^ Bitboard::singleton(capture)
                | Bitboard::singleton(destination);
            let them = board.of_player(player.opponent());
            let rooks_queens =
                board.of_kind(Piece::Rook) | board.of_kind(Piece::Queen);
            let bishops_queens =
                board.of_kind(Piece::Bishop) | board.of_kind(Piece::Queen);

            (attacks::rook_attacks(king, occupied) & them & rooks_queens)
                .is_empty() &&
                (attacks::bishop_attacks(king, occupied) & them &
                    bishops_queens).is_empty()
        },
        Move::Castle { .. } => true,
        _ => {
            let origin = mov.origin();

            !(board.of_player(player) & blockers).contains(origin) ||
                attacks::aligned(origin, mov.destination(), king)
        }
    }
}

fn generate_pawn_moves(moves: &mut Vec<Move>, board: &Board, player: Player,
        mask: Bitboard) {
    match player {
        Player::White =>
            generate_pawn_moves_from_direction::<White>(
                moves, board, player, mask),
        Player::Black =>
            generate_pawn_moves_from_direction::<Black>(
                moves, board, player, mask)
    }
}

fn generate_pawn_moves_from_direction<D: StaticPlayer>(moves: &mut Vec<Move>,
        board: &Board, player: Player, mask: Bitboard) {
    let pawns = board.of_player_and_kind(player, Piece::Pawn);
    let them_bb = board.of_player(player.opponent());
    let occupied = board.occupied();

    for origin in pawns.squares() {
        let captures =
            attacks::pawn_attacks(player, origin) & them_bb & mask;

        for destination in captures.squares() {
            push_pawn_move::<D>(
                moves, origin, destination, board.piece_at(destination));
        }
    }

    let single = D::forward(pawns) & !occupied;
    let double = D::forward(single) & !occupied & D::FOURTH_RANK;

    for destination in (single & mask).squares() {
        if let Some(origin) =
                D::back(Bitboard::singleton(destination)).first() {
            push_pawn_move::<D>(moves, origin, destination, None);
        }
    }

    for destination in (double & mask).squares() {
        if let Some(origin) =
                D::back(D::back(Bitboard::singleton(destination))).first() {
            moves.push(Move::Ordinary {
                piece: Piece::Pawn,
                origin,
                destination,
                captured: None
            });
        }
    }
}

/// Emits a single pawn move, fanning out into one move per promotable piece
/// kind if the pawn departs from its relative seventh rank.
fn push_pawn_move<D: StaticPlayer>(moves: &mut Vec<Move>, origin: Square,
        destination: Square, captured: Option<Piece>) {
    if D::SEVENTH_RANK.contains(origin) {
        for promotion in PROMOTABLE {
            moves.push(Move::Promotion {
                origin,
                destination,
                promotion,
                captured
            });
        }
    }
    else {
        moves.push(Move::Ordinary {
            piece: Piece::Pawn,
            origin,
            destination,
            captured
        });
    }
}

fn generate_knight_moves(moves: &mut Vec<Move>, board: &Board,
        player: Player, mask: Bitboard) {
    for origin in board.of_player_and_kind(player, Piece::Knight).squares() {
        let targets = attacks::knight_attacks(origin) & mask;

        for destination in targets.squares() {
            moves.push(Move::Ordinary {
                piece: Piece::Knight,
                origin,
                destination,
                captured: board.piece_at(destination)
            });
        }
    }
}

fn generate_slider_moves<GetAt>(moves: &mut Vec<Move>, board: &Board,
    player: Player, mask: Bitboard, piece: Piece, get_attack: GetAt)
where
    GetAt: Fn(Square, Bitboard) -> Bitboard
{
    let occupied = board.occupied();

    for origin in board.of_player_and_kind(player, piece).squares() {
        let targets = get_attack(origin, occupied) & mask;

        for destination in targets.squares() {
            moves.push(Move::Ordinary {
                piece,
                origin,
                destination,
                captured: board.piece_at(destination)
            });
        }
    }
}

/// Generates king moves to all unattacked target squares. Attacks are
/// evaluated with the king removed from the occupancy, so squares behind the
/// king along a checking ray are correctly recognized as attacked.
fn generate_safe_king_moves(moves: &mut Vec<Move>, board: &Board,
        player: Player, king: Square, mask: Bitboard) {
    let occupied_without_king =
        board.occupied() ^ Bitboard::singleton(king);
    let targets = attacks::king_attacks(king) & mask;

    for destination in targets.squares() {
        let attackers = board.attackers_with_occupancy(
            destination, player.opponent(), occupied_without_king);

        if attackers.is_empty() {
            moves.push(Move::Ordinary {
                piece: Piece::King,
                origin: king,
                destination,
                captured: board.piece_at(destination)
            });
        }
    }
}

fn generate_castle_moves(moves: &mut Vec<Move>, position: &Position,
        player: Player, king: Square) {
    let board = position.board();
    let castles = position.castles();

    if !castles.can(player) || king.rank() != player.back_rank() {
        return;
    }

    let back_rank = Bitboard::of_rank(player.back_rank());
    let rooks = back_rank &
        board.of_player_and_kind(player, Piece::Rook) &
        position.unmoved_rooks().bitboard();
    let occupied = board.occupied();
    let king_bb = Bitboard::singleton(king);

    for rook in rooks.squares() {
        let side = if rook < king {
            Side::Queen
        }
        else {
            Side::King
        };

        if !castles.can_side(player, side) {
            continue;
        }

        let (king_file, rook_file) = match side {
            Side::Queen => (File::C, File::D),
            Side::King => (File::G, File::F)
        };
        let king_destination =
            Square::from_file_and_rank(king_file, player.back_rank());
        let rook_destination =
            Square::from_file_and_rank(rook_file, player.back_rank());

        if !(attacks::between(king, rook) & occupied).is_empty() {
            continue;
        }

        // Every square the king passes through, its origin and destination
        // included, must be unattacked once the king itself no longer blocks
        // any ray.

        let rook_bb = Bitboard::singleton(rook);
        let without_king = occupied ^ king_bb;
        let king_path = attacks::between(king, king_destination) | king_bb |
            Bitboard::singleton(king_destination);
        let path_safe = king_path.squares().all(|square|
            board.attackers_with_occupancy(
                square, player.opponent(), without_king).is_empty());

        if !path_safe {
            continue;
        }

        // The rook's destination square must not mask an attack on the
        // king's destination, so that square is re-checked with both pieces
        // already relocated.

        let rearranged = (occupied ^ king_bb ^ rook_bb) |
            Bitboard::singleton(rook_destination);

        if !board.attackers_with_occupancy(
                king_destination, player.opponent(), rearranged).is_empty() {
            continue;
        }

        trace!("generated {:?}-side castle for {:?}", side, player);
        moves.push(Move::Castle {
            king,
            king_destination,
            rook,
            rook_destination
        });
    }
}

/// Generates en passant captures onto the position's en passant target
/// square. While in check, an en passant capture is only permitted if the
/// captured pawn is the checker (`capture_mask`) or the destination blocks
/// the checking line (`push_mask`); both masks are full otherwise.
fn generate_en_passant_moves(moves: &mut Vec<Move>, position: &Position,
        player: Player, capture_mask: Bitboard, push_mask: Bitboard) {
    let board = position.board();
    let target = match position.en_passant() {
        Some(target) => target,
        None => return
    };
    let captured = match player {
        Player::White => target.down(),
        Player::Black => target.up()
    };
    let captured = match captured {
        Some(captured) => captured,
        None => return
    };

    if !board.of_player_and_kind(player.opponent(), Piece::Pawn)
            .contains(captured) {
        return;
    }

    if !capture_mask.contains(captured) && !push_mask.contains(target) {
        return;
    }

    let capturers = board.of_player_and_kind(player, Piece::Pawn) &
        attacks::pawn_attacks(player.opponent(), target);

    for origin in capturers.squares() {
        moves.push(Move::EnPassant {
            origin,
            destination: target,
            capture: captured
        });
    }
}
