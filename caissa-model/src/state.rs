//! This module defines the state carried across the moves of a game: the
//! castling bookkeeping ([Castles], [UnmovedRooks]), the [Position] all move
//! generation works on, and the [Game] record which adds the clocks and the
//! move history.
//!
//! All types in this module are immutable values. Applying a move yields a
//! new [Game]; the previous one is left untouched.

use log::debug;

use serde::{Deserialize, Serialize};

use crate::board::{Bitboard, Board, Square};
use crate::board::locations::{A1, A8, H1, H8};
use crate::error::{FenError, FenResult, MoveError, MoveResult};
use crate::movement::{self, Move};
use crate::piece::Piece;
use crate::player::{PLAYERS, Player};
use crate::rules::{self, Outcome};

/// The two directions in which a player can castle.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Side {

    /// Castling towards the H-file, also called short castling.
    King,

    /// Castling towards the A-file, also called long castling.
    Queen
}

/// The starting corner square of the rook involved in castling with the
/// given player to the given side.
fn corner(player: Player, side: Side) -> Square {
    match (player, side) {
        (Player::White, Side::King) => H1,
        (Player::White, Side::Queen) => A1,
        (Player::Black, Side::King) => H8,
        (Player::Black, Side::Queen) => A8
    }
}

/// The castling rights still available in a game, represented as a bitboard
/// over the four corner squares a1, h1, a8, and h8. A contained corner means
/// castling with the rook from that corner is still generally allowed; it
/// does not mean castling is a legal move in the current position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Castles(Bitboard);

impl Castles {

    /// The castling rights at the start of a game, i.e. all four corners.
    pub const INITIAL: Castles = Castles(Bitboard::of([A1, H1, A8, H8]));

    /// No castling rights for either player.
    pub const NONE: Castles = Castles(Bitboard::EMPTY);

    /// Indicates whether the given player may still castle to at least one
    /// side.
    pub fn can(self, player: Player) -> bool {
        !self.0.is_disjoint(Bitboard::of_rank(player.back_rank()))
    }

    /// Indicates whether the given player may still castle to the given
    /// side.
    pub fn can_side(self, player: Player, side: Side) -> bool {
        self.0.contains(corner(player, side))
    }

    /// Indicates whether no player holds any castling right anymore.
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    /// Returns the rights with both of the given player's sides revoked.
    pub fn without_player(self, player: Player) -> Castles {
        Castles(self.0 - Bitboard::of_rank(player.back_rank()))
    }

    /// Returns the rights with the given player's given side revoked.
    pub fn without_side(self, player: Player, side: Side) -> Castles {
        Castles(self.0 - Bitboard::singleton(corner(player, side)))
    }
}

/// The set of rook origin squares whose rook has never moved. This is
/// tracked separately from [Castles]: when a rook is captured, deciding
/// *which* side's right to revoke requires knowing whether another unmoved
/// rook remains on the same rank.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnmovedRooks(Bitboard);

impl UnmovedRooks {

    /// The unmoved rooks at the start of a game, i.e. all four corners.
    pub const CORNERS: UnmovedRooks =
        UnmovedRooks(Bitboard::of([A1, H1, A8, H8]));

    /// No unmoved rooks for either player.
    pub const NONE: UnmovedRooks = UnmovedRooks(Bitboard::EMPTY);

    /// Guesses the unmoved rooks from a board alone by assuming every rook
    /// on its owner's back rank has not moved yet. Used when a position is
    /// loaded without history, e.g. from FEN.
    pub fn from_board(board: &Board) -> UnmovedRooks {
        let mut rooks = Bitboard::EMPTY;

        for player in PLAYERS {
            rooks |= board.of_player_and_kind(player, Piece::Rook) &
                Bitboard::of_rank(player.back_rank());
        }

        UnmovedRooks(rooks)
    }

    /// Gets the underlying bitboard of unmoved rook origin squares.
    pub fn bitboard(self) -> Bitboard {
        self.0
    }

    /// Indicates whether the given square holds an unmoved rook.
    pub fn contains(self, square: Square) -> bool {
        self.0.contains(square)
    }

    /// Returns the unmoved rooks without the given square.
    pub fn without_square(self, square: Square) -> UnmovedRooks {
        UnmovedRooks(self.0 - Bitboard::singleton(square))
    }

    /// Returns the unmoved rooks without all squares on the given player's
    /// back rank.
    pub fn without_player(self, player: Player) -> UnmovedRooks {
        UnmovedRooks(self.0 - Bitboard::of_rank(player.back_rank()))
    }

    /// Tries to guess the castling side of the unmoved rook on the given
    /// square.
    ///
    /// * `None` - the square holds no unmoved rook.
    /// * `Some(Some(side))` - another unmoved rook shares the rank, so the
    ///   side follows from the file comparison with it.
    /// * `Some(None)` - no other unmoved rook remains on the rank, so the
    ///   side cannot be inferred. Callers should revoke the whole color's
    ///   rights as a safe fallback.
    pub fn side(self, square: Square) -> Option<Option<Side>> {
        if !self.0.contains(square) {
            return None;
        }

        let others = (Bitboard::of_rank(square.rank()) & self.0) -
            Bitboard::singleton(square);

        match others.first() {
            Some(other) if other.file() > square.file() =>
                Some(Some(Side::Queen)),
            Some(_) => Some(Some(Side::King)),
            None => Some(None)
        }
    }
}

/// All information needed to generate the moves of the current ply: the
/// [Board], the castling bookkeeping, the en passant target square, and
/// whose turn it is. It does *not* track the clocks or the move history;
/// those live in [Game].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    board: Board,
    castles: Castles,
    unmoved_rooks: UnmovedRooks,
    en_passant: Option<Square>,
    turn: Player
}

fn next_part<'a, I>(parts: &mut I, fen: &str) -> FenResult<&'a str>
where
    I: Iterator<Item = &'a str>
{
    parts.next().ok_or_else(|| FenError::WrongPartCount(fen.to_owned()))
}

fn parse_castling_rights(fen: &str) -> FenResult<Castles> {
    if fen.is_empty() {
        return Err(FenError::InvalidCastlingRight(fen.to_owned()));
    }

    if fen == "-" {
        return Ok(Castles::NONE);
    }

    let mut corners = Bitboard::EMPTY;

    for c in fen.chars() {
        let corner = match c {
            'K' => H1,
            'Q' => A1,
            'k' => H8,
            'q' => A8,
            _ => return Err(FenError::InvalidCastlingRight(fen.to_owned()))
        };

        corners |= Bitboard::singleton(corner);
    }

    Ok(Castles(corners))
}

fn parse_en_passant_target(fen: &str) -> FenResult<Option<Square>> {
    if fen == "-" {
        return Ok(None);
    }

    Square::from_algebraic(fen)
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassantTarget(fen.to_owned()))
}

impl Position {

    /// Creates a new position in the initial configuration, i.e. with the
    /// [Board] described by [Board::initial], full castling rights, no en
    /// passant opportunity, and white to move.
    pub fn initial() -> Position {
        Position {
            board: Board::initial(),
            castles: Castles::INITIAL,
            unmoved_rooks: UnmovedRooks::CORNERS,
            en_passant: None,
            turn: Player::White
        }
    }

    fn from_fen_parts(board_fen: &str, turn_fen: &str,
            castling_rights_fen: &str, en_passant_fen: &str)
            -> FenResult<Position> {
        let board = Board::from_fen(board_fen)?;
        let turn = Player::from_fen_turn_specifier(turn_fen)?;
        let castles = parse_castling_rights(castling_rights_fen)?;
        let en_passant = parse_en_passant_target(en_passant_fen)?;
        let unmoved_rooks = UnmovedRooks::from_board(&board);

        Ok(Position {
            board,
            castles,
            unmoved_rooks,
            en_passant,
            turn
        })
    }

    /// Parses the FEN components which relate to the position: the board,
    /// the player to move, the castling rights, and the en passant target
    /// square, separated by single spaces. The clock components belong to
    /// [Game::from_fen]. As FEN carries no history, the unmoved rooks are
    /// reconstructed with the guess of [UnmovedRooks::from_board].
    ///
    /// # Errors
    ///
    /// Any [FenError] that can occur in the four position parts.
    pub fn from_fen(fen: &str) -> FenResult<Position> {
        let mut parts = fen.split(' ');
        let board_fen = next_part(&mut parts, fen)?;
        let turn_fen = next_part(&mut parts, fen)?;
        let castling_fen = next_part(&mut parts, fen)?;
        let en_passant_fen = next_part(&mut parts, fen)?;

        if parts.next().is_some() {
            return Err(FenError::WrongPartCount(fen.to_owned()));
        }

        Position::from_fen_parts(
            board_fen, turn_fen, castling_fen, en_passant_fen)
    }

    /// Gets the current arrangement of pieces.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gets the castling rights still available.
    pub fn castles(&self) -> Castles {
        self.castles
    }

    /// Gets the rook origin squares whose rook has never moved.
    pub fn unmoved_rooks(&self) -> UnmovedRooks {
        self.unmoved_rooks
    }

    /// Gets the square on which a pawn of the player to move could capture
    /// en passant, if the opponent's last move was a double pawn push.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Gets the [Player] whose turn it currently is.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Converts this position into the first four parts of its FEN notation
    /// (board, turn, castling rights, and en passant target), separated by
    /// single spaces.
    pub fn to_fen(&self) -> String {
        let mut fen = self.board.to_fen();

        fen.push(' ');
        fen.push(self.turn.to_fen_turn_char());
        fen.push(' ');

        if self.castles.is_empty() {
            fen.push('-');
        }
        else {
            for player in PLAYERS {
                if self.castles.can_side(player, Side::King) {
                    fen.push(player.convert_fen_piece_char('k'));
                }

                if self.castles.can_side(player, Side::Queen) {
                    fen.push(player.convert_fen_piece_char('q'));
                }
            }
        }

        fen.push(' ');

        match self.en_passant {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-')
        }

        fen
    }
}

/// The entire state of a game: the current [Position], the half move clock
/// and full move number, the ordered sequence of moves played, and the last
/// move. A game is an immutable value; [Game::apply] produces the next one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    position: Position,
    half_move_clock: usize,
    full_move_number: usize,
    moves: Vec<Move>,
    last_move: Option<Move>
}

impl Game {

    /// Creates a new game in the initial configuration, i.e. in the
    /// [Position] described by [Position::initial] with empty history.
    pub fn initial() -> Game {
        Game {
            position: Position::initial(),
            half_move_clock: 0,
            full_move_number: 1,
            moves: Vec::new(),
            last_move: None
        }
    }

    /// Parses a full six-part FEN string: the four position parts (see
    /// [Position::from_fen]) followed by the half move clock and the full
    /// move number. The move history of the resulting game is empty.
    ///
    /// # Errors
    ///
    /// Any [FenError].
    pub fn from_fen(fen: &str) -> FenResult<Game> {
        let mut parts = fen.split(' ');
        let board_fen = next_part(&mut parts, fen)?;
        let turn_fen = next_part(&mut parts, fen)?;
        let castling_fen = next_part(&mut parts, fen)?;
        let en_passant_fen = next_part(&mut parts, fen)?;
        let half_move_clock_fen = next_part(&mut parts, fen)?;
        let full_move_number_fen = next_part(&mut parts, fen)?;

        if parts.next().is_some() {
            return Err(FenError::WrongPartCount(fen.to_owned()));
        }

        let position = Position::from_fen_parts(
            board_fen, turn_fen, castling_fen, en_passant_fen)?;
        let half_move_clock = half_move_clock_fen.parse()
            .map_err(|error| FenError::ParseHalfMoveClockError {
                part: half_move_clock_fen.to_owned(),
                error
            })?;
        let full_move_number = full_move_number_fen.parse()
            .map_err(|error| FenError::ParseFullMoveNumberError {
                part: full_move_number_fen.to_owned(),
                error
            })?;

        Ok(Game {
            position,
            half_move_clock,
            full_move_number,
            moves: Vec::new(),
            last_move: None
        })
    }

    /// Gets the current [Position].
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Gets the current arrangement of pieces.
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    /// Gets the [Player] whose turn it currently is.
    pub fn turn(&self) -> Player {
        self.position.turn()
    }

    /// Gets the number of plies since the last pawn move, capture, or
    /// promotion. Reaching [rules::DRAW_NO_PROGRESS_COUNT] draws the game.
    pub fn half_move_clock(&self) -> usize {
        self.half_move_clock
    }

    /// Gets the 1-based number of the current full move. It increments after
    /// each of black's plies.
    pub fn full_move_number(&self) -> usize {
        self.full_move_number
    }

    /// Gets all moves played so far, in order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Gets the most recently played move, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// Indicates whether the player whose turn it is is currently in check.
    pub fn is_check(&self) -> bool {
        movement::is_check(&self.position)
    }

    /// Returns a list of all legal moves available to the player whose turn
    /// it is.
    pub fn legal_moves(&self) -> Vec<Move> {
        movement::legal_moves(&self.position)
    }

    /// Returns the subset of [Game::legal_moves] departing from the given
    /// origin square.
    pub fn legal_moves_from(&self, origin: Square) -> Vec<Move> {
        movement::legal_moves_from(&self.position, origin)
    }

    /// Looks up the legal move with the given origin and destination square.
    /// For promotions, the promotion piece must be given to disambiguate;
    /// for every other move it must be `None`. The destination of a castle
    /// move is the king's destination.
    ///
    /// # Errors
    ///
    /// * [MoveError::NoPiece] if the origin square is empty.
    /// * [MoveError::OpponentPiece] if the origin square holds a piece of
    ///   the player whose turn it is not.
    /// * [MoveError::Illegal] if no legal move matches.
    pub fn find_move(&self, origin: Square, destination: Square,
            promotion: Option<Piece>) -> MoveResult<Move> {
        let board = self.position.board();

        if board.piece_at(origin).is_none() {
            return Err(MoveError::NoPiece(origin));
        }

        if board.player_at(origin) != Some(self.turn()) {
            return Err(MoveError::OpponentPiece(origin));
        }

        self.legal_moves_from(origin).into_iter()
            .find(|mov| mov.destination() == destination &&
                mov.promotion() == promotion)
            .ok_or(MoveError::Illegal {
                origin,
                destination
            })
    }

    /// Applies the given move and returns the resulting game. The move must
    /// be contained in the current legal move set, otherwise it is rejected
    /// and this game is left as it was.
    ///
    /// # Errors
    ///
    /// [MoveError::Illegal] if the move is not legal in the current
    /// position.
    pub fn apply(&self, mov: &Move) -> MoveResult<Game> {
        if !self.legal_moves().contains(mov) {
            debug!("rejected {:?} for {:?}", mov, self.turn());

            return Err(MoveError::Illegal {
                origin: mov.origin(),
                destination: mov.destination()
            });
        }

        let player = self.turn();
        let board = self.position.board();
        let piece = mov.piece();

        let next_board = match *mov {
            Move::Ordinary { origin, destination, captured: None, .. } =>
                board.relocate(origin, destination),
            Move::Ordinary { origin, destination, captured: Some(_), .. } =>
                board.capture(origin, destination, destination),
            Move::EnPassant { origin, destination, capture } =>
                board.capture(origin, destination, capture),
            Move::Promotion { origin, destination, promotion, .. } =>
                board.promote(origin, destination, promotion),
            Move::Castle { king, king_destination, rook, rook_destination } =>
                board.take(king)
                    .and_then(|board| board.take(rook))
                    .and_then(|board|
                        board.put(Piece::King, player, king_destination))
                    .and_then(|board|
                        board.put(Piece::Rook, player, rook_destination))
        };
        let next_board = next_board.unwrap_or_else(||
            panic!("legal move {:?} violated a board invariant", mov));

        let half_move_clock = if mov.is_capture() ||
                mov.promotion().is_some() || piece == Piece::Pawn {
            0
        }
        else {
            self.half_move_clock + 1
        };
        let full_move_number = if player == Player::Black {
            self.full_move_number + 1
        }
        else {
            self.full_move_number
        };

        let mut castles = self.position.castles;
        let mut unmoved_rooks = self.position.unmoved_rooks;

        // A captured unmoved rook loses its corner's right. If its side
        // cannot be inferred anymore, the whole color's rights go.

        if let Some(capture_square) = mov.capture_square() {
            if let Some(inference) = unmoved_rooks.side(capture_square) {
                unmoved_rooks = unmoved_rooks.without_square(capture_square);

                match inference {
                    Some(side) => castles =
                        castles.without_side(player.opponent(), side),
                    None => castles = castles.without_player(player.opponent())
                }
            }
        }

        match piece {
            Piece::Rook => {
                if let Some(inference) = unmoved_rooks.side(mov.origin()) {
                    unmoved_rooks =
                        unmoved_rooks.without_square(mov.origin());

                    match inference {
                        Some(side) =>
                            castles = castles.without_side(player, side),
                        None => castles = castles.without_player(player)
                    }
                }
            },
            Piece::King => {
                unmoved_rooks = unmoved_rooks.without_player(player);
                castles = castles.without_player(player);
            },
            _ => { }
        }

        let en_passant = match *mov {
            Move::Ordinary { piece: Piece::Pawn, origin, destination, .. }
                    if origin.rank().distance(destination.rank()) == 2 =>
                match player {
                    Player::White => origin.up(),
                    Player::Black => origin.down()
                },
            _ => None
        };

        let mut moves = self.moves.clone();
        moves.push(*mov);

        debug!("applied {:?} for {:?}", mov, player);

        Ok(Game {
            position: Position {
                board: next_board,
                castles,
                unmoved_rooks,
                en_passant,
                turn: player.opponent()
            },
            half_move_clock,
            full_move_number,
            moves,
            last_move: Some(*mov)
        })
    }

    /// Classifies this game as ended or ongoing.
    ///
    /// # Returns
    ///
    /// * [Outcome::Checkmate] if the player to move is in check and has no
    ///   legal moves.
    /// * [Outcome::Stalemate] if the player to move is not in check and has
    ///   no legal moves.
    /// * [Outcome::Draw] if the half move clock has reached
    ///   [rules::DRAW_NO_PROGRESS_COUNT] or the player to move lacks mating
    ///   material against the opponent's remaining pieces.
    /// * `None` if the game goes on.
    pub fn outcome(&self) -> Option<Outcome> {
        let any_moves = !self.legal_moves().is_empty();

        if self.is_check() {
            if !any_moves {
                return Some(Outcome::Checkmate);
            }
        }
        else if !any_moves {
            return Some(Outcome::Stalemate);
        }

        let draw = self.half_move_clock >= rules::DRAW_NO_PROGRESS_COUNT ||
            rules::insufficient_mating_material(self.board(), self.turn());

        if draw {
            Some(Outcome::Draw)
        }
        else {
            None
        }
    }

    /// Gets the winner of this game: the opponent of the player to move if
    /// the game ended in checkmate, and `None` otherwise.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome() {
            Some(Outcome::Checkmate) => Some(self.turn().opponent()),
            _ => None
        }
    }

    /// Converts this game into a full six-part FEN string in the format
    /// parsed by [Game::from_fen].
    pub fn to_fen(&self) -> String {
        let mut fen = self.position.to_fen();

        fen.push(' ');
        fen.push_str(&self.half_move_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.full_move_number.to_string());

        fen
    }
}

#[cfg(test)]
mod tests {

    use kernal::prelude::*;

    use rstest::rstest;

    use super::*;

    use crate::board::locations::*;

    const INITIAL_FEN: &str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn play(game: Game, origin: Square, destination: Square) -> Game {
        let mov = game.find_move(origin, destination, None)
            .expect("expected move not found");

        game.apply(&mov).expect("expected move rejected")
    }

    #[test]
    fn initial_game_matches_initial_fen() {
        let initial = Game::initial();

        assert_eq!(INITIAL_FEN, &initial.to_fen());
        assert_eq!(initial, Game::from_fen(INITIAL_FEN).unwrap());
    }

    #[rstest]
    #[case("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 17")]
    #[case("8/2k1P3/8/6p1/p4P2/P5K1/8/8 b - - 11 40")]
    #[case("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")]
    fn game_fen_round_trip(#[case] fen: &str) {
        let game = Game::from_fen(fen).expect("test FEN not accepted");

        assert_eq!(fen, &game.to_fen());
    }

    #[rstest]
    #[case::missing_parts("8/8/8/8/8/8/8/8 w - -")]
    #[case::excess_parts(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 x")]
    #[case::bad_turn("8/8/8/8/8/8/8/8 x - - 0 1")]
    #[case::bad_castling("8/8/8/8/8/8/8/8 w x - 0 1")]
    #[case::bad_en_passant("8/8/8/8/8/8/8/8 w - e9 0 1")]
    #[case::bad_half_move_clock("8/8/8/8/8/8/8/8 w - - x 1")]
    #[case::bad_full_move_number("8/8/8/8/8/8/8/8 w - - 0 x")]
    fn malformed_game_fen_rejected(#[case] fen: &str) {
        assert!(Game::from_fen(fen).is_err());
    }

    #[test]
    fn applying_a_move_flips_the_turn_exactly_once() {
        let game = Game::initial();

        assert_eq!(Player::White, game.turn());

        let game = play(game, E2, E4);

        assert_eq!(Player::Black, game.turn());
        assert_eq!(1, game.moves().len());
    }

    #[test]
    fn pawn_move_resets_the_half_move_clock() {
        let game = play(Game::initial(), G1, F3);

        assert_that!(game.half_move_clock()).is_equal_to(1);

        let game = play(game, E7, E5);

        assert_that!(game.half_move_clock()).is_equal_to(0);
    }

    #[test]
    fn full_move_number_increments_after_black() {
        let game = Game::initial();

        assert_that!(game.full_move_number()).is_equal_to(1);

        let game = play(game, E2, E4);

        assert_that!(game.full_move_number()).is_equal_to(1);

        let game = play(game, E7, E5);

        assert_that!(game.full_move_number()).is_equal_to(2);
    }

    #[test]
    fn double_push_sets_the_en_passant_target() {
        let game = play(Game::initial(), E2, E4);

        assert_eq!(Some(E3), game.position().en_passant());

        let game = play(game, G8, F6);

        assert_eq!(None, game.position().en_passant());
    }

    #[test]
    fn applying_an_illegal_move_is_rejected() {
        let game = Game::initial();
        let mov = Move::Ordinary {
            piece: Piece::Pawn,
            origin: E2,
            destination: E5,
            captured: None
        };

        assert_eq!(
            Err(MoveError::Illegal {
                origin: E2,
                destination: E5
            }),
            game.apply(&mov));
    }

    #[test]
    fn find_move_rejects_empty_and_opponent_origins() {
        let game = Game::initial();

        assert_eq!(Err(MoveError::NoPiece(E4)), game.find_move(E4, E5, None));
        assert_eq!(
            Err(MoveError::OpponentPiece(E7)),
            game.find_move(E7, E5, None));
        assert_eq!(
            Err(MoveError::Illegal {
                origin: E2,
                destination: E5
            }),
            game.find_move(E2, E5, None));
    }

    #[test]
    fn find_move_requires_the_promotion_piece() {
        let game = Game::from_fen("8/2k1P3/8/8/8/6K1/8/8 w - - 0 1").unwrap();

        assert!(game.find_move(E7, E8, None).is_err());

        let mov = game.find_move(E7, E8, Some(Piece::Queen)).unwrap();

        assert_eq!(Some(Piece::Queen), mov.promotion());
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let game = Game::initial();
        let game = play(game, E2, E4);
        let game = play(game, A7, A6);
        let game = play(game, E4, E5);
        let game = play(game, D7, D5);
        let game = play(game, E5, D6);

        assert_eq!(
            "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3",
            &game.to_fen());
    }

    #[test]
    fn castling_relocates_king_and_rook() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 4 20").unwrap();
        let game = play(game, E1, G1);

        assert_eq!("4k3/8/8/8/8/8/8/5RK1 b - - 5 20", &game.to_fen());
    }

    #[test]
    fn king_move_revokes_both_rights() {
        let game =
            Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let game = play(game, E1, E2);

        assert!(!game.position().castles().can(Player::White));
        assert!(game.position().castles().can(Player::Black));
        assert!(!game.position().unmoved_rooks().contains(A1));
        assert!(!game.position().unmoved_rooks().contains(H1));
    }

    #[test]
    fn castling_rights_are_monotonically_non_increasing() {
        // Moving the king away and back does not restore the rights.

        let game =
            Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let game = play(game, E1, E2);
        let game = play(game, E8, E7);
        let game = play(game, E2, E1);
        let game = play(game, E7, E8);

        assert!(game.position().castles().is_empty());
        assert!(game.legal_moves().iter().all(|mov| !mov.is_castle()));
    }

    #[test]
    fn rook_move_revokes_only_its_side() {
        let game =
            Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let game = play(game, H1, G1);

        let castles = game.position().castles();

        assert!(!castles.can_side(Player::White, Side::King));
        assert!(castles.can_side(Player::White, Side::Queen));
        assert!(castles.can_side(Player::Black, Side::King));
        assert!(castles.can_side(Player::Black, Side::Queen));
    }

    #[test]
    fn rook_capture_revokes_the_captured_side() {
        // White's h1-rook captures the rook on h8. Black loses the kingside
        // right, white loses the kingside right for moving the rook.

        let game =
            Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let game = play(game, H1, H8);

        let castles = game.position().castles();

        assert!(!castles.can_side(Player::Black, Side::King));
        assert!(castles.can_side(Player::Black, Side::Queen));
        assert!(!castles.can_side(Player::White, Side::King));
        assert!(castles.can_side(Player::White, Side::Queen));
    }

    #[test]
    fn capturing_the_last_unmoved_rook_revokes_the_whole_color() {
        // Only the a-rooks remain unmoved. After axa8, no other unmoved rook
        // shares the rank, so the side cannot be inferred and all of black's
        // rights are dropped as the safe fallback.

        let game =
            Game::from_fen("r3k3/8/8/8/8/8/8/R3K3 w Qq - 0 1").unwrap();
        let game = play(game, A1, A8);

        assert!(game.position().castles().is_empty());
        assert_eq!(UnmovedRooks::NONE, game.position().unmoved_rooks());
    }

    #[test]
    fn unmoved_rook_side_inference() {
        assert_eq!(None, UnmovedRooks::CORNERS.side(E4));
        assert_eq!(Some(Some(Side::Queen)), UnmovedRooks::CORNERS.side(A1));
        assert_eq!(Some(Some(Side::King)), UnmovedRooks::CORNERS.side(H8));

        let only_queenside = UnmovedRooks::CORNERS
            .without_square(H1)
            .without_square(H8);

        assert_eq!(Some(None), only_queenside.side(A1));
    }

    fn assert_no_self_check(game: &Game, depth: usize) {
        for mov in game.legal_moves() {
            let next = game.apply(&mov).unwrap();

            assert!(
                !next.board().is_check(game.turn()),
                "{:?} left the king attacked in {}", mov, game.to_fen());

            if depth > 1 {
                assert_no_self_check(&next, depth - 1);
            }
        }
    }

    #[test]
    fn no_move_leaves_the_moving_king_in_check() {
        assert_no_self_check(&Game::initial(), 2);

        let kiwipete = Game::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq \
                - 0 1")
            .unwrap();

        assert_no_self_check(&kiwipete, 2);
    }

    #[test]
    fn outcome_of_fresh_game_is_none() {
        assert_eq!(None, Game::initial().outcome());
        assert_eq!(None, Game::initial().winner());
    }

    #[test]
    fn fools_mate_is_checkmate_for_black() {
        let game = Game::initial();
        let game = play(game, F2, F3);
        let game = play(game, E7, E5);
        let game = play(game, G2, G4);
        let game = play(game, D8, H4);

        assert_eq!(Some(Outcome::Checkmate), game.outcome());
        assert_eq!(Some(Player::Black), game.winner());
    }

    #[test]
    fn stalemate_is_a_draw_without_winner() {
        let game = Game::from_fen("k7/8/1Q6/8/8/8/8/K7 b - - 0 1").unwrap();

        assert_eq!(Some(Outcome::Stalemate), game.outcome());
        assert_eq!(None, game.winner());
    }

    #[test]
    fn hundredth_quiet_ply_draws_the_game() {
        let game = Game::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 99 60")
            .unwrap();

        assert_eq!(None, game.outcome());

        let game = play(game, B1, C3);

        assert_that!(game.half_move_clock()).is_equal_to(100);
        assert_eq!(Some(Outcome::Draw), game.outcome());
    }

    #[test]
    fn same_colored_bishop_endgame_is_a_draw() {
        let game =
            Game::from_fen("8/8/2b1k3/8/8/1B2K3/8/8 w - - 0 1").unwrap();

        assert_eq!(Some(Outcome::Draw), game.outcome());
    }

    #[test]
    fn opposite_colored_bishop_endgame_goes_on() {
        let game =
            Game::from_fen("8/8/2b1k3/8/8/2B1K3/8/8 w - - 0 1").unwrap();

        assert_eq!(None, game.outcome());
    }
}
