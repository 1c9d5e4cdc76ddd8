//! This module contains the precomputed attack tables. All tables are built
//! once at startup and consumed read-only thereafter.
//!
//! Non-sliding pieces (knight, king, and the two pawn colors) are served from
//! per-square tables computed by applying fixed offset deltas and discarding
//! any target whose Chebyshev distance from its predecessor exceeds 2, which
//! rejects wraparound across the board edges. Sliding pieces are served from
//! per-direction ray tables combined with a first-blocker lookup: the ray
//! beyond the nearest occupied square is removed, the blocker itself remains
//! attacked (and capturable).

use once_cell::sync::Lazy;

use crate::board::{Bitboard, Square};
use crate::player::{PLAYER_COUNT, Player};

const KNIGHT_DELTAS: [i32; 8] = [17, 15, 10, 6, -6, -10, -15, -17];
const KING_DELTAS: [i32; 8] = [9, 8, 7, 1, -1, -7, -8, -9];
const BISHOP_DELTAS: [i32; 4] = [9, 7, -7, -9];
const ROOK_DELTAS: [i32; 4] = [8, 1, -1, -8];
const WHITE_PAWN_DELTAS: [i32; 2] = [7, 9];
const BLACK_PAWN_DELTAS: [i32; 2] = [-7, -9];

/// The eight ray directions a slider can travel in. The discriminant is the
/// index into the ray tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7
}

impl Direction {

    fn delta(self) -> i32 {
        match self {
            Direction::North => 8,
            Direction::NorthEast => 9,
            Direction::East => 1,
            Direction::SouthEast => -7,
            Direction::South => -8,
            Direction::SouthWest => -9,
            Direction::West => -1,
            Direction::NorthWest => 7
        }
    }

    /// Rays with a positive delta grow towards higher square indices, so
    /// their nearest blocker is the lowest set bit. For negative rays it is
    /// the highest set bit.
    fn is_positive(self) -> bool {
        self.delta() > 0
    }
}

const DIRECTION_COUNT: usize = 8;

const DIRECTIONS: [Direction; DIRECTION_COUNT] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest
];

fn chebyshev_distance(a: i32, b: i32) -> i32 {
    let file_distance = (a % 8 - b % 8).abs();
    let rank_distance = (a / 8 - b / 8).abs();

    file_distance.max(rank_distance)
}

/// Walks every given delta from the given square until it falls off the
/// board or hits an occupied square, which is included in the result. With a
/// full occupancy this yields single-step (hopper) attacks, with an empty
/// occupancy full rays.
fn sliding_attacks(square: i32, occupied: Bitboard, deltas: &[i32])
        -> Bitboard {
    let mut attacks = Bitboard::EMPTY;

    for &delta in deltas {
        let mut current = square;

        loop {
            let next = current + delta;

            if !(0..64).contains(&next)
                    || chebyshev_distance(next, current) > 2 {
                break;
            }

            attacks |= Bitboard(1 << next);

            if occupied.contains(Square(next as usize)) {
                break;
            }

            current = next;
        }
    }

    attacks
}

fn hopper_table(deltas: &[i32]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];

    for (square, entry) in table.iter_mut().enumerate() {
        *entry = sliding_attacks(square as i32, Bitboard::FULL, deltas);
    }

    table
}

static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| hopper_table(&KNIGHT_DELTAS));

static KING_ATTACKS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| hopper_table(&KING_DELTAS));

static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; PLAYER_COUNT]> = Lazy::new(||
    [hopper_table(&WHITE_PAWN_DELTAS), hopper_table(&BLACK_PAWN_DELTAS)]);

static RAYS: Lazy<[[Bitboard; 64]; DIRECTION_COUNT]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; DIRECTION_COUNT];

    for direction in DIRECTIONS {
        for square in 0..64 {
            table[direction as usize][square] = sliding_attacks(
                square as i32, Bitboard::EMPTY, &[direction.delta()]);
        }
    }

    table
});

static BETWEEN: Lazy<[[Bitboard; 64]; 64]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 64];

    for a in 0..64i32 {
        for b in 0..64i32 {
            let a_singleton = Bitboard(1 << a);
            let b_singleton = Bitboard(1 << b);

            for deltas in [&ROOK_DELTAS, &BISHOP_DELTAS] {
                if sliding_attacks(a, Bitboard::EMPTY, deltas)
                        .contains(Square(b as usize)) {
                    table[a as usize][b as usize] =
                        sliding_attacks(a, b_singleton, deltas) &
                        sliding_attacks(b, a_singleton, deltas);
                }
            }
        }
    }

    table
});

static LINES: Lazy<[[Bitboard; 64]; 64]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 64];

    for a in 0..64i32 {
        for b in 0..64i32 {
            for deltas in [&ROOK_DELTAS, &BISHOP_DELTAS] {
                if sliding_attacks(a, Bitboard::EMPTY, deltas)
                        .contains(Square(b as usize)) {
                    table[a as usize][b as usize] =
                        Bitboard(1 << a) | Bitboard(1 << b) |
                        (sliding_attacks(a, Bitboard::EMPTY, deltas) &
                            sliding_attacks(b, Bitboard::EMPTY, deltas));
                }
            }
        }
    }

    table
});

fn ray_attacks(square: Square, occupied: Bitboard, direction: Direction)
        -> Bitboard {
    let ray = RAYS[direction as usize][square.as_usize()];
    let blockers = ray & occupied;
    let blocker = if direction.is_positive() {
        blockers.first()
    }
    else {
        blockers.last()
    };

    match blocker {
        Some(blocker) =>
            ray ^ RAYS[direction as usize][blocker.as_usize()],
        None => ray
    }
}

/// Gets the set of squares a knight on the given square attacks.
pub fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square.as_usize()]
}

/// Gets the set of squares a king on the given square attacks.
pub fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square.as_usize()]
}

/// Gets the set of squares a pawn of the given player on the given square
/// attacks. This does not include push squares, which are not attacked.
pub fn pawn_attacks(player: Player, square: Square) -> Bitboard {
    PAWN_ATTACKS[player as usize][square.as_usize()]
}

/// Gets the set of squares a rook on the given square attacks under the
/// given occupancy. The nearest occupied square along every ray is included.
pub fn rook_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(square, occupied, Direction::North) |
        ray_attacks(square, occupied, Direction::East) |
        ray_attacks(square, occupied, Direction::South) |
        ray_attacks(square, occupied, Direction::West)
}

/// Gets the set of squares a bishop on the given square attacks under the
/// given occupancy. The nearest occupied square along every ray is included.
pub fn bishop_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(square, occupied, Direction::NorthEast) |
        ray_attacks(square, occupied, Direction::SouthEast) |
        ray_attacks(square, occupied, Direction::SouthWest) |
        ray_attacks(square, occupied, Direction::NorthWest)
}

/// Gets the set of squares a queen on the given square attacks under the
/// given occupancy.
pub fn queen_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(square, occupied) | bishop_attacks(square, occupied)
}

/// Gets the set of squares strictly between the two given squares, or the
/// empty bitboard if they do not share a rank, file, or diagonal.
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.as_usize()][b.as_usize()]
}

/// Gets the full line (rank, file, or diagonal) through the two given
/// squares, including both, or the empty bitboard if no such line exists.
pub fn line(a: Square, b: Square) -> Bitboard {
    LINES[a.as_usize()][b.as_usize()]
}

/// Indicates whether the three given squares lie on a common rank, file, or
/// diagonal.
pub fn aligned(a: Square, b: Square, c: Square) -> bool {
    line(a, b).contains(c)
}
