use caissa_model::state::Game;

use kernal::prelude::*;

use rstest::rstest;

fn perft(game: &Game, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();

    if depth == 1 {
        return moves.len();
    }

    moves.iter()
        .map(|mov| {
            let next = game.apply(mov).expect("generated move was rejected");

            perft(&next, depth - 1)
        })
        .sum()
}

fn perft_fen(fen: &str, depth: usize) -> usize {
    let game = Game::from_fen(fen).unwrap();

    perft(&game, depth)
}

const INITIAL: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Reference values from the well-known public perft test positions, see
// https://www.chessprogramming.org/Perft_Results

const KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

const POSITION_4: &str =
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

const POSITION_5: &str =
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

const POSITION_6: &str =
    "r4rk1/1pp1qppp/p1np1n2/2b1p1b1/2B1P1B1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

#[rstest]
#[case::initial_1(INITIAL, 1, 20)]
#[case::initial_2(INITIAL, 2, 400)]
#[case::initial_3(INITIAL, 3, 8902)]
#[case::initial_4(INITIAL, 4, 197_281)]
#[case::kiwipete_1(KIWIPETE, 1, 48)]
#[case::kiwipete_2(KIWIPETE, 2, 2039)]
#[case::kiwipete_3(KIWIPETE, 3, 97_862)]
#[case::position_3_1(POSITION_3, 1, 14)]
#[case::position_3_2(POSITION_3, 2, 191)]
#[case::position_3_3(POSITION_3, 3, 2812)]
#[case::position_3_4(POSITION_3, 4, 43_238)]
#[case::position_4_1(POSITION_4, 1, 6)]
#[case::position_4_2(POSITION_4, 2, 264)]
#[case::position_4_3(POSITION_4, 3, 9467)]
#[case::position_5_1(POSITION_5, 1, 44)]
#[case::position_5_2(POSITION_5, 2, 1486)]
#[case::position_5_3(POSITION_5, 3, 62_379)]
#[case::position_6_1(POSITION_6, 1, 46)]
#[case::position_6_2(POSITION_6, 2, 2079)]
#[case::position_6_3(POSITION_6, 3, 89_890)]
fn perft_matches_reference_value(#[case] fen: &str, #[case] depth: usize,
        #[case] expected: usize) {
    let actual = perft_fen(fen, depth);

    assert_that!(actual).is_equal_to(expected);
}
