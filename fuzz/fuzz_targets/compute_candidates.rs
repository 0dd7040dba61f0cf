#![no_main]
use checkers::game::turn::{Phase, TurnOrchestrator};
use checkers::rules::board::Board;
use checkers::rules::core::{Color, Diagonal};
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = match std::str::from_utf8(data) {
        Ok(input) => input,
        Err(_) => return,
    };
    let board = match Board::try_from(input) {
        Ok(board) => board,
        Err(_) => return,
    };
    for color in [Color::Light, Color::Dark] {
        let mut any_capture = false;
        for piece in board.pieces(color) {
            for jump in piece.compute_jumps(&board) {
                any_capture = true;
                assert_eq!(board.piece_at(jump.captured).unwrap().color(), !color);
                assert!(board.piece_at(jump.landing).is_none());
                assert!(Diagonal::ALL.into_iter().any(|diagonal| {
                    board.neighbor(piece.position(), diagonal) == Some(jump.captured)
                        && board.neighbor(jump.captured, diagonal) == Some(jump.landing)
                }));
            }
            let moves = piece.compute_moves(&board);
            assert!(moves.iter().all_unique());
            assert!(moves.iter().all(|m| board.piece_at(*m).is_none()));
        }
        let mut turn = TurnOrchestrator::new(board.clone());
        turn.begin_turn(color);
        if turn.activated().is_empty() {
            assert_eq!(turn.phase(), Phase::NoLegalMoves);
        } else if any_capture {
            // Forced capture: only capturing pieces are activated.
            for position in turn.activated() {
                let piece = board.piece_at(position).unwrap();
                assert!(!piece.compute_jumps(&board).is_empty());
            }
        }
    }
});
