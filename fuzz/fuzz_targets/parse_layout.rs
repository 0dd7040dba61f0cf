#![no_main]
use checkers::rules::board::Board;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(board) = Board::try_from(s) {
            // Printing the board back produces a layout describing the same
            // board.
            let printed = board.to_string();
            assert_eq!(Board::try_from(printed.as_str()).unwrap(), board);
        }
    }
});
