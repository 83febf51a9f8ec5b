//! Cascade resolution tests: scoring, refill, and termination.

use tui_match3::core::{find_matches, Board, CascadeResolver, ScriptedTokens, TokenRng};
use tui_match3::types::{Token, BOARD_WIDTH, CELL_COUNT};

const W: usize = BOARD_WIDTH;

fn stripe(r: usize, c: usize) -> Token {
    [Token::Red, Token::Blue, Token::Green][(r + c) % 3]
}

fn quiet_board() -> Board {
    Board::from_rows(
        (0..W)
            .map(|r| (0..W).map(|c| Some(stripe(r, c))).collect())
            .collect(),
    )
}

#[test]
fn test_single_run_scores_thirty() {
    let mut board = quiet_board();
    // Horizontal Purple run on the top row.
    for i in 0..3 {
        board.set(i, Some(Token::Purple));
    }

    // Refill each column with the token the stripe originally held there,
    // restoring a stable board after one round.
    let mut source = ScriptedTokens::new(&[Token::Red, Token::Blue, Token::Green]);
    let points = CascadeResolver::resolve_now(&mut board, &mut source);

    assert_eq!(points, 30);
    assert_eq!(source.consumed(), 3);
    assert!(!board.has_blanks());
    assert!(find_matches(&board).is_empty());
}

#[test]
fn test_l_shape_scores_fifty() {
    let mut board = quiet_board();
    // Horizontal 40..42 and vertical 40,48,56 share cell 40: five cells.
    for i in [40, 41, 42, 48, 56] {
        board.set(i, Some(Token::Green));
    }
    // The stripe puts Green at 43; break the extension with a neutral token.
    board.set(43, Some(Token::Yellow));
    assert_eq!(find_matches(&board).len(), 5);

    // Five refills, chosen so the settled board is stable.
    let mut source = ScriptedTokens::new(&[
        Token::Purple,
        Token::Orange,
        Token::Purple,
        Token::Orange,
        Token::Purple,
    ]);
    let points = CascadeResolver::resolve_now(&mut board, &mut source);

    assert_eq!(points, 50);
    assert_eq!(source.consumed(), 5);
    assert!(!board.has_blanks());
    assert!(find_matches(&board).is_empty());
}

#[test]
fn test_emptied_column_is_fully_refilled() {
    let mut board = quiet_board();
    // Column 4 becomes a single vertical run of eight.
    for r in 0..W {
        board.set(r * W + 4, Some(Token::Purple));
    }
    assert_eq!(find_matches(&board).len(), W);

    // Refill the column with its original stripe values.
    let script: Vec<Token> = (0..W).map(|r| stripe(r, 4)).collect();
    let mut source = ScriptedTokens::new(&script);
    let points = CascadeResolver::resolve_now(&mut board, &mut source);

    // Eight cells at ten points each.
    assert_eq!(points, 80);
    assert_eq!(source.consumed(), W);
    assert!(!board.has_blanks());
    for r in 0..W {
        assert_eq!(board.token_at(r * W + 4), Some(stripe(r, 4)));
    }
}

#[test]
fn test_random_cascades_settle_without_blanks() {
    // Whatever the refill draws, resolution must terminate on a full board
    // with a score that is a whole multiple of ten.
    for seed in [1u32, 99, 4242, 777_777] {
        let mut source = TokenRng::new(seed);
        let mut board = Board::random(&mut source);
        let points = CascadeResolver::resolve_now(&mut board, &mut source);
        assert!(!board.has_blanks(), "seed {} left blanks", seed);
        assert_eq!(points % 10, 0, "seed {} scored {}", seed, points);
    }
}

#[test]
fn test_stable_board_is_untouched() {
    let mut board = quiet_board();
    let before = board.clone();
    let mut source = ScriptedTokens::cycling(&[Token::Purple]);
    let points = CascadeResolver::resolve_now(&mut board, &mut source);
    assert_eq!(points, 0);
    assert_eq!(board, before);
    assert_eq!(source.consumed(), 0);
}

#[test]
fn test_worst_case_board_still_terminates() {
    let mut board = Board::from_rows(vec![vec![Some(Token::Red); W]; W]);
    let mut source = ScriptedTokens::cycling(&[Token::Red]);
    let points = CascadeResolver::resolve_now(&mut board, &mut source);
    // The cap stops an endless all-identical cascade.
    assert!(points > 0);
    assert_eq!(points % (CELL_COUNT as u32 * 10), 0);
}
