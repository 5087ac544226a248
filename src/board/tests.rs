use super::*;
use proptest::prelude::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7); // Center
    assert_eq!(pos.to_index(), 7 * 15 + 7);
    assert_eq!(pos.to_index(), 112);

    let pos2 = Pos::from_index(112);
    assert_eq!(pos2, Pos::CENTER);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(14, 14));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(15, 0));
    assert!(!Pos::is_valid(0, 15));
}

#[test]
fn test_pos_text_round_trip() {
    assert_eq!(Pos::CENTER.to_string(), "h8");
    assert_eq!("h8".parse::<Pos>(), Ok(Pos::CENTER));
    assert_eq!("A1".parse::<Pos>(), Ok(Pos::new(0, 0)));
    assert_eq!("o15".parse::<Pos>(), Ok(Pos::new(14, 14)));
    assert_eq!(Pos::new(14, 0).to_string(), "a15");
}

#[test]
fn test_pos_parse_errors() {
    assert_eq!("".parse::<Pos>(), Err(ParsePosError::Empty));
    assert_eq!("p3".parse::<Pos>(), Err(ParsePosError::Column('p')));
    assert_eq!("?3".parse::<Pos>(), Err(ParsePosError::Column('?')));
    assert_eq!("a0".parse::<Pos>(), Err(ParsePosError::Row("0".into())));
    assert_eq!("a16".parse::<Pos>(), Err(ParsePosError::Row("16".into())));
    assert_eq!("ax".parse::<Pos>(), Err(ParsePosError::Row("x".into())));
}

#[test]
fn test_new_board_is_empty() {
    let board = PackedBoard::new();
    assert_eq!(board.stone_count(), 0);
    assert!(Pos::all().all(|p| board.is_empty(p)));
    assert!(board.views_agree());
}

#[test]
fn test_place_and_get() {
    let mut board = PackedBoard::new();
    board.place(Pos::new(3, 4), Stone::Black);
    board.place(Pos::new(0, 14), Stone::White);

    assert_eq!(board.get(Pos::new(3, 4)), Cell::Black);
    assert_eq!(board.get(Pos::new(0, 14)), Cell::White);
    assert_eq!(board.get(Pos::new(4, 3)), Cell::Empty);
    assert_eq!(board.stone_count(), 2);
    assert!(board.views_agree());
}

#[test]
fn test_line_window_horizontal() {
    let mut board = PackedBoard::new();
    board.place(Pos::new(7, 6), Stone::Black);
    board.place(Pos::new(7, 8), Stone::White);

    let line = board.line(Pos::CENTER, Direction::Horizontal, 1);
    assert_eq!(Cell::from_bits(line), Cell::Black);
    assert_eq!(Cell::from_bits(line >> 2), Cell::Empty);
    assert_eq!(Cell::from_bits(line >> 4), Cell::White);
}

#[test]
fn test_line_window_past_edges_is_outside() {
    let board = PackedBoard::new();

    // corner: the two cells before a1 on every line are off the board
    for dir in Direction::ALL {
        let line = board.line(Pos::new(0, 0), dir, 2);
        assert_eq!(Cell::from_bits(line), Cell::Outside, "{dir:?}");
        assert_eq!(Cell::from_bits(line >> 2), Cell::Outside, "{dir:?}");
        assert_eq!(Cell::from_bits(line >> 4), Cell::Empty, "{dir:?}");
    }

    // diagonal slots past the board edge are outside too
    let line = board.line(Pos::new(0, 14), Direction::Diagonal, 1);
    assert_eq!(Cell::from_bits(line >> 4), Cell::Outside);
    let line = board.line(Pos::new(14, 14), Direction::AntiDiagonal, 1);
    assert_eq!(Cell::from_bits(line >> 4), Cell::Outside);
}

#[test]
fn test_line_window_diagonals() {
    let mut board = PackedBoard::new();
    board.place(Pos::new(6, 6), Stone::Black);
    board.place(Pos::new(8, 8), Stone::Black);
    board.place(Pos::new(6, 8), Stone::White);
    board.place(Pos::new(8, 6), Stone::White);

    let diag = board.line(Pos::CENTER, Direction::Diagonal, 1);
    assert_eq!(Cell::from_bits(diag), Cell::Black);
    assert_eq!(Cell::from_bits(diag >> 4), Cell::Black);

    // anti-diagonal runs with increasing row: (6, 8) comes first
    let anti = board.line(Pos::CENTER, Direction::AntiDiagonal, 1);
    assert_eq!(Cell::from_bits(anti), Cell::White);
    assert_eq!(Cell::from_bits(anti >> 4), Cell::White);
}

#[test]
fn test_has_neighbor() {
    let mut board = PackedBoard::new();
    board.place(Pos::CENTER, Stone::Black);
    assert!(board.has_neighbor(Pos::new(9, 9), 2));
    assert!(!board.has_neighbor(Pos::new(10, 7), 2));
    assert!(!board.has_neighbor(Pos::CENTER, 1));
}

fn arb_pos() -> impl Strategy<Value = Pos> {
    (0..BOARD_SIZE as u8, 0..BOARD_SIZE as u8).prop_map(|(r, c)| Pos::new(r, c))
}

fn arb_stone() -> impl Strategy<Value = Stone> {
    prop_oneof![Just(Stone::Black), Just(Stone::White)]
}

proptest! {
    #[test]
    fn place_then_remove_restores_bits(
        setup in proptest::collection::vec((arb_pos(), arb_stone()), 0..40),
        pos in arb_pos(),
        stone in arb_stone(),
    ) {
        let mut board = PackedBoard::new();
        for (p, s) in setup {
            if board.is_empty(p) && p != pos {
                board.place(p, s);
            }
        }
        let before = board.clone();
        board.place(pos, stone);
        prop_assert_eq!(board.get(pos), stone.cell());
        board.remove(pos);
        prop_assert_eq!(board, before);
    }

    #[test]
    fn views_agree_after_any_sequence(
        ops in proptest::collection::vec((arb_pos(), arb_stone(), any::<bool>()), 0..80),
    ) {
        let mut board = PackedBoard::new();
        let mut placed: Vec<Pos> = Vec::new();
        for (p, s, undo) in ops {
            if undo {
                if let Some(last) = placed.pop() {
                    board.remove(last);
                }
            } else if board.is_empty(p) {
                board.place(p, s);
                placed.push(p);
            }
            prop_assert!(board.views_agree());
        }
        prop_assert_eq!(board.stone_count() as usize, placed.len());
    }
}
