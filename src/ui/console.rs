//! Plain-text board rendering and move input

use std::io::{self, BufRead, Write};

use crate::board::{PackedBoard, Pos, Stone, BOARD_SIZE};

/// Draw the board with `a..o` column and `1..15` row labels.
///
/// Black is `X`, white is `O`, empty cells are `.`. The last move is put in
/// brackets and stones of the winning line are drawn in lower case.
pub fn render(board: &PackedBoard, last_move: Option<Pos>, winning: &[Pos]) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for col in 0..BOARD_SIZE as u8 {
        out.push(' ');
        out.push((b'a' + col) as char);
    }
    out.push('\n');

    for row in 0..BOARD_SIZE as u8 {
        // separators sit between cells, so a bracket pair is two of them
        let mut line = vec![' '; 2 * BOARD_SIZE + 1];
        for col in 0..BOARD_SIZE as u8 {
            let pos = Pos::new(row, col);
            let lower = winning.contains(&pos);
            line[2 * col as usize + 1] = match board.get(pos).stone() {
                Some(Stone::Black) if lower => 'x',
                Some(Stone::Black) => 'X',
                Some(Stone::White) if lower => 'o',
                Some(Stone::White) => 'O',
                None => '.',
            };
            if last_move == Some(pos) {
                line[2 * col as usize] = '[';
                line[2 * col as usize + 2] = ']';
            }
        }
        out.push_str(&format!("{:>3} ", row + 1));
        out.extend(line);
        out.push('\n');
    }
    out
}

/// Prompt until a free, well-formed coordinate is entered.
///
/// Returns `Ok(None)` at end of input.
pub fn read_move<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &PackedBoard,
) -> io::Result<Option<Pos>> {
    let mut answer = String::new();
    loop {
        write!(output, "next move: ")?;
        output.flush()?;

        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        let text = answer.trim();
        if text.is_empty() {
            continue;
        }

        match text.parse::<Pos>() {
            Err(e) => writeln!(output, "\"{text}\" is not a correct input: {e}")?,
            Ok(pos) if !board.is_empty(pos) => {
                writeln!(output, "position \"{text}\" is already used")?;
            }
            Ok(pos) => return Ok(Some(pos)),
        }
    }
}
