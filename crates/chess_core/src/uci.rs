use crate::error::PositionCommandError;
use crate::history::Board;

/// Builds a board from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <6 fields> [moves ...]`.
///
/// Every listed move must be legal; the first one that is not aborts the
/// command so a desynchronised GUI is noticed instead of silently ignored.
pub fn board_from_position_command(args: &[&str]) -> Result<Board, PositionCommandError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    let mut board = match setup {
        [] | ["startpos"] => Board::default(),
        ["fen", fields @ ..] => Board::from_fen(&fields.join(" "))?,
        other => return Err(PositionCommandError::Source(other.join(" "))),
    };

    for text in moves.iter().skip(1) {
        board.apply_uci(text)?;
    }
    Ok(board)
}
