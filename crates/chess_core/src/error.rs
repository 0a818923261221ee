//! Error types surfaced by the rules engine.

use thiserror::Error;

/// Problems found while reading a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in board field, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankLength { rank: usize },
    #[error("invalid piece character '{0}'")]
    PieceChar(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling character '{0}'")]
    CastlingChar(char),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
    #[error("invalid move counter '{0}'")]
    Counter(String),
}

/// Why a move could not be played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The text does not denote a move at all.
    #[error("cannot parse move '{0}'")]
    Parse(String),
    /// The move is well formed but not legal in the position.
    #[error("illegal move {0}")]
    Illegal(String),
}

/// Failure to interpret the arguments of a UCI `position` command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionCommandError {
    #[error("expected 'startpos' or 'fen <fen>', found '{0}'")]
    Source(String),
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error(transparent)]
    Move(#[from] MoveError),
}
