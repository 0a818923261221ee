//! Chess rules for the minimax engine.
//!
//! A mailbox `Position` with make/unmake, a legal move generator, and `Board`,
//! which stacks played moves so they can be undone and repetitions counted.

pub mod board;
pub mod error;
pub mod history;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;

pub use board::{CastleSide, CastlingRights, Position, Undo, START_FEN};
pub use error::{FenError, MoveError, PositionCommandError};
pub use history::{Board, Outcome};
pub use movegen::{legal_moves, legal_moves_into};
pub use perft::perft;
pub use types::*;
pub use uci::board_from_position_command;
