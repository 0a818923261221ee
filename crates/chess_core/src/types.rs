use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::MoveError;

/// Square index, `a1 = 0` through `h8 = 63`.
pub type Square = u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Rank direction a pawn of this colour advances in.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Pieces a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Lowercase letter used by FEN and UCI.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN character: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        let ch = self.kind.letter();
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }
}

/// A move from one square to another with an optional promotion piece.
///
/// Identity is `(from, to, promo)`. The castle and en-passant flags are set by
/// the move generator so make/unmake know what to do; they never take part in
/// equality or hashing, so a move parsed from text compares equal to the
/// generated move it denotes.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promo: Option<PieceKind>,
    pub is_en_passant: bool,
    pub is_castle: bool,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promo: None,
            is_en_passant: false,
            is_castle: false,
        }
    }

    pub fn with_promo(from: Square, to: Square, promo: PieceKind) -> Self {
        Self {
            promo: Some(promo),
            ..Self::new(from, to)
        }
    }

    /// Parses long algebraic (UCI) text such as `e2e4` or `e7e8q`.
    ///
    /// This is purely syntactic: whether the move is legal is decided when it
    /// is applied to a board.
    pub fn from_uci(text: &str) -> Result<Move, MoveError> {
        let text = text.trim();
        let parse_err = || MoveError::Parse(text.to_string());

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(parse_err());
        }
        let from = coord_to_sq(&text[0..2]).ok_or_else(parse_err)?;
        let to = coord_to_sq(&text[2..4]).ok_or_else(parse_err)?;
        let promo = match text[4..].chars().next() {
            None => None,
            Some(ch) => match PieceKind::from_letter(ch) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(parse_err()),
            },
        };
        Ok(Move {
            promo,
            ..Move::new(from, to)
        })
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promo == other.promo
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promo.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sq_to_coord(self.from), sq_to_coord(self.to))?;
        if let Some(p) = self.promo {
            write!(f, "{}", p.letter())?;
        }
        Ok(())
    }
}

// Helpers
pub fn file_of(sq: Square) -> i8 {
    (sq % 8) as i8
}

pub fn rank_of(sq: Square) -> i8 {
    (sq / 8) as i8
}

pub fn sq(file: i8, rank: i8) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank as u8) * 8 + (file as u8))
    } else {
        None
    }
}

/// True for squares on rank 1 or rank 8.
pub fn is_back_rank(sq: Square) -> bool {
    matches!(rank_of(sq), 0 | 7)
}

pub fn sq_to_coord(sq: Square) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'1' + (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<Square> {
    match c.as_bytes() {
        [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Some((r - b'1') * 8 + (f - b'a')),
        _ => None,
    }
}
