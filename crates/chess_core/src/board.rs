use std::fmt;

use crate::error::FenError;
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

/// Squares involved in one of the four castling moves.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CastleRule {
    pub color: Color,
    pub side: CastleSide,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook.
    pub empty: &'static [Square],
    /// Squares the king crosses or lands on.
    pub safe: &'static [Square],
}

pub(crate) const CASTLE_RULES: [CastleRule; 4] = [
    CastleRule {
        color: Color::White,
        side: CastleSide::King,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        empty: &[5, 6],
        safe: &[5, 6],
    },
    CastleRule {
        color: Color::White,
        side: CastleSide::Queen,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        empty: &[1, 2, 3],
        safe: &[3, 2],
    },
    CastleRule {
        color: Color::Black,
        side: CastleSide::King,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        empty: &[61, 62],
        safe: &[61, 62],
    },
    CastleRule {
        color: Color::Black,
        side: CastleSide::Queen,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        empty: &[57, 58, 59],
        safe: &[59, 58],
    },
];

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    fn slot(&mut self, color: Color, side: CastleSide) -> &mut bool {
        match (color, side) {
            (Color::White, CastleSide::King) => &mut self.wk,
            (Color::White, CastleSide::Queen) => &mut self.wq,
            (Color::Black, CastleSide::King) => &mut self.bk,
            (Color::Black, CastleSide::Queen) => &mut self.bq,
        }
    }

    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::King) => self.wk,
            (Color::White, CastleSide::Queen) => self.wq,
            (Color::Black, CastleSide::King) => self.bk,
            (Color::Black, CastleSide::Queen) => self.bq,
        }
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        *self.slot(color, side) = false;
    }

    fn grant(&mut self, color: Color, side: CastleSide) {
        *self.slot(color, side) = true;
    }
}

/// Raw chess position: 64-square mailbox plus the state FEN records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Everything `make_move` destroys, so `unmake_move` can put it back.
#[derive(Clone, Debug)]
pub struct Undo {
    pub moved_piece: Piece,
    pub captured: Option<Piece>,
    pub captured_sq: Square,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub rook_move: Option<(Square, Square)>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position {
            castling: CastlingRights::all(),
            ..Position::empty()
        };
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Parses Forsyth-Edwards Notation. The move counters may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let mut pos = Position::empty();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let piece = Piece::from_fen_char(ch).ok_or(FenError::PieceChar(ch))?;
                    let s = sq(file, rank).ok_or(FenError::RankLength { rank: rank_idx })?;
                    pos.board[s as usize] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankLength { rank: rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankLength { rank: rank_idx });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, side) = match c {
                    'K' => (Color::White, CastleSide::King),
                    'Q' => (Color::White, CastleSide::Queen),
                    'k' => (Color::Black, CastleSide::King),
                    'q' => (Color::Black, CastleSide::Queen),
                    _ => return Err(FenError::CastlingChar(c)),
                };
                pos.castling.grant(color, side);
            }
        }

        pos.en_passant = match parts[3] {
            "-" => None,
            s => Some(coord_to_sq(s).ok_or_else(|| FenError::EnPassant(s.to_string()))?),
        };

        let counter = |field: Option<&&str>, default: u32| -> Result<u32, FenError> {
            match field {
                None => Ok(default),
                Some(s) => s.parse().map_err(|_| FenError::Counter(s.to_string())),
            }
        };
        pos.halfmove_clock = counter(parts.get(4), 0)?;
        pos.fullmove_number = counter(parts.get(5), 1)?;
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut gap = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(pc) => {
                        if gap > 0 {
                            out.push_str(&gap.to_string());
                            gap = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push_str(&gap.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let c = &self.castling;
        let rights: String = [(c.wk, 'K'), (c.wq, 'Q'), (c.bk, 'k'), (c.bq, 'q')]
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, ch)| *ch)
            .collect();
        out.push_str(if rights.is_empty() { "-" } else { &rights[..] });

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Occupied squares with their pieces, a1 through h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (i as Square, pc)))
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// True if a piece of colour `by` attacks `target`.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: Option<Square>, kinds: &[PieceKind]| {
            s.and_then(|s| self.piece_at(s))
                .map_or(false, |pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn attacks diagonally forward, so look one rank behind the target.
        let pawn_rank = tr - by.forward();
        if holds(sq(tf - 1, pawn_rank), &[PieceKind::Pawn])
            || holds(sq(tf + 1, pawn_rank), &[PieceKind::Pawn])
        {
            return true;
        }
        if KNIGHT_DELTAS
            .iter()
            .any(|(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_DELTAS
            .iter()
            .any(|(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::King]))
        {
            return true;
        }

        let sliders: [(&[(i8, i8)], [PieceKind; 2]); 2] = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, kinds) in sliders {
            for (df, dr) in dirs {
                let (mut f, mut r) = (tf + df, tr + dr);
                while let Some(s) = sq(f, r) {
                    if let Some(pc) = self.piece_at(s) {
                        if pc.color == by && kinds.contains(&pc.kind) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }
        false
    }

    /// Plays a move produced by the move generator.
    ///
    /// Panics if the origin square is empty: that is a caller bug, never a
    /// user error (user input is validated by `Board::apply`).
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self
            .piece_at(mv.from)
            .unwrap_or_else(|| panic!("make_move {mv}: no piece on origin square"));

        let captured_sq = if mv.is_en_passant {
            // The captured pawn sits beside the origin, on the destination file.
            sq(file_of(mv.to), rank_of(mv.from)).unwrap_or(mv.to)
        } else {
            mv.to
        };
        let mut undo = Undo {
            moved_piece: moved,
            captured: self.piece_at(captured_sq),
            captured_sq,
            castling: self.castling.clone(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            rook_move: None,
        };

        self.set_piece(captured_sq, None);
        self.set_piece(mv.from, None);
        let placed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => Piece::new(moved.color, kind),
            None if moved.kind == PieceKind::Pawn && is_back_rank(mv.to) => {
                Piece::new(moved.color, PieceKind::Queen)
            }
            _ => moved,
        };
        self.set_piece(mv.to, Some(placed));

        for rule in CASTLE_RULES.iter() {
            if mv.is_castle && moved.kind == PieceKind::King && mv.to == rule.king_to {
                let rook = self.piece_at(rule.rook_from);
                self.set_piece(rule.rook_from, None);
                self.set_piece(rule.rook_to, rook);
                undo.rook_move = Some((rule.rook_from, rule.rook_to));
            }
            let king_moved = moved.kind == PieceKind::King && moved.color == rule.color;
            if king_moved || mv.from == rule.rook_from || mv.to == rule.rook_from {
                self.castling.revoke(rule.color, rule.side);
            }
        }

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
            self.en_passant = sq(file_of(mv.from), (rank_of(mv.from) + rank_of(mv.to)) / 2);
        }

        if moved.kind == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        undo
    }

    /// Reverses `make_move(mv)`; `undo` must be the record it returned.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rook_from, rook_to)) = undo.rook_move {
            let rook = self.piece_at(rook_to);
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, rook);
        }

        self.set_piece(mv.to, None);
        self.set_piece(undo.captured_sq, undo.captured);
        self.set_piece(mv.from, Some(undo.moved_piece));
    }

    /// A draw either player may claim.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Drawn without a claim: 75 moves by each side with no capture or
    /// pawn move.
    pub fn is_seventy_five_move_draw(&self) -> bool {
        self.halfmove_clock >= 150
    }

    /// The en-passant square, but only when the side to move has a legal
    /// capture onto it.
    pub fn legal_en_passant(&self) -> Option<Square> {
        let ep = self.en_passant?;
        let us = self.side_to_move;
        let from_rank = rank_of(ep) - us.forward();
        let victim = sq(file_of(ep), from_rank)?;
        if self.piece_at(victim) != Some(Piece::new(us.other(), PieceKind::Pawn)) {
            return None;
        }

        let capturers = [-1, 1]
            .into_iter()
            .filter_map(|df| sq(file_of(ep) + df, from_rank))
            .filter(|&from| self.piece_at(from) == Some(Piece::new(us, PieceKind::Pawn)));
        for from in capturers {
            let mut after = self.clone();
            after.make_move(Move {
                is_en_passant: true,
                ..Move::new(from, ep)
            });
            if !after.in_check(us) {
                return Some(ep);
            }
        }
        None
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or only bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_shades = [false; 2];
        for (s, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_shades[((file_of(s) + rank_of(s)) % 2) as usize] = true;
                }
            }
        }
        minors <= 1 || (knights == 0 && !(bishop_shades[0] && bishop_shades[1]))
    }

    /// FNV-1a style key over the parts of the position that decide repetition.
    /// An en-passant square only counts while the capture is playable.
    pub fn position_key(&self) -> u64 {
        fn mix(mut h: u64, x: u64) -> u64 {
            h ^= x;
            h.wrapping_mul(0x100000001b3)
        }

        let mut h = mix(0xcbf29ce484222325, self.side_to_move.idx() as u64 + 1);
        let c = &self.castling;
        for (on, salt) in [(c.wk, 3), (c.wq, 7), (c.bk, 13), (c.bq, 19)] {
            h = mix(h, if on { salt } else { salt + 2 });
        }
        if let Some(ep) = self.legal_en_passant() {
            h = mix(h, 29 + ep as u64);
        }
        for (i, pc) in self.board.iter().enumerate() {
            let v = match pc {
                Some(pc) => (i as u64) ^ ((pc.color.idx() as u64 + 1) << 6) ^ ((pc.kind as u64 + 1) << 8),
                None => i as u64,
            };
            h = mix(h, v);
        }
        h
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let ch = self.board[rank * 8 + file].map_or('.', Piece::fen_char);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
