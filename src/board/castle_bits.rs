// src/board/castle_bits.rs

use super::Color;

/// Underlying bit type for castling rights.
/// Use the same width you already use across the engine.
pub type CastleBits = u8;

// IMPORTANT: keep your original bit positions/values.
// Replace these literals with your current constants if they differ.
pub const CASTLE_WK: CastleBits = 0b0001;
pub const CASTLE_WQ: CastleBits = 0b0010;
pub const CASTLE_BK: CastleBits = 0b0100;
pub const CASTLE_BQ: CastleBits = 0b1000;

/// The castling rook's home square for `color`/`kingside`. A `Move`'s
/// `to` field for a castle encodes this square, not the king's landing
/// square, so both move generation and move execution derive the king's
/// actual destination from it via `king_castle_landing`.
#[inline(always)]
pub fn castle_rook_square(color: Color, kingside: bool) -> u8 {
    match (color, kingside) {
        (Color::White, true) => 7,
        (Color::White, false) => 0,
        (Color::Black, true) => 63,
        (Color::Black, false) => 56,
    }
}

/// The king's landing square for a castle whose rook starts on
/// `rook_from` -- always the g-file (kingside) or c-file (queenside) on
/// the rook's rank. This convention (and the symmetric one below) is what
/// lets the same formula cover Chess960 castling, even though this crate
/// only ever places rooks on the standard corner squares.
#[inline(always)]
pub fn king_castle_landing(rook_from: u8) -> u8 {
    let rank = rook_from / 8;
    let file = rook_from % 8;
    let dest_file = if file == 7 { 6 } else { 2 };
    rank * 8 + dest_file
}

/// The rook's landing square for the same castle: f-file or d-file.
#[inline(always)]
pub fn rook_castle_landing(rook_from: u8) -> u8 {
    let rank = rook_from / 8;
    let file = rook_from % 8;
    let dest_file = if file == 7 { 5 } else { 3 };
    rank * 8 + dest_file
}
