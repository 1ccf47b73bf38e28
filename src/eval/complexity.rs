//! Complexity/initiative adjustment: nudges the endgame component based
//! on how likely the position is to be sharp, without ever flipping its
//! sign (a complexity bonus can shrink an advantage toward zero but
//! never turn it into a disadvantage).

use crate::bitboard::BitboardExt;
use crate::board::{Board, Color, Piece};
use crate::eval::terms::{
    COMPLEXITY_ADJUSTMENT, COMPLEXITY_PAWN_ENDGAME, COMPLEXITY_PAWN_FLANKS, COMPLEXITY_TOTAL_PAWNS,
};

const QUEENSIDE: u64 = 0x0F0F_0F0F_0F0F_0F0F;
const KINGSIDE: u64 = !QUEENSIDE;

pub fn apply_complexity(eg: i32, board: &Board) -> i32 {
    if eg == 0 {
        return 0;
    }

    let all_pawns = board.pieces(Piece::Pawn, Color::White) | board.pieces(Piece::Pawn, Color::Black);
    let total_pawns = all_pawns.pop_count() as i32;
    let both_flanks = (all_pawns & QUEENSIDE != 0) && (all_pawns & KINGSIDE != 0);

    let non_pawn_pieces = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .iter()
        .map(|&p| board.pieces(p, Color::White) | board.pieces(p, Color::Black))
        .fold(0u64, |acc, bb| acc | bb);
    let pawn_only_endgame = non_pawn_pieces == 0;

    let complexity = COMPLEXITY_TOTAL_PAWNS * total_pawns
        + COMPLEXITY_PAWN_FLANKS * both_flanks as i32
        + COMPLEXITY_PAWN_ENDGAME * pawn_only_endgame as i32
        + COMPLEXITY_ADJUSTMENT;

    let sign = eg.signum();
    let adjusted = eg + sign * complexity;
    if adjusted.signum() != sign {
        0
    } else {
        adjusted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn complexity_never_flips_the_endgame_sign() {
        let board = Board::from_str("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let adjusted = apply_complexity(5, &board);
        assert!(adjusted.signum() >= 0);
    }
}
