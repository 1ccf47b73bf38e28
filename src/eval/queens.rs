//! Queen evaluation: x-ray mobility through friendly rooks/bishops, the
//! discovered-attack (relative pin) penalty, and king-safety bookkeeping.

use crate::bitboard::{bishop_attacks, rook_attacks, squares_aligned, BitboardExt};
use crate::board::{Board, Color, Piece};
use crate::eval::context::EvalContext;
use crate::eval::terms::{QUEEN_MOBILITY, QUEEN_RELATIVE_PIN};
use crate::moves::magic::MagicTables;
use crate::score::Score;

pub fn evaluate_queens(board: &Board, ctx: &mut EvalContext, colour: Color, tables: &MagicTables) -> Score {
    let opp = colour.opposite();
    let own_king_sq = ctx.king_square[colour as usize].index();

    let mut score = Score::ZERO;
    let mut bb = board.pieces(Piece::Queen, colour);

    while bb != 0 {
        let sq = bb.lsb().trailing_zeros() as u8;

        // Queen attacks seen through friendly rooks/bishops, as if they
        // were transparent (x-ray mobility).
        let attacks = bishop_attacks(sq as usize, ctx.occupied_minus_bishops[colour as usize], tables)
            | rook_attacks(sq as usize, ctx.occupied_minus_rooks[colour as usize], tables);

        ctx.add_attacks(colour, Piece::Queen, attacks);
        ctx.register_king_attacker(colour, Piece::Queen, attacks);

        let mobility = (attacks & ctx.mobility_areas[colour as usize]).pop_count() as usize;
        score += QUEEN_MOBILITY[mobility.min(27)];

        // Discovered-attack penalty: does a removal of this queen reveal
        // an enemy slider attacking it along a rank/file/diagonal, with
        // only the queen's own king sitting on the far side of the line?
        let full_occ = board.occupied();
        let queen_bit = 1u64 << sq;
        let without_queen = full_occ & !queen_bit;
        let sliders_through = bishop_attacks(sq as usize, without_queen, tables)
            & (board.pieces(Piece::Bishop, opp) | board.pieces(Piece::Queen, opp))
            | rook_attacks(sq as usize, without_queen, tables)
                & (board.pieces(Piece::Rook, opp) | board.pieces(Piece::Queen, opp));

        let mut pinners = sliders_through;
        while pinners != 0 {
            let attacker_sq = pinners.lsb().trailing_zeros() as u8;
            if squares_aligned(attacker_sq, sq, own_king_sq) {
                score += QUEEN_RELATIVE_PIN;
                break;
            }
            pinners = pinners.clear_lsb();
        }

        bb = bb.clear_lsb();
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::magic::loader::load_magic_tables;
    use std::str::FromStr;

    #[test]
    fn lone_queen_has_nonzero_mobility() {
        let tables = load_magic_tables();
        let board = Board::from_str("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").unwrap();
        let mut ctx = EvalContext::init(&board);
        let score = evaluate_queens(&board, &mut ctx, Color::White, &tables);
        assert!(score.mg() > QUEEN_MOBILITY[0].mg());
    }
}
