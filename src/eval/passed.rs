//! Passed-pawn scoring: the per-rank bonus, the king-distance terms, and
//! the unobstructed-path-to-promotion bonus. Runs over the union passed
//! set built while scoring pawn structure (`src/eval/pawns.rs`).

use crate::bitboard::{file_mask, forward_file_mask, relative_rank, BitboardExt};
use crate::board::{Board, Color, Piece};
use crate::eval::context::EvalContext;
use crate::eval::terms::{
    PASSED_ENEMY_DISTANCE, PASSED_FRIENDLY_DISTANCE, PASSED_PAWN, PASSED_SAFE_PROMOTION_PATH,
};
use crate::score::Score;
use crate::square::Square;

pub fn evaluate_passed_pawns(board: &Board, ctx: &EvalContext, colour: Color) -> Score {
    let opp = colour.opposite();
    let own_passed = ctx.passed_pawns & board.pieces(Piece::Pawn, colour);

    let mut score = Score::ZERO;
    let mut bb = own_passed;
    while bb != 0 {
        let sq = bb.lsb().trailing_zeros() as u8;
        let file = sq % 8;
        let rel_rank = relative_rank(colour, sq / 8) as usize;

        score += PASSED_PAWN[rel_rank];

        let more_advanced_on_file = own_passed
            & file_mask(file)
            & forward_file_mask(colour, sq);
        if more_advanced_on_file == 0 {
            let square = Square::from_index(sq);
            let dist_own = square.distance(ctx.king_square[colour as usize]) as i32;
            let dist_enemy = square.distance(ctx.king_square[opp as usize]) as i32;
            score += PASSED_FRIENDLY_DISTANCE[rel_rank] * dist_own;
            score += PASSED_ENEMY_DISTANCE[rel_rank] * dist_enemy;

            let path = forward_file_mask(colour, sq);
            let blocked = path & board.occupancy(opp) != 0;
            let watched = path & ctx.attacked[opp as usize] != 0;
            if !blocked && !watched {
                score += PASSED_SAFE_PROMOTION_PATH;
            }
        }

        bb = bb.clear_lsb();
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn unobstructed_passer_gets_the_safe_path_bonus() {
        let board = Board::from_str("7k/8/8/8/8/8/P7/K7 w - - 0 1").unwrap();
        let mut ctx = EvalContext::init(&board);
        ctx.passed_pawns = board.pieces(Piece::Pawn, Color::White);
        let score = evaluate_passed_pawns(&board, &ctx, Color::White);
        assert!(score.eg() > PASSED_PAWN[1].eg());
    }
}
