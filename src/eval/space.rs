//! Space evaluation: penalizes ceding central squares the opponent
//! controls more heavily, and rewards uncontested central control. Gated
//! off entirely once material drops below the threshold where space no
//! longer matters (i.e. in the endgame).

use crate::bitboard::{file_mask, rank_mask, relative_rank, BitboardExt};
use crate::board::{Board, Color, Piece};
use crate::eval::context::EvalContext;
use crate::eval::pesto::MG_VALUE;
use crate::eval::terms::{SPACE_CENTER_CONTROL, SPACE_RESTRICT_EMPTY, SPACE_RESTRICT_PIECE, SPACE_THRESHOLD};
use crate::score::Score;

fn non_pawn_material(board: &Board, colour: Color) -> i32 {
    [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .iter()
        .map(|&p| board.pieces(p, colour).pop_count() as i32 * MG_VALUE[p as usize])
        .sum()
}

/// Central files (c through f), restricted to the three ranks just ahead
/// of `colour`'s own back rank.
fn space_area(colour: Color) -> u64 {
    let central_files = file_mask(2) | file_mask(3) | file_mask(4) | file_mask(5);
    let mut band = 0u64;
    for r in 0..8u8 {
        if (1..=3).contains(&relative_rank(colour, r)) {
            band |= rank_mask(r);
        }
    }
    central_files & band
}

pub fn evaluate_space(board: &Board, ctx: &EvalContext, colour: Color) -> Score {
    let opp = colour.opposite();
    let c = colour as usize;
    let o = opp as usize;

    if non_pawn_material(board, Color::White) + non_pawn_material(board, Color::Black) < SPACE_THRESHOLD {
        return Score::ZERO;
    }

    let area = space_area(colour) & !board.pieces(Piece::Pawn, colour);
    let contested = area & ctx.attacked[o] & !ctx.attacked[c];

    let restrict_empty = (contested & !board.occupied()).pop_count() as i32;
    let restrict_piece = (contested & board.occupied()).pop_count() as i32;
    let uncontested_centre = (area & !ctx.attacked[o]).pop_count() as i32;

    SPACE_RESTRICT_EMPTY * restrict_empty
        + SPACE_RESTRICT_PIECE * restrict_piece
        + SPACE_CENTER_CONTROL * uncontested_centre
}
