//! King evaluation: the defenders bonus, king-safety quadratic (§4.4.1),
//! and -- on a pawn-king cache miss -- pawn shelter/storm and the
//! king-pawn-file-proximity bonus.

use crate::bitboard::{bishop_attacks, file_mask, king_area_mask, king_attacks, knight_attacks, rook_attacks, BitboardExt};
use crate::board::{Board, Color, Piece};
use crate::eval::context::EvalContext;
use crate::eval::terms::{
    KING_DEFENDERS, KING_PAWN_FILE_PROXIMITY, KING_SHELTER, KING_STORM, KS_ADJUSTMENT,
    KS_ATTACK_VALUE, KS_FRIENDLY_PAWNS, KS_NO_ENEMY_QUEENS, KS_SAFE_BISHOP_CHECK,
    KS_SAFE_KNIGHT_CHECK, KS_SAFE_QUEEN_CHECK, KS_SAFE_ROOK_CHECK, KS_WEAK_SQUARES,
};
use crate::moves::magic::MagicTables;
use crate::score::Score;

pub fn evaluate_king_defenders(board: &Board, colour: Color) -> Score {
    let area = board.king_square(colour);
    let area = king_area_mask(colour, area.index());
    let defenders = (board.pieces(Piece::Pawn, colour)
        | board.pieces(Piece::Knight, colour)
        | board.pieces(Piece::Bishop, colour))
        & area;
    KING_DEFENDERS[(defenders.pop_count() as usize).min(11)]
}

/// Files between the king and the nearest pawn (of either colour) on the
/// board, indexed straight into `KING_PAWN_FILE_PROXIMITY`.
pub fn evaluate_king_pawn_file_proximity(board: &Board, colour: Color) -> Score {
    let king_file = board.king_square(colour).file();
    let all_pawns = board.pieces(Piece::Pawn, Color::White) | board.pieces(Piece::Pawn, Color::Black);
    if all_pawns == 0 {
        return KING_PAWN_FILE_PROXIMITY[7];
    }
    let mut min_dist = 7u8;
    let mut bb = all_pawns;
    while bb != 0 {
        let sq = bb.lsb().trailing_zeros() as u8;
        let file = sq % 8;
        let dist = (file as i32 - king_file as i32).unsigned_abs() as u8;
        min_dist = min_dist.min(dist);
        bb = bb.clear_lsb();
    }
    KING_PAWN_FILE_PROXIMITY[min_dist as usize]
}

/// Pawn shelter/storm, scored per file in the king's immediate 3-file
/// band. Only meaningful on a pawn-king cache miss -- the caller stores
/// the result alongside the rest of the pawn-king contribution.
pub fn evaluate_king_shelter_storm(board: &Board, colour: Color) -> Score {
    let opp = colour.opposite();
    let own_pawns = board.pieces(Piece::Pawn, colour);
    let enemy_pawns = board.pieces(Piece::Pawn, opp);
    let king_file = board.king_square(colour).file() as i32;

    let mut score = Score::ZERO;
    for df in -1..=1 {
        let file = king_file + df;
        if !(0..=7).contains(&file) {
            continue;
        }
        let file = file as u8;
        let same_file = df == 0;

        let own_on_file = own_pawns & file_mask(file);
        let shelter_dist = nearest_rank_distance(own_on_file, colour, true);
        score += KING_SHELTER[same_file as usize][shelter_dist];

        let enemy_on_file = enemy_pawns & file_mask(file);
        let blocked = own_on_file != 0;
        let storm_dist = nearest_rank_distance(enemy_on_file, colour, false);
        score += KING_STORM[blocked as usize][storm_dist];
    }
    score
}

/// Distance (0..=7, 7 = none) from the king's own back rank to the
/// closest pawn on `file_pawns`, measured in `colour`'s forward direction.
fn nearest_rank_distance(file_pawns: u64, colour: Color, _shelter: bool) -> usize {
    if file_pawns == 0 {
        return 7;
    }
    let mut best = 7u8;
    let mut bb = file_pawns;
    while bb != 0 {
        let sq = bb.lsb().trailing_zeros() as u8;
        let rank = sq / 8;
        let rel = match colour {
            Color::White => rank,
            Color::Black => 7 - rank,
        };
        best = best.min(rel);
        bb = bb.clear_lsb();
    }
    best as usize
}

/// The §4.4.1 king-safety quadratic. Returns `Score::ZERO` unless the
/// attacker condition (>=2 attackers, or >=1 with an enemy queen) holds.
pub fn evaluate_king_safety(board: &Board, ctx: &EvalContext, colour: Color, tables: &MagicTables) -> Score {
    let opp = colour.opposite();
    let c = colour as usize;
    let o = opp as usize;

    let attackers_count = ctx.king_attackers_count[c];
    let enemy_has_queen = board.pieces(Piece::Queen, opp) != 0;
    if attackers_count < 2 && !(attackers_count >= 1 && enemy_has_queen) {
        return Score::ZERO;
    }

    let occ = board.occupied();
    let king_sq = ctx.king_square[c].index() as usize;
    let king_area = ctx.king_areas[c];

    let defended_by_piece =
        ctx.attacked_by[c][Piece::Knight as usize] | ctx.attacked_by[c][Piece::Bishop as usize]
            | ctx.attacked_by[c][Piece::Rook as usize] | ctx.attacked_by[c][Piece::Pawn as usize];
    let weak = ctx.attacked[o] & !defended_by_piece & !ctx.attacked_by2[c];

    let safe = (!ctx.attacked[c] | (weak & ctx.attacked_by2[o])) & !board.occupancy(opp);

    let knight_checks = knight_attacks(king_sq) & safe & ctx.attacked_by[o][Piece::Knight as usize];
    let bishop_reach = bishop_attacks(king_sq, occ, tables);
    let rook_reach = rook_attacks(king_sq, occ, tables);
    let bishop_checks = bishop_reach & safe & ctx.attacked_by[o][Piece::Bishop as usize];
    let rook_checks = rook_reach & safe & ctx.attacked_by[o][Piece::Rook as usize];
    let queen_checks = (bishop_reach | rook_reach) & safe & ctx.attacked_by[o][Piece::Queen as usize];

    let area_size = king_area.pop_count().max(1) as i32;

    // Scaled the way the original does: one float division, one float
    // multiply, and a single truncation to int at the end -- not a
    // truncating integer division ahead of the multiply.
    let scaled_attack_counts = 9.0 * ctx.king_attacks_count[c] as f64 / area_size as f64;

    let mut base = attackers_count * ctx.king_attackers_weight[c]
        + (KS_ATTACK_VALUE as f64 * scaled_attack_counts) as i32
        + KS_WEAK_SQUARES * (weak & king_area).pop_count() as i32
        + KS_FRIENDLY_PAWNS
            * (board.pieces(Piece::Pawn, colour) & king_area & !weak).pop_count() as i32
        + KS_ADJUSTMENT;

    if !enemy_has_queen {
        base += KS_NO_ENEMY_QUEENS;
    }
    base += KS_SAFE_QUEEN_CHECK * queen_checks.pop_count() as i32;
    base += KS_SAFE_ROOK_CHECK * rook_checks.pop_count() as i32;
    base += KS_SAFE_BISHOP_CHECK * bishop_checks.pop_count() as i32;
    base += KS_SAFE_KNIGHT_CHECK * knight_checks.pop_count() as i32;

    if base > 0 {
        Score::new(-(base * base) / 720, -base / 20)
    } else {
        Score::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn king_safety_is_zero_with_no_attackers() {
        let board = Board::new();
        let ctx = EvalContext::init(&board);
        let tables = crate::moves::magic::loader::load_magic_tables();
        let score = evaluate_king_safety(&board, &ctx, Color::White, &tables);
        assert_eq!(score, Score::ZERO);
    }

    #[test]
    fn king_defenders_counts_shielding_minors_and_pawns() {
        let board = Board::from_str("4k3/8/8/8/8/8/PPPN4/4K3 w - - 0 1").unwrap();
        let score = evaluate_king_defenders(&board, Color::White);
        assert!(score.mg() > KING_DEFENDERS[0].mg());
    }
}
