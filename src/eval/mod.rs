//! The static position evaluator. `evaluate` is the single public entry
//! point the rest of the engine calls; everything else in this module
//! tree is a per-component routine it orchestrates.
//!
//! Pipeline: early draw screen, context construction (with a pawn-king
//! cache probe), per-piece-type terms for both colours, king safety,
//! passed pawns, threats, space, closedness, complexity, then phase
//! interpolation and endgame scaling.

pub mod bishops;
pub mod closedness;
pub mod complexity;
pub mod context;
pub mod kings;
pub mod knights;
pub mod passed;
pub mod pawns;
pub mod pesto;
pub mod pkcache;
pub mod queens;
pub mod rooks;
pub mod scale;
pub mod space;
pub mod terms;
pub mod threats;

use crate::board::{Board, Color, Piece};
use crate::moves::magic::MagicTables;
use crate::score::Score;
use context::EvalContext;
use pkcache::PawnKingTable;
use terms::TEMPO;

/// Returns a centipawn score from the perspective of the side to move:
/// positive means the side to move stands better. Zero for positions the
/// early draw screen classifies as dead drawn.
pub fn evaluate(board: &Board, tables: &MagicTables, pk_table: &mut PawnKingTable) -> i32 {
    if is_draw_screen(board) {
        return 0;
    }

    let mut ctx = EvalContext::init(board);

    let pawn_king_score = match pk_table.probe(board.pawn_king_hash) {
        Some(entry) => {
            ctx.passed_pawns = entry.passed_pawns;
            entry.eval
        }
        None => {
            let (pawns_w, passed_w) = pawns::evaluate_pawns(board, Color::White);
            let (pawns_b, passed_b) = pawns::evaluate_pawns(board, Color::Black);
            ctx.passed_pawns = passed_w | passed_b;

            let king_w = kings::evaluate_king_shelter_storm(board, Color::White)
                + kings::evaluate_king_pawn_file_proximity(board, Color::White);
            let king_b = kings::evaluate_king_shelter_storm(board, Color::Black)
                + kings::evaluate_king_pawn_file_proximity(board, Color::Black);

            let combined = (pawns_w + king_w) - (pawns_b + king_b);
            pk_table.store(board.pawn_king_hash, ctx.passed_pawns, combined);
            combined
        }
    };

    let mut white_score = Score::ZERO;
    let mut black_score = Score::ZERO;

    white_score += knights::evaluate_knights(board, &mut ctx, Color::White);
    black_score += knights::evaluate_knights(board, &mut ctx, Color::Black);
    white_score += bishops::evaluate_bishops(board, &mut ctx, Color::White, tables);
    black_score += bishops::evaluate_bishops(board, &mut ctx, Color::Black, tables);
    white_score += rooks::evaluate_rooks(board, &mut ctx, Color::White, tables);
    black_score += rooks::evaluate_rooks(board, &mut ctx, Color::Black, tables);
    white_score += queens::evaluate_queens(board, &mut ctx, Color::White, tables);
    black_score += queens::evaluate_queens(board, &mut ctx, Color::Black, tables);

    white_score += kings::evaluate_king_defenders(board, Color::White);
    black_score += kings::evaluate_king_defenders(board, Color::Black);

    // King safety needs every side's attack tables populated first.
    white_score += kings::evaluate_king_safety(board, &ctx, Color::White, tables);
    black_score += kings::evaluate_king_safety(board, &ctx, Color::Black, tables);

    white_score += passed::evaluate_passed_pawns(board, &ctx, Color::White);
    black_score += passed::evaluate_passed_pawns(board, &ctx, Color::Black);

    white_score += threats::evaluate_threats(board, &ctx, Color::White);
    black_score += threats::evaluate_threats(board, &ctx, Color::Black);

    white_score += space::evaluate_space(board, &ctx, Color::White);
    black_score += space::evaluate_space(board, &ctx, Color::Black);

    let mut total = board.packed_score + pawn_king_score + (white_score - black_score);
    total += closedness::evaluate_closedness(board, &ctx);

    let eg = complexity::apply_complexity(total.eg(), board);
    let mg = total.mg();

    let phase = game_phase(board);
    let factor = scale::scale_factor(board, eg);
    let interpolated =
        (mg * (256 - phase) + eg * phase * factor / scale::NORMAL) / 256;

    let stm_relative = match board.side_to_move {
        Color::White => interpolated,
        Color::Black => -interpolated,
    };

    stm_relative + TEMPO
}

/// `phase_raw = 24 - 4*queens - 2*rooks - (knights+bishops)`, clamped to
/// `[0, 24]`, then rescaled to `[0, 256]`. 0 = pure middlegame.
fn game_phase(board: &Board) -> i32 {
    use crate::bitboard::BitboardExt;

    let queens = (board.pieces(Piece::Queen, Color::White) | board.pieces(Piece::Queen, Color::Black))
        .pop_count() as i32;
    let rooks = (board.pieces(Piece::Rook, Color::White) | board.pieces(Piece::Rook, Color::Black))
        .pop_count() as i32;
    let minors = (board.pieces(Piece::Knight, Color::White)
        | board.pieces(Piece::Knight, Color::Black)
        | board.pieces(Piece::Bishop, Color::White)
        | board.pieces(Piece::Bishop, Color::Black))
    .pop_count() as i32;

    let phase_raw = (24 - 4 * queens - 2 * rooks - minors).clamp(0, 24);
    (phase_raw * 256 + 12) / 24
}

/// §4 early draw screen: neither side has enough material to force mate.
fn is_draw_screen(board: &Board) -> bool {
    use crate::bitboard::BitboardExt;

    let pawns = board.pieces(Piece::Pawn, Color::White) | board.pieces(Piece::Pawn, Color::Black);
    let rooks = board.pieces(Piece::Rook, Color::White) | board.pieces(Piece::Rook, Color::Black);
    let queens = board.pieces(Piece::Queen, Color::White) | board.pieces(Piece::Queen, Color::Black);
    if pawns != 0 || rooks != 0 || queens != 0 {
        return false;
    }

    let white_minors =
        (board.pieces(Piece::Knight, Color::White) | board.pieces(Piece::Bishop, Color::White)).pop_count();
    let black_minors =
        (board.pieces(Piece::Knight, Color::Black) | board.pieces(Piece::Bishop, Color::Black)).pop_count();

    if white_minors == 0 && black_minors == 0 {
        return true;
    }
    if white_minors == 0 && black_minors <= 1 {
        return true;
    }
    if black_minors == 0 && white_minors <= 1 {
        return true;
    }
    if white_minors == 0
        && board.pieces(Piece::Knight, Color::Black).pop_count() == 2
        && board.pieces(Piece::Bishop, Color::Black) == 0
    {
        return true;
    }
    if black_minors == 0
        && board.pieces(Piece::Knight, Color::White).pop_count() == 2
        && board.pieces(Piece::Bishop, Color::White) == 0
    {
        return true;
    }

    false
}
