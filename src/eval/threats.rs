//! Threat evaluation: penalties for hanging/poorly-defended pieces under
//! various kinds of attack, plus a bonus for safe pawn pushes that would
//! themselves create a new threat.

use crate::bitboard::{pawn_advance, pawn_attack_span, relative_rank, BitboardExt};
use crate::board::{Board, Color, Piece};
use crate::eval::context::EvalContext;
use crate::eval::terms::{
    THREAT_BY_PAWN_PUSH, THREAT_MINOR_ATTACKED_BY_KING, THREAT_MINOR_ATTACKED_BY_MAJOR,
    THREAT_MINOR_ATTACKED_BY_MINOR, THREAT_MINOR_ATTACKED_BY_PAWN, THREAT_OVERLOADED_PIECES,
    THREAT_QUEEN_ATTACKED_BY_ONE, THREAT_ROOK_ATTACKED_BY_KING, THREAT_ROOK_ATTACKED_BY_LESSER,
    THREAT_WEAK_PAWN,
};
use crate::score::Score;

pub fn evaluate_threats(board: &Board, ctx: &EvalContext, colour: Color) -> Score {
    let opp = colour.opposite();
    let c = colour as usize;
    let o = opp as usize;

    let own_pawns = board.pieces(Piece::Pawn, colour);
    let own_minors = board.pieces(Piece::Knight, colour) | board.pieces(Piece::Bishop, colour);
    let own_rooks = board.pieces(Piece::Rook, colour);
    let own_queens = board.pieces(Piece::Queen, colour);
    let own_majors = own_rooks | own_queens;

    let enemy_attacks = ctx.attacked[o];
    let own_defends = ctx.attacked[c];
    let attacks_by_pawns = ctx.attacked_by[o][Piece::Pawn as usize];

    // Squares with more attackers than defenders, or doubly attacked but
    // not doubly defended (and not covered by one of our own pawns).
    let poorly_defended = (enemy_attacks & !own_defends)
        | (ctx.attacked_by2[o] & !ctx.attacked_by2[c] & !ctx.attacked_by[c][Piece::Pawn as usize]);
    let weak_minors = own_minors & poorly_defended;

    let mut score = Score::ZERO;

    let weak_pawns = own_pawns & !attacks_by_pawns & poorly_defended;
    score += THREAT_WEAK_PAWN * weak_pawns.pop_count() as i32;

    let minors_by_pawn = own_minors & attacks_by_pawns;
    score += THREAT_MINOR_ATTACKED_BY_PAWN * minors_by_pawn.pop_count() as i32;

    let minors_by_minor = own_minors
        & (ctx.attacked_by[o][Piece::Knight as usize] | ctx.attacked_by[o][Piece::Bishop as usize]);
    score += THREAT_MINOR_ATTACKED_BY_MINOR * minors_by_minor.pop_count() as i32;

    let minors_by_major = weak_minors
        & (ctx.attacked_by[o][Piece::Rook as usize] | ctx.attacked_by[o][Piece::Queen as usize]);
    score += THREAT_MINOR_ATTACKED_BY_MAJOR * minors_by_major.pop_count() as i32;

    let rooks_by_lesser = own_rooks
        & (attacks_by_pawns
            | ctx.attacked_by[o][Piece::Knight as usize]
            | ctx.attacked_by[o][Piece::Bishop as usize]);
    score += THREAT_ROOK_ATTACKED_BY_LESSER * rooks_by_lesser.pop_count() as i32;

    let minors_by_king = weak_minors & ctx.attacked_by[o][Piece::King as usize];
    score += THREAT_MINOR_ATTACKED_BY_KING * minors_by_king.pop_count() as i32;

    let rooks_by_king = own_rooks & poorly_defended & ctx.attacked_by[o][Piece::King as usize];
    score += THREAT_ROOK_ATTACKED_BY_KING * rooks_by_king.pop_count() as i32;

    let queens_attacked = own_queens & enemy_attacks;
    score += THREAT_QUEEN_ATTACKED_BY_ONE * queens_attacked.pop_count() as i32;

    let overloaded = (own_minors | own_majors)
        & enemy_attacks
        & !ctx.attacked_by2[o]
        & own_defends
        & !ctx.attacked_by2[c];
    score += THREAT_OVERLOADED_PIECES * overloaded.pop_count() as i32;

    score += evaluate_safe_pawn_pushes(board, ctx, colour);

    score
}

fn evaluate_safe_pawn_pushes(board: &Board, ctx: &EvalContext, colour: Color) -> Score {
    let opp = colour.opposite();
    let c = colour as usize;
    let o = opp as usize;

    let own_pawns = board.pieces(Piece::Pawn, colour);
    let empty = !board.occupied();

    let single = pawn_advance(own_pawns, empty, colour);
    let on_rank3 = {
        let mut m = 0u64;
        let mut bb = single;
        while bb != 0 {
            let sq = bb.lsb().trailing_zeros() as u8;
            if relative_rank(colour, sq / 8) == 2 {
                m |= 1u64 << sq;
            }
            bb = bb.clear_lsb();
        }
        m
    };
    let double = pawn_advance(on_rank3, empty, colour);

    let push_targets = single | double;
    let safe_targets = push_targets & !ctx.attacked[o];

    let enemy_targets = board.pieces(Piece::Knight, opp)
        | board.pieces(Piece::Bishop, opp)
        | board.pieces(Piece::Rook, opp)
        | board.pieces(Piece::Queen, opp);
    let newly_attacked = pawn_attack_span(safe_targets, !0u64, colour) & enemy_targets;

    let _ = c;
    THREAT_BY_PAWN_PUSH * newly_attacked.pop_count() as i32
}
