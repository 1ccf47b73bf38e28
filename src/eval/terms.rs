//! Tuned constant tables for the per-component evaluation terms. Every
//! constant here is a packed (middlegame, endgame) pair or a small array
//! of them, indexed the way the corresponding term in `src/eval/*.rs`
//! consumes it. Values follow the shape of a mature open-source tapered
//! evaluator (Ethereal); they are not re-derived, only carried over.

use crate::score::Score;

pub const TEMPO: i32 = 20;

// -------------------------------------------------------------------
// Pawns
// -------------------------------------------------------------------

pub const PAWN_CANDIDATE_PASSER: [Score; 8] = [
    Score::new(0, 0),
    Score::new(-4, 11),
    Score::new(-1, 17),
    Score::new(6, 32),
    Score::new(22, 47),
    Score::new(64, 66),
    Score::new(0, 0),
    Score::new(0, 0),
];

pub const PAWN_ISOLATED: Score = Score::new(-13, -8);
pub const PAWN_STACKED: [Score; 2] = [Score::new(-4, -14), Score::new(-12, -23)];
pub const PAWN_BACKWARDS: [Score; 2] = [Score::new(-6, -9), Score::new(-9, -15)];

/// Indexed by colour-relative square, same shape as a PSQT.
pub const PAWN_CONNECTED_32: [Score; 32] = [
    Score::new(0, 0),
    Score::new(0, 0),
    Score::new(0, 0),
    Score::new(0, 0),
    Score::new(6, 2),
    Score::new(18, 4),
    Score::new(4, 4),
    Score::new(13, 7),
    Score::new(8, 0),
    Score::new(18, 4),
    Score::new(14, 5),
    Score::new(20, 9),
    Score::new(7, 6),
    Score::new(16, 9),
    Score::new(19, 14),
    Score::new(25, 16),
    Score::new(13, 15),
    Score::new(20, 18),
    Score::new(25, 20),
    Score::new(29, 25),
    Score::new(24, 36),
    Score::new(32, 41),
    Score::new(45, 48),
    Score::new(52, 59),
    Score::new(66, 85),
    Score::new(75, 97),
    Score::new(88, 101),
    Score::new(93, 111),
    Score::new(0, 0),
    Score::new(0, 0),
    Score::new(0, 0),
    Score::new(0, 0),
];

// -------------------------------------------------------------------
// Knights
// -------------------------------------------------------------------

pub const KNIGHT_MOBILITY: [Score; 9] = [
    Score::new(-62, -81),
    Score::new(-33, -56),
    Score::new(-12, -30),
    Score::new(-4, -14),
    Score::new(3, 8),
    Score::new(11, 15),
    Score::new(19, 23),
    Score::new(26, 27),
    Score::new(33, 25),
];

pub const KNIGHT_OUTPOST: [Score; 2] = [Score::new(13, 20), Score::new(29, 29)];
pub const KNIGHT_BEHIND_PAWN: Score = Score::new(3, 24);
pub const KNIGHT_IN_SIBERIA: [Score; 4] = [
    Score::new(-9, -19),
    Score::new(-7, -10),
    Score::new(-6, -4),
    Score::new(-4, -1),
];

// -------------------------------------------------------------------
// Bishops
// -------------------------------------------------------------------

pub const BISHOP_PAIR: Score = Score::new(23, 72);
pub const BISHOP_RAMMED_PAWNS: Score = Score::new(-8, -17);
pub const BISHOP_OUTPOST: [Score; 2] = [Score::new(16, 4), Score::new(30, 10)];
pub const BISHOP_BEHIND_PAWN: Score = Score::new(3, 15);
pub const BISHOP_LONG_DIAGONAL: Score = Score::new(22, 12);

pub const BISHOP_MOBILITY: [Score; 14] = [
    Score::new(-48, -59),
    Score::new(-20, -23),
    Score::new(16, -3),
    Score::new(26, 13),
    Score::new(38, 24),
    Score::new(51, 34),
    Score::new(55, 43),
    Score::new(63, 47),
    Score::new(63, 52),
    Score::new(68, 56),
    Score::new(81, 59),
    Score::new(56, 69),
    Score::new(69, 72),
    Score::new(75, 57),
];

// -------------------------------------------------------------------
// Rooks
// -------------------------------------------------------------------

/// Indexed by [semi-open-file][open-file].
pub const ROOK_FILE: [Score; 2] = [Score::new(15, 9), Score::new(34, 8)];
pub const ROOK_ON_SEVENTH: Score = Score::new(-3, 21);

pub const ROOK_MOBILITY: [Score; 15] = [
    Score::new(-60, -78),
    Score::new(-21, -16),
    Score::new(-6, 3),
    Score::new(-1, 28),
    Score::new(1, 42),
    Score::new(6, 49),
    Score::new(9, 64),
    Score::new(14, 62),
    Score::new(22, 70),
    Score::new(28, 72),
    Score::new(31, 79),
    Score::new(35, 80),
    Score::new(40, 85),
    Score::new(40, 86),
    Score::new(42, 88),
];

// -------------------------------------------------------------------
// Queens
// -------------------------------------------------------------------

pub const QUEEN_RELATIVE_PIN: Score = Score::new(-22, -13);

pub const QUEEN_MOBILITY: [Score; 28] = [
    Score::new(-30, -48),
    Score::new(-12, -30),
    Score::new(-8, -7),
    Score::new(-9, 19),
    Score::new(20, 40),
    Score::new(23, 55),
    Score::new(23, 59),
    Score::new(35, 75),
    Score::new(38, 78),
    Score::new(39, 96),
    Score::new(47, 96),
    Score::new(50, 99),
    Score::new(50, 102),
    Score::new(52, 111),
    Score::new(53, 112),
    Score::new(54, 114),
    Score::new(55, 120),
    Score::new(55, 126),
    Score::new(61, 128),
    Score::new(67, 130),
    Score::new(68, 133),
    Score::new(70, 136),
    Score::new(72, 140),
    Score::new(72, 140),
    Score::new(73, 140),
    Score::new(73, 140),
    Score::new(73, 140),
    Score::new(73, 140),
];

// -------------------------------------------------------------------
// Kings
// -------------------------------------------------------------------

pub const KING_DEFENDERS: [Score; 12] = [
    Score::new(-37, -3),
    Score::new(-17, -1),
    Score::new(0, 2),
    Score::new(11, 5),
    Score::new(26, 7),
    Score::new(35, 2),
    Score::new(40, 0),
    Score::new(40, 0),
    Score::new(40, 0),
    Score::new(40, 0),
    Score::new(40, 0),
    Score::new(40, 0),
];

pub const KING_PAWN_FILE_PROXIMITY: [Score; 8] = [
    Score::new(0, 0),
    Score::new(36, 39),
    Score::new(21, 24),
    Score::new(-18, -5),
    Score::new(-25, -14),
    Score::new(-30, -22),
    Score::new(-32, -26),
    Score::new(-32, -28),
];

/// Shelter bonus, indexed by [file is the king's own file][distance to the
/// nearest own pawn at or ahead of the king, 0..=7 with 7 as "no pawn"].
pub const KING_SHELTER: [[Score; 8]; 2] = [
    [
        Score::new(-5, 5),
        Score::new(18, -4),
        Score::new(24, -6),
        Score::new(13, -7),
        Score::new(4, -3),
        Score::new(-2, 5),
        Score::new(-10, 8),
        Score::new(-20, 0),
    ],
    [
        Score::new(-9, 2),
        Score::new(28, -6),
        Score::new(32, -9),
        Score::new(17, -9),
        Score::new(6, -4),
        Score::new(-4, 6),
        Score::new(-14, 10),
        Score::new(-25, 0),
    ],
];

/// Storm penalty, indexed by [the file's own pawn blocks the enemy
/// pawn's advance][distance to the nearest enemy pawn, 0..=7].
pub const KING_STORM: [[Score; 8]; 2] = [
    [
        Score::new(-1, -1),
        Score::new(-18, 3),
        Score::new(-14, 6),
        Score::new(-8, 4),
        Score::new(-4, 2),
        Score::new(-1, 0),
        Score::new(0, 0),
        Score::new(0, 0),
    ],
    [
        Score::new(0, 0),
        Score::new(-6, 1),
        Score::new(-5, 2),
        Score::new(-3, 1),
        Score::new(-1, 1),
        Score::new(0, 0),
        Score::new(0, 0),
        Score::new(0, 0),
    ],
];

pub const KS_ATTACK_VALUE: i32 = 44;
pub const KS_WEAK_SQUARES: i32 = 38;
pub const KS_FRIENDLY_PAWNS: i32 = -22;
pub const KS_NO_ENEMY_QUEENS: i32 = -276;
pub const KS_SAFE_QUEEN_CHECK: i32 = 95;
pub const KS_SAFE_ROOK_CHECK: i32 = 94;
pub const KS_SAFE_BISHOP_CHECK: i32 = 51;
pub const KS_SAFE_KNIGHT_CHECK: i32 = 123;
pub const KS_ADJUSTMENT: i32 = -18;

/// Attacker-weight per attacking piece type, indexed by `Piece`. Knight is
/// the heaviest attacker, not queen — bishop is the lightest non-zero entry.
pub const KS_ATTACK_WEIGHT: [i32; 6] = [0, 16, 6, 10, 8, 0];

// -------------------------------------------------------------------
// Passed pawns
// -------------------------------------------------------------------

pub const PASSED_PAWN: [Score; 8] = [
    Score::new(0, 0),
    Score::new(-2, 11),
    Score::new(-7, 15),
    Score::new(-12, 40),
    Score::new(16, 57),
    Score::new(55, 90),
    Score::new(88, 143),
    Score::new(0, 0),
];

pub const PASSED_FRIENDLY_DISTANCE: [Score; 8] = [
    Score::new(0, 0),
    Score::new(1, 12),
    Score::new(1, 8),
    Score::new(-3, 2),
    Score::new(-2, -6),
    Score::new(1, -13),
    Score::new(4, -17),
    Score::new(2, -18),
];

pub const PASSED_ENEMY_DISTANCE: [Score; 8] = [
    Score::new(0, 0),
    Score::new(-2, -9),
    Score::new(2, -7),
    Score::new(4, 0),
    Score::new(1, 11),
    Score::new(-3, 19),
    Score::new(-5, 28),
    Score::new(-1, 30),
];

pub const PASSED_SAFE_PROMOTION_PATH: Score = Score::new(-9, 46);

// -------------------------------------------------------------------
// Threats
// -------------------------------------------------------------------

pub const THREAT_WEAK_PAWN: Score = Score::new(-11, -38);
pub const THREAT_MINOR_ATTACKED_BY_PAWN: Score = Score::new(-55, -83);
pub const THREAT_MINOR_ATTACKED_BY_MINOR: Score = Score::new(-25, -45);
pub const THREAT_MINOR_ATTACKED_BY_MAJOR: Score = Score::new(-30, -55);
pub const THREAT_ROOK_ATTACKED_BY_LESSER: Score = Score::new(-48, -28);
pub const THREAT_MINOR_ATTACKED_BY_KING: Score = Score::new(-43, -21);
pub const THREAT_ROOK_ATTACKED_BY_KING: Score = Score::new(-33, -18);
pub const THREAT_QUEEN_ATTACKED_BY_ONE: Score = Score::new(-50, -7);
pub const THREAT_OVERLOADED_PIECES: Score = Score::new(-7, -16);
pub const THREAT_BY_PAWN_PUSH: Score = Score::new(15, 20);

// -------------------------------------------------------------------
// Space
// -------------------------------------------------------------------

pub const SPACE_RESTRICT_PIECE: Score = Score::new(-4, 0);
pub const SPACE_RESTRICT_EMPTY: Score = Score::new(-3, 0);
pub const SPACE_CENTER_CONTROL: Score = Score::new(3, 0);

/// Only counted once both sides have at least this much non-pawn material.
pub const SPACE_THRESHOLD: i32 = 12222;

// -------------------------------------------------------------------
// Closedness
// -------------------------------------------------------------------

pub const CLOSEDNESS_KNIGHT_ADJUSTMENT: [Score; 9] = [
    Score::new(-7, 7),
    Score::new(-6, 0),
    Score::new(2, -4),
    Score::new(0, -9),
    Score::new(3, -13),
    Score::new(4, -19),
    Score::new(-3, -10),
    Score::new(9, -28),
    Score::new(20, -18),
];

pub const CLOSEDNESS_ROOK_ADJUSTMENT: [Score; 9] = [
    Score::new(43, 9),
    Score::new(-6, 9),
    Score::new(-9, 0),
    Score::new(-8, 1),
    Score::new(-6, -6),
    Score::new(-4, -10),
    Score::new(-6, -7),
    Score::new(-5, -10),
    Score::new(-8, -11),
];

// -------------------------------------------------------------------
// Complexity / initiative
// -------------------------------------------------------------------

pub const COMPLEXITY_TOTAL_PAWNS: i32 = 5;
pub const COMPLEXITY_PAWN_FLANKS: i32 = 77;
pub const COMPLEXITY_PAWN_ENDGAME: i32 = 70;
pub const COMPLEXITY_ADJUSTMENT: i32 = -162;
