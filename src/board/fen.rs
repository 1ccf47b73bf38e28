use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color};
use crate::square::Square;

impl Board {
    /// Resets `self` to the position described by `fen` (first four to six
    /// space-separated FEN fields; halfmove/fullmove counters default to 0/1
    /// when omitted).
    pub fn set_fen(&mut self, fen: &str) -> Result<(), String> {
        let fen = fen.trim();
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or("FEN missing piece placement field")?;
        let stm = fields.next().unwrap_or("w");
        let castling = fields.next().unwrap_or("-");
        let ep = fields.next().unwrap_or("-");
        let halfmove = fields.next().unwrap_or("0");
        let fullmove = fields.next().unwrap_or("1");

        *self = Board::new_empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(format!(
                "FEN piece placement must have 8 ranks, found {}",
                ranks.len()
            ));
        }

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    if file >= 8 {
                        return Err(format!("FEN rank '{}' overflows the board", rank_str));
                    }
                    let (piece, color) = CHAR_TO_PC[c as usize]
                        .ok_or_else(|| format!("invalid FEN piece glyph '{}'", c))?;
                    let sq = Square::from_file_rank(file as u8, rank as u8);
                    let bb = self.bb(color, piece) | sq.bitboard();
                    self.set_bb(color, piece, bb);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(format!("FEN rank '{}' does not cover 8 files", rank_str));
            }
        }

        self.side_to_move = match stm {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("invalid side-to-move field '{}'", other)),
        };

        let mut rights = 0u8;
        if castling != "-" {
            for c in castling.chars() {
                rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    other => return Err(format!("invalid castling glyph '{}'", other)),
                };
            }
        }
        self.castling_rights = rights;

        self.en_passant = if ep == "-" {
            None
        } else {
            Some(parse_square(ep)?)
        };

        self.halfmove_clock = halfmove
            .parse()
            .map_err(|_| format!("invalid halfmove clock '{}'", halfmove))?;
        self.fullmove_number = fullmove
            .parse()
            .map_err(|_| format!("invalid fullmove number '{}'", fullmove))?;

        self.refresh_zobrist();
        self.history.clear();
        Ok(())
    }

    /// Serializes the current position back to FEN.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank_from_top in 0..8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                let sq = Square::from_file_rank(file, rank as u8);
                match self.piece_at(sq) {
                    None => empty_run += 1,
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let idx = (color as usize) * 6 + (piece as usize);
                        placement.push(PC_TO_CHAR[idx]);
                    }
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank_from_top != 7 {
                placement.push('/');
            }
        }

        let stm = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        if self.has_castling(CASTLE_WK) {
            castling.push('K');
        }
        if self.has_castling(CASTLE_WQ) {
            castling.push('Q');
        }
        if self.has_castling(CASTLE_BK) {
            castling.push('k');
        }
        if self.has_castling(CASTLE_BQ) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            placement, stm, castling, ep, self.halfmove_clock, self.fullmove_number
        )
    }
}

fn parse_square(s: &str) -> Result<Square, String> {
    let mut chars = s.chars();
    let file_ch = chars.next().ok_or("empty square string")?;
    let rank_ch = chars.next().ok_or("square string missing rank")?;
    if chars.next().is_some() {
        return Err(format!("square string '{}' too long", s));
    }
    if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
        return Err(format!("invalid square '{}'", s));
    }
    let file = file_ch as u8 - b'a';
    let rank = rank_ch as u8 - b'1';
    Ok(Square::from_file_rank(file, rank))
}
