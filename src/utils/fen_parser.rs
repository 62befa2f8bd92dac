//! FEN-to-Position parser.
//!
//! Builds fully-populated incremental state from a Forsyth-Edwards Notation
//! string, including piece bitboards, occupancies, rights, clocks and the
//! Zobrist key. The two move counters may be omitted; they default to `0 1`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessError::malformed("missing board layout in FEN"))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessError::malformed("missing side-to-move in FEN"))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| ChessError::malformed("missing castling rights in FEN"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| ChessError::malformed("missing en-passant square in FEN"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(ChessError::malformed("FEN has extra trailing fields"));
    }

    let mut position = Position::new_empty();

    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_square = parse_en_passant_square(en_passant_part, position.side_to_move)?;
    position.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::malformed(format!("invalid halfmove clock: {halfmove_part}")))?;
    position.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::malformed(format!("invalid fullmove number: {fullmove_part}")))?
        .max(1);

    position.refresh_hash();
    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::malformed(format!(
            "board layout must contain 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::malformed(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as usize;
                if file > 8 {
                    return Err(ChessError::malformed(format!(
                        "rank {} has too many files",
                        board_rank + 1
                    )));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                ChessError::malformed(format!("invalid piece character '{ch}' in board layout"))
            })?;

            if file >= 8 {
                return Err(ChessError::malformed(format!(
                    "rank {} has too many files",
                    board_rank + 1
                )));
            }

            let sq = (board_rank * 8 + file) as Square;
            position.toggle_piece_bits(piece.color, piece.kind, sq);
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::malformed(format!(
                "rank {} does not sum to 8 files",
                board_rank + 1
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::malformed(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(ChessError::malformed(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok(rights)
}

// The target lies behind a pawn the opponent just pushed two squares, so its
// rank is fixed by the side to move.
fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    let (expected_rank, label) = match side_to_move {
        Color::White => (5, "6 with white to move"),
        Color::Black => (2, "3 with black to move"),
    };
    if square / 8 == expected_rank {
        Ok(Some(square))
    } else {
        Err(ChessError::malformed(format!(
            "en-passant target must be on rank {label}: {en_passant_part}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.castling_rights, CASTLE_ALL);
        assert_eq!(position.fullmove_number, 1);
        assert_eq!(position.halfmove_clock, 0);
        assert_eq!(position.occupancy_all().count_ones(), 32);
        assert!(position.verify_hash_consistency().is_ok());
    }

    #[test]
    fn counters_are_optional() {
        let position = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").expect("four-field FEN should parse");
        assert_eq!(position.side_to_move, Color::Black);
        assert_eq!(position.halfmove_clock, 0);
        assert_eq!(position.fullmove_number, 1);
    }

    #[test]
    fn en_passant_target_matches_side_to_move() {
        let white =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("rank-6 target with white to move");
        assert_eq!(white.en_passant_square, Some(43));
        let black =
            parse_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("rank-3 target with black to move");
        assert_eq!(black.en_passant_square, Some(20));
        assert!(matches!(
            parse_fen("4k3/8/8/8/8/8/3Pp3/7K w - e3 0 1"),
            Err(ChessError::MalformedInput(_))
        ));
    }

    #[test]
    fn structural_errors_are_malformed_input() {
        let bad = [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            "4k3/8/8/8/8/8/3Pp3/7K w - e3 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
        ];
        for fen in bad {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::MalformedInput(_))),
                "expected MalformedInput for {fen:?}"
            );
        }
    }
}
