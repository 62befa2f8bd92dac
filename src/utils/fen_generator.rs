use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

/// Six-field FEN for `position`; the inverse of `parse_fen`.
pub fn generate_fen(position: &Position) -> String {
    let side_to_move = match position.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    };
    format!(
        "{} {side_to_move} {} {} {} {}",
        generate_board_field(position),
        generate_castling_field(position.castling_rights),
        generate_en_passant_field(position.en_passant_square),
        position.halfmove_clock,
        position.fullmove_number
    )
}

// Rank 8 first; runs of empty squares collapse to a digit.
fn generate_board_field(position: &Position) -> String {
    let ranks: Vec<String> = (0..8u8)
        .rev()
        .map(|rank| {
            let mut text = String::with_capacity(8);
            let mut gap = 0u8;
            for square in rank * 8..rank * 8 + 8 {
                match position.piece_at(square) {
                    Some(piece) => {
                        if gap > 0 {
                            text.push(char::from(b'0' + gap));
                            gap = 0;
                        }
                        text.push(piece.to_fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                text.push(char::from(b'0' + gap));
            }
            text
        })
        .collect();
    ranks.join("/")
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CASTLE_WHITE_KINGSIDE, 'K'),
        (CASTLE_WHITE_QUEENSIDE, 'Q'),
        (CASTLE_BLACK_KINGSIDE, 'k'),
        (CASTLE_BLACK_QUEENSIDE, 'q'),
    ]
    .iter()
    .filter(|(right, _)| rights & right != 0)
    .map(|(_, ch)| *ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    square
        .and_then(|sq| square_to_algebraic(sq).ok())
        .unwrap_or_else(|| "-".to_owned())
}
