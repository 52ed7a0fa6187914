//! Fumen codec tests - known strings, boundaries and failure tiers

use tetris_fumen::codec::descriptor::MAX_COMMENT_LEN;
use tetris_fumen::codec::field_diff::diff_runs;
use tetris_fumen::codec::{
    decode, encode, encode_with, DecodeError, EncodeError, EncodeOptions, Fumen, StreamPart,
    FORMAT_TAG,
};
use tetris_fumen::types::{Field, Page, Piece, PieceType, Rotation};

fn t_page() -> Page {
    Page {
        piece: Piece::new(PieceType::T, Rotation::North, 0),
        ..Page::default()
    }
}

// ============== Known Encodings ==============

#[test]
fn test_single_t_page_encoding() {
    // "vh": diff 8, run 240 -> 2159; "AQp": ((5 * 4 + 2) * 240) * 32 = 168960
    let text = encode(&[t_page()]).unwrap();
    assert_eq!(text, "v115@vhAQp");
    assert_eq!(decode(&text).unwrap(), vec![t_page()]);
}

#[test]
fn test_one_changed_cell_emits_two_runs() {
    let first = t_page();
    let mut second = t_page();
    second.field.set(9, 23, 1);

    let runs = diff_runs(&first.field, &second.field);
    assert_eq!(runs.len(), 2);
    assert_eq!((runs[0].diff, runs[0].len), (8, 239));
    assert_eq!((runs[1].diff, runs[1].len), (9, 1));

    // page 2: "uh" (8, 239) + "wh" (9, 1) + descriptor
    let text = encode(&[first.clone(), second.clone()]).unwrap();
    assert_eq!(text, "v115@vhAQpuhwhAQp");
    assert_eq!(decode(&text).unwrap(), vec![first, second]);
}

#[test]
fn test_changed_first_cell_also_two_runs() {
    let mut page = t_page();
    page.field.set(0, 0, 1);
    let runs = diff_runs(&Field::new(), &page.field);
    assert_eq!(runs.len(), 2);
    assert_eq!(encode(&[page]).unwrap(), "v115@whuhAQp");
}

#[test]
fn test_empty_page_list() {
    assert_eq!(encode(&[]).unwrap(), FORMAT_TAG);
    assert!(decode(FORMAT_TAG).unwrap().is_empty());
}

// ============== Page Contents ==============

#[test]
fn test_flags_and_pieces_round_trip() {
    let mut stack = Field::new();
    for x in 0..9 {
        stack.set(x, 23, PieceType::Gray.code());
    }

    let mut pages = vec![Page::new(
        stack.clone(),
        Piece::new(PieceType::I, Rotation::East, 229),
    )];

    let mut second = Page::new(stack, Piece::new(PieceType::L, Rotation::South, 215));
    second.field.set(9, 23, PieceType::I.code());
    second.field.set(9, 22, PieceType::I.code());
    second.flags.raise = true;
    second.flags.mirror = true;
    second.flags.color = true;
    second.flags.lock = false;
    second.flags.comment = "Perfect Clear 開幕 100%".to_string();
    pages.push(second);

    pages.push(Page {
        piece: Piece::new(PieceType::Empty, Rotation::West, 239),
        ..Page::default()
    });

    let text = encode(&pages).unwrap();
    assert_eq!(decode(&text).unwrap(), pages);
}

#[test]
fn test_comment_length_boundaries() {
    for len in [0usize, 1, 4, 5, MAX_COMMENT_LEN] {
        let page = t_page().with_comment("c".repeat(len));
        let text = encode(&[page.clone()]).unwrap();
        assert_eq!(decode(&text).unwrap(), vec![page], "comment length {}", len);
    }

    let page = t_page().with_comment("c".repeat(MAX_COMMENT_LEN + 1));
    assert_eq!(
        encode(&[page]),
        Err(EncodeError::RangeViolation {
            page: 0,
            field: "comment length",
            value: 4096,
        })
    );
}

#[test]
fn test_empty_comment_writes_no_block() {
    let text = encode(&[t_page().with_comment("")]).unwrap();
    assert_eq!(text.len(), FORMAT_TAG.len() + 5);
}

#[test]
fn test_gray_piece_is_rejected_not_aliased() {
    let mut page = t_page();
    page.piece.kind = PieceType::Gray;
    assert!(matches!(
        encode(&[page]),
        Err(EncodeError::RangeViolation {
            field: "piece.type",
            ..
        })
    ));
}

// ============== Decode Failure Tiers ==============

#[test]
fn test_foreign_formats_are_unsupported() {
    for text in ["", "v", "v115", "V115@vhAQp", "v110@vhAQp", "m115@vhAQp", "hello"] {
        let err = decode(text).unwrap_err();
        assert!(err.is_unsupported_format(), "{:?}", text);
    }
}

#[test]
fn test_truncation_is_structural() {
    let err = decode("v115@vhAQ").unwrap_err();
    assert!(!err.is_unsupported_format());
    assert_eq!(
        err,
        DecodeError::StreamTruncated {
            page: 0,
            part: StreamPart::Descriptor,
            needed: 3,
            remaining: 2,
        }
    );

    // A complete first page does not rescue a broken second one.
    assert!(matches!(
        decode("v115@vhAQpv"),
        Err(DecodeError::StreamTruncated {
            page: 1,
            part: StreamPart::Field,
            ..
        })
    ));
    assert!(Fumen::decode_lenient("v115@vhAQpv").is_none());
}

#[test]
fn test_missing_comment_chunks_are_truncation() {
    let text = encode(&[t_page().with_comment("abcdef")]).unwrap();
    let err = decode(&text[..text.len() - 5]).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::StreamTruncated {
            part: StreamPart::Comment,
            ..
        }
    ));
}

#[test]
fn test_missing_comment_length_is_truncation() {
    let text = encode(&[t_page().with_comment("x")]).unwrap();
    // drop the 2-digit length and the single 5-digit chunk
    let err = decode(&text[..text.len() - 7]).unwrap_err();
    assert!(!err.is_unsupported_format());
    assert_eq!(
        err,
        DecodeError::StreamTruncated {
            page: 0,
            part: StreamPart::CommentLength,
            needed: 2,
            remaining: 0,
        }
    );
}

// ============== Fillers And Leniency ==============

#[test]
fn test_fillers_at_group_boundaries() {
    let expected = vec![t_page()];
    for text in ["v115@?vhAQp", "v115@vh?AQp", "v115@vhAQp?", "v115@v?h?A?Q?p", "v115@??vhAQp"] {
        assert_eq!(decode(text).unwrap(), expected, "{}", text);
    }
}

#[test]
fn test_wrapped_output_round_trips() {
    let pages: Vec<Page> = (0..10)
        .map(|i| t_page().with_comment(format!("step {}", i)))
        .collect();
    let options = EncodeOptions::default().with_filler_every(47);
    let text = encode_with(&pages, &options).unwrap();

    let body = &text[FORMAT_TAG.len()..];
    assert!(body.chars().nth(47) == Some('?'));
    assert_eq!(decode(&text).unwrap(), pages);
}

#[test]
fn test_unknown_symbols_read_as_zero() {
    // '-' is outside the alphabet and reads like 'A'.
    assert_eq!(decode("v115@vh-Qp").unwrap(), decode("v115@vhAQp").unwrap());
}
