//! Percent module - ASCII-safe escaping for page comments
//!
//! `[0-9A-Za-z-_.~]` pass through. Code points up to 255 become `%XX`, larger
//! ones become `%uXXXX` per UTF-16 code unit, so characters outside the BMP
//! take a surrogate pair of escapes. Decoding is lenient: any `%` that does
//! not start a well-formed escape is kept as literal text.

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

fn push_hex(out: &mut String, value: u32, width: u32) {
    for shift in (0..width).rev() {
        out.push(HEX[((value >> (shift * 4)) & 0xF) as usize] as char);
    }
}

/// Escape `text` into printable ASCII
///
/// # Examples
///
/// ```
/// use tetris_fumen_codec::percent::percent_encode;
///
/// assert_eq!(percent_encode("T-spin"), "T-spin");
/// assert_eq!(percent_encode("a b"), "a%20b");
/// assert_eq!(percent_encode("é"), "%E9");
/// assert_eq!(percent_encode("あ"), "%u3042");
/// ```
pub fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut units = [0u16; 2];
    for c in text.chars() {
        if is_unreserved(c) {
            out.push(c);
        } else if (c as u32) <= 0xFF {
            out.push('%');
            push_hex(&mut out, c as u32, 2);
        } else {
            for &unit in c.encode_utf16(&mut units).iter() {
                out.push_str("%u");
                push_hex(&mut out, unit as u32, 4);
            }
        }
    }
    out
}

/// Parse `len` hex digits starting at `start`
fn hex_at(chars: &[char], start: usize, len: usize) -> Option<u32> {
    let digits = chars.get(start..start + len)?;
    digits
        .iter()
        .try_fold(0u32, |acc, c| Some(acc * 16 + c.to_digit(16)?))
}

/// `%uXXXX` at `start`
fn unit_at(chars: &[char], start: usize) -> Option<u32> {
    if chars.get(start) != Some(&'%') || chars.get(start + 1) != Some(&'u') {
        return None;
    }
    hex_at(chars, start + 2, 4)
}

/// Reverse [`percent_encode`]
///
/// # Examples
///
/// ```
/// use tetris_fumen_codec::percent::percent_decode;
///
/// assert_eq!(percent_decode("a%20b"), "a b");
/// assert_eq!(percent_decode("100%"), "100%");
/// assert_eq!(percent_decode("%zz"), "%zz");
/// ```
pub fn percent_decode(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '%' {
            if let Some(unit) = unit_at(&chars, i) {
                match unit {
                    0xD800..=0xDBFF => {
                        let low = unit_at(&chars, i + 6).filter(|lo| (0xDC00..=0xDFFF).contains(lo));
                        if let Some(low) = low {
                            let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            if let Some(c) = char::from_u32(code) {
                                out.push(c);
                                i += 12;
                                continue;
                            }
                        }
                    }
                    0xDC00..=0xDFFF => {}
                    _ => {
                        if let Some(c) = char::from_u32(unit) {
                            out.push(c);
                            i += 6;
                            continue;
                        }
                    }
                }
            } else if let Some(byte) = hex_at(&chars, i + 1, 2) {
                // Two hex digits never exceed 0xFF.
                out.push(char::from(byte as u8));
                i += 3;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}
