//! Alphabet module - 64-symbol digit codec
//!
//! Every number in a fumen is written as a fixed-width group of base-64 digits,
//! least-significant digit first. Digit values map onto the symbols
//! `A-Z a-z 0-9 + /` in that order.
//!
//! Both lookup directions are compile-time tables, so they are shared freely
//! between threads without any initialization step.

use crate::error::Shortfall;

/// Digit symbols in value order
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Number of distinct digit values
pub const BASE: u32 = 64;

/// Symbol byte -> digit value. Bytes outside the alphabet map to 0.
static VALUES: [u8; 256] = build_values();

const fn build_values() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Symbol for a digit value (only the low 6 bits are used)
#[inline]
pub fn symbol(value: u32) -> char {
    ALPHABET[(value % BASE) as usize] as char
}

/// Digit value of a symbol
///
/// Unknown symbols read as 0 instead of failing.
#[inline]
pub fn value_of(symbol: char) -> u8 {
    if symbol.is_ascii() {
        VALUES[symbol as usize]
    } else {
        0
    }
}

/// Exclusive upper bound of a `count`-digit group (64^count)
pub fn capacity(count: usize) -> u64 {
    (BASE as u64).pow(count as u32)
}

/// Whether `value` fits in `count` digits
pub fn fits(value: u64, count: usize) -> bool {
    value < capacity(count)
}

/// Append `count` digits of `value`, least-significant first
///
/// Values that do not fit keep only their low-order digits. Callers that
/// must not lose data check [`fits`] first.
pub fn push_digits(out: &mut String, value: u32, count: usize) {
    let mut value = value;
    for _ in 0..count {
        out.push(symbol(value));
        value /= BASE;
    }
}

/// Cursor over a sequence of digit values
///
/// Owned by the decode loop and lent to each sub-parser in turn.
#[derive(Debug)]
pub struct DigitReader<'a> {
    digits: &'a [u8],
    pos: usize,
}

impl<'a> DigitReader<'a> {
    pub fn new(digits: &'a [u8]) -> Self {
        Self { digits, pos: 0 }
    }

    /// Read a `count`-digit group and advance past it
    pub fn read(&mut self, count: usize) -> Result<u32, Shortfall> {
        let remaining = self.remaining();
        if remaining < count {
            return Err(Shortfall {
                needed: count,
                remaining,
            });
        }

        let group = &self.digits[self.pos..self.pos + count];
        let value = group
            .iter()
            .rev()
            .fold(0u32, |acc, &digit| acc * BASE + digit as u32);
        self.pos += count;
        Ok(value)
    }

    /// Digits not consumed yet
    pub fn remaining(&self) -> usize {
        self.digits.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}
