//! Six-bit symbol alphabet used by the hash format.
//!
//! This is not RFC 4648 base64: digits come first so that small header
//! values stay readable (`1` is webgl1, `2` is webgl2 for catalog version 0).

use crate::error::{HashError, Result};

pub const ALPHABET: &[u8; 64] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ+/";

const INVALID: u8 = 0xff;

const REVERSE: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Maps a 6-bit value to its symbol.
#[inline]
pub fn encode64(bitfield: u8) -> Result<char> {
    ALPHABET
        .get(usize::from(bitfield))
        .map(|&b| char::from(b))
        .ok_or(HashError::BitfieldOutOfRange(bitfield))
}

/// Maps a symbol back to its 6-bit value.
#[inline]
pub fn decode64(symbol: char) -> Result<u8> {
    let value = u32::from(symbol);
    if value < 128 && REVERSE[value as usize] != INVALID {
        Ok(REVERSE[value as usize])
    } else {
        Err(HashError::UnknownCharacter(symbol))
    }
}
