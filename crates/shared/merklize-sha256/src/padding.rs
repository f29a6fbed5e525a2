//! Padding of fixed-length 512-bit messages, FIPS 180-4 §5.1.1

use crate::{BLOCK_WORDS, Block, PADDED_WORDS, PaddedMessage};

/// Length of the message before padding, in bits
pub const MESSAGE_BIT_LEN: u32 = (BLOCK_WORDS * u32::BITS as usize) as u32;

/// Single `1` bit appended right after the message
const PADDING_MARKER: u32 = 0x80 << 24;

/// Expand a 512-bit message into its 1024-bit padded form.
///
/// Words 0..16 are the message itself, word 16 holds the padding marker bit, words 17..31 are zero
/// and the last two words are the 64-bit message length (of which only the lowest word is
/// non-zero, since the message is always [`MESSAGE_BIT_LEN`] bits long).
#[inline]
pub const fn pad_message(message: &Block) -> PaddedMessage {
    let mut padded = [0; PADDED_WORDS];

    let mut i = 0;
    while i < BLOCK_WORDS {
        padded[i] = message[i];
        i += 1;
    }

    padded[BLOCK_WORDS] = PADDING_MARKER;
    padded[PADDED_WORDS - 1] = MESSAGE_BIT_LEN;

    padded
}
