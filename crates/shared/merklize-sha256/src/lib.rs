//! SHA-256 compression and fixed-length padding, specialized for 2-to-1 hashing in binary Merkle
//! Trees.
//!
//! A Merkle Tree node is computed from exactly 512 bits of input (two concatenated 256-bit
//! children). Such input always pads to exactly two 512-bit message blocks, which allows to skip
//! the generic streaming machinery of SHA-256 entirely: [`pad_message()`] produces the 1024-bit
//! padded form and [`hash_padded()`] runs [`compress()`] over both halves.
//!
//! All values are represented as 32-bit words, conversion to/from bytes is big-endian as mandated
//! by FIPS 180-4, see [`words_from_be_bytes()`] and [`be_bytes_from_words()`].

#![no_std]

mod compress;
mod padding;

pub use compress::compress;
pub use padding::{MESSAGE_BIT_LEN, pad_message};

/// The number of words in a digest
pub const DIGEST_WORDS: usize = 8;
/// The number of bytes in a digest
pub const DIGEST_LEN: usize = DIGEST_WORDS * size_of::<u32>();
/// The number of words in a single message block
pub const BLOCK_WORDS: usize = 16;
/// The number of words in a padded 2-to-1 message (two message blocks)
pub const PADDED_WORDS: usize = BLOCK_WORDS * 2;

/// 256-bit digest (and running hash state) as words
pub type Digest = [u32; DIGEST_WORDS];
/// 512-bit message block as words
pub type Block = [u32; BLOCK_WORDS];
/// 1024-bit padded message as words
pub type PaddedMessage = [u32; PADDED_WORDS];

/// Initial hash value, FIPS 180-4 §5.3.3
pub const IV: Digest = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Compute digest of an already padded 1024-bit message.
///
/// Both message blocks are compressed sequentially into a state initialized with [`IV`], the
/// second compression depends on the output of the first one.
#[inline]
pub const fn hash_padded(message: &PaddedMessage) -> Digest {
    let (first, second) = split_padded(message);

    let mut state = IV;
    compress(&mut state, &first);
    compress(&mut state, &second);
    state
}

/// Pad and hash a single 512-bit block
#[inline]
pub const fn hash_block(block: &Block) -> Digest {
    hash_padded(&pad_message(block))
}

/// Hash two digests together (2-to-1 hash).
///
/// Equivalent to SHA-256 over 64 bytes of `left || right` in big-endian byte representation.
#[inline]
pub const fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    hash_block(&concat_pair(left, right))
}

/// Concatenate two digests into a single message block
#[inline(always)]
pub const fn concat_pair(left: &Digest, right: &Digest) -> Block {
    let mut block = [0; BLOCK_WORDS];
    let mut i = 0;
    while i < DIGEST_WORDS {
        block[i] = left[i];
        block[DIGEST_WORDS + i] = right[i];
        i += 1;
    }
    block
}

#[inline(always)]
const fn split_padded(message: &PaddedMessage) -> (Block, Block) {
    let mut first = [0; BLOCK_WORDS];
    let mut second = [0; BLOCK_WORDS];
    let mut i = 0;
    while i < BLOCK_WORDS {
        first[i] = message[i];
        second[i] = message[BLOCK_WORDS + i];
        i += 1;
    }
    (first, second)
}

/// Interpret bytes as big-endian words.
///
/// `N` must be a multiple of 4 and `M` must be `N / 4`, otherwise trailing words are left zeroed or
/// trailing bytes are ignored.
#[inline]
pub const fn words_from_be_bytes<const N: usize, const M: usize>(bytes: &[u8; N]) -> [u32; M] {
    let mut words = [0; M];
    let mut i = 0;
    while i < M && i * 4 + 3 < N {
        words[i] = u32::from_be_bytes([
            bytes[i * 4],
            bytes[i * 4 + 1],
            bytes[i * 4 + 2],
            bytes[i * 4 + 3],
        ]);
        i += 1;
    }
    words
}

/// Inverse of [`words_from_be_bytes()`]
#[inline]
pub const fn be_bytes_from_words<const M: usize, const N: usize>(words: &[u32; M]) -> [u8; N] {
    let mut bytes = [0; N];
    let mut i = 0;
    while i < M && i * 4 + 3 < N {
        let word = words[i].to_be_bytes();
        bytes[i * 4] = word[0];
        bytes[i * 4 + 1] = word[1];
        bytes[i * 4 + 2] = word[2];
        bytes[i * 4 + 3] = word[3];
        i += 1;
    }
    bytes
}
