use crate::Md5Error;

use tracing::trace;

const BUFFER_SIZE: usize = 64;
pub const MD5_SIZE: usize = 16;
const INITIALISATION_CONSTANTS: [u32; 4] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];

// Byte offset at which the 64-bit message length starts in the final block.
const LENGTH_OFFSET: usize = BUFFER_SIZE - 8;

/// Additive constant for each round, `floor(abs(sin(i + 1)) * 2^32)`.
#[rustfmt::skip]
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

#[rustfmt::skip]
const SHIFTS: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    5,  9, 14, 20, 5,  9, 14, 20, 5,  9, 14, 20, 5,  9, 14, 20,
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Index of the message word mixed in at each round.
#[rustfmt::skip]
const WORD_INDEX: [usize; 64] = [
    0, 1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15,
    1, 6, 11,  0,  5, 10, 15,  4,  9, 14,  3,  8, 13,  2,  7, 12,
    5, 8, 11, 14,  1,  4,  7, 10, 13,  0,  3,  6,  9, 12, 15,  2,
    0, 7, 14,  5, 12,  3, 10,  1,  8, 15,  6, 13,  4, 11,  2,  9,
];

/// A 128-bit MD5 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; MD5_SIZE]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; MD5_SIZE] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; MD5_SIZE] {
        self.0
    }
}

impl From<[u8; MD5_SIZE]> for Digest {
    fn from(bytes: [u8; MD5_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Streaming MD5 engine.
///
/// Bytes are fed in with [`Md5::process`] in chunks of any size, then
/// [`Md5::finish`] pads the message and returns the digest. Once finished the
/// engine rejects further input until it is [`Md5::reset`].
#[derive(Debug, Clone)]
pub struct Md5 {
    buffer: [u8; BUFFER_SIZE],
    buffer_len: usize,
    state: [u32; 4],
    message_len: u64,
    finalized: bool,
}

impl Md5 {
    pub fn new() -> Self {
        Self {
            buffer: [0u8; BUFFER_SIZE],
            buffer_len: 0,
            state: INITIALISATION_CONSTANTS,
            message_len: 0,
            finalized: false,
        }
    }

    /// Hash `message` in one go.
    pub fn digest_message(message: &[u8]) -> Digest {
        let mut md5 = Self::new();
        md5.message_len = message.len() as u64;
        md5.absorb(message);
        md5.finish()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of bytes passed to `process` since the last init.
    pub fn total_len(&self) -> u64 {
        self.message_len
    }

    pub fn process(&mut self, message: &[u8]) -> Result<(), Md5Error> {
        if self.finalized {
            return Err(Md5Error::InvalidState);
        }
        self.message_len = self.message_len.wrapping_add(message.len() as u64);
        self.absorb(message);
        Ok(())
    }

    /// Pad the message and return the digest.
    ///
    /// Calling this again on a finished engine returns the same digest.
    pub fn finish(&mut self) -> Digest {
        if !self.finalized {
            self.md_pad();
            self.finalized = true;
            trace!(message_len = self.message_len, "finished md5 digest");
        }

        let mut digest = [0u8; MD5_SIZE];
        for (out, word) in digest.chunks_exact_mut(4).zip(self.state) {
            out.copy_from_slice(&word.to_le_bytes());
        }
        Digest(digest)
    }

    pub fn digest(mut self) -> Digest {
        self.finish()
    }

    pub fn update_and_digest(mut self, message: &[u8]) -> Result<Digest, Md5Error> {
        self.process(message)?;
        Ok(self.finish())
    }

    fn absorb(&mut self, message: &[u8]) {
        let mut offset = 0;
        if self.buffer_len > 0 {
            let needed = BUFFER_SIZE - self.buffer_len;
            let to_copy = needed.min(message.len());
            self.buffer[self.buffer_len..self.buffer_len + to_copy]
                .copy_from_slice(&message[..to_copy]);
            self.buffer_len += to_copy;
            offset += to_copy;

            if self.buffer_len == BUFFER_SIZE {
                compress(&mut self.state, &self.buffer);
                self.buffer_len = 0;
            }
        }

        let mut blocks = message[offset..].chunks_exact(BUFFER_SIZE);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let remainder = blocks.remainder();
        if !remainder.is_empty() {
            self.buffer[..remainder.len()].copy_from_slice(remainder);
            self.buffer_len = remainder.len();
        }
    }

    fn md_pad(&mut self) {
        let bit_len = self.message_len.wrapping_mul(8);

        self.buffer[self.buffer_len] = 0x80;
        self.buffer_len += 1;

        // No room left for the length: it spills into a second block.
        if self.buffer_len > LENGTH_OFFSET {
            self.buffer[self.buffer_len..].fill(0);
            compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        self.buffer[self.buffer_len..LENGTH_OFFSET].fill(0);
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_le_bytes());
        compress(&mut self.state, &self.buffer);
        self.buffer_len = 0;
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold one 64-byte block into the running state.
fn compress(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), BUFFER_SIZE);

    let mut x = [0u32; 16];
    for (word, bytes) in x.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;
    for i in 0..64 {
        let f = match i / 16 {
            0 => (b & c) | (!b & d),
            1 => (b & d) | (c & !d),
            2 => b ^ c ^ d,
            _ => c ^ (b | !d),
        };
        let temp = a
            .wrapping_add(f)
            .wrapping_add(K[i])
            .wrapping_add(x[WORD_INDEX[i]]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(temp.rotate_left(SHIFTS[i]));
    }

    for (acc, val) in state.iter_mut().zip([a, b, c, d]) {
        *acc = acc.wrapping_add(val);
    }
}
