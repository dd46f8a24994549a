// Conversion between a digest and its 32 character hex signature string.
use crate::{Digest, Md5Error, MD5_SIZE};

use std::fmt;
use std::str::FromStr;

pub const SIGNATURE_LEN: usize = 2 * MD5_SIZE;

pub fn sig_to_string(digest: &Digest) -> String {
    hex::encode(digest.as_bytes())
}

/// Parse a signature string back into a digest.
///
/// Accepts upper or lower case hex. Anything that is not exactly
/// [`SIGNATURE_LEN`] hex digits is rejected, nothing is truncated.
pub fn sig_from_string(signature: &str) -> Result<Digest, Md5Error> {
    let mut bytes = [0u8; MD5_SIZE];
    hex::decode_to_slice(signature, &mut bytes).map_err(Md5Error::MalformedInput)?;
    Ok(Digest::from(bytes))
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&sig_to_string(self))
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.as_bytes()))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl FromStr for Digest {
    type Err = Md5Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        sig_from_string(s)
    }
}
