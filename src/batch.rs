// Hash many independent inputs in parallel, one engine per input.
use crate::{digest_file, Digest, Md5, Md5Error};

use rayon::prelude::*;
use tracing::debug;

use std::path::Path;

/// Digest of each input, in input order.
pub fn digest_all<T: AsRef<[u8]> + Sync>(inputs: &[T]) -> Vec<Digest> {
    debug!(n_inputs = inputs.len(), "hashing batch");
    inputs
        .par_iter()
        .map(|input| Md5::digest_message(input.as_ref()))
        .collect()
}

/// Digest of each file, in input order. A failure on one file does not stop
/// the others.
pub fn digest_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    chunk_size: usize,
) -> Vec<Result<Digest, Md5Error>> {
    debug!(n_files = paths.len(), chunk_size, "hashing files");
    paths
        .par_iter()
        .map(|path| digest_file(path, chunk_size))
        .collect()
}
