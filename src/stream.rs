// Feed readers through the engine a buffer at a time.
use crate::{Digest, Md5, Md5Error};

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use std::{fs::File, io::Read, path::Path};

pub const DEFAULT_CHUNK_SIZE: usize = 4096;

fn chunk_buffer(chunk_size: usize) -> Vec<u8> {
    let size = if chunk_size == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    };
    vec![0u8; size]
}

/// Hash everything `reader` yields until EOF.
pub fn digest_reader<R: Read>(mut reader: R, chunk_size: usize) -> Result<Digest, Md5Error> {
    let mut md5 = Md5::new();
    let mut buffer = chunk_buffer(chunk_size);
    loop {
        let n_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        md5.process(&buffer[..n_read])?;
    }
    debug!(total_len = md5.total_len(), "reader exhausted");
    Ok(md5.finish())
}

pub async fn digest_async_reader<R: AsyncRead + Unpin>(
    mut reader: R,
    chunk_size: usize,
) -> Result<Digest, Md5Error> {
    let mut md5 = Md5::new();
    let mut buffer = chunk_buffer(chunk_size);
    loop {
        let n_read = reader.read(&mut buffer).await?;
        if n_read == 0 {
            break;
        }
        md5.process(&buffer[..n_read])?;
    }
    debug!(total_len = md5.total_len(), "async reader exhausted");
    Ok(md5.finish())
}

pub fn digest_file(path: impl AsRef<Path>, chunk_size: usize) -> Result<Digest, Md5Error> {
    let path = path.as_ref();
    debug!(path = %path.display(), "hashing file");
    let file = File::open(path)?;
    digest_reader(file, chunk_size)
}
