mod batch;
mod error;
mod md5;
mod self_test;
mod signature;
mod stream;

pub use batch::{digest_all, digest_files};
pub use error::Md5Error;
pub use md5::{Digest, Md5, MD5_SIZE};
pub use self_test::{run_self_test, SelfTestReport, VectorOutcome, RFC1321_VECTORS};
pub use signature::{sig_from_string, sig_to_string, SIGNATURE_LEN};
pub use stream::{digest_async_reader, digest_file, digest_reader, DEFAULT_CHUNK_SIZE};
