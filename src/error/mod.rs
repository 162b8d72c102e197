//! Error types.
//!
//! Decoding never panics or returns `Err` for bad input: failures are values
//! ([`CodecErrors`]) carried by `Validation::Failure`. [`BuildError`] covers
//! mistakes in codec definitions themselves.

mod build_error;
mod codec_error;

pub use build_error::BuildError;
pub use codec_error::{CodecError, CodecErrors};
