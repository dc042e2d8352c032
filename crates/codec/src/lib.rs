//! Binary codec for packlog records.
//!
//! Records are encoded as the concatenation of their field encodings in
//! [`Schema`] order. A record may optionally be *self-described* by prefixing
//! the encoding of its schema:
//!
//! ```text
//! +------------------------+-----------------+------------------+
//! | schema length (8, BE)  | schema bytes    | field encodings  |
//! +------------------------+-----------------+------------------+
//! ```
//!
//! Fields typed `hash` hold the [`content_digest`] of a nested record instead
//! of the record itself. Turning those digests back into records is the job of
//! a [`resolve::Resolve`] implementation, typically an audit log.
//!
//! Encoding and decoding are pure functions over their inputs and may be
//! called from any number of threads.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub use decode::{decode, decode_self_described, decode_with};
pub use digest::content_digest;
pub use encode::{encode, encode_with_schema};
pub use error::{DecodeError, EncodeError, ResolveError};
pub use format::{decode_format, encode_format};
#[doc(inline)]
pub use packlog_types as types;

mod decode;
mod digest;
mod encode;
mod error;
pub mod format;
pub mod resolve;

/// Join a parent field path and a field name for diagnostics.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}
