#![deny(missing_docs)]

//! # jwz-core: Header Model and Wire Primitives
//!
//! This crate is the leaf of the `jwz` workspace. It defines the types every
//! other crate builds on: the protected [`Header`], the [`CanonicalBytes`]
//! pipeline that turns a header into hashable bytes, the base64 codecs, and the
//! [`FormatError`] / [`HeaderError`] taxonomy for wire and header failures.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jwz-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
#[allow(missing_docs)]
pub mod encoding;
pub mod error;
pub mod header;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use encoding::{b64_encode, b64url_decode, b64url_encode};
pub use error::{CanonicalizationError, FormatError, HeaderError};
pub use header::{
    Header, HeaderDecodeError, HeaderValue, HEADER_ALG, HEADER_CIRCUIT_ID, HEADER_CRITICAL,
    HEADER_TYPE, TOKEN_TYPE,
};
