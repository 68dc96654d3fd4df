// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the records stored in an Xcode result bundle.
//!
//! The types in this crate describe records as returned by `xcresulttool get --format json`,
//! after the typed JSON envelope has been removed with [`typed_json::unwrap`]. Use
//! [`decode_record`] to go from a raw JSON value to one of the record types.
//!
//! Only the fields consumed by report generation are modeled. Unknown fields are ignored, and
//! every optional field may be absent without causing a decode error.

mod activity_log;
mod coverage;
mod errors;
#[cfg(feature = "proptest1")]
mod proptest_helpers;
mod records;
mod test_summary;
pub mod typed_json;

pub use activity_log::*;
pub use coverage::*;
pub use errors::*;
pub use records::*;
pub use test_summary::*;

use serde::de::DeserializeOwned;

/// A record type that can be resolved from a result bundle.
pub trait Record: DeserializeOwned {
    /// The name of this record type, as it appears in the `_type` field of typed JSON.
    const TYPE_NAME: &'static str;
}

/// Decodes a record from a JSON value.
///
/// The value may be either plain JSON or `xcresulttool` typed JSON. Typed JSON is detected by the
/// presence of a `_type` key on the top-level object.
pub fn decode_record<T: Record>(value: serde_json::Value) -> Result<T, DecodeError> {
    let value = if typed_json::is_typed(&value) {
        typed_json::unwrap(value)
    } else {
        value
    };
    serde_path_to_error::deserialize(value).map_err(|err| DecodeError::new(T::TYPE_NAME, err))
}
