// Copyright (c) The xcresult-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{error, fmt};

/// An error that occurs while decoding a record from JSON.
///
/// Returned by [`decode_record`](crate::decode_record).
#[derive(Debug)]
pub struct DecodeError {
    type_name: &'static str,
    err: serde_path_to_error::Error<serde_json::Error>,
}

impl DecodeError {
    pub(crate) fn new(
        type_name: &'static str,
        err: serde_path_to_error::Error<serde_json::Error>,
    ) -> Self {
        Self { type_name, err }
    }

    /// Returns the name of the record type that failed to decode.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the path to the field that failed to decode, e.g. `actions[0].title`.
    pub fn path(&self) -> String {
        self.err.path().to_string()
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path = self.err.path().to_string();
        if path == "." {
            write!(f, "failed to decode `{}` record", self.type_name)
        } else {
            write!(
                f,
                "failed to decode `{}` record at `{path}`",
                self.type_name
            )
        }
    }
}

impl error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.err.inner())
    }
}
