// Copyright (c) 2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The `error` module contains the error type for the fallible operations
//! of this library.
//!
//! Geometric degeneracies are not errors: the navigation functions return
//! an `Option` where a result may not exist.

use alloc::string::String;
use thiserror::Error;

/// The error type for invalid formatting parameters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown DMS format style: {0}")]
    UnknownStyle(String),

    #[error("invalid compass point precision: {0}, must be 1, 2 or 3")]
    InvalidCompassPrecision(u8),
}

/// Shorthand result type for this library.
pub type Result<T> = core::result::Result<T, Error>;
