// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Errors related to the construction and use of evaluation domains.

use thiserror::Error;

/// Defines all of the possible errors that can be encountered when
/// constructing an evaluation domain or operating over one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// This error occurs when a domain of size zero or one is requested;
    /// every construction needs at least two points.
    #[error("evaluation domain size must be larger than one, got {0}")]
    InvalidSize(usize),

    /// This error occurs when the requested size does not fit the shape a
    /// construction supports, e.g. a non-power-of-two size for the basic
    /// radix-2 domain, or when the field cannot provide the roots of unity
    /// the construction needs.
    #[error("{construction} does not support domains of size {size}")]
    UnsupportedDomainSize {
        /// The construction that declined the size.
        construction: &'static str,
        /// The requested domain size.
        size: usize,
    },

    /// This error occurs when the log-size of the requested group exceeds
    /// the two-adicity of the field's multiplicative group.
    #[error(
        "log-size of the evaluation domain group exceeds the two-adicity \
        of the field: {log_size_of_group} > {adicity}"
    )]
    InvalidEvalDomainSize {
        /// Log size of the group.
        log_size_of_group: u32,
        /// Two-adicity of the field.
        adicity: u32,
    },

    /// This error occurs when a vector handed to an in-place operation does
    /// not have the length the domain expects.
    #[error("input vector of length {got} does not match domain size {expected}")]
    InvalidVectorLength {
        /// The length the operation expects.
        expected: usize,
        /// The length of the vector provided.
        got: usize,
    },
}
