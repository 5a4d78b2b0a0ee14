// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Evaluation domains for polynomial FFTs over FFT-friendly prime fields.
//!
//! In SNARK-style protocols we repeatedly move polynomials between
//! coefficient form and their evaluations over a fixed set of points. By
//! choosing those points as the powers of a `2^n` root of unity (or a union
//! of cosets thereof) the conversion costs O(n log n) through a radix-2 FFT.
//!
//! This crate provides three such constructions behind a common
//! [`EvaluationDomain`] trait:
//!
//! - [`Radix2EvaluationDomain`] for sizes `2^k`,
//! - [`ExtendedRadix2EvaluationDomain`] for size `2^(s+1)`, one doubling
//!   past the field's two-adicity limit,
//! - [`StepRadix2EvaluationDomain`] for sizes `2^k + 2^r` with `r < k`,
//!
//! together with [`GeneralEvaluationDomain`], which picks a construction for
//! a requested minimum size and may round the size up when the exact request
//! is not supported by any of them.
//!
//! All domains are generic over the [`FftField`] trait; an implementation is
//! provided for [`dusk_bls12_381::BlsScalar`].

// Bitshift/Bitwise ops are allowed to gain performance.
#![allow(clippy::suspicious_arithmetic_impl)]
// Variables have always the same names in respect to the literature.
#![allow(clippy::many_single_char_names)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod fft;
pub mod field;
mod util;

pub use error::Error;
pub use fft::{
    Elements, EvaluationDomain, ExtendedRadix2EvaluationDomain,
    GeneralEvaluationDomain, Radix2EvaluationDomain,
    StepRadix2EvaluationDomain,
};
pub use field::FftField;
