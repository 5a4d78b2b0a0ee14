// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! FFT module contains the evaluation-domain constructions used to move
//! polynomials between coefficient and evaluation form over select finite
//! fields.
//!
//! All constructions share the same radix-2 Cooley-Tukey kernel; they
//! differ in which point sets they evaluate over and therefore in how they
//! decompose into kernel invocations.

pub(crate) mod domain;
pub(crate) mod extended;
pub(crate) mod general;
pub(crate) mod radix2;
pub(crate) mod step;
pub(crate) mod utils;

pub use domain::EvaluationDomain;
pub use extended::ExtendedRadix2EvaluationDomain;
pub use general::GeneralEvaluationDomain;
pub use radix2::{Elements, Radix2EvaluationDomain};
pub use step::StepRadix2EvaluationDomain;
