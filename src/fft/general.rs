// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! A wrapper around the specific evaluation-domain constructions that picks
//! one for a requested minimum size, preferring the cheapest construction
//! that accepts and enlarging the size when none accepts it exactly.

use core::fmt;

use crate::error::Error;
use crate::fft::domain::EvaluationDomain;
use crate::fft::extended::ExtendedRadix2EvaluationDomain;
use crate::fft::radix2::Radix2EvaluationDomain;
use crate::fft::step::StepRadix2EvaluationDomain;
use crate::fft::utils::log2_floor;
use crate::field::FftField;

/// Defines a domain over which finite field (I)FFTs can be performed,
/// deferring to one of the concrete constructions.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum GeneralEvaluationDomain<F: FftField> {
    /// A power-of-two domain.
    Radix2(Radix2EvaluationDomain<F>),
    /// A domain twice the largest power-of-two subgroup.
    ExtendedRadix2(ExtendedRadix2EvaluationDomain<F>),
    /// A domain of size `2^k + 2^r`.
    StepRadix2(StepRadix2EvaluationDomain<F>),
}

impl<F: FftField> fmt::Debug for GeneralEvaluationDomain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radix2(domain) => domain.fmt(f),
            Self::ExtendedRadix2(domain) => domain.fmt(f),
            Self::StepRadix2(domain) => domain.fmt(f),
        }
    }
}

impl<F: FftField> GeneralEvaluationDomain<F> {
    /// Return a domain of size at least `min_size`.
    ///
    /// The constructions are tried in a fixed order — basic, extended, step,
    /// first at `min_size` itself and then at `min_size` rounded up to the
    /// nearest sum `2^k + 2^r` — and the first that accepts wins. The
    /// returned domain may therefore be larger than the request; callers
    /// must read the actual size off the domain.
    pub fn new(min_size: usize) -> Result<Self, Error> {
        if min_size <= 1 {
            return Err(Error::InvalidSize(min_size));
        }

        let big = 1usize << log2_floor(min_size - 1);
        let rounded_small = (min_size - big).next_power_of_two();

        for size in [min_size, big + rounded_small] {
            if let Ok(domain) = Radix2EvaluationDomain::new(size) {
                return Ok(Self::Radix2(domain));
            }
            if let Ok(domain) = ExtendedRadix2EvaluationDomain::new(size) {
                return Ok(Self::ExtendedRadix2(domain));
            }
            if let Ok(domain) = StepRadix2EvaluationDomain::new(size) {
                return Ok(Self::StepRadix2(domain));
            }
        }

        Err(Error::UnsupportedDomainSize {
            construction: "general evaluation domain",
            size: min_size,
        })
    }
}

impl<F: FftField> EvaluationDomain<F> for GeneralEvaluationDomain<F> {
    fn size(&self) -> usize {
        match self {
            Self::Radix2(domain) => domain.size(),
            Self::ExtendedRadix2(domain) => domain.size(),
            Self::StepRadix2(domain) => domain.size(),
        }
    }

    fn fft_in_place(&self, coeffs: &mut [F]) -> Result<(), Error> {
        match self {
            Self::Radix2(domain) => domain.fft_in_place(coeffs),
            Self::ExtendedRadix2(domain) => domain.fft_in_place(coeffs),
            Self::StepRadix2(domain) => domain.fft_in_place(coeffs),
        }
    }

    fn ifft_in_place(&self, evals: &mut [F]) -> Result<(), Error> {
        match self {
            Self::Radix2(domain) => domain.ifft_in_place(evals),
            Self::ExtendedRadix2(domain) => domain.ifft_in_place(evals),
            Self::StepRadix2(domain) => domain.ifft_in_place(evals),
        }
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        match self {
            Self::Radix2(domain) => {
                domain.evaluate_all_lagrange_coefficients(tau)
            }
            Self::ExtendedRadix2(domain) => {
                domain.evaluate_all_lagrange_coefficients(tau)
            }
            Self::StepRadix2(domain) => {
                domain.evaluate_all_lagrange_coefficients(tau)
            }
        }
    }

    fn element(&self, i: usize) -> F {
        match self {
            Self::Radix2(domain) => domain.element(i),
            Self::ExtendedRadix2(domain) => domain.element(i),
            Self::StepRadix2(domain) => domain.element(i),
        }
    }

    fn evaluate_vanishing_polynomial(&self, tau: &F) -> F {
        match self {
            Self::Radix2(domain) => domain.evaluate_vanishing_polynomial(tau),
            Self::ExtendedRadix2(domain) => {
                domain.evaluate_vanishing_polynomial(tau)
            }
            Self::StepRadix2(domain) => {
                domain.evaluate_vanishing_polynomial(tau)
            }
        }
    }

    fn add_vanishing_poly_in_place(
        &self,
        multiplier: F,
        coeffs: &mut [F],
    ) -> Result<(), Error> {
        match self {
            Self::Radix2(domain) => {
                domain.add_vanishing_poly_in_place(multiplier, coeffs)
            }
            Self::ExtendedRadix2(domain) => {
                domain.add_vanishing_poly_in_place(multiplier, coeffs)
            }
            Self::StepRadix2(domain) => {
                domain.add_vanishing_poly_in_place(multiplier, coeffs)
            }
        }
    }

    fn divide_by_vanishing_poly_on_coset_in_place(
        &self,
        evals: &mut [F],
    ) -> Result<(), Error> {
        match self {
            Self::Radix2(domain) => {
                domain.divide_by_vanishing_poly_on_coset_in_place(evals)
            }
            Self::ExtendedRadix2(domain) => {
                domain.divide_by_vanishing_poly_on_coset_in_place(evals)
            }
            Self::StepRadix2(domain) => {
                domain.divide_by_vanishing_poly_on_coset_in_place(evals)
            }
        }
    }
}
