// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The operation set shared by every evaluation-domain construction.

use crate::error::Error;
use crate::fft::utils;
use crate::field::FftField;

/// An ordered set of pairwise-distinct field points over which polynomials
/// can be represented by their evaluations.
///
/// A domain of size `m` evaluates polynomials of degree below `m`; the FFTs
/// convert between the coefficient vector `(a_0, ..., a_{m-1})` and the
/// evaluation vector `(p(d_0), ..., p(d_{m-1}))`. Domains are immutable
/// after construction; in-place operations borrow the caller's vector for
/// the duration of the call and require its length to match the domain size
/// exactly.
pub trait EvaluationDomain<F: FftField> {
    /// Return the size of the domain.
    fn size(&self) -> usize;

    /// Compute a FFT, modifying the vector in place.
    fn fft_in_place(&self, coeffs: &mut [F]) -> Result<(), Error>;

    /// Compute an IFFT, modifying the vector in place.
    fn ifft_in_place(&self, evals: &mut [F]) -> Result<(), Error>;

    /// Evaluate all the lagrange polynomials defined by this domain at the
    /// point `tau`.
    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F>;

    /// Return the `i`-th element of the domain.
    fn element(&self, i: usize) -> F;

    /// This evaluates the vanishing polynomial for this domain at tau.
    fn evaluate_vanishing_polynomial(&self, tau: &F) -> F;

    /// Add `multiplier` times the domain's vanishing polynomial to the
    /// polynomial given in coefficient form by `coeffs`, which must have
    /// room for the vanishing polynomial itself, i.e. length `size() + 1`.
    fn add_vanishing_poly_in_place(
        &self,
        multiplier: F,
        coeffs: &mut [F],
    ) -> Result<(), Error>;

    /// Given the evaluations of a polynomial over a coset of this domain
    /// shifted by the field's multiplicative generator, divide them in place
    /// by the evaluations of the domain's vanishing polynomial over the same
    /// coset.
    fn divide_by_vanishing_poly_on_coset_in_place(
        &self,
        evals: &mut [F],
    ) -> Result<(), Error>;

    /// Compute a FFT over a coset of the domain shifted by `shift`,
    /// modifying the input vector in place.
    fn coset_fft_in_place(&self, coeffs: &mut [F], shift: F) -> Result<(), Error> {
        utils::distribute_powers(coeffs, shift);
        self.fft_in_place(coeffs)
    }

    /// Compute an IFFT over a coset of the domain shifted by `shift`,
    /// modifying the input vector in place.
    ///
    /// # Panics
    /// When `shift` is zero.
    fn coset_ifft_in_place(&self, evals: &mut [F], shift: F) -> Result<(), Error> {
        self.ifft_in_place(evals)?;
        utils::distribute_powers(evals, shift.invert().unwrap());
        Ok(())
    }

    /// Compute a FFT.
    fn fft(&self, coeffs: &[F]) -> Result<Vec<F>, Error> {
        let mut coeffs = coeffs.to_vec();
        self.fft_in_place(&mut coeffs)?;
        Ok(coeffs)
    }

    /// Compute an IFFT.
    fn ifft(&self, evals: &[F]) -> Result<Vec<F>, Error> {
        let mut evals = evals.to_vec();
        self.ifft_in_place(&mut evals)?;
        Ok(evals)
    }

    /// Compute a FFT over a coset of the domain shifted by `shift`.
    fn coset_fft(&self, coeffs: &[F], shift: F) -> Result<Vec<F>, Error> {
        let mut coeffs = coeffs.to_vec();
        self.coset_fft_in_place(&mut coeffs, shift)?;
        Ok(coeffs)
    }

    /// Compute an IFFT over a coset of the domain shifted by `shift`.
    ///
    /// # Panics
    /// When `shift` is zero.
    fn coset_ifft(&self, evals: &[F], shift: F) -> Result<Vec<F>, Error> {
        let mut evals = evals.to_vec();
        self.coset_ifft_in_place(&mut evals, shift)?;
        Ok(evals)
    }
}

/// Checks that an input vector matches the length an operation expects.
pub(crate) fn check_length<F>(v: &[F], expected: usize) -> Result<(), Error> {
    if v.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidVectorLength {
            expected,
            got: v.len(),
        })
    }
}
