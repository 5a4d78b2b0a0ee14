// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! A domain twice as large as the biggest multiplicative subgroup of
//! power-of-two order: the subgroup itself together with a multiplicative
//! shift of it. Each FFT decomposes into two subgroup-sized kernel runs.

use core::fmt;

use crate::error::Error;
use crate::fft::domain::{check_length, EvaluationDomain};
use crate::fft::radix2::evaluate_lagrange_coefficients;
use crate::fft::utils::best_fft;
use crate::field::FftField;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const CONSTRUCTION: &str = "extended radix-2 domain";

/// Defines a domain of size `2^(s+1)`, where `s` is the two-adicity of the
/// field: the `2^s`-th roots of unity together with their coset under a
/// fixed shift. Supports exactly one size, the doubling that the basic
/// radix-2 domain cannot reach.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct ExtendedRadix2EvaluationDomain<F: FftField> {
    /// The size of the domain.
    pub size: u64,
    /// Half the size of the domain, the order of the underlying subgroup.
    pub small_size: u64,
    /// `log_2(self.small_size)`.
    pub log_small_size: u32,
    /// A generator of the underlying subgroup.
    pub group_gen: F,
    /// Inverse of the generator of the subgroup.
    pub group_gen_inv: F,
    /// The shift separating the two blocks of the domain, the square of the
    /// field's multiplicative generator.
    pub shift: F,
    /// Inverse of the shift.
    pub shift_inv: F,
}

impl<F: FftField> fmt::Debug for ExtendedRadix2EvaluationDomain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extended radix-2 domain of size {}", self.size)
    }
}

impl<F: FftField> ExtendedRadix2EvaluationDomain<F> {
    /// Construct the domain of size `2^(F::TWO_ADICITY + 1)`.
    ///
    /// Any other `size` is declined, so that a caller can fall through to
    /// another construction. The shift is the square of the multiplicative
    /// generator; its order keeps the odd part of the group order, which
    /// keeps `shift^small_size` away from 1 and the two blocks disjoint.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size <= 1 {
            return Err(Error::InvalidSize(size));
        }
        if !size.is_power_of_two()
            || size.trailing_zeros() != F::TWO_ADICITY + 1
        {
            return Err(Error::UnsupportedDomainSize {
                construction: CONSTRUCTION,
                size,
            });
        }

        let small_size = size / 2;
        let group_gen = F::get_root_of_unity(small_size as u64).ok_or(
            Error::UnsupportedDomainSize {
                construction: CONSTRUCTION,
                size,
            },
        )?;
        let shift = F::multiplicative_generator().square();

        Ok(ExtendedRadix2EvaluationDomain {
            size: size as u64,
            small_size: small_size as u64,
            log_small_size: small_size.trailing_zeros(),
            group_gen,
            group_gen_inv: group_gen.invert().unwrap(),
            shift,
            shift_inv: shift.invert().unwrap(),
        })
    }
}

impl<F: FftField> EvaluationDomain<F> for ExtendedRadix2EvaluationDomain<F> {
    fn size(&self) -> usize {
        self.size as usize
    }

    /// Writes the evaluations over the subgroup into the first half of the
    /// vector and the evaluations over the shifted block into the second.
    fn fft_in_place(&self, coeffs: &mut [F]) -> Result<(), Error> {
        check_length(coeffs, self.size())?;
        let small = self.small_size as usize;
        let shift_to_small = self.shift.pow(self.small_size);

        // On the subgroup, x^small_size = 1 folds the upper coefficients
        // onto the lower ones; on the shifted block it contributes
        // shift^small_size instead, and the running shift power twists the
        // folded polynomial onto the subgroup.
        let mut a0 = vec![F::zero(); small];
        let mut a1 = vec![F::zero(); small];
        let mut shift_i = F::one();
        for i in 0..small {
            a0[i] = coeffs[i] + coeffs[small + i];
            a1[i] = shift_i * (coeffs[i] + shift_to_small * coeffs[small + i]);
            shift_i *= &self.shift;
        }

        best_fft(&mut a0, self.group_gen, self.log_small_size);
        best_fft(&mut a1, self.group_gen, self.log_small_size);

        coeffs[..small].copy_from_slice(&a0);
        coeffs[small..].copy_from_slice(&a1);
        Ok(())
    }

    fn ifft_in_place(&self, evals: &mut [F]) -> Result<(), Error> {
        check_length(evals, self.size())?;
        let small = self.small_size as usize;

        let mut u0 = evals[..small].to_vec();
        let mut u1 = evals[small..].to_vec();
        best_fft(&mut u0, self.group_gen_inv, self.log_small_size);
        best_fft(&mut u1, self.group_gen_inv, self.log_small_size);

        // Per index, the two unnormalized half-transforms give the linear
        // system { a_i + sh^s a_{s+i}, sh^i (a_i + sh^s a_{s+i}) } scaled by
        // s; solve it with a single inverted constant.
        let shift_to_small = self.shift.pow(self.small_size);
        let sconst = (F::from_u64(self.small_size)
            * (F::one() - shift_to_small))
            .invert()
            .unwrap();

        let mut shift_inv_i = F::one();
        for i in 0..small {
            evals[i] =
                sconst * (shift_inv_i * u1[i] - shift_to_small * u0[i]);
            evals[small + i] = sconst * (u0[i] - shift_inv_i * u1[i]);
            shift_inv_i *= &self.shift_inv;
        }
        Ok(())
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        let small = self.small_size as usize;
        let t0 = evaluate_lagrange_coefficients(tau, self.group_gen, small);
        let t1 = evaluate_lagrange_coefficients(
            tau * self.shift_inv,
            self.group_gen,
            small,
        );

        let t_to_small = tau.pow(self.small_size);
        let shift_to_small = self.shift.pow(self.small_size);
        let one_over_denom = (shift_to_small - F::one()).invert().unwrap();
        // Each block's sub-domain coefficients are rescaled by the other
        // block's vanishing polynomial, normalized to 1 on the block itself.
        let t0_coeff = (t_to_small - shift_to_small) * -one_over_denom;
        let t1_coeff = (t_to_small - F::one()) * one_over_denom;

        let mut result = vec![F::zero(); self.size()];
        for i in 0..small {
            result[i] = t0[i] * t0_coeff;
            result[small + i] = t1[i] * t1_coeff;
        }
        result
    }

    fn element(&self, i: usize) -> F {
        let small = self.small_size as usize;
        if i < small {
            self.group_gen.pow(i as u64)
        } else {
            self.shift * self.group_gen.pow((i - small) as u64)
        }
    }

    /// `z(X) = (X^small_size - 1) * (X^small_size - shift^small_size)`.
    fn evaluate_vanishing_polynomial(&self, tau: &F) -> F {
        let t_to_small = tau.pow(self.small_size);
        (t_to_small - F::one())
            * (t_to_small - self.shift.pow(self.small_size))
    }

    fn add_vanishing_poly_in_place(
        &self,
        multiplier: F,
        coeffs: &mut [F],
    ) -> Result<(), Error> {
        check_length(coeffs, self.size() + 1)?;
        let small = self.small_size as usize;
        let shift_to_small = self.shift.pow(self.small_size);

        coeffs[self.size()] += &multiplier;
        coeffs[small] -= &(multiplier * (shift_to_small + F::one()));
        coeffs[0] += &(multiplier * shift_to_small);
        Ok(())
    }

    /// Over the coset shifted by the multiplicative generator `g`, the
    /// vanishing polynomial is constant on each block: `x^small_size` equals
    /// `g^small_size` on the first and `(g * shift)^small_size` on the
    /// second.
    fn divide_by_vanishing_poly_on_coset_in_place(
        &self,
        evals: &mut [F],
    ) -> Result<(), Error> {
        check_length(evals, self.size())?;
        let small = self.small_size as usize;

        let coset_to_small =
            F::multiplicative_generator().pow(self.small_size);
        let shift_to_small = self.shift.pow(self.small_size);
        let z0_inv = ((coset_to_small - F::one())
            * (coset_to_small - shift_to_small))
            .invert()
            .unwrap();
        let z1_inv = ((coset_to_small * shift_to_small - F::one())
            * (coset_to_small * shift_to_small - shift_to_small))
            .invert()
            .unwrap();

        let (first, second) = evals.split_at_mut(small);

        #[cfg(feature = "parallel")]
        let (first_iter, second_iter) =
            (first.par_iter_mut(), second.par_iter_mut());
        #[cfg(not(feature = "parallel"))]
        let (first_iter, second_iter) = (first.iter_mut(), second.iter_mut());

        first_iter.for_each(|eval| *eval *= &z0_inv);
        second_iter.for_each(|eval| *eval *= &z1_inv);
        Ok(())
    }
}
