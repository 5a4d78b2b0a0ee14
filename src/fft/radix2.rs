// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! In pairing-based SNARKs we need to calculate a quotient polynomial over
//! a target polynomial with roots at distinct points associated with each
//! constraint of the constraint system. In order to be efficient, we choose
//! these roots to be the powers of a 2^n root of unity in the field. This
//! allows us to perform polynomial operations in O(n) by performing an
//! O(n log n) FFT over such a domain.

use core::fmt;

use crate::error::Error;
use crate::fft::domain::{check_length, EvaluationDomain};
use crate::fft::utils::best_fft;
use crate::field::FftField;
use crate::util::batch_inversion;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const CONSTRUCTION: &str = "basic radix-2 domain";

/// Defines a domain over which finite field (I)FFTs can be performed. Works
/// only for fields that have a large multiplicative subgroup of size that is
/// a power-of-2.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Radix2EvaluationDomain<F: FftField> {
    /// The size of the domain.
    pub size: u64,
    /// `log_2(self.size)`.
    pub log_size_of_group: u32,
    /// Size of the domain as a field element.
    pub size_as_field_element: F,
    /// Inverse of the size in the field.
    pub size_inv: F,
    /// A generator of the subgroup.
    pub group_gen: F,
    /// Inverse of the generator of the subgroup.
    pub group_gen_inv: F,
    /// Inverse of the multiplicative generator of the finite field.
    pub generator_inv: F,
}

impl<F: FftField> fmt::Debug for Radix2EvaluationDomain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Radix-2 multiplicative subgroup of size {}", self.size)
    }
}

impl<F: FftField> Radix2EvaluationDomain<F> {
    /// Construct a domain of exactly `size` points, the powers of a primitive
    /// `size`-th root of unity.
    ///
    /// `size` must be a power of two not exceeding `2^F::TWO_ADICITY`;
    /// requests for larger or non-power-of-two sizes are declined, so that a
    /// caller (in particular [`GeneralEvaluationDomain`]) can fall through to
    /// another construction.
    ///
    /// [`GeneralEvaluationDomain`]: crate::fft::GeneralEvaluationDomain
    pub fn new(size: usize) -> Result<Self, Error> {
        if size <= 1 {
            return Err(Error::InvalidSize(size));
        }
        if !size.is_power_of_two() {
            return Err(Error::UnsupportedDomainSize {
                construction: CONSTRUCTION,
                size,
            });
        }
        let log_size_of_group = size.trailing_zeros();
        if log_size_of_group > F::TWO_ADICITY {
            return Err(Error::InvalidEvalDomainSize {
                log_size_of_group,
                adicity: F::TWO_ADICITY,
            });
        }

        // Compute the generator for the multiplicative subgroup.
        // It should be the 2^(log_size_of_group) root of unity.
        let group_gen = F::get_root_of_unity(size as u64).ok_or(
            Error::UnsupportedDomainSize {
                construction: CONSTRUCTION,
                size,
            },
        )?;
        let size_as_field_element = F::from_u64(size as u64);
        let size_inv = size_as_field_element.invert().unwrap();

        Ok(Radix2EvaluationDomain {
            size: size as u64,
            log_size_of_group,
            size_as_field_element,
            size_inv,
            group_gen,
            group_gen_inv: group_gen.invert().unwrap(),
            generator_inv: F::multiplicative_generator().invert().unwrap(),
        })
    }

    /// Return an iterator over the elements of the domain.
    pub fn elements(&self) -> Elements<F> {
        Elements {
            cur_elem: F::one(),
            cur_pow: 0,
            domain: *self,
        }
    }
}

impl<F: FftField> EvaluationDomain<F> for Radix2EvaluationDomain<F> {
    fn size(&self) -> usize {
        self.size as usize
    }

    fn fft_in_place(&self, coeffs: &mut [F]) -> Result<(), Error> {
        check_length(coeffs, self.size())?;
        best_fft(coeffs, self.group_gen, self.log_size_of_group);
        Ok(())
    }

    fn ifft_in_place(&self, evals: &mut [F]) -> Result<(), Error> {
        check_length(evals, self.size())?;
        best_fft(evals, self.group_gen_inv, self.log_size_of_group);

        #[cfg(feature = "parallel")]
        let iter = evals.par_iter_mut();
        #[cfg(not(feature = "parallel"))]
        let iter = evals.iter_mut();
        iter.for_each(|val| *val *= &self.size_inv);

        Ok(())
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        evaluate_lagrange_coefficients(tau, self.group_gen, self.size())
    }

    fn element(&self, i: usize) -> F {
        self.group_gen.pow(i as u64)
    }

    /// For multiplicative subgroups, the vanishing polynomial is
    /// `z(X) = X^self.size - 1`.
    fn evaluate_vanishing_polynomial(&self, tau: &F) -> F {
        tau.pow(self.size) - F::one()
    }

    fn add_vanishing_poly_in_place(
        &self,
        multiplier: F,
        coeffs: &mut [F],
    ) -> Result<(), Error> {
        check_length(coeffs, self.size() + 1)?;
        coeffs[self.size()] += &multiplier;
        coeffs[0] -= &multiplier;
        Ok(())
    }

    /// The vanishing polynomial is zero on every point of the domain, so the
    /// division happens over the coset shifted by the field's multiplicative
    /// generator, where it evaluates to the constant `g^size - 1`.
    fn divide_by_vanishing_poly_on_coset_in_place(
        &self,
        evals: &mut [F],
    ) -> Result<(), Error> {
        check_length(evals, self.size())?;
        let i = self
            .evaluate_vanishing_polynomial(&F::multiplicative_generator())
            .invert()
            .unwrap();

        #[cfg(feature = "parallel")]
        let iter = evals.par_iter_mut();
        #[cfg(not(feature = "parallel"))]
        let iter = evals.iter_mut();
        iter.for_each(|eval| *eval *= &i);

        Ok(())
    }
}

/// Evaluate all the Lagrange polynomials of the domain generated by the
/// powers of `group_gen` at the point `tau`.
///
/// Shared by the extended and step constructions, which assemble their
/// Lagrange coefficients out of those of their power-of-two sub-domains.
pub(crate) fn evaluate_lagrange_coefficients<F: FftField>(
    tau: F,
    group_gen: F,
    size: usize,
) -> Vec<F> {
    let t_size = tau.pow(size as u64);
    let one = F::one();

    if t_size == one {
        // `tau` lies on the domain itself: the coefficients are a standard
        // basis vector, selected by scanning for the matching power.
        let mut u = vec![F::zero(); size];
        let mut omega_i = one;
        for coeff in u.iter_mut() {
            if omega_i == tau {
                *coeff = one;
                break;
            }
            omega_i *= &group_gen;
        }
        u
    } else {
        // u[i] = Z(tau) / (size * (tau - omega^i)), with the per-point
        // denominators inverted in a single batch.
        let size_inv = F::from_u64(size as u64).invert().unwrap();
        let mut l = (t_size - one) * size_inv;
        let mut r = one;
        let mut u = vec![F::zero(); size];
        let mut ls = vec![F::zero(); size];
        for i in 0..size {
            u[i] = tau - r;
            ls[i] = l;
            l *= &group_gen;
            r *= &group_gen;
        }

        batch_inversion(u.as_mut_slice());

        #[cfg(feature = "parallel")]
        let iter = u.par_iter_mut();
        #[cfg(not(feature = "parallel"))]
        let iter = u.iter_mut();
        iter.zip(ls).for_each(|(tau_minus_r, l)| {
            *tau_minus_r = l * *tau_minus_r;
        });

        u
    }
}

/// An iterator over the elements of the domain.
#[derive(Debug)]
pub struct Elements<F: FftField> {
    cur_elem: F,
    cur_pow: u64,
    domain: Radix2EvaluationDomain<F>,
}

impl<F: FftField> Iterator for Elements<F> {
    type Item = F;
    fn next(&mut self) -> Option<F> {
        if self.cur_pow == self.domain.size {
            None
        } else {
            let cur_elem = self.cur_elem;
            self.cur_elem *= &self.domain.group_gen;
            self.cur_pow += 1;
            Some(cur_elem)
        }
    }
}
