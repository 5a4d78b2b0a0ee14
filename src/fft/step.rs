// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! A domain of size `2^k + 2^r` with `r < k`: the `2^k`-th roots of unity
//! followed by a coset of the `2^r`-th roots. Each FFT decomposes into one
//! kernel run per block, with a twist aligning the coset block onto its
//! subgroup.

use core::fmt;

use crate::error::Error;
use crate::fft::domain::{check_length, EvaluationDomain};
use crate::fft::radix2::evaluate_lagrange_coefficients;
use crate::fft::utils::{best_fft, log2_floor};
use crate::field::FftField;
use crate::util::batch_inversion;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const CONSTRUCTION: &str = "step radix-2 domain";

/// Defines a domain of size `big_size + small_size`, where `big_size` is the
/// largest power of two below the total size and `small_size` is itself a
/// power of two.
///
/// With `omega` a primitive `2 * big_size`-th root of unity, the domain is
/// the `big_size`-th roots of unity (the powers of `omega^2`) followed by
/// the coset `omega * H` of the `small_size`-th roots `H`. The second block
/// consists of odd powers of `omega`, so the blocks never overlap.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct StepRadix2EvaluationDomain<F: FftField> {
    /// The size of the domain.
    pub size: u64,
    /// The size of the first block, the largest power of two below `size`.
    pub big_size: u64,
    /// The size of the second block, `size - big_size`.
    pub small_size: u64,
    /// `log_2(self.big_size)`.
    pub log_big_size: u32,
    /// `log_2(self.small_size)`.
    pub log_small_size: u32,
    /// A primitive `2 * big_size`-th root of unity, the shift of the second
    /// block.
    pub group_gen: F,
    /// Inverse of `group_gen`.
    pub group_gen_inv: F,
    /// `group_gen` squared, a generator of the first block.
    pub big_group_gen: F,
    /// Inverse of `big_group_gen`.
    pub big_group_gen_inv: F,
    /// A primitive `small_size`-th root of unity.
    pub small_group_gen: F,
    /// Inverse of `small_group_gen`.
    pub small_group_gen_inv: F,
}

impl<F: FftField> fmt::Debug for StepRadix2EvaluationDomain<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step radix-2 domain of size {} + {}",
            self.big_size, self.small_size
        )
    }
}

impl<F: FftField> StepRadix2EvaluationDomain<F> {
    /// Construct a domain of exactly `size = 2^k + 2^r` points, `r < k`.
    ///
    /// Sizes whose remainder over the largest power of two below them is not
    /// itself a power of two are declined, as are exact powers of two (the
    /// basic radix-2 domain owns those), so that a caller can fall through
    /// to another construction.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size <= 1 {
            return Err(Error::InvalidSize(size));
        }
        let big_size = 1usize << log2_floor(size - 1);
        let small_size = size - big_size;
        if !small_size.is_power_of_two() || small_size == big_size {
            return Err(Error::UnsupportedDomainSize {
                construction: CONSTRUCTION,
                size,
            });
        }

        let group_gen = F::get_root_of_unity(2 * big_size as u64).ok_or(
            Error::UnsupportedDomainSize {
                construction: CONSTRUCTION,
                size,
            },
        )?;
        let small_group_gen = F::get_root_of_unity(small_size as u64).ok_or(
            Error::UnsupportedDomainSize {
                construction: CONSTRUCTION,
                size,
            },
        )?;
        let big_group_gen = group_gen.square();

        Ok(StepRadix2EvaluationDomain {
            size: size as u64,
            big_size: big_size as u64,
            small_size: small_size as u64,
            log_big_size: big_size.trailing_zeros(),
            log_small_size: small_size.trailing_zeros(),
            group_gen,
            group_gen_inv: group_gen.invert().unwrap(),
            big_group_gen,
            big_group_gen_inv: big_group_gen.invert().unwrap(),
            small_group_gen,
            small_group_gen_inv: small_group_gen.invert().unwrap(),
        })
    }
}

impl<F: FftField> EvaluationDomain<F> for StepRadix2EvaluationDomain<F> {
    fn size(&self) -> usize {
        self.size as usize
    }

    /// Writes the evaluations over the `big_size`-th roots of unity into the
    /// first block of the vector and the evaluations over the shifted small
    /// block into the second.
    fn fft_in_place(&self, coeffs: &mut [F]) -> Result<(), Error> {
        check_length(coeffs, self.size())?;
        let big = self.big_size as usize;
        let small = self.small_size as usize;
        let compr = big / small;

        // `c` reduces the polynomial mod x^big_size - 1; `d` reduces it mod
        // x^big_size + 1 and twists it by omega^i so that the second block
        // becomes a plain transform over the small subgroup.
        let mut c = vec![F::zero(); big];
        let mut d = vec![F::zero(); big];
        let mut omega_i = F::one();
        for i in 0..big {
            if i < small {
                c[i] = coeffs[i] + coeffs[i + big];
                d[i] = omega_i * (coeffs[i] - coeffs[i + big]);
            } else {
                c[i] = coeffs[i];
                d[i] = omega_i * coeffs[i];
            }
            omega_i *= &self.group_gen;
        }

        // On the small subgroup x^small_size = 1, so the twisted polynomial
        // folds onto small_size coefficients.
        let mut e = vec![F::zero(); small];
        for i in 0..small {
            for j in 0..compr {
                e[i] += &d[i + j * small];
            }
        }

        best_fft(&mut c, self.big_group_gen, self.log_big_size);
        best_fft(&mut e, self.small_group_gen, self.log_small_size);

        coeffs[..big].copy_from_slice(&c);
        coeffs[big..].copy_from_slice(&e);
        Ok(())
    }

    fn ifft_in_place(&self, evals: &mut [F]) -> Result<(), Error> {
        check_length(evals, self.size())?;
        let big = self.big_size as usize;
        let small = self.small_size as usize;
        let compr = big / small;

        let mut u0 = evals[..big].to_vec();
        let mut u1 = evals[big..].to_vec();
        best_fft(&mut u0, self.big_group_gen_inv, self.log_big_size);
        best_fft(&mut u1, self.small_group_gen_inv, self.log_small_size);

        let big_size_inv = F::from_u64(self.big_size).invert().unwrap();
        #[cfg(feature = "parallel")]
        let iter = u0.par_iter_mut();
        #[cfg(not(feature = "parallel"))]
        let iter = u0.iter_mut();
        iter.for_each(|val| *val *= &big_size_inv);

        let small_size_inv = F::from_u64(self.small_size).invert().unwrap();
        #[cfg(feature = "parallel")]
        let iter = u1.par_iter_mut();
        #[cfg(not(feature = "parallel"))]
        let iter = u1.iter_mut();
        iter.for_each(|val| *val *= &small_size_inv);

        // u0 now holds the polynomial mod x^big_size - 1; its twisted copy
        // recreates the fold contributions that the small transform picked
        // up from coefficients at or above small_size.
        let mut tmp = u0.clone();
        let mut omega_i = F::one();
        for value in tmp.iter_mut() {
            *value *= &omega_i;
            omega_i *= &self.group_gen;
        }

        // Coefficients in [small_size, big_size) appear unfolded in u0.
        evals[small..big].copy_from_slice(&u0[small..big]);

        // For the rest, undo the fold and the twist, then solve the 2x2
        // system pairing coefficient i with coefficient big_size + i.
        let half = F::from_u64(2).invert().unwrap();
        let mut omega_inv_i = F::one();
        for i in 0..small {
            for j in 1..compr {
                u1[i] -= &tmp[i + j * small];
            }
            u1[i] *= &omega_inv_i;
            evals[i] = (u0[i] + u1[i]) * half;
            evals[big + i] = (u0[i] - u1[i]) * half;
            omega_inv_i *= &self.group_gen_inv;
        }
        Ok(())
    }

    fn evaluate_all_lagrange_coefficients(&self, tau: F) -> Vec<F> {
        let big = self.big_size as usize;
        let small = self.small_size as usize;
        let mut result = vec![F::zero(); self.size()];

        let l_big =
            evaluate_lagrange_coefficients(tau, self.big_group_gen, big);
        let l_small = evaluate_lagrange_coefficients(
            tau * self.group_gen_inv,
            self.small_group_gen,
            small,
        );

        // The first block's sub-domain coefficients are rescaled by the
        // second block's vanishing polynomial, normalized per point; the
        // denominators are inverted in a single batch.
        let omega_to_small = self.group_gen.pow(self.small_size);
        let big_omega_to_small = self.big_group_gen.pow(self.small_size);
        let l0 = tau.pow(self.small_size) - omega_to_small;

        let mut denoms = Vec::with_capacity(big);
        let mut elt = F::one();
        for _ in 0..big {
            denoms.push(elt - omega_to_small);
            elt *= &big_omega_to_small;
        }
        batch_inversion(&mut denoms);

        #[cfg(feature = "parallel")]
        let iter = result[..big].par_iter_mut();
        #[cfg(not(feature = "parallel"))]
        let iter = result[..big].iter_mut();
        iter.zip(l_big).zip(denoms).for_each(|((res, l), denom)| {
            *res = l * l0 * denom;
        });

        // The second block is rescaled by the first block's vanishing
        // polynomial, which is constant over the whole block.
        let l1 = (tau.pow(self.big_size) - F::one())
            * (self.group_gen.pow(self.big_size) - F::one())
                .invert()
                .unwrap();
        for i in 0..small {
            result[big + i] = l1 * l_small[i];
        }

        result
    }

    fn element(&self, i: usize) -> F {
        let big = self.big_size as usize;
        if i < big {
            self.big_group_gen.pow(i as u64)
        } else {
            self.group_gen * self.small_group_gen.pow((i - big) as u64)
        }
    }

    /// `z(X) = (X^big_size - 1) * (X^small_size - omega^small_size)`.
    fn evaluate_vanishing_polynomial(&self, tau: &F) -> F {
        (tau.pow(self.big_size) - F::one())
            * (tau.pow(self.small_size) - self.group_gen.pow(self.small_size))
    }

    fn add_vanishing_poly_in_place(
        &self,
        multiplier: F,
        coeffs: &mut [F],
    ) -> Result<(), Error> {
        check_length(coeffs, self.size() + 1)?;
        let big = self.big_size as usize;
        let small = self.small_size as usize;
        let omega_to_small = self.group_gen.pow(self.small_size);

        // The four non-zero coefficients of
        // (x^big_size - 1)(x^small_size - omega^small_size).
        coeffs[self.size()] += &multiplier;
        coeffs[big] -= &(multiplier * omega_to_small);
        coeffs[small] -= &multiplier;
        coeffs[0] += &(multiplier * omega_to_small);
        Ok(())
    }

    /// Over the coset shifted by the multiplicative generator `g`, the first
    /// factor of the vanishing polynomial is the constant `g^big_size - 1`
    /// on the first block while the second factor walks the powers of
    /// `omega^(2 * small_size)`; on the second block both factors are
    /// constant.
    fn divide_by_vanishing_poly_on_coset_in_place(
        &self,
        evals: &mut [F],
    ) -> Result<(), Error> {
        check_length(evals, self.size())?;
        let big = self.big_size as usize;
        let small = self.small_size as usize;
        let g = F::multiplicative_generator();

        let z0 = g.pow(self.big_size) - F::one();
        let coset_to_small = g.pow(self.small_size);
        let omega_to_small = self.group_gen.pow(self.small_size);
        let omega_to_2small = self.group_gen.pow(2 * self.small_size);

        let mut denoms = Vec::with_capacity(big);
        let mut elt = F::one();
        for _ in 0..big {
            denoms.push(z0 * (coset_to_small * elt - omega_to_small));
            elt *= &omega_to_2small;
        }
        batch_inversion(&mut denoms);

        let shifted = g * self.group_gen;
        let z1_inv = ((shifted.pow(self.big_size) - F::one())
            * (shifted.pow(self.small_size) - omega_to_small))
            .invert()
            .unwrap();

        let (first, second) = evals.split_at_mut(big);

        #[cfg(feature = "parallel")]
        let (first_iter, second_iter) =
            (first.par_iter_mut(), second.par_iter_mut());
        #[cfg(not(feature = "parallel"))]
        let (first_iter, second_iter) = (first.iter_mut(), second.iter_mut());

        first_iter
            .zip(denoms)
            .for_each(|(eval, denom)| *eval *= &denom);
        second_iter.for_each(|eval| *eval *= &z1_inv);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_util::{evaluate_poly, random_scalar};
    use dusk_bls12_381::{BlsScalar, GENERATOR};
    use rand_core::OsRng;

    // 2^k + 2^r test sizes, including the degenerate small block of one.
    const SIZES: [usize; 6] = [3, 5, 6, 12, 20, 24];

    fn random_coeffs(len: usize) -> Vec<BlsScalar> {
        (0..len).map(|_| random_scalar(&mut OsRng)).collect()
    }

    #[test]
    fn accepts_only_step_sizes() {
        for size in SIZES {
            assert!(
                StepRadix2EvaluationDomain::<BlsScalar>::new(size).is_ok(),
                "size {} should be accepted",
                size
            );
        }
        // Exact powers of two belong to the basic domain.
        for size in [0, 1, 2, 8, 16] {
            assert!(
                StepRadix2EvaluationDomain::<BlsScalar>::new(size).is_err(),
                "size {} should be declined",
                size
            );
        }
        // Remainders over the largest power of two must themselves be
        // powers of two.
        for size in [7, 11, 19, 25] {
            assert_eq!(
                StepRadix2EvaluationDomain::<BlsScalar>::new(size),
                Err(Error::UnsupportedDomainSize {
                    construction: "step radix-2 domain",
                    size
                })
            );
        }
    }

    #[test]
    fn block_sizes_and_elements() {
        let domain = StepRadix2EvaluationDomain::<BlsScalar>::new(6).unwrap();
        assert_eq!(domain.big_size, 4);
        assert_eq!(domain.small_size, 2);
        assert_eq!(domain.element(0), BlsScalar::one());
        assert_eq!(domain.element(4), domain.group_gen);
        for i in 0..6 {
            for j in 0..i {
                assert_ne!(domain.element(i), domain.element(j));
            }
        }
    }

    #[test]
    fn fft_matches_direct_evaluation() {
        for size in SIZES {
            let domain =
                StepRadix2EvaluationDomain::<BlsScalar>::new(size).unwrap();
            let coeffs = random_coeffs(size);
            let evals = domain.fft(&coeffs).unwrap();
            for (i, eval) in evals.iter().enumerate() {
                assert_eq!(
                    *eval,
                    evaluate_poly(&coeffs, &domain.element(i)),
                    "size {} index {}",
                    size,
                    i
                );
            }
        }
    }

    #[test]
    fn fft_ifft_round_trip() {
        for size in SIZES {
            let domain =
                StepRadix2EvaluationDomain::<BlsScalar>::new(size).unwrap();
            let coeffs = random_coeffs(size);
            let evals = domain.fft(&coeffs).unwrap();
            assert_eq!(domain.ifft(&evals).unwrap(), coeffs, "size {}", size);
        }
    }

    #[test]
    fn coset_fft_round_trip_and_evaluation() {
        for size in [6, 12] {
            let domain =
                StepRadix2EvaluationDomain::<BlsScalar>::new(size).unwrap();
            let coeffs = random_coeffs(size);

            let evals = domain.coset_fft(&coeffs, GENERATOR).unwrap();
            for (i, eval) in evals.iter().enumerate() {
                let point = GENERATOR * domain.element(i);
                assert_eq!(*eval, evaluate_poly(&coeffs, &point));
            }
            assert_eq!(domain.coset_ifft(&evals, GENERATOR).unwrap(), coeffs);
        }
    }

    #[test]
    fn lagrange_coefficients_are_kronecker_at_domain_points() {
        for size in [6, 12] {
            let domain =
                StepRadix2EvaluationDomain::<BlsScalar>::new(size).unwrap();
            for i in 0..size {
                let u = domain
                    .evaluate_all_lagrange_coefficients(domain.element(i));
                for (j, coeff) in u.iter().enumerate() {
                    let expected = if i == j {
                        BlsScalar::one()
                    } else {
                        BlsScalar::zero()
                    };
                    assert_eq!(*coeff, expected, "L_{} at element {}", j, i);
                }
            }
        }
    }

    #[test]
    fn lagrange_coefficients_interpolate() {
        let domain = StepRadix2EvaluationDomain::<BlsScalar>::new(6).unwrap();
        let coeffs = random_coeffs(6);
        let evals = domain.fft(&coeffs).unwrap();

        let tau = random_scalar(&mut OsRng);
        let u = domain.evaluate_all_lagrange_coefficients(tau);
        let mut interpolated = BlsScalar::zero();
        for (eval, coeff) in evals.iter().zip(u.iter()) {
            interpolated += eval * coeff;
        }
        assert_eq!(interpolated, evaluate_poly(&coeffs, &tau));
    }

    #[test]
    fn vanishing_polynomial_vanishes_on_domain() {
        for size in SIZES {
            let domain =
                StepRadix2EvaluationDomain::<BlsScalar>::new(size).unwrap();
            for i in 0..size {
                assert_eq!(
                    domain.evaluate_vanishing_polynomial(&domain.element(i)),
                    BlsScalar::zero(),
                    "size {} element {}",
                    size,
                    i
                );
            }
        }
    }

    #[test]
    fn add_vanishing_poly_matches_closed_form() {
        // Starting from the constant polynomial 1 over the 4 + 2 domain,
        // adding the vanishing polynomial once must evaluate to
        // 1 + (t^4 - 1)(t^2 - omega^2) everywhere.
        let domain = StepRadix2EvaluationDomain::<BlsScalar>::new(6).unwrap();
        let mut coeffs = vec![BlsScalar::zero(); 7];
        coeffs[0] = BlsScalar::one();
        domain
            .add_vanishing_poly_in_place(BlsScalar::one(), &mut coeffs)
            .unwrap();

        for _ in 0..10 {
            let tau = random_scalar(&mut OsRng);
            let omega_sq = domain.group_gen.square();
            let expected = BlsScalar::one()
                + (tau.pow(&[4, 0, 0, 0]) - BlsScalar::one())
                    * (tau.pow(&[2, 0, 0, 0]) - omega_sq);
            assert_eq!(evaluate_poly(&coeffs, &tau), expected);
        }
    }

    #[test]
    fn add_vanishing_poly_shifts_evaluations() {
        let domain = StepRadix2EvaluationDomain::<BlsScalar>::new(12).unwrap();
        let coeffs = random_coeffs(13);
        let multiplier = random_scalar(&mut OsRng);

        let mut shifted = coeffs.clone();
        domain
            .add_vanishing_poly_in_place(multiplier, &mut shifted)
            .unwrap();

        let tau = random_scalar(&mut OsRng);
        assert_eq!(
            evaluate_poly(&shifted, &tau),
            evaluate_poly(&coeffs, &tau)
                + multiplier * domain.evaluate_vanishing_polynomial(&tau)
        );
    }

    #[test]
    fn divide_by_vanishing_poly_on_coset_divides_pointwise() {
        for size in [6, 12, 20] {
            let domain =
                StepRadix2EvaluationDomain::<BlsScalar>::new(size).unwrap();
            let evals = random_coeffs(size);

            let mut quotient = evals.clone();
            domain
                .divide_by_vanishing_poly_on_coset_in_place(&mut quotient)
                .unwrap();

            for (i, value) in quotient.iter().enumerate() {
                let point = GENERATOR * domain.element(i);
                let z = domain.evaluate_vanishing_polynomial(&point);
                assert_eq!(*value * z, evals[i], "size {} index {}", size, i);
            }
        }
    }

    #[test]
    fn rejects_mismatched_vector_lengths() {
        let domain = StepRadix2EvaluationDomain::<BlsScalar>::new(6).unwrap();
        let mut wrong = vec![BlsScalar::one(); 5];
        assert_eq!(
            domain.fft_in_place(&mut wrong),
            Err(Error::InvalidVectorLength {
                expected: 6,
                got: 5
            })
        );
        assert_eq!(
            domain.ifft_in_place(&mut wrong),
            Err(Error::InvalidVectorLength {
                expected: 6,
                got: 5
            })
        );
        let mut exact = vec![BlsScalar::one(); 6];
        assert_eq!(
            domain.add_vanishing_poly_in_place(BlsScalar::one(), &mut exact),
            Err(Error::InvalidVectorLength {
                expected: 7,
                got: 6
            })
        );
    }
}
