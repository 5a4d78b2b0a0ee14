// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The serial and parallel radix-2 FFT kernels shared by every domain
//! construction.

use crate::field::FftField;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[inline]
pub(crate) fn bitreverse(mut n: u32, l: u32) -> u32 {
    let mut r = 0;
    for _ in 0..l {
        r = (r << 1) | (n & 1);
        n >>= 1;
    }
    r
}

/// Floor of the base-2 logarithm: `2^log2_floor(n) <= n < 2^(log2_floor(n)+1)`.
pub(crate) fn log2_floor(num: usize) -> u32 {
    assert!(num > 0);
    let mut pow = 0;
    while (1usize << (pow + 1)) <= num {
        pow += 1;
    }
    pow
}

/// Multiplies the `i`-th element of `coeffs` by `g^i`. Turns the coefficients
/// of `p(X)` into those of `p(gX)`, so that an evaluation over a domain `D`
/// becomes an evaluation over the coset `gD`.
pub(crate) fn distribute_powers<F: FftField>(coeffs: &mut [F], g: F) {
    let mut pow = F::one();
    coeffs.iter_mut().for_each(|c| {
        *c *= &pow;
        pow *= &g
    })
}

/// Transforms `a` in place into its discrete Fourier transform over the
/// powers of `omega`, where `omega` is a primitive `a.len()`-th root of
/// unity. The transform is not normalized; the inverse divides by `a.len()`
/// at the call site.
pub(crate) fn serial_fft<F: FftField>(a: &mut [F], omega: F, log_n: u32) {
    let n = a.len() as u32;
    assert_eq!(n, 1 << log_n);

    for k in 0..n {
        let rk = bitreverse(k, log_n);
        if k < rk {
            a.swap(rk as usize, k as usize);
        }
    }

    let mut m = 1;
    for _ in 0..log_n {
        let w_m = omega.pow((n / (2 * m)) as u64);

        let mut k = 0;
        while k < n {
            let mut w = F::one();
            for j in 0..m {
                let mut t = a[(k + j + m) as usize];
                t *= &w;
                let mut tmp = a[(k + j) as usize];
                tmp -= &t;
                a[(k + j + m) as usize] = tmp;
                a[(k + j) as usize] += &t;
                w *= &w_m;
            }

            k += 2 * m;
        }

        m *= 2;
    }
}

/// Splits the transform into `2^log_cpus` interleaved sub-transforms of size
/// `n / 2^log_cpus`, one per worker lane. Produces output bit-for-bit equal
/// to [`serial_fft`].
#[cfg(feature = "parallel")]
pub(crate) fn parallel_fft<F: FftField>(
    a: &mut [F],
    omega: F,
    log_n: u32,
    log_cpus: u32,
) {
    assert!(log_n >= log_cpus);

    let num_cpus = 1usize << log_cpus;
    let log_new_n = log_n - log_cpus;
    let mut tmp = vec![vec![F::zero(); 1 << log_new_n]; num_cpus];
    let new_omega = omega.pow(num_cpus as u64);

    {
        let a = &*a;
        tmp.par_iter_mut().enumerate().for_each(|(j, tmp)| {
            // Shuffle into a sub-FFT
            let omega_j = omega.pow(j as u64);
            let omega_step = omega.pow((j as u64) << log_new_n);

            let mut elt = F::one();
            for i in 0..(1usize << log_new_n) {
                for s in 0..num_cpus {
                    let idx = (i + (s << log_new_n)) % (1 << log_n);
                    let mut t = a[idx];
                    t *= &elt;
                    tmp[i] += &t;
                    elt *= &omega_step;
                }
                elt *= &omega_j;
            }

            // Perform sub-FFT
            serial_fft(tmp, new_omega, log_new_n);
        });
    }

    let mask = (1usize << log_cpus) - 1;
    a.par_iter_mut().enumerate().for_each(|(idx, a)| {
        *a = tmp[idx & mask][idx >> log_cpus];
    });
}

/// Runs the transform on as many worker lanes as the host offers, rounded
/// down to a power of two, falling back to the serial kernel for transforms
/// too small to split.
#[cfg(feature = "parallel")]
pub(crate) fn best_fft<F: FftField>(a: &mut [F], omega: F, log_n: u32) {
    let log_cpus = log2_floor(rayon::current_num_threads());

    if log_n <= log_cpus {
        serial_fft(a, omega, log_n);
    } else {
        parallel_fft(a, omega, log_n, log_cpus);
    }
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn best_fft<F: FftField>(a: &mut [F], omega: F, log_n: u32) {
    serial_fft(a, omega, log_n);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_util::random_scalar;
    use dusk_bls12_381::BlsScalar;
    use rand_core::OsRng;

    #[test]
    fn bitreverse_is_an_involution() {
        for l in 1..10 {
            for n in 0..(1u32 << l) {
                assert_eq!(bitreverse(bitreverse(n, l), l), n);
            }
        }
        assert_eq!(bitreverse(0b001, 3), 0b100);
        assert_eq!(bitreverse(0b011, 3), 0b110);
    }

    #[test]
    fn log2_floor_brackets_its_argument() {
        for n in 1..1000usize {
            let l = log2_floor(n);
            assert!(1usize << l <= n);
            assert!(n < 1usize << (l + 1));
        }
    }

    #[test]
    fn distribute_powers_multiplies_by_increasing_powers() {
        let g = BlsScalar::from(5);
        let mut v = vec![BlsScalar::one(); 8];
        distribute_powers(&mut v, g);
        for (i, value) in v.iter().enumerate() {
            assert_eq!(*value, g.pow(&[i as u64, 0, 0, 0]));
        }
    }

    #[test]
    fn serial_fft_matches_naive_dft() {
        let log_n = 3u32;
        let n = 1usize << log_n;
        let omega = <BlsScalar as crate::field::FftField>::get_root_of_unity(
            n as u64,
        )
        .unwrap();

        let coeffs: Vec<_> =
            (0..n).map(|_| random_scalar(&mut OsRng)).collect();
        let mut transformed = coeffs.clone();
        serial_fft(&mut transformed, omega, log_n);

        for j in 0..n {
            let mut acc = BlsScalar::zero();
            for (i, coeff) in coeffs.iter().enumerate() {
                acc += coeff * omega.pow(&[(i * j) as u64, 0, 0, 0]);
            }
            assert_eq!(transformed[j], acc);
        }
    }

    #[test]
    #[cfg(feature = "parallel")]
    fn parallel_fft_consistency() {
        use core::cmp::min;

        for log_d in 1..10u32 {
            let d = 1usize << log_d;

            let mut v1: Vec<_> =
                (0..d).map(|_| random_scalar(&mut OsRng)).collect();
            let mut v2 = v1.clone();
            let omega = <BlsScalar as crate::field::FftField>::get_root_of_unity(
                d as u64,
            )
            .unwrap();

            for log_cpus in 0..min(log_d + 1, 4) {
                parallel_fft(&mut v1, omega, log_d, log_cpus);
                serial_fft(&mut v2, omega, log_d);

                assert_eq!(v1, v2);
            }
        }
    }
}
