// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The field abstraction the evaluation domains are generic over, and its
//! implementation for the BLS12-381 scalar field.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use dusk_bls12_381::{BlsScalar, GENERATOR, ROOT_OF_UNITY, TWO_ADACITY};

/// A prime field with a large power-of-two multiplicative subgroup, i.e. one
/// over which radix-2 FFTs can be performed.
///
/// The field is expected to expose the two-adicity `s` of its multiplicative
/// group order together with a primitive `2^s`-th root of unity; roots of
/// smaller power-of-two orders are derived from it by repeated squaring.
pub trait FftField:
    'static
    + Sized
    + Copy
    + Clone
    + Debug
    + PartialEq
    + Eq
    + Send
    + Sync
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Neg<Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
{
    /// The largest `s` such that `2^s` divides the order of the field's
    /// multiplicative group.
    const TWO_ADICITY: u32;

    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// The field element corresponding to the given integer.
    fn from_u64(n: u64) -> Self;

    /// A fixed generator of the full multiplicative group.
    fn multiplicative_generator() -> Self;

    /// Returns a primitive `n`-th root of unity, or `None` when `n` is not a
    /// power of two or exceeds `2^TWO_ADICITY`.
    fn get_root_of_unity(n: u64) -> Option<Self>;

    /// Exponentiation by an integer.
    fn pow(&self, exp: u64) -> Self;

    /// `self * self`.
    fn square(&self) -> Self;

    /// The multiplicative inverse, or `None` for zero.
    fn invert(&self) -> Option<Self>;

    /// Whether this is the additive identity.
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl FftField for BlsScalar {
    const TWO_ADICITY: u32 = TWO_ADACITY;

    fn zero() -> Self {
        BlsScalar::zero()
    }

    fn one() -> Self {
        BlsScalar::one()
    }

    fn from_u64(n: u64) -> Self {
        BlsScalar::from(n)
    }

    fn multiplicative_generator() -> Self {
        GENERATOR
    }

    fn get_root_of_unity(n: u64) -> Option<Self> {
        if n == 0 || !n.is_power_of_two() {
            return None;
        }
        let log_n = n.trailing_zeros();
        if log_n > TWO_ADACITY {
            return None;
        }

        // ROOT_OF_UNITY generates the full 2^TWO_ADACITY subgroup; squaring
        // halves the order.
        let mut omega = ROOT_OF_UNITY;
        for _ in log_n..TWO_ADACITY {
            omega = omega.square();
        }
        Some(omega)
    }

    fn pow(&self, exp: u64) -> Self {
        BlsScalar::pow(self, &[exp, 0, 0, 0])
    }

    fn square(&self) -> Self {
        BlsScalar::square(self)
    }

    fn invert(&self) -> Option<Self> {
        BlsScalar::invert(self).into()
    }
}


#[cfg(test)]
mod tests {
    use super::test_field::MiniScalar;
    use super::FftField;
    use dusk_bls12_381::BlsScalar;

    #[test]
    fn bls_roots_of_unity_have_the_requested_order() {
        for log_n in 0..16u32 {
            let n = 1u64 << log_n;
            let omega = <BlsScalar as FftField>::get_root_of_unity(n).unwrap();
            assert_eq!(FftField::pow(&omega, n), FftField::one());
            if n > 1 {
                assert_ne!(FftField::pow(&omega, n / 2), FftField::one());
            }
        }
    }

    #[test]
    fn bls_rejects_unsupported_orders() {
        assert!(<BlsScalar as FftField>::get_root_of_unity(0).is_none());
        assert!(<BlsScalar as FftField>::get_root_of_unity(3).is_none());
        assert!(<BlsScalar as FftField>::get_root_of_unity(12).is_none());
        assert!(<BlsScalar as FftField>::get_root_of_unity(1 << 33).is_none());
    }

    #[test]
    fn mini_scalar_arithmetic() {
        let six = MiniScalar(6);
        let seven = MiniScalar(7);
        assert_eq!(six * seven, MiniScalar(1));
        assert_eq!(six.invert().unwrap(), seven);
        assert_eq!(six + MiniScalar(35), MiniScalar::zero());
        assert_eq!(-six, MiniScalar(35));
        assert_eq!(six.pow(40), MiniScalar::one());
        assert!(MiniScalar::zero().invert().is_none());
    }

    #[test]
    fn mini_scalar_roots_of_unity() {
        let omega = MiniScalar::get_root_of_unity(8).unwrap();
        assert_eq!(omega, MiniScalar(27));
        assert_eq!(omega.pow(8), MiniScalar::one());
        assert_ne!(omega.pow(4), MiniScalar::one());
        assert_eq!(MiniScalar::get_root_of_unity(1).unwrap(), MiniScalar::one());
        assert!(MiniScalar::get_root_of_unity(16).is_none());
    }
}
