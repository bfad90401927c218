use num_traits::PrimInt;

/// Remainder of floored division: the result takes the sign of the divisor,
/// so a day count before 1/1/1 still maps onto `0..count` for a positive
/// cycle length.
pub(crate) trait RemFloor: Sized {
    fn rem_floor(&self, divisor: Self) -> Self;
}

impl<T: PrimInt> RemFloor for T {
    fn rem_floor(&self, divisor: Self) -> Self {
        let rem = *self % divisor;
        let zero = Self::zero();
        if rem != zero && (rem < zero) != (divisor < zero) {
            rem + divisor
        } else {
            rem
        }
    }
}

/// Number of decimal digits needed to print `count`.
pub(crate) fn digit_width(count: usize) -> usize {
    let mut count = count;
    let mut needed = 1;
    while count > 9 {
        count /= 10;
        needed += 1;
    }
    needed
}
