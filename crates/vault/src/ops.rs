//! Operator pass-throughs for shared cells
//!
//! Arithmetic (`+`, `-`, `*`) on `&SharedCell<T>` yields a plain `T`;
//! comparisons work against a `T` or another cell. Nothing here touches the
//! vault.

use crate::cell::SharedCell;
use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident) => {
        impl<T> $trait<T> for &SharedCell<T>
        where
            T: $trait<Output = T> + Clone + Send + Sync + 'static,
        {
            type Output = T;

            fn $method(self, rhs: T) -> T {
                self.get().$method(rhs)
            }
        }

        impl<T> $trait<&SharedCell<T>> for &SharedCell<T>
        where
            T: $trait<Output = T> + Clone + Send + Sync + 'static,
        {
            type Output = T;

            fn $method(self, rhs: &SharedCell<T>) -> T {
                self.with_both(rhs, |lhs, rhs| lhs.clone().$method(rhs.clone()))
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);

impl<T> PartialEq<T> for SharedCell<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    fn eq(&self, other: &T) -> bool {
        self.with(|value| value == other)
    }
}

impl<T> PartialEq for SharedCell<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    fn eq(&self, other: &SharedCell<T>) -> bool {
        self.with_both(other, |lhs, rhs| lhs == rhs)
    }
}

impl<T> PartialOrd<T> for SharedCell<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        self.with(|value| value.partial_cmp(other))
    }
}

impl<T> PartialOrd for SharedCell<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    fn partial_cmp(&self, other: &SharedCell<T>) -> Option<Ordering> {
        self.with_both(other, |lhs, rhs| lhs.partial_cmp(rhs))
    }
}
