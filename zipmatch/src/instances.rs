//! Frame and matching instances for std containers.

use std::collections::{BTreeMap, VecDeque};
use std::marker::PhantomData;

use crate::frame::{Compose, MappableFrame, PartiallyApplied};
use crate::zip_match::ZipMatch;

impl MappableFrame for Option<PartiallyApplied> {
    type Frame<X> = Option<X>;

    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B> {
        input.map(f)
    }
}

impl ZipMatch for Option<PartiallyApplied> {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        match (left, right) {
            (Some(a), Some(b)) => f(a, b).map(Some),
            (None, None) => Some(None),
            _ => None,
        }
    }
}

impl MappableFrame for Box<PartiallyApplied> {
    type Frame<X> = Box<X>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        Box::new(f(*input))
    }
}

impl ZipMatch for Box<PartiallyApplied> {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        f(&**left, &**right).map(Box::new)
    }
}

impl MappableFrame for Vec<PartiallyApplied> {
    type Frame<X> = Vec<X>;

    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B> {
        input.into_iter().map(f).collect()
    }
}

impl ZipMatch for Vec<PartiallyApplied> {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        if left.len() != right.len() {
            return None;
        }
        left.iter().zip(right).map(|(a, b)| f(a, b)).collect()
    }
}

impl MappableFrame for VecDeque<PartiallyApplied> {
    type Frame<X> = VecDeque<X>;

    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B> {
        input.into_iter().map(f).collect()
    }
}

impl ZipMatch for VecDeque<PartiallyApplied> {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        if left.len() != right.len() {
            return None;
        }
        left.iter().zip(right).map(|(a, b)| f(a, b)).collect()
    }
}

impl<const N: usize> MappableFrame for [PartiallyApplied; N] {
    type Frame<X> = [X; N];

    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B> {
        input.map(f)
    }
}

impl<const N: usize> ZipMatch for [PartiallyApplied; N] {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        let zipped: Vec<C> = left
            .iter()
            .zip(right)
            .map(|(a, b)| f(a, b))
            .collect::<Option<_>>()?;
        // always N elements
        zipped.try_into().ok()
    }
}

impl<E> MappableFrame for Result<PartiallyApplied, E> {
    type Frame<X> = Result<X, E>;

    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B> {
        input.map(f)
    }
}

/// `Err` values are not elements: two errors match only if they are equal.
impl<E: PartialEq + Clone> ZipMatch for Result<PartiallyApplied, E> {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        match (left, right) {
            (Ok(a), Ok(b)) => f(a, b).map(Ok),
            (Err(x), Err(y)) if x == y => Some(Err(x.clone())),
            _ => None,
        }
    }
}

// labelled element
impl<L> MappableFrame for (L, PartiallyApplied) {
    type Frame<X> = (L, X);

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        (input.0, f(input.1))
    }
}

impl<L: PartialEq + Clone> ZipMatch for (L, PartiallyApplied) {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        if left.0 != right.0 {
            return None;
        }
        f(&left.1, &right.1).map(|c| (left.0.clone(), c))
    }
}

impl MappableFrame for PhantomData<PartiallyApplied> {
    type Frame<X> = PhantomData<X>;

    fn map_frame<A, B>(_input: Self::Frame<A>, _f: impl FnMut(A) -> B) -> Self::Frame<B> {
        PhantomData
    }
}

impl ZipMatch for PhantomData<PartiallyApplied> {
    fn zip_match_with<'a, A, B, C>(
        _left: &'a Self::Frame<A>,
        _right: &'a Self::Frame<B>,
        _f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        Some(PhantomData)
    }
}

impl<K: Ord> MappableFrame for BTreeMap<K, PartiallyApplied> {
    type Frame<X> = BTreeMap<K, X>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        input.into_iter().map(|(k, v)| (k, f(v))).collect()
    }
}

/// Maps match when their key sets are identical. Both maps iterate in ascending
/// key order, so the keys are compared pairwise.
impl<K: Ord + Clone> ZipMatch for BTreeMap<K, PartiallyApplied> {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        if left.len() != right.len() {
            return None;
        }
        left.iter()
            .zip(right)
            .map(|((lk, a), (rk, b))| {
                if lk == rk {
                    f(a, b).map(|c| (lk.clone(), c))
                } else {
                    None
                }
            })
            .collect()
    }
}

impl<F: ZipMatch, G: ZipMatch> ZipMatch for Compose<F, G> {
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        F::zip_match_with(left, right, |l, r| G::zip_match_with(l, r, &mut f))
    }
}
