use crate::frame::MappableFrame;

/// Two containers could not be aligned: their shapes differ, or the combiner
/// rejected some pair of elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("containers do not share the same shape")]
pub struct Mismatch;

/// Element-wise matching of two frames that share the same shape.
///
/// `zip_match_with(left, right, f)` returns `Some` with a frame of the same shape
/// as both inputs, each element being `f` applied to the aligned pair, provided
///
/// - `left` and `right` have identical topology (lengths, variants, keys, opaque fields), and
/// - every application of `f` returns `Some`.
///
/// Otherwise it returns `None`. There are no partial results.
///
/// # Laws
///
/// - `zip_match(ta, tb)` is `Some(tab)` iff there is a frame `tab` whose first
///   projection is `ta` and whose second projection is `tb`; such a `tab` is unique.
/// - `zip_match_with(ta, tb, f)` is `Some` iff `zip_match(ta, tb)` is `Some(tab)` and
///   `f` succeeds at every element of `tab`, in which case the result is those outputs
///   laid out in the shape of `tab`.
///
/// ```rust
/// use zipmatch::{PartiallyApplied, ZipMatch};
///
/// let nums = vec![1, 2, 3];
/// let chars = vec!['a', 'b', 'c'];
///
/// let matched = Vec::<PartiallyApplied>::zip_match(&nums, &chars);
/// assert_eq!(matched, Some(vec![(&1, &'a'), (&2, &'b'), (&3, &'c')]));
///
/// let short = vec!['a', 'b'];
/// assert_eq!(Vec::<PartiallyApplied>::zip_match(&nums, &short), None);
/// ```
pub trait ZipMatch: MappableFrame {
    /// Align `left` and `right`, combining each pair of elements with `f`.
    fn zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Option<Self::Frame<C>>
    where
        Self: 'a,
        A: 'a,
        B: 'a;

    /// Align `left` and `right`, pairing up their elements.
    fn zip_match<'a, A, B>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
    ) -> Option<Self::Frame<(&'a A, &'a B)>>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        Self::zip_match_with(left, right, |a, b| Some((a, b)))
    }
}

/// Operations derived from [`ZipMatch::zip_match_with`], available on every instance.
pub trait ZipMatchExt: ZipMatch {
    /// Match two frames of nested frames: the outer shapes must align, and so must
    /// the inner frames at every aligned outer position.
    fn zipzip_match<'a, G: ZipMatch, A, B>(
        left: &'a Self::Frame<G::Frame<A>>,
        right: &'a Self::Frame<G::Frame<B>>,
    ) -> Option<Self::Frame<G::Frame<(&'a A, &'a B)>>>
    where
        Self: 'a,
        G: 'a,
        A: 'a,
        B: 'a;

    /// Map over a frame by matching it against itself.
    ///
    /// # Panics
    ///
    /// Self-matching can only fail if the `ZipMatch` instance breaks its laws, so
    /// a failure here panics instead of returning a value.
    fn fmap_recovered<'a, A, B>(
        input: &'a Self::Frame<A>,
        f: impl FnMut(&'a A) -> B,
    ) -> Self::Frame<B>
    where
        Self: 'a,
        A: 'a;

    /// Structural equality: same shape, and every pair of aligned elements is equal.
    fn eq_default<'a, A: PartialEq>(left: &'a Self::Frame<A>, right: &'a Self::Frame<A>) -> bool
    where
        Self: 'a,
        A: 'a;

    /// Structural equality under a caller-supplied element relation.
    fn lift_eq_default<'a, A, B>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        eq: impl FnMut(&'a A, &'a B) -> bool,
    ) -> bool
    where
        Self: 'a,
        A: 'a,
        B: 'a;

    /// Like [`ZipMatch::zip_match_with`], reporting failure as [`Mismatch`].
    fn try_zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Result<Self::Frame<C>, Mismatch>
    where
        Self: 'a,
        A: 'a,
        B: 'a;

    /// Like [`ZipMatch::zip_match`], reporting failure as [`Mismatch`].
    fn try_zip_match<'a, A, B>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
    ) -> Result<Self::Frame<(&'a A, &'a B)>, Mismatch>
    where
        Self: 'a,
        A: 'a,
        B: 'a;
}

impl<X> ZipMatchExt for X
where
    X: ZipMatch,
{
    fn zipzip_match<'a, G: ZipMatch, A, B>(
        left: &'a Self::Frame<G::Frame<A>>,
        right: &'a Self::Frame<G::Frame<B>>,
    ) -> Option<Self::Frame<G::Frame<(&'a A, &'a B)>>>
    where
        Self: 'a,
        G: 'a,
        A: 'a,
        B: 'a,
    {
        Self::zip_match_with(left, right, |l, r| G::zip_match(l, r))
    }

    fn fmap_recovered<'a, A, B>(
        input: &'a Self::Frame<A>,
        mut f: impl FnMut(&'a A) -> B,
    ) -> Self::Frame<B>
    where
        Self: 'a,
        A: 'a,
    {
        match Self::zip_match_with(input, input, |a, _| Some(f(a))) {
            Some(mapped) => mapped,
            None => {
                tracing::error!(
                    instance = std::any::type_name::<X>(),
                    "frame failed to match itself"
                );
                panic!(
                    "ZipMatch instance for {} does not match a frame against itself",
                    std::any::type_name::<X>()
                )
            }
        }
    }

    fn eq_default<'a, A: PartialEq>(left: &'a Self::Frame<A>, right: &'a Self::Frame<A>) -> bool
    where
        Self: 'a,
        A: 'a,
    {
        Self::lift_eq_default(left, right, |a, b| a == b)
    }

    fn lift_eq_default<'a, A, B>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        mut eq: impl FnMut(&'a A, &'a B) -> bool,
    ) -> bool
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        Self::zip_match_with(left, right, |a, b| eq(a, b).then_some(())).is_some()
    }

    fn try_zip_match_with<'a, A, B, C>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
        f: impl FnMut(&'a A, &'a B) -> Option<C>,
    ) -> Result<Self::Frame<C>, Mismatch>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        Self::zip_match_with(left, right, f).ok_or(Mismatch)
    }

    fn try_zip_match<'a, A, B>(
        left: &'a Self::Frame<A>,
        right: &'a Self::Frame<B>,
    ) -> Result<Self::Frame<(&'a A, &'a B)>, Mismatch>
    where
        Self: 'a,
        A: 'a,
        B: 'a,
    {
        Self::zip_match(left, right).ok_or(Mismatch)
    }
}
