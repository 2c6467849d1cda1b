use std::ops::ControlFlow;

use crate::frame::{MappableFrame, PartiallyApplied};
use crate::stack_machine::{expand_and_collapse, try_expand_and_collapse};
use crate::zip_match::{Mismatch, ZipMatch, ZipMatchExt};

/// A tree built from layers of some frame `F`, with values of type `A` at the leaves.
///
/// `Free<Vec<PartiallyApplied>, A>` is a rose tree that only stores values at its leaves,
/// `Free<Option<PartiallyApplied>, A>` is a value tagged with some depth, and so on.
///
/// Mapping and matching run on an explicit stack rather than the call stack.
pub enum Free<F: MappableFrame, A> {
    Pure(A),
    Wrap(Box<F::Frame<Free<F, A>>>),
}

// one layer of a `Free`, with its children replaced by `Next`
enum FreeLayer<F: MappableFrame, A, Next> {
    Pure(A),
    Wrap(F::Frame<Next>),
}

impl<F: MappableFrame, A> MappableFrame for FreeLayer<F, A, PartiallyApplied> {
    type Frame<X> = FreeLayer<F, A, X>;

    fn map_frame<X, Y>(input: Self::Frame<X>, f: impl FnMut(X) -> Y) -> Self::Frame<Y> {
        match input {
            FreeLayer::Pure(a) => FreeLayer::Pure(a),
            FreeLayer::Wrap(frame) => FreeLayer::Wrap(F::map_frame(frame, f)),
        }
    }
}

impl<F: MappableFrame, A> Free<F, A> {
    pub fn pure(a: A) -> Self {
        Free::Pure(a)
    }

    pub fn wrap(frame: F::Frame<Self>) -> Self {
        Free::Wrap(Box::new(frame))
    }

    /// Grow a tree from a seed: `Break` produces a leaf, `Continue` one more layer of
    /// seeds to expand.
    pub fn unfold<Seed>(
        seed: Seed,
        mut coalgebra: impl FnMut(Seed) -> ControlFlow<A, F::Frame<Seed>>,
    ) -> Self {
        expand_and_collapse::<FreeLayer<F, A, PartiallyApplied>, Seed, Self>(
            seed,
            |seed| match coalgebra(seed) {
                ControlFlow::Break(a) => FreeLayer::Pure(a),
                ControlFlow::Continue(frame) => FreeLayer::Wrap(frame),
            },
            Self::from_layer,
        )
    }

    fn from_layer(layer: FreeLayer<F, A, Self>) -> Self {
        match layer {
            FreeLayer::Pure(a) => Free::Pure(a),
            FreeLayer::Wrap(frame) => Free::Wrap(Box::new(frame)),
        }
    }
}

impl<F: MappableFrame> MappableFrame for Free<F, PartiallyApplied> {
    type Frame<X> = Free<F, X>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        expand_and_collapse::<FreeLayer<F, B, PartiallyApplied>, Free<F, A>, Free<F, B>>(
            input,
            |node| match node {
                Free::Pure(a) => FreeLayer::Pure(f(a)),
                Free::Wrap(frame) => FreeLayer::Wrap(*frame),
            },
            Free::from_layer,
        )
    }
}

/// Two leaves match if the combiner accepts their values; two layers match if `F`
/// matches them and all of their children match. A leaf never matches a layer.
impl<F: ZipMatch> ZipMatch for Free<F, PartiallyApplied> {
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
        let res = try_expand_and_collapse::<FreeLayer<F, C, PartiallyApplied>, _, _, Mismatch>(
            (left, right),
            |pair| match pair {
                (Free::Pure(a), Free::Pure(b)) => f(a, b).map(FreeLayer::Pure).ok_or(Mismatch),
                (Free::Wrap(l), Free::Wrap(r)) => {
                    F::try_zip_match(&**l, &**r).map(FreeLayer::Wrap)
                }
                _ => {
                    tracing::trace!("free: leaf aligned against layer");
                    Err(Mismatch)
                }
            },
            |layer| Ok(Free::from_layer(layer)),
        );
        res.ok()
    }
}

impl<F: ZipMatch, A: PartialEq> PartialEq for Free<F, A> {
    fn eq(&self, other: &Self) -> bool {
        Free::<F, PartiallyApplied>::eq_default(self, other)
    }
}

impl<F: ZipMatch, A: Clone> Clone for Free<F, A> {
    fn clone(&self) -> Self {
        Free::<F, PartiallyApplied>::fmap_recovered(self, A::clone)
    }
}
