use crate::frame::{MappableFrame, PartiallyApplied};
use crate::stack_machine::{expand_and_collapse, try_expand_and_collapse};
use crate::zip_match::{Mismatch, ZipMatch, ZipMatchExt};

/// A value at every node, with the node's children held in some frame `F`.
///
/// `Cofree<Vec<PartiallyApplied>, A>` is a rose tree, `Cofree<Option<PartiallyApplied>, A>`
/// is a non-empty list.
///
/// The tail is built eagerly, so a `Cofree` is always finite: a branch ends wherever
/// `F` holds no children.
pub struct Cofree<F: MappableFrame, A> {
    pub head: A,
    pub tail: Box<F::Frame<Cofree<F, A>>>,
}

struct CofreeLayer<F: MappableFrame, A, Next> {
    head: A,
    tail: F::Frame<Next>,
}

impl<F: MappableFrame, A> MappableFrame for CofreeLayer<F, A, PartiallyApplied> {
    type Frame<X> = CofreeLayer<F, A, X>;

    fn map_frame<X, Y>(input: Self::Frame<X>, f: impl FnMut(X) -> Y) -> Self::Frame<Y> {
        CofreeLayer {
            head: input.head,
            tail: F::map_frame(input.tail, f),
        }
    }
}

impl<F: MappableFrame, A> Cofree<F, A> {
    pub fn new(head: A, tail: F::Frame<Self>) -> Self {
        Cofree {
            head,
            tail: Box::new(tail),
        }
    }

    /// Grow a structure from a seed, producing the head value and the seeds of the
    /// children at each node. The coalgebra must eventually produce childless frames.
    pub fn unfold<Seed>(
        seed: Seed,
        mut coalgebra: impl FnMut(Seed) -> (A, F::Frame<Seed>),
    ) -> Self {
        expand_and_collapse::<CofreeLayer<F, A, PartiallyApplied>, Seed, Self>(
            seed,
            |seed| {
                let (head, tail) = coalgebra(seed);
                CofreeLayer { head, tail }
            },
            Self::from_layer,
        )
    }

    fn from_layer(layer: CofreeLayer<F, A, Self>) -> Self {
        Cofree::new(layer.head, layer.tail)
    }
}

impl<F: MappableFrame> MappableFrame for Cofree<F, PartiallyApplied> {
    type Frame<X> = Cofree<F, X>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        expand_and_collapse::<CofreeLayer<F, B, PartiallyApplied>, Cofree<F, A>, Cofree<F, B>>(
            input,
            |node| CofreeLayer {
                head: f(node.head),
                tail: *node.tail,
            },
            Cofree::from_layer,
        )
    }
}

/// Heads are combined first, then the tails must match under `F`, recursively.
impl<F: ZipMatch> ZipMatch for Cofree<F, PartiallyApplied> {
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
        let res = try_expand_and_collapse::<CofreeLayer<F, C, PartiallyApplied>, _, _, Mismatch>(
            (left, right),
            |(l, r)| {
                let head = f(&l.head, &r.head).ok_or(Mismatch)?;
                let tail = F::try_zip_match(&*l.tail, &*r.tail).map_err(|e| {
                    tracing::trace!("cofree: children do not align");
                    e
                })?;
                Ok(CofreeLayer { head, tail })
            },
            |layer| Ok(Cofree::from_layer(layer)),
        );
        res.ok()
    }
}

impl<F: ZipMatch, A: PartialEq> PartialEq for Cofree<F, A> {
    fn eq(&self, other: &Self) -> bool {
        Cofree::<F, PartiallyApplied>::eq_default(self, other)
    }
}

impl<F: ZipMatch, A: Clone> Clone for Cofree<F, A> {
    fn clone(&self) -> Self {
        Cofree::<F, PartiallyApplied>::fmap_recovered(self, A::clone)
    }
}
