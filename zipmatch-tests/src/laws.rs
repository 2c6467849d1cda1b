//! Property checks for the `ZipMatch` laws, generic over the instance under test.

use zipmatch::{MappableFrame, ZipMatch, ZipMatchExt};

/// When two frames match, projecting the paired frame back out recovers both inputs.
pub fn check_pairing<F>(left: &F::Frame<i32>, right: &F::Frame<i32>)
where
    F: ZipMatch,
    F::Frame<i32>: PartialEq,
{
    if let Some(paired) = F::zip_match(left, right) {
        let firsts = F::fmap_recovered(&paired, |(l, _)| **l);
        let seconds = F::fmap_recovered(&paired, |(_, r)| **r);
        assert!(&firsts == left, "first projection differs from the left input");
        assert!(&seconds == right, "second projection differs from the right input");
    }
}

/// Every frame matches itself, pairing each element with itself.
pub fn check_identity<F>(frame: &F::Frame<i32>)
where
    F: ZipMatch,
    F::Frame<i32>: Clone + PartialEq,
    F::Frame<(i32, i32)>: PartialEq,
{
    let doubled = F::zip_match_with(frame, frame, |a, b| Some((*a, *b)));
    assert!(doubled == Some(F::map_frame(frame.clone(), |a| (a, a))));
    assert!(F::eq_default(frame, frame));
}

/// `zip_match_with` agrees with `zip_match` followed by mapping the combiner over the pairs,
/// and succeeds or fails regardless of argument order.
pub fn check_consistency<F>(left: &F::Frame<i32>, right: &F::Frame<i32>)
where
    F: ZipMatch,
    F::Frame<i64>: PartialEq,
{
    let combine = |a: &i32, b: &i32| i64::from(*a) * 3 - i64::from(*b);

    let direct = F::zip_match_with(left, right, |a, b| Some(combine(a, b)));
    let via_pairs =
        F::zip_match(left, right).map(|paired| F::map_frame(paired, |(a, b)| combine(a, b)));
    assert!(direct == via_pairs);

    assert_eq!(
        F::zip_match(left, right).is_some(),
        F::zip_match(right, left).is_some()
    );
    assert_eq!(
        F::zip_match(left, right).is_some(),
        F::try_zip_match(left, right).is_ok()
    );
}

/// A combiner that rejects any element fails the whole match; one that rejects
/// nothing succeeds exactly when the shapes align.
pub fn check_combiner_failure<F>(left: &F::Frame<i32>, right: &F::Frame<i32>)
where
    F: ZipMatch,
{
    let mut calls = 0;
    let accepting = F::zip_match_with(left, right, |_, _| {
        calls += 1;
        Some(())
    });
    assert_eq!(accepting.is_some(), F::zip_match(left, right).is_some());

    let rejecting = F::zip_match_with(left, right, |_, _| None::<()>);
    if calls > 0 {
        assert!(rejecting.is_none());
    } else {
        assert_eq!(rejecting.is_some(), accepting.is_some());
    }
}

/// Run every law over a pair of frames.
pub fn check_all<F>(left: &F::Frame<i32>, right: &F::Frame<i32>)
where
    F: ZipMatch,
    F::Frame<i32>: Clone + PartialEq,
    F::Frame<i64>: PartialEq,
    F::Frame<(i32, i32)>: PartialEq,
{
    check_pairing::<F>(left, right);
    check_identity::<F>(left);
    check_identity::<F>(right);
    check_consistency::<F>(left, right);
    check_combiner_failure::<F>(left, right);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::ops::ControlFlow;

    use proptest::prelude::*;
    use zipmatch::{Cofree, Compose, Free, PartiallyApplied};

    use super::*;
    use crate::shapes::{arb_expr, arb_tree, Expr, Tree};

    type VecF = Vec<PartiallyApplied>;
    type MapF = BTreeMap<u8, PartiallyApplied>;
    type GridF = Compose<VecF, VecF>;
    type TreeF = Tree<PartiallyApplied>;
    type ExprF = Expr<PartiallyApplied>;
    type OptF = Option<PartiallyApplied>;
    type ResF = Result<PartiallyApplied, u8>;
    type ArrayF = [PartiallyApplied; 3];
    type LabelF = (u8, PartiallyApplied);
    type FreeF = Free<VecF, PartiallyApplied>;
    type RoseF = Cofree<VecF, PartiallyApplied>;
    type NonEmptyF = Cofree<OptF, PartiallyApplied>;

    /// A second frame with the same shape as the first, holding different elements.
    fn relabel<F: MappableFrame>(frame: F::Frame<i32>, offset: i32) -> F::Frame<i32> {
        F::map_frame(frame, |x| x.wrapping_mul(7).wrapping_add(offset))
    }

    fn arb_grid() -> impl Strategy<Value = Vec<Vec<i32>>> {
        prop::collection::vec(prop::collection::vec(any::<i32>(), 0..4), 0..4)
    }

    fn expr_to_i32(expr: Expr<u8>) -> Expr<i32> {
        ExprF::map_frame(expr, i32::from)
    }

    /// Seed for the recursive wrappers, which have no `Debug` of their own.
    #[derive(Debug, Clone)]
    enum Nested {
        Leaf(i32),
        Layer(Vec<Nested>),
    }

    fn arb_nested() -> impl Strategy<Value = Nested> {
        any::<i32>().prop_map(Nested::Leaf).prop_recursive(4, 32, 3, |inner| {
            prop::collection::vec(inner, 0..3).prop_map(Nested::Layer)
        })
    }

    fn to_free(nested: &Nested) -> Free<VecF, i32> {
        Free::unfold(nested, |n| match n {
            Nested::Leaf(x) => ControlFlow::Break(*x),
            Nested::Layer(children) => ControlFlow::Continue(children.iter().collect()),
        })
    }

    fn to_rose(nested: &Nested) -> Cofree<VecF, i32> {
        Cofree::unfold(nested, |n| match n {
            Nested::Leaf(x) => (*x, Vec::new()),
            Nested::Layer(children) => (children.len() as i32, children.iter().collect()),
        })
    }

    fn to_non_empty(items: &[i32]) -> Cofree<OptF, i32> {
        Cofree::unfold(items, |rest| {
            let (head, tail) = rest.split_first().expect("strategy yields non-empty lists");
            (*head, (!tail.is_empty()).then_some(tail))
        })
    }

    proptest! {
        #[test]
        fn vec_laws(
            left in prop::collection::vec(any::<i32>(), 0..8),
            right in prop::collection::vec(any::<i32>(), 0..8),
            offset in any::<i32>()
        ) {
            check_all::<VecF>(&left, &right);
            check_all::<VecF>(&left, &relabel::<VecF>(left.clone(), offset));
        }

        #[test]
        fn map_laws(
            left in prop::collection::btree_map(0u8..6, any::<i32>(), 0..6),
            right in prop::collection::btree_map(0u8..6, any::<i32>(), 0..6),
            offset in any::<i32>()
        ) {
            check_all::<MapF>(&left, &right);
            check_all::<MapF>(&left, &relabel::<MapF>(left.clone(), offset));
        }

        #[test]
        fn compose_laws(left in arb_grid(), right in arb_grid(), offset in any::<i32>()) {
            check_all::<GridF>(&left, &right);
            check_all::<GridF>(&left, &relabel::<GridF>(left.clone(), offset));
        }

        #[test]
        fn option_result_array_and_label_laws(
            left in prop::option::of(any::<i32>()),
            right in prop::option::of(any::<i32>()),
            ok_or in prop::result::maybe_ok(any::<i32>(), 0u8..3),
            other in prop::result::maybe_ok(any::<i32>(), 0u8..3),
            array in prop::array::uniform3(any::<i32>()),
            label in (0u8..3, any::<i32>()),
            other_label in (0u8..3, any::<i32>()),
            offset in any::<i32>()
        ) {
            check_all::<OptF>(&left, &right);
            check_all::<OptF>(&left, &relabel::<OptF>(left, offset));
            check_all::<ResF>(&ok_or, &other);
            check_all::<ResF>(&ok_or, &relabel::<ResF>(ok_or.clone(), offset));
            check_all::<ArrayF>(&array, &relabel::<ArrayF>(array, offset));
            check_all::<LabelF>(&label, &other_label);
        }

        #[test]
        fn free_laws(left in arb_nested(), right in arb_nested(), offset in any::<i32>()) {
            let (left, right) = (to_free(&left), to_free(&right));

            check_all::<FreeF>(&left, &right);
            let same_shape = relabel::<FreeF>(left.clone(), offset);
            check_all::<FreeF>(&left, &same_shape);
            prop_assert!(FreeF::zip_match(&left, &same_shape).is_some());
        }

        #[test]
        fn cofree_laws(
            left in arb_nested(),
            right in arb_nested(),
            items in prop::collection::vec(any::<i32>(), 1..8),
            other_items in prop::collection::vec(any::<i32>(), 1..8),
            offset in any::<i32>()
        ) {
            let (left, right) = (to_rose(&left), to_rose(&right));
            check_all::<RoseF>(&left, &right);
            check_all::<RoseF>(&left, &relabel::<RoseF>(left.clone(), offset));

            let (items, other_items) = (to_non_empty(&items), to_non_empty(&other_items));
            check_all::<NonEmptyF>(&items, &other_items);
            check_all::<NonEmptyF>(&items, &relabel::<NonEmptyF>(items.clone(), offset));
        }

        #[test]
        fn derived_tree_laws(left in arb_tree(), right in arb_tree(), offset in any::<i32>()) {
            check_all::<TreeF>(&left, &right);

            let same_shape = relabel::<TreeF>(left.clone(), offset);
            check_all::<TreeF>(&left, &same_shape);
            prop_assert!(TreeF::zip_match(&left, &same_shape).is_some());
        }

        #[test]
        fn derived_expr_laws(left in arb_expr(), right in arb_expr(), offset in any::<i32>()) {
            let left = expr_to_i32(left);
            let right = expr_to_i32(right);

            check_all::<ExprF>(&left, &right);
            check_all::<ExprF>(&left, &relabel::<ExprF>(left.clone(), offset));
        }

        #[test]
        fn eq_default_agrees_with_derived_eq(left in arb_tree(), right in arb_tree()) {
            prop_assert_eq!(TreeF::eq_default(&left, &right), left == right);
            prop_assert!(TreeF::eq_default(&left, &left.clone()));
        }

        #[test]
        fn derived_expr_eq(left in arb_expr(), right in arb_expr()) {
            prop_assert_eq!(ExprF::eq_default(&left, &right), left == right);
        }
    }

    /// Drops the last element of its second argument, so never matches a non-empty
    /// frame against itself.
    struct Truncating;

    impl MappableFrame for Truncating {
        type Frame<X> = Vec<X>;

        fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B> {
            input.into_iter().map(f).collect()
        }
    }

    impl ZipMatch for Truncating {
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
            let right = &right[..right.len().saturating_sub(1)];
            if left.len() != right.len() {
                return None;
            }
            left.iter().zip(right).map(|(a, b)| f(a, b)).collect()
        }
    }

    #[test]
    #[should_panic(expected = "does not match a frame against itself")]
    fn lawless_instance_panics_on_recovered_map() {
        Truncating::fmap_recovered(&vec![1, 2, 3], |x| x + 1);
    }
}
