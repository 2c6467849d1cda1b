use std::marker::PhantomData;

/// A single 'frame' containing values that can be mapped over via `map_frame`.
///
/// # Implementing this trait
///
/// Rust does not allow implementing a trait for a partially applied type: we can
/// implement a trait for `Option<usize>` but not for just `Option`. The convention
/// used throughout this crate is to implement frame traits for the type applied to
/// the uninhabited [`PartiallyApplied`] marker, eg
///
/// ```rust
/// # use zipmatch::{MappableFrame, PartiallyApplied};
/// # #[derive(Debug, PartialEq, Eq)]
/// enum MyOption<A> {
///     Some(A),
///     None,
/// }
///
/// impl MappableFrame for MyOption<PartiallyApplied> {
///     type Frame<X> = MyOption<X>;
///
///     fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
///         match input {
///             MyOption::Some(x) => MyOption::Some(f(x)),
///             MyOption::None => MyOption::None,
///         }
///     }
/// }
///
/// let mapped = MyOption::<PartiallyApplied>::map_frame(MyOption::Some(1), |n| n + 10);
/// assert_eq!(mapped, MyOption::Some(11));
/// ```
///
/// Most of the time you'll want `#[derive(MappableFrame)]` instead of writing this by hand.
pub trait MappableFrame {
    /// the frame type that is mapped over by `map_frame`
    type Frame<X>;

    /// Apply some function `f` to each element inside a frame
    ///
    /// Elements must be visited in the same order every time, for any two frames
    /// that differ only in their element type.
    fn map_frame<A, B>(input: Self::Frame<A>, f: impl FnMut(A) -> B) -> Self::Frame<B>;
}

/// An uninhabited type used to define frame instances for partially-applied types.
///
/// For example: the instance for `Vec<A>` cannot be written over the
/// partially-applied type `Vec`, so instead we write it over `Vec<PartiallyApplied>`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartiallyApplied {}

/// Composition of two frame tokens: `Compose<F, G>` has frames of type `F::Frame<G::Frame<X>>`,
/// eg `Compose<Vec<PartiallyApplied>, Option<PartiallyApplied>>` has frames of type `Vec<Option<X>>`
pub struct Compose<F, G>(PhantomData<F>, PhantomData<G>);

impl<F: MappableFrame, G: MappableFrame> MappableFrame for Compose<F, G> {
    type Frame<X> = F::Frame<G::Frame<X>>;

    fn map_frame<A, B>(input: Self::Frame<A>, mut f: impl FnMut(A) -> B) -> Self::Frame<B> {
        #[allow(clippy::redundant_closure)] // this lint is wrong here
        F::map_frame(input, move |x| G::map_frame(x, |x| f(x)))
    }
}
