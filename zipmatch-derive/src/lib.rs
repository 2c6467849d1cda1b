//! Derive macros for `zipmatch`.
//!
//! Both derives treat the **last type parameter** of the annotated struct or enum
//! as the element slot, and generate an instance for the type applied to
//! `zipmatch::PartiallyApplied`:
//!
//! ```rust,ignore
//! #[derive(MappableFrame, ZipMatch)]
//! enum Tree<A> {
//!     Leaf(A),
//!     Node(Box<Tree<A>>, Box<Tree<A>>),
//! }
//! // impl MappableFrame for Tree<PartiallyApplied> { type Frame<X> = Tree<X>; .. }
//! // impl ZipMatch for Tree<PartiallyApplied> { .. }
//! ```
//!
//! The generated code refers to the `zipmatch` crate by absolute path.

extern crate proc_macro;

mod mappable_frame;
mod repr;
mod zip_match;

use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Derive `zipmatch::MappableFrame` for a struct or enum, mapping over its last type parameter.
#[proc_macro_derive(MappableFrame)]
pub fn derive_mappable_frame(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    match mappable_frame::derive_mappable_frame_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Derive `zipmatch::ZipMatch` for a struct or enum, matching over its last type parameter.
///
/// The type must also implement `MappableFrame`, usually via `#[derive(MappableFrame)]`.
#[proc_macro_derive(ZipMatch)]
pub fn derive_zip_match(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    match zip_match::derive_zip_match_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
