//! `ZipMatch` derive macro implementation.

use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_quote, DeriveInput};

use crate::repr::{Body, Constructor, Fresh, Repr, Shape};

pub fn derive_zip_match_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let repr = Repr::new(input, "ZipMatch")?;

    // opaque fields may hold any of the other parameters
    let mut generics = repr.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::core::cmp::PartialEq));
        param.bounds.push(parse_quote!(::core::clone::Clone));
    }
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    let token = repr.token();

    let mut fresh = Fresh::default();
    let body = match &repr.body {
        Body::Void => quote! { match *left {} },
        Body::Single(constructor) => {
            let arm = match_arm(constructor, &mut fresh);
            quote! { match (left, right) { #arm } }
        }
        Body::Sum(constructors) => {
            let arms: Vec<_> = constructors
                .iter()
                .map(|c| match_arm(c, &mut fresh))
                .collect();
            // a lone variant has nothing to mismatch against
            let mismatch = (constructors.len() > 1)
                .then(|| quote! { _ => ::core::option::Option::None, });
            quote! {
                match (left, right) {
                    #(#arms)*
                    #mismatch
                }
            }
        }
    };

    Ok(quote! {
        #[automatically_derived]
        #[allow(unused_mut, unused_variables)]
        impl #impl_generics ::zipmatch::ZipMatch for #token #where_clause {
            fn zip_match_with<'__a, __A, __B, __C>(
                left: &'__a <Self as ::zipmatch::MappableFrame>::Frame<__A>,
                right: &'__a <Self as ::zipmatch::MappableFrame>::Frame<__B>,
                mut f: impl ::core::ops::FnMut(&'__a __A, &'__a __B) -> ::core::option::Option<__C>,
            ) -> ::core::option::Option<<Self as ::zipmatch::MappableFrame>::Frame<__C>>
            where
                Self: '__a,
                __A: '__a,
                __B: '__a,
            {
                // a single combiner type for every recursive call
                let f: &mut dyn ::core::ops::FnMut(&'__a __A, &'__a __B) -> ::core::option::Option<__C> = &mut f;
                #body
            }
        }
    })
}

/// `(Ctor(l..), Ctor(r..)) => Some(Ctor(matched..)),`
fn match_arm(constructor: &Constructor, fresh: &mut Fresh) -> TokenStream2 {
    let mut lefts = Vec::new();
    let mut rights = Vec::new();
    let mut matched = Vec::new();
    for field in &constructor.fields {
        let l = fresh.ident("l");
        let r = fresh.ident("r");
        let expr = match_shape(&field.shape, &l, &r, fresh);
        matched.push(quote! { #expr? });
        lefts.push(quote! { #l });
        rights.push(quote! { #r });
    }

    let left_pat = constructor.build(lefts);
    let right_pat = constructor.build(rights);
    let out = constructor.build(matched);
    quote! {
        (#left_pat, #right_pat) => ::core::option::Option::Some(#out),
    }
}

/// An expression of type `Option<_>` matching `l` against `r`, both references to
/// values of the given shape. May use `?`.
fn match_shape(shape: &Shape, l: &Ident, r: &Ident, fresh: &mut Fresh) -> TokenStream2 {
    match shape {
        Shape::Slot => quote! { f(#l, #r) },
        Shape::Opaque(_) => quote! {
            if #l == #r {
                ::core::option::Option::Some(::core::clone::Clone::clone(#l))
            } else {
                ::core::option::Option::None
            }
        },
        Shape::Field(token) => quote! {
            <#token as ::zipmatch::ZipMatch>::zip_match_with(#l, #r, &mut *f)
        },
        Shape::Compose(token, inner) => {
            let il = fresh.ident("l");
            let ir = fresh.ident("r");
            let inner = match_shape(inner, &il, &ir, fresh);
            quote! {
                <#token as ::zipmatch::ZipMatch>::zip_match_with(#l, #r, |#il, #ir| #inner)
            }
        }
        Shape::Product(elems) => {
            let mut ls = Vec::new();
            let mut rs = Vec::new();
            let mut matched = Vec::new();
            for elem in elems {
                let el = fresh.ident("l");
                let er = fresh.ident("r");
                matched.push(match_shape(elem, &el, &er, fresh));
                ls.push(el);
                rs.push(er);
            }
            quote! {
                {
                    let (#(#ls,)*) = #l;
                    let (#(#rs,)*) = #r;
                    ::core::option::Option::Some((#(#matched?,)*))
                }
            }
        }
    }
}
