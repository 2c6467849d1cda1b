//! `MappableFrame` derive macro implementation.

use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use syn::DeriveInput;

use crate::repr::{Body, Constructor, Fresh, Repr, Shape};

pub fn derive_mappable_frame_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let repr = Repr::new(input, "MappableFrame")?;

    let (impl_generics, _, where_clause) = repr.generics.split_for_impl();
    let token = repr.token();
    let frame = repr.applied_to(quote!(__Elem));

    let mut fresh = Fresh::default();
    let body = match &repr.body {
        Body::Void => quote! { match input {} },
        Body::Single(constructor) => {
            let arm = map_arm(constructor, &mut fresh);
            quote! { match input { #arm } }
        }
        Body::Sum(constructors) => {
            let arms = constructors.iter().map(|c| map_arm(c, &mut fresh));
            quote! { match input { #(#arms)* } }
        }
    };

    Ok(quote! {
        #[automatically_derived]
        #[allow(unused_mut, unused_variables)]
        impl #impl_generics ::zipmatch::MappableFrame for #token #where_clause {
            type Frame<__Elem> = #frame;

            fn map_frame<__A, __B>(
                input: Self::Frame<__A>,
                mut f: impl ::core::ops::FnMut(__A) -> __B,
            ) -> Self::Frame<__B> {
                let f: &mut dyn ::core::ops::FnMut(__A) -> __B = &mut f;
                #body
            }
        }
    })
}

/// `Ctor(x..) => Ctor(mapped..),`
fn map_arm(constructor: &Constructor, fresh: &mut Fresh) -> TokenStream2 {
    let mut bindings = Vec::new();
    let mut mapped = Vec::new();
    for field in &constructor.fields {
        let x = fresh.ident("x");
        mapped.push(map_shape(&field.shape, &x, fresh));
        bindings.push(quote! { #x });
    }

    let pat = constructor.build(bindings);
    let out = constructor.build(mapped);
    quote! { #pat => #out, }
}

fn map_shape(shape: &Shape, x: &Ident, fresh: &mut Fresh) -> TokenStream2 {
    match shape {
        Shape::Slot => quote! { f(#x) },
        Shape::Opaque(_) => quote! { #x },
        Shape::Field(token) => quote! {
            <#token as ::zipmatch::MappableFrame>::map_frame(#x, &mut *f)
        },
        Shape::Compose(token, inner) => {
            let y = fresh.ident("x");
            let inner = map_shape(inner, &y, fresh);
            quote! {
                <#token as ::zipmatch::MappableFrame>::map_frame(#x, |#y| #inner)
            }
        }
        Shape::Product(elems) => {
            let mut xs = Vec::new();
            let mut mapped = Vec::new();
            for elem in elems {
                let y = fresh.ident("x");
                mapped.push(map_shape(elem, &y, fresh));
                xs.push(y);
            }
            quote! {
                {
                    let (#(#xs,)*) = #x;
                    (#(#mapped,)*)
                }
            }
        }
    }
}
