//! Structural representation of a derive input.
//!
//! Every type the derives accept is lowered into the same closed set of cases:
//!
//! - void: an enum with no variants ([`Body::Void`])
//! - unit: a constructor with no fields
//! - slot: a field of the element type itself ([`Shape::Slot`])
//! - field: a container of the element type, eg `Vec<A>` or the type itself ([`Shape::Field`])
//! - opaque: a field that doesn't mention the element type ([`Shape::Opaque`])
//! - sum: a choice between constructors ([`Body::Sum`])
//! - product: the fields of a constructor, or a tuple type ([`Shape::Product`])
//! - composition: a container of some other shape, eg `Vec<Option<A>>` ([`Shape::Compose`])
//!
//! Code generation matches exhaustively on these, so a new case cannot be
//! added without every derive handling it.

use proc_macro2::{Ident, TokenStream as TokenStream2, TokenTree};
use quote::{format_ident, quote, ToTokens};
use syn::{
    parse_quote, Data, DeriveInput, Fields, GenericArgument, GenericParam, Generics,
    PathArguments, Type,
};

/// How a single field relates to the element slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Slot,
    /// compared with `==` and cloned through
    Opaque(Type),
    /// `G<.., A>`, holding the frame token `G<.., PartiallyApplied>`
    Field(Type),
    /// tuple of shapes
    Product(Vec<Shape>),
    /// `G<.., H>` where `H` is itself a non-slot shape; holds the outer token
    Compose(Type, Box<Shape>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Named,
    Unnamed,
    Unit,
}

#[derive(Debug, Clone)]
pub struct FieldRepr {
    pub name: Option<Ident>,
    pub shape: Shape,
}

/// A struct, or one variant of an enum.
#[derive(Debug, Clone)]
pub struct Constructor {
    pub path: TokenStream2,
    pub style: Style,
    pub fields: Vec<FieldRepr>,
}

impl Constructor {
    /// Lay out one token stream per field in this constructor's syntax. Used for
    /// both patterns and construction expressions.
    pub fn build(&self, parts: impl IntoIterator<Item = TokenStream2>) -> TokenStream2 {
        let path = &self.path;
        match self.style {
            Style::Named => {
                let names = self.fields.iter().map(|f| &f.name);
                let parts = parts.into_iter();
                quote! { #path { #(#names: #parts),* } }
            }
            Style::Unnamed => {
                let parts = parts.into_iter();
                quote! { #path ( #(#parts),* ) }
            }
            Style::Unit => quote! { #path },
        }
    }
}

#[derive(Debug, Clone)]
pub enum Body {
    Void,
    Sum(Vec<Constructor>),
    Single(Constructor),
}

#[derive(Debug)]
pub struct Repr {
    pub ident: Ident,
    /// generics of the impl: everything but the slot parameter
    pub generics: Generics,
    args: Vec<TokenStream2>,
    slot_index: usize,
    pub body: Body,
}

impl Repr {
    pub fn new(input: &DeriveInput, macro_name: &str) -> syn::Result<Self> {
        let slot = input
            .generics
            .type_params()
            .last()
            .ok_or_else(|| {
                syn::Error::new_spanned(
                    &input.ident,
                    format!("{macro_name} derive requires a type parameter for the elements"),
                )
            })?
            .clone();

        if slot.colon_token.is_some() || !slot.bounds.is_empty() {
            return Err(syn::Error::new_spanned(
                &slot,
                format!("{macro_name} derive requires the element parameter to have no bounds"),
            ));
        }

        let slot_name = slot.ident.to_string();
        let other_params = input
            .generics
            .params
            .iter()
            .filter(|p| !matches!(p, GenericParam::Type(t) if t.ident == slot.ident));
        for param in other_params.clone() {
            if mentions(param.to_token_stream(), &slot_name) {
                return Err(syn::Error::new_spanned(
                    param,
                    format!("{macro_name} derive: `{slot_name}` may not appear in other parameters' bounds"),
                ));
            }
        }
        if let Some(where_clause) = &input.generics.where_clause {
            if mentions(where_clause.to_token_stream(), &slot_name) {
                return Err(syn::Error::new_spanned(
                    where_clause,
                    format!("{macro_name} derive: `{slot_name}` may not appear in the where clause"),
                ));
            }
        }

        let mut generics = input.generics.clone();
        generics.params = other_params.cloned().collect();

        let args = input
            .generics
            .params
            .iter()
            .map(|p| match p {
                GenericParam::Lifetime(l) => l.lifetime.to_token_stream(),
                GenericParam::Type(t) => t.ident.to_token_stream(),
                GenericParam::Const(c) => c.ident.to_token_stream(),
            })
            .collect();
        let slot_index = input
            .generics
            .params
            .iter()
            .position(|p| matches!(p, GenericParam::Type(t) if t.ident == slot.ident))
            .unwrap_or_default();

        let ident = &input.ident;
        let body = match &input.data {
            Data::Struct(data) => {
                Body::Single(constructor(quote!(#ident), &data.fields, &slot_name)?)
            }
            Data::Enum(data) if data.variants.is_empty() => Body::Void,
            Data::Enum(data) => Body::Sum(
                data.variants
                    .iter()
                    .map(|v| {
                        let variant = &v.ident;
                        constructor(quote!(#ident::#variant), &v.fields, &slot_name)
                    })
                    .collect::<syn::Result<_>>()?,
            ),
            Data::Union(_) => {
                return Err(syn::Error::new_spanned(
                    ident,
                    format!("{macro_name} derive does not support unions"),
                ))
            }
        };

        Ok(Repr {
            ident: ident.clone(),
            generics,
            args,
            slot_index,
            body,
        })
    }

    /// The type with its element slot filled in by `elem`.
    pub fn applied_to(&self, elem: TokenStream2) -> TokenStream2 {
        let ident = &self.ident;
        let mut args = self.args.clone();
        args[self.slot_index] = elem;
        quote! { #ident<#(#args),*> }
    }

    /// The frame token, `Name<.., ::zipmatch::PartiallyApplied>`.
    pub fn token(&self) -> TokenStream2 {
        self.applied_to(partially_applied().into_token_stream())
    }
}

/// Fresh identifiers for generated bindings.
#[derive(Default)]
pub struct Fresh(usize);

impl Fresh {
    pub fn ident(&mut self, prefix: &str) -> Ident {
        self.0 += 1;
        format_ident!("__{}{}", prefix, self.0)
    }
}

fn constructor(path: TokenStream2, fields: &Fields, slot: &str) -> syn::Result<Constructor> {
    let style = match fields {
        Fields::Named(_) => Style::Named,
        Fields::Unnamed(_) => Style::Unnamed,
        Fields::Unit => Style::Unit,
    };
    let fields = fields
        .iter()
        .map(|f| {
            Ok(FieldRepr {
                name: f.ident.clone(),
                shape: classify(&f.ty, slot)?,
            })
        })
        .collect::<syn::Result<_>>()?;

    Ok(Constructor {
        path,
        style,
        fields,
    })
}

/// Work out how a field of type `ty` holds elements of the slot parameter `slot`.
pub fn classify(ty: &Type, slot: &str) -> syn::Result<Shape> {
    if mentions(ty.to_token_stream(), "Self") {
        return Err(syn::Error::new_spanned(
            ty,
            "use the type's name instead of `Self` in field types",
        ));
    }
    if !mentions(ty.to_token_stream(), slot) {
        return Ok(Shape::Opaque(ty.clone()));
    }

    match ty {
        Type::Path(p) if p.qself.is_none() && p.path.is_ident(slot) => Ok(Shape::Slot),
        Type::Paren(p) => classify(&p.elem, slot),
        Type::Group(g) => classify(&g.elem, slot),
        Type::Tuple(t) => t
            .elems
            .iter()
            .map(|elem| classify(elem, slot))
            .collect::<syn::Result<_>>()
            .map(Shape::Product),
        Type::Array(a) => {
            let mut token = a.clone();
            token.elem = Box::new(partially_applied());
            container(Type::Array(token), &a.elem, slot)
        }
        Type::Path(p) if p.qself.is_none() => {
            let mut token = p.clone();
            let segments = &mut token.path.segments;
            let prefix_len = segments.len().saturating_sub(1);
            if segments
                .iter()
                .take(prefix_len)
                .any(|s| mentions(s.to_token_stream(), slot))
            {
                return Err(unsupported(ty, slot));
            }
            let Some(last) = segments.last_mut() else {
                return Err(unsupported(ty, slot));
            };
            let PathArguments::AngleBracketed(generic_args) = &mut last.arguments else {
                return Err(unsupported(ty, slot));
            };
            // exactly one type argument may hold the slot, eg `Result<A, E>` or `BTreeMap<K, A>`
            let mut holding = generic_args
                .args
                .iter()
                .enumerate()
                .filter(|(_, a)| mentions(a.to_token_stream(), slot))
                .map(|(i, _)| i);
            let (Some(idx), None) = (holding.next(), holding.next()) else {
                return Err(unsupported(ty, slot));
            };
            if !matches!(generic_args.args[idx], GenericArgument::Type(_)) {
                return Err(unsupported(ty, slot));
            }

            let inner = std::mem::replace(
                &mut generic_args.args[idx],
                GenericArgument::Type(partially_applied()),
            );
            match inner {
                GenericArgument::Type(inner) => container(Type::Path(token), &inner, slot),
                _ => Err(unsupported(ty, slot)),
            }
        }
        _ => Err(unsupported(ty, slot)),
    }
}

fn container(token: Type, inner: &Type, slot: &str) -> syn::Result<Shape> {
    Ok(match classify(inner, slot)? {
        Shape::Slot => Shape::Field(token),
        inner => Shape::Compose(token, Box::new(inner)),
    })
}

fn unsupported(ty: &Type, slot: &str) -> syn::Error {
    syn::Error::new_spanned(
        ty,
        format!(
            "`{slot}` can only appear directly, in tuples and arrays, \
             or in a single type argument of a container"
        ),
    )
}

fn partially_applied() -> Type {
    parse_quote!(::zipmatch::PartiallyApplied)
}

/// Check if `name` occurs as an identifier anywhere in `tokens`.
pub fn mentions(tokens: TokenStream2, name: &str) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(ident) => ident == name,
        TokenTree::Group(group) => mentions(group.stream(), name),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(ty: Type) -> syn::Result<Shape> {
        classify(&ty, "A")
    }

    #[test]
    fn classifies_every_field_case() {
        assert_eq!(shape(parse_quote!(A)).unwrap(), Shape::Slot);
        assert_eq!(
            shape(parse_quote!(String)).unwrap(),
            Shape::Opaque(parse_quote!(String))
        );
        assert_eq!(
            shape(parse_quote!(Vec<A>)).unwrap(),
            Shape::Field(parse_quote!(Vec<::zipmatch::PartiallyApplied>))
        );
        assert_eq!(
            shape(parse_quote!(std::collections::BTreeMap<String, A>)).unwrap(),
            Shape::Field(parse_quote!(
                std::collections::BTreeMap<String, ::zipmatch::PartiallyApplied>
            ))
        );
        assert_eq!(
            shape(parse_quote!(Result<A, String>)).unwrap(),
            Shape::Field(parse_quote!(Result<::zipmatch::PartiallyApplied, String>))
        );
        assert_eq!(
            shape(parse_quote!((A, u8))).unwrap(),
            Shape::Product(vec![Shape::Slot, Shape::Opaque(parse_quote!(u8))])
        );
        assert_eq!(
            shape(parse_quote!(Box<Tree<A>>)).unwrap(),
            Shape::Compose(
                parse_quote!(Box<::zipmatch::PartiallyApplied>),
                Box::new(Shape::Field(parse_quote!(Tree<::zipmatch::PartiallyApplied>)))
            )
        );
        assert_eq!(
            shape(parse_quote!([Option<A>; 2])).unwrap(),
            Shape::Compose(
                parse_quote!([::zipmatch::PartiallyApplied; 2]),
                Box::new(Shape::Field(parse_quote!(Option<::zipmatch::PartiallyApplied>)))
            )
        );
    }

    #[test]
    fn rejects_unsupported_positions() {
        assert!(shape(parse_quote!(&'a A)).is_err());
        assert!(shape(parse_quote!(fn(A) -> u8)).is_err());
        assert!(shape(parse_quote!(Result<A, A>)).is_err());
        assert!(shape(parse_quote!(Vec<A, A::Alloc>)).is_err());
        assert!(shape(parse_quote!(A::Item)).is_err());
        assert!(shape(parse_quote!(Box<Self>)).is_err());
    }

    #[test]
    fn lowers_enums_to_sums_of_constructors() {
        let input: DeriveInput = parse_quote! {
            enum Tagged<'l, L: Clone, A> {
                Empty,
                One { label: &'l L, value: A },
                Many(Vec<A>, L),
            }
        };
        let repr = Repr::new(&input, "ZipMatch").unwrap();

        let Body::Sum(constructors) = &repr.body else {
            panic!("expected a sum, got {:?}", repr.body);
        };
        let styles: Vec<_> = constructors.iter().map(|c| c.style).collect();
        assert_eq!(styles, vec![Style::Unit, Style::Named, Style::Unnamed]);
        assert_eq!(constructors[1].fields[1].shape, Shape::Slot);

        assert_eq!(
            repr.token().to_string(),
            quote!(Tagged<'l, L, ::zipmatch::PartiallyApplied>).to_string()
        );
        assert_eq!(repr.generics.params.len(), 2);
    }

    #[test]
    fn empty_enum_is_void() {
        let input: DeriveInput = parse_quote! { enum Never<A> {} };
        assert!(matches!(Repr::new(&input, "ZipMatch").unwrap().body, Body::Void));
    }

    #[test]
    fn rejects_bad_items() {
        let no_params: DeriveInput = parse_quote! { struct Plain(u8); };
        let bounded: DeriveInput = parse_quote! { struct Bounded<A: Clone>(A); };
        let where_bound: DeriveInput = parse_quote! { struct W<A>(A) where A: Clone; };
        let union: DeriveInput = parse_quote! { union U<A> { a: std::mem::ManuallyDrop<A> } };

        for input in [no_params, bounded, where_bound, union] {
            assert!(Repr::new(&input, "ZipMatch").is_err(), "{}", input.ident);
        }
    }
}
