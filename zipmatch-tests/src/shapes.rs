//! Example types with derived frame and matching instances, one per
//! representation case the derives handle.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use proptest::prelude::*;
use zipmatch::{MappableFrame, ZipMatch};

/// Binary tree: a sum of a slot and a product of two recursive fields.
#[derive(Debug, Clone, PartialEq, MappableFrame, ZipMatch)]
pub enum Tree<A> {
    Leaf(A),
    Node(Box<Tree<A>>, Box<Tree<A>>),
}

impl<A> Tree<A> {
    pub fn node(left: Tree<A>, right: Tree<A>) -> Self {
        Tree::Node(Box::new(left), Box::new(right))
    }
}

/// Small expression language over variables of type `V`.
#[derive(Debug, Clone, PartialEq, MappableFrame, ZipMatch)]
pub enum Expr<V> {
    Lit(i64),
    Var(V),
    Add(Box<Expr<V>>, Box<Expr<V>>),
    Let {
        name: String,
        bound: Box<Expr<V>>,
        body: Box<Expr<V>>,
    },
    Call(String, Vec<Expr<V>>),
}

/// Rose tree with an opaque label on every node.
#[derive(Debug, Clone, PartialEq, MappableFrame, ZipMatch)]
pub struct Rose<A> {
    pub label: String,
    pub value: A,
    pub children: Vec<Rose<A>>,
}

impl<A> Rose<A> {
    pub fn new(label: &str, value: A, children: Vec<Rose<A>>) -> Self {
        Rose {
            label: label.to_string(),
            value,
            children,
        }
    }
}

/// Unit, slot, and named-product variants.
#[derive(Debug, Clone, PartialEq, MappableFrame, ZipMatch)]
pub enum Pocket<A> {
    Empty,
    One(A),
    Two { first: A, second: A },
}

/// Containers of containers, tuples, arrays, and a non-element parameter.
#[derive(Debug, Clone, PartialEq, MappableFrame, ZipMatch)]
pub struct Table<K: Ord, A> {
    pub rows: BTreeMap<K, A>,
    pub pairs: Vec<(A, u8)>,
    pub grid: [Option<A>; 2],
    pub tag: Option<(K, A)>,
    pub marker: PhantomData<A>,
}

/// Slot in the first argument of a container.
#[derive(Debug, Clone, PartialEq, MappableFrame, ZipMatch)]
pub struct Attempt<A> {
    pub tries: u8,
    pub outcome: Result<A, String>,
}

/// Only ever holds one element.
#[derive(Debug, Clone, PartialEq, MappableFrame, ZipMatch)]
pub struct Labelled<'l, L, A>(pub &'l str, pub L, pub A);

pub fn arb_tree() -> impl Strategy<Value = Tree<i32>> {
    let leaf = any::<i8>().prop_map(|x| Tree::Leaf(i32::from(x)));
    leaf.prop_recursive(
        6,  // 6 levels deep
        64, // Shoot for maximum size of 64 nodes
        2,  // two children per node
        |inner| (inner.clone(), inner).prop_map(|(l, r)| Tree::node(l, r)),
    )
}

pub fn arb_expr() -> impl Strategy<Value = Expr<u8>> {
    let leaf = prop_oneof![
        any::<i8>().prop_map(|x| Expr::Lit(i64::from(x))),
        (0u8..4).prop_map(Expr::Var),
    ];
    leaf.prop_recursive(5, 64, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| Expr::Add(Box::new(a), Box::new(b))),
            ("[xy]", inner.clone(), inner.clone()).prop_map(|(name, bound, body)| Expr::Let {
                name,
                bound: Box::new(bound),
                body: Box::new(body),
            }),
            ("[fg]", prop::collection::vec(inner, 0..3))
                .prop_map(|(name, args)| Expr::Call(name, args)),
        ]
    })
}
