#![allow(dead_code)]

use std::collections::HashMap;

use zipmatch::MappableFrame;

#[derive(MappableFrame)]
struct Index<A> {
    lookup: HashMap<A, A>,
}

fn main() {}
