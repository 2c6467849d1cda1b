#![allow(dead_code)]

use zipmatch::MappableFrame;

#[derive(MappableFrame)]
struct Bounded<A: Clone>(A);

fn main() {}
