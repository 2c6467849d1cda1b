#![allow(dead_code)]

use zipmatch::ZipMatch;

#[derive(ZipMatch)]
union Slots<A> {
    one: std::mem::ManuallyDrop<A>,
}

fn main() {}
