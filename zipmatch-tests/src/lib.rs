//! Example frames, law checks, and benchmarks for `zipmatch`.

pub mod laws;
pub mod shapes;
