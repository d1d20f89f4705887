//! Extension `impl Diagram` blocks, split out of `diagram.rs` by concern —
//! the same convention the teacher crate uses for `impl Bdd` blocks (one
//! file per family of operations rather than one monolithic `impl`).

mod _impl_reduce;
mod _impl_serialize;
