//! Track catalog: the fixed, ordered playlist the player walks.
//!
//! The catalog is embedded in the binary as a TOML document and parsed once
//! at startup. It never changes afterwards; track selection and next/prev
//! wrapping are defined in terms of its order.

mod builtin;
mod model;

pub use builtin::builtin;
pub use model::*;

#[cfg(test)]
mod tests;
