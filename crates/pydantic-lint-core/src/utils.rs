//! Utilities shared by the analyzer and front ends.

pub mod noqa;

#[doc(inline)]
pub use noqa::{parse_noqa, Noqa, NoqaIndex};
