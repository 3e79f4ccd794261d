//! Tree transforms
//!
//! This module contains the forward (XML → generic tree) and reverse
//! (generic tree → XML) transforms together with the classification table
//! and the sibling namer both directions agree on.

pub mod classify;
pub mod forward;
pub mod namer;
pub mod options;
pub mod reverse;

pub use classify::{Category, Classifier, Context, NamePattern};
pub use forward::ForwardTransform;
pub use namer::{strip_suffix, SiblingNames, TokenGenerator};
pub use options::TransformOptions;
pub use reverse::ReverseTransform;
