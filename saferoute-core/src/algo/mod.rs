mod annotate;

pub use annotate::{AnnotatedGraph, annotate, annotate_with, traversal_cost};
