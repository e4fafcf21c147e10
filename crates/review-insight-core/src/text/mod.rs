pub mod normalize;
pub mod terms;

pub use normalize::normalize;
pub use terms::{top_terms, TermCount};
