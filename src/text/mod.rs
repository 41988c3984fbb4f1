pub mod lemma;
pub mod normalize;

pub use lemma::*;
pub use normalize::*;
