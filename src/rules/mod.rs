pub mod crisis;
pub mod keywords;
pub mod scorer;

pub use crisis::*;
pub use keywords::*;
pub use scorer::*;
