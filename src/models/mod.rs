pub mod ingredient;
pub mod market;
pub mod pricing;
pub mod recipe;

pub use ingredient::*;
pub use market::*;
pub use pricing::*;
pub use recipe::*;
