pub mod clone;
pub mod extract;
pub mod index;
pub mod locate;
pub mod summarize;
