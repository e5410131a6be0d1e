pub mod parse;
pub mod summary;
