pub mod boxes;

pub use boxes::{header::BoxHeader, header::FullBoxHeader, BoxType, DynBox};

#[cfg(test)]
mod tests;
