pub mod grouping;
pub mod result;
