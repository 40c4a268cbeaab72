pub mod tensor;

mod error;

pub use error::{Error, Result};
