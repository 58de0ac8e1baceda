#![doc = include_str!("../README.md")]

mod error;
mod extend;
mod index;
pub mod validation;

pub use crate::error::ExtendError;
pub use crate::extend::extend;
pub use crate::extend::extend_with;
pub use crate::extend::ExtendOptions;
