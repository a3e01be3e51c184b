#![doc = include_str!("../README.md")]

pub use rf_convert as convert;
pub use rf_reflect as reflect;
pub use rf_utils as utils;
