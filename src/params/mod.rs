//! Typed parameters and their storage
//!
//! The router never owns parameters; it holds [`ParamHandle`]s into a
//! [`ParamStore`], so a parameter removed by its owner simply stops
//! receiving updates.

mod store;
mod value;

pub use store::{ParamHandle, ParamStore};
pub use value::ParamValue;
