//! Request-independent business logic composed over the store traits.

pub mod seed;
pub mod selection;
