//! Containers of constructors.
//!
//! - [`Assembler`]: a [`Manager`](fabrik_core::Manager) threading an item
//!   through its constructors in order
//! - [`Manufacturer`]: constructors stored by name

mod assembler;
mod manufacturer;

pub use assembler::Assembler;
pub use manufacturer::Manufacturer;
