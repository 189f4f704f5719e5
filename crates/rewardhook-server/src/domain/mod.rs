mod business;
mod event;
pub mod signature;

pub use business::*;
pub use event::*;
