#![forbid(unsafe_code)]

pub mod deck;
pub mod error;
pub mod gesture;
pub mod model;
pub mod selection;
pub mod time;

pub use error::Error;
pub use time::Clock;
