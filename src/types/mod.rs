pub mod price;
pub mod signal;

pub use price::*;
pub use signal::*;
