pub mod loader;
pub mod monthly;

pub use loader::*;
pub use monthly::*;

/// Column positions in the price history CSV. Fixed by convention, not by header.
pub const DATE_INDEX: usize = 0;
pub const OPENING_PRICE_INDEX: usize = 1;
pub const HIGH_PRICE_INDEX: usize = 2;
pub const LOW_PRICE_INDEX: usize = 3;
pub const CLOSING_PRICE_INDEX: usize = 4;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
