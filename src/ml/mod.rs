pub mod motif;
pub mod momentum_model;
pub mod volatility_model;

pub use motif::MotifAlphabet;
pub use momentum_model::{MomentumModel, MomentumPoint};
pub use volatility_model::{Centroid, VolatilityModel, VolatilityPoint};
