//! Pricing domain - bonding curve and fixed-point arithmetic

mod curve;
mod fixed_point;

pub use curve::spot_price;
pub use fixed_point::{wad_div, wad_mul, wad_pow, Wad, U256, WAD};
