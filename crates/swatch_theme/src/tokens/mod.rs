//! Design tokens for theming
//!
//! A theme is a pair of style sets (light and dark), each mapping tokens from
//! a closed vocabulary to CSS values:
//! - Colors (surfaces, brand, borders, charts, sidebar)
//! - Font families
//! - Radius
//! - Shadow parameters
//! - Letter spacing and spacing scale

mod key;
mod shadow;
mod style_set;

pub use key::*;
pub use shadow::*;
pub use style_set::*;
