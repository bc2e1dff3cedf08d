pub mod chunk;
pub mod encoding;
pub mod error;
pub mod field;
pub mod interpolation;
pub mod params;
pub mod polynomial;
pub mod scheme;
pub mod share;
pub mod sss;
pub mod workers;

pub use chunk::*;
pub use encoding::*;
pub use error::*;
pub use field::*;
pub use interpolation::*;
pub use params::*;
pub use polynomial::*;
pub use scheme::*;
pub use share::*;
pub use sss::*;
pub use workers::*;
