pub mod data_uri;
pub mod ec_level;
pub mod envelope;
pub mod matrix;

pub use data_uri::DataUri;
pub use ec_level::{ECLevel, ParseECLevelError};
pub use envelope::{DecodedResult, Envelope, ProductInfo};
pub use matrix::BitMatrix;
