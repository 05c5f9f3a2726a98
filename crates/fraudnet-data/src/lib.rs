pub mod batches;
pub mod error;
pub mod frame;

pub use batches::Batches;
pub use error::{DataError, DataResult};
pub use frame::Frame;
