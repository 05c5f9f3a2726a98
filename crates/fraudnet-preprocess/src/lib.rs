pub mod error;
pub mod scaler;
pub mod smote;
pub mod split;

pub use error::{PreprocessError, PreprocessResult};
pub use scaler::StandardScaler;
pub use smote::Smote;
pub use split::{stratified_split, Split};
