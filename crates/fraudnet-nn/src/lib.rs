pub mod layers;
pub mod loss;
pub mod network;
pub mod optim;
pub mod train;

pub use layers::{Activation, Dense};
pub use loss::bce_loss;
pub use network::Network;
pub use optim::Adam;
pub use train::{fit, History, TrainConfig, TrainError, TrainResult};
