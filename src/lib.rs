pub mod anomaly;
pub mod config;
pub mod normalize;
pub mod services;
pub mod tree;
