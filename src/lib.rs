mod classifier;
mod error;
mod model_service;
mod ort_service;
mod pages;
mod prediction;
mod preprocessing;
mod roast_level;
mod routes;
mod server;
mod telemetry;

pub mod app;
pub mod config;

pub use app::start_app;
pub use classifier::BeanClassifier;
pub use error::ClassifierError;
pub use model_service::{ModelLoader, ModelService};
pub use ort_service::{OrtModelLoader, OrtModelService};
pub use prediction::PredictionResult;
pub use roast_level::RoastLevel;
