use crate::error::ClassifierError;
use ndarray::{Array, Ix4};

/// A loaded model that maps a `[1, 128, 128, 3]` batch to class probabilities.
pub trait ModelService: Send + Sync + 'static {
    fn infer(&self, input: &Array<f32, Ix4>) -> Result<Vec<f32>, ClassifierError>;
}

/// Builds a [`ModelService`]. Called at most once per successful load.
pub trait ModelLoader: Send + Sync + Clone + 'static {
    type Model: ModelService;

    fn load(&self) -> Result<Self::Model, ClassifierError>;
}
