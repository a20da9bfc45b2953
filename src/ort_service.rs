use crate::{
    config::{ModelConfig, Validatable},
    error::ClassifierError,
    model_service::{ModelLoader, ModelService},
};
use ndarray::{Array, Ix4};
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::TensorRef,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

pub struct OrtModelService {
    sessions: Arc<Vec<Arc<Mutex<Session>>>>,
    counter: Arc<AtomicUsize>,
}

impl OrtModelService {
    pub fn new(model_config: &ModelConfig) -> Result<Self, ort::Error> {
        let num_instances = model_config.num_instances.max(1);
        let sessions = (0..num_instances)
            .map(|_| {
                let session = Session::builder()?
                    .with_optimization_level(GraphOptimizationLevel::Level3)?
                    .commit_from_file(model_config.get_path())?;
                Ok(Arc::new(Mutex::new(session)))
            })
            .collect::<Result<Vec<_>, ort::Error>>()?;

        tracing::info!("Created {} ONNX sessions", num_instances);

        Ok(Self {
            counter: Arc::new(AtomicUsize::new(0)),
            sessions: Arc::new(sessions),
        })
    }
}

impl ModelService for OrtModelService {
    fn infer(&self, input: &Array<f32, Ix4>) -> Result<Vec<f32>, ClassifierError> {
        let index = self.counter.fetch_add(1, Ordering::SeqCst) % self.sessions.len();
        let session_arc = &self.sessions[index];
        let mut session = session_arc
            .lock()
            .map_err(|e| ClassifierError::Inference(format!("session mutex poisoned: {}", e)))?;

        tracing::debug!("Handling request with session {}", index);
        let owned_buffer;
        let input_view = if input.view().is_standard_layout() {
            input.view()
        } else {
            owned_buffer = input.as_standard_layout().to_owned();
            owned_buffer.view()
        };

        let tensor_ref = TensorRef::from_array_view(input_view)
            .map_err(|e| ClassifierError::Inference(format!("failed to build tensor: {}", e)))?;

        let outputs = session
            .run(ort::inputs![tensor_ref])
            .map_err(|e| ClassifierError::Inference(format!("inference failed: {}", e)))?;

        let (_, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("failed to extract tensor: {}", e)))?;

        Ok(data.to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct OrtModelLoader {
    model_config: ModelConfig,
}

impl OrtModelLoader {
    pub fn new(model_config: ModelConfig) -> Self {
        Self { model_config }
    }
}

impl ModelLoader for OrtModelLoader {
    type Model = OrtModelService;

    fn load(&self) -> Result<OrtModelService, ClassifierError> {
        self.model_config
            .validate()
            .map_err(ClassifierError::ModelLoad)?;

        tracing::info!("Loading model from {:?}", self.model_config.get_path());
        OrtModelService::new(&self.model_config)
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))
    }
}
