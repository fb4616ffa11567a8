//! Air-quality category predictor: a single-page form backed by a
//! decision-tree pipeline loaded once at startup.

pub mod category;
pub mod collector;
pub mod config;
pub mod country;
pub mod error;
pub mod model;
pub mod page;
pub mod presenter;
pub mod server;
pub mod sessions;
pub mod types;

pub use category::{Category, CategoryInfo};
pub use collector::InputCollector;
pub use country::Country;
pub use model::{load, DecisionTreePipeline, ModelHandle, Predictor};
pub use presenter::{evaluate, DisplayState, PredictionResult, Session};
pub use types::{AqiValue, CoAqiValue, No2AqiValue, OzoneAqiValue, PredictionRequest};
