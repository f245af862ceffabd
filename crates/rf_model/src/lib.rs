//! Random-forest species model.
//!
//! Label encoding, a seeded random-forest classifier over the two encoded
//! features (country, season), evaluation metrics, and the training
//! pipeline that produces the persisted model artifacts.

mod artifacts;
mod encoder;
mod forest;
mod metrics;
mod rng;
mod split;
mod training;
mod tree;

pub use artifacts::{
    ModelMetadata, load_metadata, load_metrics, load_model, save_metadata, save_metrics,
    save_model,
};
pub use encoder::{LabelEncoder, UnseenCategoryError};
pub use forest::{ForestConfig, RandomForest};
pub use metrics::{accuracy, cohen_kappa, evaluate, no_information_rate, wilson_interval};
pub use split::stratified_split;
pub use training::{TrainedArtifacts, TrainingConfig, train_species_model};
pub use tree::DecisionTree;
