//! Core stages: model loading, normalization, persistence and sync.

mod merge;
mod normalize;
mod save_model;
mod sync;

pub use merge::MergeModels;
pub use normalize::NormalizeModel;
pub use save_model::SaveModel;
pub use sync::SyncOutput;
