//! Build stages for the Kiln documentation pipeline.
//!
//! A stage is a [`Task`]: a small value constructed from its options that
//! reads and mutates the shared [`Model`](kiln_model::Model) in place.
//! [`Pipeline`] runs stages sequentially and halts on the first failure.
//!
//! # Stage ordering
//!
//! [`core::NormalizeModel`] must run before any enrichment stage; every
//! other stage assumes ancestor URLs resolve. The enrichment stages
//! themselves ([`page`], [`sitemap`], [`docs`]) are independent of each
//! other and may run in any order; the dependency is a partial order, not a
//! chain. [`core::SaveModel`] and [`core::SyncOutput`] come last.
//!
//! Stages are idempotent: re-running one replaces the fields it produces
//! instead of accumulating.

pub mod core;
pub mod docs;
pub mod page;
mod pipeline;
mod sitemap;
mod task;

pub use pipeline::Pipeline;
pub use sitemap::CreateSitemap;
pub use task::{PageFailure, Task, TaskError};
