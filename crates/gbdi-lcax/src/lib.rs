#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # gbdi-lcax
//!
//! The GBDI ingest schema: LCAx-style project documents.
//!
//! A converted dataset is a list of [`Project`]s. A project holds building
//! information, per-stage impact results, and a tree of assemblies, products,
//! and techflow impact data. All maps are ordered so that serialization is
//! deterministic: converting the same input twice yields identical output.

pub mod assembly;
pub mod enums;
pub mod project;
pub mod results;

pub use assembly::{Assembly, Classification, Product, TechFlow};
pub use enums::{
    BuildingType, BuildingTypology, Country, GeneralEnergyClass, ImpactCategoryKey,
    LifeCycleStage, ProjectPhase, RoofType, Unit,
};
pub use project::{AreaType, Location, Project, ProjectInfo, SoftwareInfo, ValueUnit};
pub use results::{Results, StageResults, add_impact, calculate_results, merge_scaled};

/// Version of the ingest format stamped on every emitted document
pub const FORMAT_VERSION: &str = "2.6.1";
