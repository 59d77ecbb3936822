//! avk-codegen - Kotlin data classes from AutoValue declarations
//!
//! This crate turns the element model from `avk-core` into Kotlin source:
//! - [`kotlin`] is a small Kotlin source model and writer
//! - [`PropertyDescriptor`], [`BuilderDescriptor`], [`EnumDescriptor`] and
//!   [`ClassDescriptor`] model one declaration each
//! - [`GenerationContext`] holds every model of a run until it is composed
//! - [`Processor`] drives rounds of declarations through to written files
//!
//! Input-shape problems are reported through a [`avk_core::Messager`] and
//! skip only the affected declaration; internal inconsistencies are returned
//! as [`avk_core::AvkError`] and stop the run.

pub mod annotation;
pub mod builder;
pub mod class;
pub mod cleanup;
pub mod docs;
pub mod emitter;
pub mod enums;
pub mod kotlin;
pub mod method;
pub mod normalize;
pub mod policy;
pub mod processor;
pub mod property;
pub mod registry;

pub use builder::BuilderDescriptor;
pub use class::{ClassDescriptor, StaticCreator};
pub use enums::EnumDescriptor;
pub use processor::{GeneratedFile, Processor};
pub use property::{PropertyDescriptor, PropertySet};
pub use registry::GenerationContext;
