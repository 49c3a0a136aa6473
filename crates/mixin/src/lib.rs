#![cfg_attr(test, allow(unused_crate_dependencies))]

//! Mixin-aware symbol resolution for range maps.
//!
//! Mixin classes are applied onto other classes at load time, so their members
//! refer to members of the *target* class under names that only make sense once
//! the mixin is applied. This crate tracks which types are mixins and what they
//! shadow, accessor or overwrite, and rewrites the affected occurrences so they
//! point at the target.
//!
//! A front-end hands each annotation it meets to [`MixinProcessor::process`]
//! together with the declaration it is attached to. The [`MixinRegistry`] is
//! shared by every file of a run; root `@Mixin` annotations must be processed
//! before member annotations of the same type.

pub mod accessor;
pub mod annotation;
pub mod descriptor;
pub mod error;
pub mod info;
pub mod processor;
pub mod registry;

pub use accessor::{AccessorName, AccessorType};
pub use annotation::{Annotation, AnnotationArgs, Declaration, MixinAnnotation, StringLiteral, TypeLiteral, Value};
pub use descriptor::MethodDescriptor;
pub use error::{Position, ResolveError, Result};
pub use info::{InterfaceInfo, MixinInfo, ShadowInfo};
pub use processor::{MixinProcessor, ProcessorOptions};
pub use registry::MixinRegistry;
