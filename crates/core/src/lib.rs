#![deny(unsafe_code)]
//! Core types and GPU program lifecycle for the shaderfolio portfolio.
//!
//! Provides the catalog data model ([`ShaderDefinition`], [`Catalog`]),
//! typed uniform values ([`UniformKind`], [`UniformValue`]), the error
//! taxonomy ([`RenderError`]), frame timing ([`Clock`], [`FrameTimer`]),
//! and -- behind the `render` feature -- the per-surface GPU lifecycle:
//! context wrapper, shader compiler, program registry, full-screen quad,
//! and render driver.

pub mod catalog;
pub mod definition;
pub mod error;
pub mod timing;
pub mod uniform;

#[cfg(feature = "render")]
pub mod render;

pub use catalog::Catalog;
pub use definition::{
    ControlDescriptor, ControlKind, ShaderDefinition, UniformDeclaration, SPEED_CONTROL,
};
pub use error::RenderError;
pub use timing::{Clock, FrameTimer};
pub use uniform::{UniformKind, UniformValue};
