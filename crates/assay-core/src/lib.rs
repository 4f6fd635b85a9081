//! Assay Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Assay diagram
//! engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Points, sizes, bounds and the pure helpers used by the
//!   placement solver ([`geometry`] module)

pub mod geometry;
pub mod identifier;
