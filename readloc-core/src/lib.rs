//! Core library for readloc: typed models for genomic interval counting.
//!
//! This crate holds the primitive records shared by the rest of the
//! workspace: half-open [`models::Interval`]s, named [`models::Region`]s and
//! the [`models::RegionSet`] loader, plus the typed [`models::ReadSegment`]
//! record that the counting engine consumes. All alignment-format decoding
//! lives upstream; by the time data is expressed in these types it is assumed
//! valid.

pub mod errors;
pub mod models;
pub mod utils;
