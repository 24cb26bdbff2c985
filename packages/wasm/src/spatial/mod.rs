//! Spatial indexing for O(log n) vertex lookup.
//!
//! This module provides an R-tree based spatial index used to find
//! coincident vertices when welding a triangle soup.

mod rtree;

pub use rtree::SpatialIndex;
