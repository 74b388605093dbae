//! Triangle mesh export for elevation grids.
//!
//! [`build_mesh`] turns a [`dem_common::Grid`] into a [`TerrainMesh`] with one
//! vertex per measured cell; [`write_obj`] and [`generate_obj`] write it as
//! Wavefront OBJ.

pub mod error;
pub mod mesh;
pub mod obj;

pub use error::{MeshError, Result};
pub use mesh::{build_mesh, MeshOptions, TerrainMesh, Vertex};
pub use obj::{generate_obj, write_obj};
