//! Grid to triangle mesh conversion.

use dem_common::Grid;
use tracing::debug;

use crate::error::{MeshError, Result};

/// Vertical scaling applied to every height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Multiplier for heights.
    pub exaggeration: f64,
    /// Added after scaling.
    pub base_offset: f64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            exaggeration: 1.0,
            base_offset: 0.0,
        }
    }
}

impl MeshOptions {
    fn validate(&self) -> Result<()> {
        if !self.exaggeration.is_finite() {
            return Err(MeshError::InvalidOptions(format!(
                "exaggeration must be finite, got {}",
                self.exaggeration
            )));
        }
        if !self.base_offset.is_finite() {
            return Err(MeshError::InvalidOptions(format!(
                "base offset must be finite, got {}",
                self.base_offset
            )));
        }
        Ok(())
    }
}

/// A mesh vertex in grid units: `x` east along columns, `y` south along
/// rows, `z` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Vertices and triangles (0-based vertex indices).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<[usize; 3]>,
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Build the terrain surface of `grid`.
///
/// Every 2x2 block of cells contributes the triangles (top-left, top-right,
/// bottom-right) and (top-left, bottom-right, bottom-left). A triangle with
/// any no-data corner is dropped, and no-data cells get no vertex.
pub fn build_mesh(grid: &Grid, options: &MeshOptions) -> Result<TerrainMesh> {
    options.validate()?;

    let rows = grid.rows();
    let cols = grid.cols();
    let cellsize = grid.header().cellsize();

    let mut vertex_of: Vec<Option<usize>> = Vec::with_capacity(grid.len());
    let mut mesh = TerrainMesh::default();

    for row in 0..rows {
        for col in 0..cols {
            let slot = grid.value(row, col).map(|h| {
                mesh.vertices.push(Vertex {
                    x: col as f64 * cellsize,
                    y: row as f64 * cellsize,
                    z: h * options.exaggeration + options.base_offset,
                });
                mesh.vertices.len() - 1
            });
            vertex_of.push(slot);
        }
    }

    let at = |row: usize, col: usize| vertex_of[row * cols + col];
    for row in 0..rows.saturating_sub(1) {
        for col in 0..cols.saturating_sub(1) {
            let tl = at(row, col);
            let tr = at(row, col + 1);
            let bl = at(row + 1, col);
            let br = at(row + 1, col + 1);

            if let (Some(a), Some(b), Some(c)) = (tl, tr, br) {
                mesh.faces.push([a, b, c]);
            }
            if let (Some(a), Some(b), Some(c)) = (tl, br, bl) {
                mesh.faces.push([a, b, c]);
            }
        }
    }

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Built terrain mesh"
    );

    Ok(mesh)
}
