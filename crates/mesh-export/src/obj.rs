//! Wavefront OBJ writer.
//!
//! OBJ viewers treat the second coordinate as "up", so vertices are written
//! as `v x z y`. Face indices are 1-based.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dem_common::Grid;
use tracing::info;

use crate::error::Result;
use crate::mesh::{build_mesh, MeshOptions, TerrainMesh};

/// Object name written to the `o` line.
pub const OBJECT_NAME: &str = "terrain";

/// Write `mesh` as OBJ text.
pub fn write_obj<W: Write>(mesh: &TerrainMesh, mut writer: W) -> Result<()> {
    writeln!(writer, "# dem-tools terrain mesh")?;
    writeln!(writer, "o {}", OBJECT_NAME)?;

    writeln!(writer)?;
    writeln!(writer, "# vertices")?;
    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.z, v.y)?;
    }

    writeln!(writer)?;
    writeln!(writer, "# faces")?;
    for [a, b, c] in &mesh.faces {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }

    writer.flush()?;
    Ok(())
}

/// Build the mesh for `grid` and write it to `path`.
pub fn generate_obj(
    grid: &Grid,
    path: impl AsRef<Path>,
    exaggeration: f64,
    base_offset: f64,
) -> Result<TerrainMesh> {
    let path = path.as_ref();
    let options = MeshOptions {
        exaggeration,
        base_offset,
    };
    let mesh = build_mesh(grid, &options)?;

    let file = BufWriter::new(File::create(path)?);
    write_obj(&mesh, file)?;

    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Wrote OBJ mesh"
    );
    Ok(mesh)
}
