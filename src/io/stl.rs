//! [STL](https://en.wikipedia.org/wiki/STL_(file_format)) mesh sink

use crate::errors::StencilError;
use crate::extrude::Solid;
use crate::triangulated::{Triangulated3D, facet_normal};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use tracing::info;

/// Encoding written by [`write_stl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    Ascii,
    #[default]
    Binary,
}

/// Export to ASCII STL
///
/// ```rust
/// # use gerber_stencil::extrude::Solid;
/// # use gerber_stencil::io::stl::to_stl_ascii;
/// # use gerber_stencil::raster::OccupancyField;
/// let field = OccupancyField::new(2, 2, 0.1);
/// let solid = Solid::extrude(&field, 0.2);
/// let text = to_stl_ascii(&solid, "stencil");
/// assert!(text.starts_with("solid stencil"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|tri| {
        let n = facet_normal(tri);
        out.push_str(&format!(
            "  facet normal {:.6} {:.6} {:.6}\n",
            n.x, n.y, n.z
        ));
        out.push_str("    outer loop\n");
        for p in tri {
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Binary STL has no room for a solid name beyond the 80-byte header, which
/// `stl_io` leaves blank, so `_name` is unused.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T, _name: &str) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri| {
        let n = facet_normal(tri);
        #[allow(clippy::unnecessary_cast)]
        {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            });
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Writes `solid` to `path` in the requested encoding, naming it after the file stem.
pub fn write_stl(
    solid: &Solid,
    path: impl AsRef<Path>,
    format: StlFormat,
) -> Result<(), StencilError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("stencil");
    let bytes = match format {
        StlFormat::Ascii => to_stl_ascii(solid, name).into_bytes(),
        StlFormat::Binary => to_stl_binary(solid, name)?,
    };

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    info!(
        path = %path.display(),
        triangles = solid.triangle_count(),
        ?format,
        "wrote STL"
    );
    Ok(())
}

impl Solid {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self, name: &str) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self, name)
    }
}
