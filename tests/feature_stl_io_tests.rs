#![cfg(feature = "stl-io")]

mod support;

use gerber_stencil::{
    config::RenderConfig,
    extrude::Solid,
    gerber::Drawing,
    io::stl::{StlFormat, to_stl_ascii, write_stl},
    pipeline::Stencil,
    raster::OccupancyField,
};
use support::SINGLE_PAD;

fn small_solid() -> Solid {
    let rows = vec![vec![true, true, false], vec![false, true, true]];
    let field = OccupancyField::from_rows(&rows, 0.5).unwrap();
    Solid::extrude(&field, 0.2)
}

#[test]
fn solid_to_stl_ascii() {
    let solid = small_solid();
    let stl_str = to_stl_ascii(&solid, "stencil");

    assert!(stl_str.starts_with("solid stencil\n"));
    assert!(stl_str.trim_end().ends_with("endsolid stencil"));
    assert_eq!(stl_str.matches("facet normal").count(), solid.triangle_count());
    assert_eq!(stl_str.matches("vertex").count(), solid.triangle_count() * 3);
    // Bottom faces of the boxes point down.
    assert!(stl_str.contains("facet normal 0.000000 0.000000 -1.000000"));
}

#[test]
fn ascii_preserves_vertex_order() {
    let solid = small_solid();
    let stl_str = solid.to_stl_ascii("order");
    let first = &solid.triangles[0];
    let expected = format!(
        "vertex {:.6} {:.6} {:.6}",
        first[0].x, first[0].y, first[0].z
    );
    let first_vertex = stl_str.lines().find(|l| l.contains("vertex")).unwrap();
    assert_eq!(first_vertex.trim(), expected);
}

#[test]
fn binary_stl_reads_back() -> Result<(), Box<dyn std::error::Error>> {
    let solid = small_solid();
    let bytes = solid.to_stl_binary("stencil")?;
    // 80-byte header, 4-byte count, 50 bytes per triangle.
    assert_eq!(bytes.len(), 84 + 50 * solid.triangle_count());

    let mesh = stl_io::read_stl(&mut std::io::Cursor::new(bytes))?;
    assert_eq!(mesh.faces.len(), solid.triangle_count());
    Ok(())
}

#[test]
fn write_stl_to_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let stencil = Stencil::generate(&Drawing::parse_str(SINGLE_PAD), &RenderConfig::default())?;

    let binary = dir.path().join("pad.stl");
    write_stl(&stencil.solid, &binary, StlFormat::Binary)?;
    let mut file = std::fs::File::open(&binary)?;
    let mesh = stl_io::read_stl(&mut file)?;
    assert_eq!(mesh.faces.len(), stencil.solid.triangle_count());

    let ascii = dir.path().join("pad_ascii.stl");
    write_stl(&stencil.solid, &ascii, StlFormat::Ascii)?;
    let text = std::fs::read_to_string(&ascii)?;
    assert!(text.starts_with("solid pad_ascii"));

    let unwritable = dir.path().join("missing").join("pad.stl");
    assert!(write_stl(&stencil.solid, &unwritable, StlFormat::Binary).is_err());
    Ok(())
}
