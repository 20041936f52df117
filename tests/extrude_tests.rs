mod support;

use approx::assert_relative_eq;
use gerber_stencil::{
    extrude::{ExtrudeOps, SerialExtrudeOps, Solid, row_runs},
    float_types::Real,
    raster::OccupancyField,
    triangulated::facet_normal,
};
use support::{box_extent, patterned_field};

const PITCH: Real = 0.0254;

#[test]
fn row_run_merging_is_lossless() {
    let field = patterned_field(37, 23, PITCH);
    let solid = Solid::extrude(&field, 0.2);

    let runs: usize = field.rows().map(|row| row_runs(row).len()).sum();
    assert_eq!(solid.box_count, runs);
    assert_eq!(solid.triangle_count(), runs * Solid::TRIANGLES_PER_BOX);

    let area_px: Real = (0..solid.box_count)
        .map(|i| {
            let e = box_extent(&solid, i);
            (e[3] - e[0]) * (e[4] - e[1]) / (PITCH * PITCH)
        })
        .sum();
    assert_relative_eq!(area_px, field.solid_count() as Real, max_relative = 1e-6);
}

#[test]
fn every_box_is_closed_with_six_faces() {
    let field = patterned_field(12, 9, PITCH);
    let solid = Solid::extrude(&field, 0.15);

    for i in 0..solid.box_count {
        let tris = solid.box_triangles(i).unwrap();
        assert_eq!(tris.len(), 12);

        let mut normals: Vec<[i8; 3]> = tris
            .iter()
            .map(|t| {
                let n = facet_normal(t);
                [n.x.round() as i8, n.y.round() as i8, n.z.round() as i8]
            })
            .collect();
        normals.sort();
        normals.dedup();
        assert_eq!(normals.len(), 6, "box {i} normals {normals:?}");
    }
    assert!(solid.is_watertight());
}

#[test]
fn normals_point_outward() {
    let field = OccupancyField::new(1, 1, 1.0);
    let solid = Solid::extrude(&field, 1.0);
    let center = nalgebra::Point3::new(0.5, 0.5, 0.5);

    for tri in &solid.triangles {
        let centroid = (tri[0].coords + tri[1].coords + tri[2].coords) / 3.0;
        let outward = centroid - center.coords;
        assert!(facet_normal(tri).dot(&outward) > 0.0);
    }
}

#[test]
fn solid_keeps_drawing_orientation() {
    // Only the top-left pixel is material.
    let rows = vec![vec![true, false], vec![false, false]];
    let field = OccupancyField::from_rows(&rows, 1.0).unwrap();
    let solid = Solid::extrude(&field, 0.5);

    let (min, max) = solid.bounding_box().unwrap();
    assert_eq!((min.x, min.y, min.z), (0.0, 1.0, 0.0));
    assert_eq!((max.x, max.y, max.z), (1.0, 2.0, 0.5));
}

#[test]
fn volume_matches_material() {
    let field = patterned_field(20, 10, PITCH);
    let height = 0.2;
    let solid = Solid::extrude(&field, height);
    let expected = field.solid_count() as Real * PITCH * PITCH * height;
    assert_relative_eq!(solid.volume(), expected, max_relative = 1e-6);
}

#[test]
fn full_rows_become_single_boxes() {
    let field = OccupancyField::new(64, 5, PITCH);
    let solid = Solid::extrude(&field, 0.2);
    assert_eq!(solid.box_count, 5);
    assert_eq!(solid.triangle_count(), 60);
}

#[test]
fn cleared_field_gives_empty_solid() {
    let mut field = OccupancyField::new(8, 8, PITCH);
    field.fill_rect(0, 0, 8, 8, false);
    let solid = Solid::extrude(&field, 0.2);
    assert!(solid.is_empty());
    assert_eq!(solid.bounding_box(), None);
    assert_eq!(solid.volume(), 0.0);
}

#[test]
fn ops_trait_matches_solid_extrude() {
    let field = patterned_field(16, 16, PITCH);
    let via_ops = SerialExtrudeOps::new().extrude(&field, 0.3);
    assert_eq!(via_ops, Solid::extrude(&field, 0.3));
}
