//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use gerber_stencil::{
    config::RenderConfig,
    extrude::Solid,
    float_types::Real,
    gerber::Drawing,
    raster::{OccupancyField, RasterPlan, Rasterizer},
};
use std::collections::VecDeque;

/// The paste layer from the documentation: one 0.5 mm pad at (10, 10) mm.
pub const SINGLE_PAD: &str = "\
G04 single pad*
%FSLAX24Y24*%
%MOMM*%
%ADD10C,0.5*%
D10*
X100000Y100000D03*
M02*
";

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Parses `text` and renders it with `config`, returning the plan used too.
pub fn render(text: &str, config: &RenderConfig) -> (Drawing, RasterPlan, OccupancyField) {
    let drawing = Drawing::parse_str(text);
    let rasterizer = Rasterizer::new(&drawing, config);
    let plan = rasterizer.plan().expect("plan");
    let field = rasterizer.render().expect("render");
    (drawing, plan, field)
}

/// Counts clear pixels reachable from `(x, y)` through 4-connected clear pixels.
pub fn clear_region_size(field: &OccupancyField, x: usize, y: usize) -> usize {
    if field.is_solid(x, y) {
        return 0;
    }
    let mut seen = vec![false; field.width() * field.height()];
    let mut queue = VecDeque::from([(x, y)]);
    seen[y * field.width() + x] = true;
    let mut count = 0;

    while let Some((x, y)) = queue.pop_front() {
        count += 1;
        let mut visit = |nx: usize, ny: usize| {
            let idx = ny * field.width() + nx;
            if !seen[idx] && !field.is_solid(nx, ny) {
                seen[idx] = true;
                queue.push_back((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < field.width() {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < field.height() {
            visit(x, y + 1);
        }
    }
    count
}

/// Returns `[min_x, min_y, min_z, max_x, max_y, max_z]` of box `i` of `solid`.
pub fn box_extent(solid: &Solid, i: usize) -> [Real; 6] {
    let mut ext = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];
    for tri in solid.box_triangles(i).expect("box index in range") {
        for p in tri {
            ext[0] = ext[0].min(p.x);
            ext[1] = ext[1].min(p.y);
            ext[2] = ext[2].min(p.z);
            ext[3] = ext[3].max(p.x);
            ext[4] = ext[4].max(p.y);
            ext[5] = ext[5].max(p.z);
        }
    }
    ext
}

/// Deterministic checkerboard-ish field with runs of varying length.
pub fn patterned_field(width: usize, height: usize, pitch: Real) -> OccupancyField {
    let rows: Vec<Vec<bool>> = (0..height)
        .map(|y| (0..width).map(|x| (x * 7 + y * 3) % 5 < 3).collect())
        .collect();
    OccupancyField::from_rows(&rows, pitch).expect("rectangular rows")
}
