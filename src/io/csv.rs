// Copyright @yucwang 2026

use std::io;
use std::path::Path;

use crate::core::primitive::DrawPrimitive;
use crate::math::constants::Vector3f;
use crate::math::spectrum::RGBSpectrum;

const HEADER: [&str; 9] = ["kind", "index", "x", "y", "z", "r", "g", "b", "a"];

/// One record per vertex: `kind,index,x,y,z,r,g,b,a`. Quads and polylines
/// share `index` across their vertices.
pub fn write_primitives<W: io::Write>(out: W, primitives: &[DrawPrimitive]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    write_records(&mut writer, primitives)
}

pub fn write_primitives_to_file<P: AsRef<Path>>(path: P, primitives: &[DrawPrimitive]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    write_records(&mut writer, primitives)
}

fn write_records<W: io::Write>(writer: &mut csv::Writer<W>, primitives: &[DrawPrimitive]) -> Result<(), csv::Error> {
    writer.write_record(&HEADER)?;
    for (index, primitive) in primitives.iter().enumerate() {
        match primitive {
            DrawPrimitive::Point(r) => write_vertex(writer, "point", index, &r.position, &r.color, r.alpha)?,
            DrawPrimitive::Quad { corners, color, alpha } => {
                for c in corners.iter() {
                    write_vertex(writer, "quad", index, c, color, *alpha)?;
                }
            }
            DrawPrimitive::Line { from, to, color } => {
                for p in [from, to].iter() {
                    write_vertex(writer, "line", index, p, color, 1.0)?;
                }
            }
            DrawPrimitive::LineLoop { points, color } => {
                for p in points.iter() {
                    write_vertex(writer, "loop", index, p, color, 1.0)?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_vertex<W: io::Write>(
    writer: &mut csv::Writer<W>,
    kind: &str,
    index: usize,
    p: &Vector3f,
    color: &RGBSpectrum,
    alpha: f32,
) -> Result<(), csv::Error> {
    writer.write_record(&[
        kind.to_string(),
        index.to_string(),
        p.x.to_string(),
        p.y.to_string(),
        p.z.to_string(),
        color.r().to_string(),
        color.g().to_string(),
        color.b().to_string(),
        alpha.to_string(),
    ])
}
