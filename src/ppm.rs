//! Plain-text PPM (`P3`) output.

use std::io::{self, Write};

use crate::vec3::{Channel::*, Color};
use crate::Image;

/// Scales a `[0,1]` channel value to `[0,255]`, truncating.
///
/// Nothing is clamped: values outside `[0,1]` give bytes outside `[0,255]`.
/// NaN becomes 0 and infinities saturate, per Rust's float-to-int cast.
#[inline]
pub fn to_byte(x: f64) -> i32 {
    (255.999 * x) as i32
}

pub fn write_header(out: &mut impl Write, width: usize, height: usize) -> io::Result<()> {
    write!(out, "P3\n{} {}\n255\n", width, height)
}

/// Writes one pixel as `r g b` on its own line.
pub fn write_color(out: &mut impl Write, color: Color) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {}",
        to_byte(color[R]),
        to_byte(color[G]),
        to_byte(color[B])
    )
}

/// Writes `image` as a complete PPM: header, then every pixel in row-major
/// order starting at the top left.
pub fn write_ppm(out: &mut impl Write, image: &Image) -> io::Result<()> {
    write_header(out, image.width(), image.height())?;
    for scanline in image.rows() {
        for &col in scanline {
            write_color(out, col)?;
        }
    }
    out.flush()
}
