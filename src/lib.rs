#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod error;
pub mod ppm;
mod progress;
pub mod ray;
pub mod sky;
pub mod vec3;

use std::io::Write;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

pub use crate::camera::Camera;
pub use crate::config::RenderConfig;
pub use crate::error::{ConfigError, RenderError};
pub use crate::progress::Progress;
pub use crate::sky::Sky;
use crate::vec3::Color;

/// A rendered image, stored as rows of pixels from the top down.
#[derive(Clone, Debug, PartialEq)]
pub struct Image(Vec<Vec<Color>>);

impl Image {
    /// Evaluates `f(x, y)` for every pixel, spreading rows across the rayon
    /// pool. Rows still come back in top-to-bottom order.
    pub fn par_compute<W: Write + Send>(
        nx: usize,
        ny: usize,
        progress: &Progress<W>,
        f: impl Fn(usize, usize) -> Color + Sync,
    ) -> Image {
        Image(
            (0..ny)
                .into_par_iter()
                .map(|y| {
                    progress.scanline();
                    (0..nx).map(|x| f(x, y)).collect()
                })
                .collect(),
        )
    }

    pub fn compute<W: Write + Send>(
        nx: usize,
        ny: usize,
        progress: &Progress<W>,
        mut f: impl FnMut(usize, usize) -> Color,
    ) -> Image {
        Image(
            (0..ny)
                .map(|y| {
                    progress.scanline();
                    (0..nx).map(|x| f(x, y)).collect()
                })
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.0.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.0.iter().map(Vec::as_slice)
    }
}

/// Shades one ray per pixel center, in parallel.
pub fn par_cast<W: Write + Send>(camera: &Camera, sky: &Sky, progress: &Progress<W>) -> Image {
    Image::par_compute(camera.image_width(), camera.image_height(), progress, |x, y| {
        sky.ray_color(&camera.get_ray(x, y))
    })
}

/// Shades one ray per pixel center, one pixel at a time.
pub fn cast<W: Write + Send>(camera: &Camera, sky: &Sky, progress: &Progress<W>) -> Image {
    Image::compute(camera.image_width(), camera.image_height(), progress, |x, y| {
        sky.ray_color(&camera.get_ray(x, y))
    })
}

/// Renders the image described by `config` and writes it to `out` as a PPM.
///
/// Scanline progress goes to `progress_sink`; pass `std::io::sink()` to
/// discard it.
pub fn render(
    config: &RenderConfig,
    out: &mut impl Write,
    progress_sink: impl Write + Send,
) -> Result<(), RenderError> {
    config.validate()?;

    let camera = Camera::from_config(config);
    let sky = Sky::from(&config.sky);
    info!(
        width = camera.image_width(),
        height = camera.image_height(),
        parallel = config.parallel,
        "rendering"
    );

    let progress = Progress::new(camera.image_height(), progress_sink);
    let start = Instant::now();
    let image = if config.parallel {
        par_cast(&camera, &sky, &progress)
    } else {
        cast(&camera, &sky, &progress)
    };
    debug!(elapsed = ?start.elapsed(), "image computed");

    ppm::write_ppm(out, &image)?;
    progress.finish();
    Ok(())
}
