use tracing::debug;

use crate::config::RenderConfig;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// A pinhole camera at the origin looking down -Z, with its viewport one focal
/// length away.
///
/// All geometry is derived once in `new` and never changes afterwards. Pixel
/// `(0, 0)` is the top-left of the image; row indices grow downward.
#[derive(Clone, Debug)]
pub struct Camera {
    image_width: usize,
    image_height: usize,
    center: Point3,
    viewport_u: Vec3,
    viewport_v: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    viewport_upper_left: Point3,
    pixel00_loc: Point3,
}

impl Camera {
    /// Image height for a given width and nominal aspect ratio, never less
    /// than one row.
    pub fn image_height_for(image_width: usize, aspect_ratio: f64) -> usize {
        ((image_width as f64 / aspect_ratio) as usize).max(1)
    }

    pub fn new(
        image_width: usize,
        aspect_ratio: f64,
        focal_length: f64,
        viewport_height: f64,
    ) -> Self {
        let image_height = Self::image_height_for(image_width, aspect_ratio);

        // Use the real pixel ratio, since the height was rounded down.
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);
        let center = Vec3::default();

        // v points down the image, against world +Y.
        let viewport_u = Vec3(viewport_width, 0., 0.);
        let viewport_v = Vec3(0., -viewport_height, 0.);

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - Vec3(0., 0., focal_length) - viewport_u / 2. - viewport_v / 2.;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        debug!(
            image_width,
            image_height,
            viewport_width,
            viewport_height,
            ?pixel00_loc,
            "camera geometry"
        );

        Camera {
            image_width,
            image_height,
            center,
            viewport_u,
            viewport_v,
            pixel_delta_u,
            pixel_delta_v,
            viewport_upper_left,
            pixel00_loc,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(
            config.image_width,
            config.aspect_ratio.get(),
            config.focal_length,
            config.viewport_height,
        )
    }

    /// Generates the ray through the center of pixel `(i, j)`, where `i` is the
    /// column and `j` the row.
    pub fn get_ray(&self, i: usize, j: usize) -> Ray {
        let pixel_center =
            self.pixel00_loc + (i as f64 * self.pixel_delta_u) + (j as f64 * self.pixel_delta_v);
        Ray::new(self.center, pixel_center - self.center)
    }

    pub fn image_width(&self) -> usize {
        self.image_width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn viewport_u(&self) -> Vec3 {
        self.viewport_u
    }

    pub fn viewport_v(&self) -> Vec3 {
        self.viewport_v
    }

    pub fn pixel_delta_u(&self) -> Vec3 {
        self.pixel_delta_u
    }

    pub fn pixel_delta_v(&self) -> Vec3 {
        self.pixel_delta_v
    }

    pub fn viewport_upper_left(&self) -> Point3 {
        self.viewport_upper_left
    }

    pub fn pixel00_loc(&self) -> Point3 {
        self.pixel00_loc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-12, "{:?} != {:?}", a, b);
    }

    fn default_camera() -> Camera {
        Camera::new(400, 16. / 9., 1., 2.)
    }

    #[test]
    fn default_dimensions() {
        let cam = default_camera();
        assert_eq!(cam.image_width(), 400);
        assert_eq!(cam.image_height(), 225);
        assert_eq!(cam.center(), Vec3::default());
        assert_eq!(cam.viewport_v(), Vec3(0., -2., 0.));
        assert!((cam.viewport_u().x() - 2. * 400. / 225.).abs() < 1e-12);
    }

    #[test]
    fn height_is_floored_and_at_least_one() {
        let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
        for _ in 0..1000 {
            let width = rng.gen_range(1..2000usize);
            let aspect = rng.gen_range(0.01..50.0);
            let expected = ((width as f64 / aspect).floor() as usize).max(1);
            assert_eq!(Camera::image_height_for(width, aspect), expected);
        }
        assert_eq!(Camera::image_height_for(10, 100.), 1);
        assert_eq!(Camera::image_height_for(1, 16. / 9.), 1);
    }

    #[test]
    fn viewport_uses_actual_pixel_ratio() {
        // 10 / (16/9) = 5.625, floored to 5.
        let cam = Camera::new(10, 16. / 9., 1., 2.);
        assert_eq!(cam.image_height(), 5);
        assert!((cam.viewport_u().x() - 4.).abs() < 1e-12);
    }

    #[test]
    fn pixel_deltas_are_orthogonal() {
        let cam = default_camera();
        assert_eq!(cam.pixel_delta_u().dot(cam.pixel_delta_v()), 0.);
    }

    #[test]
    fn first_pixel_is_half_a_step_in() {
        let cam = default_camera();
        assert_close(
            cam.pixel00_loc() - cam.viewport_upper_left(),
            0.5 * (cam.pixel_delta_u() + cam.pixel_delta_v()),
        );
        assert_close(
            cam.viewport_upper_left(),
            Vec3(-cam.viewport_u().x() / 2., 1., -1.),
        );
    }

    #[test]
    fn rays_start_at_center_and_cross_viewport() {
        let cam = Camera::new(400, 16. / 9., 3., 2.);
        let r = cam.get_ray(0, 0);
        assert_eq!(r.origin(), Vec3::default());
        assert_close(r.direction(), cam.pixel00_loc());
        assert_eq!(r.direction().z(), -3.);

        let last = cam.get_ray(399, 224);
        assert_close(
            last.direction(),
            cam.pixel00_loc() + 399. * cam.pixel_delta_u() + 224. * cam.pixel_delta_v(),
        );
        // Opposite corners mirror each other through the view axis.
        assert_close(
            Vec3(-last.direction().x(), -last.direction().y(), last.direction().z()),
            r.direction(),
        );
    }

    #[test]
    fn rows_move_down() {
        let cam = default_camera();
        assert!(cam.get_ray(0, 1).direction().y() < cam.get_ray(0, 0).direction().y());
        assert!(cam.get_ray(1, 0).direction().x() > cam.get_ray(0, 0).direction().x());
    }
}
