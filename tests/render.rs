use std::io;

use skyray::config::{AspectRatio, RenderConfig};
use skyray::{render, RenderError};

fn render_to_string(config: &RenderConfig) -> String {
    let mut out = vec![];
    render(config, &mut out, io::sink()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn default_render_shape() {
    let text = render_to_string(&RenderConfig::default());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3 + 400 * 225);
    assert_eq!(&lines[..3], &["P3", "400 225", "255"]);
    assert!(text.ends_with('\n'));

    for line in &lines[3..] {
        let channels: Vec<i32> = line.split(' ').map(|c| c.parse().unwrap()).collect();
        assert_eq!(channels.len(), 3);
        assert!(channels.iter().all(|&c| (0..=255).contains(&c)), "{}", line);
    }
}

#[test]
fn gradient_runs_top_to_bottom() {
    let text = render_to_string(&RenderConfig::default());
    let lines: Vec<&str> = text.lines().collect();

    // Blue is saturated everywhere; red fades from sky-blue toward white going
    // down.
    let red = |line: &str| -> i32 { line.split(' ').next().unwrap().parse().unwrap() };
    let top_left = lines[3];
    let bottom_left = lines[3 + 400 * 224];
    assert!(top_left.ends_with(" 255"));
    assert!(red(top_left) < red(bottom_left));

    // Each row shades symmetrically about the vertical center line.
    let row = &lines[3..3 + 400];
    assert_eq!(row[0], row[399]);
}

#[test]
fn repeated_renders_are_identical() {
    let config = RenderConfig {
        image_width: 120,
        ..RenderConfig::default()
    };
    assert_eq!(render_to_string(&config), render_to_string(&config));
}

#[test]
fn parallel_output_matches_sequential() {
    let sequential = RenderConfig::default();
    let parallel = RenderConfig {
        parallel: true,
        ..RenderConfig::default()
    };
    assert_eq!(render_to_string(&sequential), render_to_string(&parallel));
}

#[test]
fn very_wide_image_keeps_one_row() {
    let config = RenderConfig {
        image_width: 10,
        aspect_ratio: AspectRatio::new(100.),
        ..RenderConfig::default()
    };
    let text = render_to_string(&config);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "10 1");
    assert_eq!(lines.len(), 3 + 10);
}

#[test]
fn config_file_drives_render() {
    let path = std::env::temp_dir().join("skyray_config_file_drives_render.toml");
    std::fs::write(
        &path,
        "image_width = 16\naspect_ratio = \"4:3\"\n[sky]\nbottom = [0.0, 0.0, 0.0]\ntop = [0.0, 0.0, 0.0]\n",
    )
    .unwrap();
    let config = RenderConfig::load(&path);
    let _ = std::fs::remove_file(&path);

    let text = render_to_string(&config.unwrap());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], "16 12");
    assert!(lines[3..].iter().all(|&l| l == "0 0 0"));
}

#[test]
fn invalid_config_is_an_error() {
    let config = RenderConfig {
        focal_length: -1.,
        ..RenderConfig::default()
    };
    let mut out = vec![];
    let err = render(&config, &mut out, io::sink()).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig(_)));
}

#[test]
fn shipped_config_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/config.toml");
    assert_eq!(RenderConfig::load(path).unwrap(), RenderConfig::default());
}

#[test]
fn default_render_matches_reference_pixels() {
    let text = render_to_string(&RenderConfig::default());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(text.len(), 1080015);
    assert_eq!(lines[3], "163 200 255");
    assert_eq!(lines[3 + 400 * 112 + 200], "191 217 255");
    assert_eq!(lines[lines.len() - 1], "220 234 255");
}

#[test]
fn degenerate_aspect_ratio_is_rejected_before_allocating() {
    let config = RenderConfig {
        aspect_ratio: AspectRatio::new(1e-300),
        ..RenderConfig::default()
    };
    let mut out = vec![];
    let err = render(&config, &mut out, io::sink()).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig(_)));
    assert!(out.is_empty());
}
