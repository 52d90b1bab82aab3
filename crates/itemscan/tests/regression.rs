use itemscan::{gray_view, recognize, CancelToken, SearchParams, Template, TemplateCatalog};
use itemscan_core::{CameraIntrinsics, CameraModel, GrayImage, RadialTangentialDistortion};

/// Pseudo-random texture with structure at every scale.
fn wrench_texture(width: usize, height: usize) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        ((x * 37 + y * 61 + (x * y) % 29) % 233) as u8
    })
}

/// Concentric rings, clearly different from the wrench texture.
fn plier_texture(width: usize, height: usize) -> GrayImage {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let ring = ((dx * dx + dy * dy).sqrt() / 4.0) as usize;
        if ring % 2 == 0 {
            220
        } else {
            40
        }
    })
}

fn paste(dst: &mut GrayImage, src: &GrayImage, ox: usize, oy: usize) {
    for y in 0..src.height {
        for x in 0..src.width {
            dst.data[(oy + y) * dst.width + (ox + x)] = src.data[y * src.width + x];
        }
    }
}

fn scene_with_wrench(width: usize, height: usize, wrench: &GrayImage, at: (usize, usize)) -> GrayImage {
    let mut scene = GrayImage::new(width, height);
    scene.data.fill(128);
    paste(&mut scene, wrench, at.0, at.1);
    scene
}

fn tool_catalog(wrench: GrayImage) -> TemplateCatalog {
    TemplateCatalog::from_templates(vec![
        Template::new("wrench", wrench).unwrap(),
        Template::new("plier", plier_texture(44, 36)).unwrap(),
    ])
}

fn narrowed_params() -> SearchParams {
    SearchParams {
        scale_min: 45,
        scale_max: 55,
        scale_step: 5,
        angle_step_deg: 120,
        ..SearchParams::default()
    }
}

#[test]
fn recognizes_the_pasted_wrench() {
    let wrench = wrench_texture(50, 38);
    let scene = scene_with_wrench(200, 150, &wrench, (110, 70));
    let catalog = tool_catalog(wrench);

    let outcome = recognize(
        &scene.as_view(),
        None,
        &catalog,
        &narrowed_params(),
        &CancelToken::new(),
    )
    .expect("recognition");

    let wrench_count = outcome.matches.get("wrench").unwrap();
    assert!(wrench_count >= 1, "wrench not found: {:?}", outcome.matches);
    assert_eq!(wrench_count, outcome.matches.max_count());
    assert_eq!(outcome.best.name, "wrench");
    assert_eq!(outcome.best.count, wrench_count);
}

#[test]
fn recognition_is_deterministic_across_runs() {
    let wrench = wrench_texture(50, 38);
    let scene = scene_with_wrench(200, 150, &wrench, (60, 40));
    let catalog = tool_catalog(wrench);
    let params = narrowed_params();

    let first = recognize(
        &scene.as_view(),
        None,
        &catalog,
        &params,
        &CancelToken::new(),
    )
    .expect("first run");
    let second = recognize(
        &scene.as_view(),
        None,
        &catalog,
        &params,
        &CancelToken::new(),
    )
    .expect("second run");

    assert_eq!(first, second);
}

#[test]
fn default_grid_finds_a_native_scale_instance() {
    // template pasted at its native 25 px width; the default 20-100 grid
    // passes through width 25 exactly, larger variants simply go degenerate
    // on this small scene
    let wrench = wrench_texture(25, 19);
    let scene = scene_with_wrench(64, 48, &wrench, (20, 15));
    let catalog = TemplateCatalog::from_templates(vec![Template::new("wrench", wrench).unwrap()]);

    let outcome = recognize(
        &scene.as_view(),
        None,
        &catalog,
        &SearchParams::default(),
        &CancelToken::new(),
    )
    .expect("recognition");

    assert!(outcome.matches.get("wrench").unwrap() >= 1);
    assert_eq!(outcome.best.name, "wrench");
}

#[test]
fn undistorted_scene_still_matches_with_a_zero_distortion_camera() {
    let wrench = wrench_texture(50, 38);
    let scene = scene_with_wrench(200, 150, &wrench, (110, 70));
    let catalog = tool_catalog(wrench);
    let camera = CameraModel {
        intrinsics: CameraIntrinsics {
            fx: 400.0,
            fy: 400.0,
            cx: 100.0,
            cy: 75.0,
        },
        distortion: RadialTangentialDistortion::default(),
    };

    let outcome = recognize(
        &scene.as_view(),
        Some(&camera),
        &catalog,
        &narrowed_params(),
        &CancelToken::new(),
    )
    .expect("recognition");

    assert_eq!(outcome.best.name, "wrench");
    assert!(outcome.best.count >= 1);
}

#[test]
fn decoded_png_catalog_runs_end_to_end() {
    use std::io::Cursor;

    let wrench = wrench_texture(50, 38);
    let mut png = Vec::new();
    let buffer =
        image::GrayImage::from_raw(wrench.width as u32, wrench.height as u32, wrench.data.clone())
            .unwrap();
    image::DynamicImage::ImageLuma8(buffer)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let catalog = TemplateCatalog::from_entries(vec![("wrench", png)], true).unwrap();
    let scene = scene_with_wrench(200, 150, &wrench, (80, 60));
    let scene_img =
        image::GrayImage::from_raw(scene.width as u32, scene.height as u32, scene.data.clone())
            .unwrap();

    let outcome = recognize(
        &gray_view(&scene_img),
        None,
        &catalog,
        &narrowed_params(),
        &CancelToken::new(),
    )
    .expect("recognition");

    assert_eq!(outcome.best.name, "wrench");
}
