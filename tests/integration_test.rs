// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the pose utilities library

use image::{Rgb, RgbImage};
use ndarray::Array3;
use vnect_utils::skeleton::{VNECT_NUM_JOINTS, VNECT_ROOT};
use vnect_utils::{
    LocationMaps, PoseConfig, Skeleton, decode_pose, generate_heatmap_stack, scale_and_pad,
    scale_and_squareify,
};

const BOX: u32 = 104;
const FACTOR: f64 = 8.0;
const MAP: usize = 13;

fn joint_centers() -> Vec<(f64, f64)> {
    (0..VNECT_NUM_JOINTS)
        .map(|j| ((j % 7 + 3) as f64, (j / 7 + 3) as f64))
        .collect()
}

fn constant_maps() -> LocationMaps {
    let shape = (MAP, MAP, VNECT_NUM_JOINTS);
    LocationMaps::new(
        Array3::from_shape_fn(shape, |(_, _, j)| j as f32 * 0.01),
        Array3::from_shape_fn(shape, |(_, _, j)| j as f32 * -0.02),
        Array3::from_elem(shape, 0.5),
    )
    .unwrap()
}

#[test]
fn test_default_config() {
    let config = PoseConfig::default();
    assert_eq!(config.box_size, 368);
    assert!((config.heatmap_factor - 8.0).abs() < f64::EPSILON);
    assert_eq!(config.skeleton.len(), VNECT_NUM_JOINTS);
    assert_eq!(config.skeleton.root(), VNECT_ROOT);
}

#[test]
fn test_squareify_wide_and_tall() {
    let wide = RgbImage::from_fn(200, 100, |x, _| Rgb([(x % 256) as u8, 0, 0]));
    let squared = scale_and_squareify(&wide, 64).unwrap();
    assert_eq!(squared.dimensions(), (64, 64));

    let tall = RgbImage::from_pixel(50, 100, Rgb([255, 255, 255]));
    let squared = scale_and_squareify(&tall, 64).unwrap();
    assert_eq!(squared.dimensions(), (64, 64));
    // 32 columns of content centered in the box, black elsewhere
    assert_eq!(squared.get_pixel(0, 32), &Rgb([0, 0, 0]));
    assert_eq!(squared.get_pixel(63, 32), &Rgb([0, 0, 0]));
    assert!(squared.get_pixel(32, 32)[0] > 200);
}

#[test]
fn test_squareify_then_pad() {
    let image = RgbImage::from_pixel(120, 90, Rgb([255, 255, 255]));
    let squared = scale_and_squareify(&image, 64).unwrap();
    let padded = scale_and_pad(&squared, 0.5, 128).unwrap();

    assert_eq!(padded.dimensions(), (64, 64));
    assert_eq!(padded.get_pixel(2, 2), &Rgb([128, 128, 128]));
    assert!(padded.get_pixel(32, 32)[0] > 200);
}

#[test]
fn test_decode_pose_end_to_end() {
    let centers = joint_centers();
    let heatmaps = generate_heatmap_stack((MAP, MAP), &centers, 1.0);
    let config = PoseConfig::new().with_box_size(BOX).with_heatmap_factor(FACTOR);

    let pose = decode_pose(&heatmaps, &constant_maps(), &config).unwrap();
    assert_eq!(pose.len(), VNECT_NUM_JOINTS);

    for (j, &(cx, cy)) in centers.iter().enumerate() {
        let (row, col) = pose.joint_2d(j).unwrap();
        let expected_row = cy * FACTOR + 3.5;
        let expected_col = cx * FACTOR + 3.5;
        assert!((row as f64 - expected_row).abs() <= 2.0, "joint {j} row {row}");
        assert!((col as f64 - expected_col).abs() <= 2.0, "joint {j} col {col}");
    }

    assert_eq!(pose.joint_3d(VNECT_ROOT), Some([0.0, 0.0, 0.0]));
    let [x, y, z] = pose.joint_3d(0).unwrap();
    assert!((x - -14.0).abs() < 1e-3);
    assert!((y - 28.0).abs() < 1e-3);
    assert!(z.abs() < 1e-3);
}

#[test]
fn test_limb_segments_follow_skeleton() {
    let heatmaps = generate_heatmap_stack((MAP, MAP), &joint_centers(), 1.0);
    let config = PoseConfig::new().with_box_size(BOX).with_heatmap_factor(FACTOR);
    let pose = decode_pose(&heatmaps, &constant_maps(), &config).unwrap();

    let skeleton = Skeleton::vnect();
    let segments = pose.limb_segments(&skeleton);
    assert_eq!(segments.len(), VNECT_NUM_JOINTS);
    for segment in &segments {
        assert_eq!(Some(segment.parent), skeleton.parent(segment.joint));
    }
}

#[cfg(feature = "annotate")]
#[test]
fn test_render_pose() {
    use vnect_utils::visualizer::ProjectionCanvas;
    use vnect_utils::{draw_limbs_2d, draw_limbs_3d};

    let heatmaps = generate_heatmap_stack((MAP, MAP), &joint_centers(), 1.0);
    let config = PoseConfig::new().with_box_size(BOX).with_heatmap_factor(FACTOR);
    let pose = decode_pose(&heatmaps, &constant_maps(), &config).unwrap();
    let (joints_2d, joints_3d) = pose.into_parts();

    let canvas = RgbImage::new(BOX, BOX);
    let drawn = draw_limbs_2d(&canvas, &joints_2d, &config.skeleton, &config.style);
    let limb = config.style.color.to_rgb();
    assert!(drawn.pixels().any(|p| *p == limb));

    let mut plot = ProjectionCanvas::new(128, 128).with_scale(2.0);
    draw_limbs_3d(&mut plot, &joints_3d, &config.skeleton, &config.style);
    assert!(plot.image().pixels().any(|p| *p != Rgb([255, 255, 255])));
}
