use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use ptzgaze_camera::{CameraIntrinsics, PinholeProjector, Pixel, RadTanDistortion, UndistortMode};
use ptzgaze_orient::{
    angular_distance, normalize, pan_tilt_from_rotation, rotation_from_pan_tilt, GazeResolver,
    GimbalProfile, OrientError, OrientationAngles,
};

const FRAME_WIDTH: i32 = 2592;
const FRAME_HEIGHT: i32 = 1520;

fn reference_intrinsics() -> Result<CameraIntrinsics, OrientError> {
    let k = [
        [2338.9152623521627, 0.0, 1297.4678987212778],
        [0.0, 2338.5344212108994, 743.3445529777781],
        [0.0, 0.0, 1.0],
    ];
    let coeffs = [
        0.03413359728013275,
        0.20648704610948337,
        -0.0006930691652865927,
        -0.0020291504344734992,
    ];
    Ok(CameraIntrinsics::from_matrix(&k, coeffs)?)
}

fn reference_resolver() -> Result<GazeResolver, OrientError> {
    Ok(GazeResolver::new(
        PinholeProjector::new(reference_intrinsics()?),
        GimbalProfile::default(),
    ))
}

#[test]
fn test_reference_scenarios() -> Result<(), OrientError> {
    let resolver = reference_resolver()?;
    let home = OrientationAngles::new(0.0, 0.0);

    // (pixel, expected tilt, expected pan)
    let scenarios = [
        ((1104, 485), -6.0, 4.5),
        ((2406, 511), -5.0, 335.0),
        ((2560, 954), 4.5, 332.3),
        ((790, 1139), 10.0, 12.0),
    ];

    for ((x, y), tilt, pan) in scenarios {
        let target = resolver.resolve(Pixel::new(x, y), &home)?;
        assert!(
            angular_distance(target.pan, pan) < 1.0,
            "pixel ({x}, {y}): pan {} expected {pan}",
            target.pan
        );
        assert!(
            (target.tilt - tilt).abs() < 1.0,
            "pixel ({x}, {y}): tilt {} expected {tilt}",
            target.tilt
        );
    }
    Ok(())
}

#[test]
fn test_principal_point_from_home() -> Result<(), OrientError> {
    let intrinsics_set = [
        reference_intrinsics()?,
        CameraIntrinsics::new(500.0, 520.0, 321.7, 239.2, RadTanDistortion::none())?,
        CameraIntrinsics::new(8000.0, 7900.0, 1920.3, 1080.9, RadTanDistortion::none())?,
    ];
    for intrinsics in intrinsics_set {
        let resolver = GazeResolver::new(PinholeProjector::new(intrinsics), GimbalProfile::default());
        let (cx, cy) = intrinsics.principal_point();
        let target = resolver.resolve_point(cx, cy, &OrientationAngles::default())?;
        assert!(angular_distance(target.pan, 0.0) < 0.05);
        assert_abs_diff_eq!(target.tilt, 0.0, epsilon = 0.05);
    }
    Ok(())
}

#[test]
fn test_nearest_pixel_to_center_from_home() -> Result<(), OrientError> {
    let resolver = reference_resolver()?;
    let target = resolver.resolve(Pixel::new(1297, 743), &OrientationAngles::default())?;
    assert!(angular_distance(target.pan, 0.0) < 0.05);
    assert_abs_diff_eq!(target.tilt, 0.0, epsilon = 0.05);
    Ok(())
}

#[test]
fn test_direction_conventions() -> Result<(), OrientError> {
    let resolver = reference_resolver()?;
    let home = OrientationAngles::default();

    // left of the center turns pan up from zero, right of it wraps below 360
    let left = resolver.resolve(Pixel::new(1000, 743), &home)?;
    assert!(left.pan > 0.0 && left.pan < 180.0);
    let right = resolver.resolve(Pixel::new(1600, 743), &home)?;
    assert!(right.pan > 180.0 && right.pan < 360.0);

    // below the center tilts down
    let below = resolver.resolve(Pixel::new(1297, 1000), &home)?;
    assert!(below.tilt > 0.0);
    let above = resolver.resolve(Pixel::new(1297, 500), &home)?;
    assert!(above.tilt < 0.0);
    Ok(())
}

#[test]
fn test_clicking_gaze_point_keeps_orientation() -> Result<(), OrientError> {
    let resolver = reference_resolver()?;
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let current = OrientationAngles::new(rng.random_range(0.0..360.0), rng.random_range(-15.0..=90.0));
        let (u, v) = resolver
            .gaze_pixel(&current, &current)
            .expect("the optical axis is in front of the camera");
        let target = resolver.resolve_point(u, v, &current)?;
        assert!(angular_distance(target.pan, current.pan) < 0.05);
        assert_abs_diff_eq!(target.tilt, current.tilt, epsilon = 0.05);
    }
    Ok(())
}

#[test]
fn test_clicking_gaze_point_looking_straight_down() -> Result<(), OrientError> {
    let resolver = reference_resolver()?;

    for pan in [0.0, 37.0, 123.0, 250.0, 359.0] {
        let current = OrientationAngles::new(pan, 90.0);
        let (u, v) = resolver
            .gaze_pixel(&current, &current)
            .expect("the optical axis is in front of the camera");
        let target = resolver.resolve_point(u, v, &current)?;
        assert!(
            angular_distance(target.pan, pan) < 0.05,
            "{current:?} moved to {target:?}"
        );
        assert_abs_diff_eq!(target.tilt, 90.0, epsilon = 0.05);
    }
    Ok(())
}

#[test]
fn test_compose_extract_consistency_at_vertical() -> Result<(), OrientError> {
    let profile = GimbalProfile::default();
    for pan in [0.0, 90.0, 181.5, 359.9] {
        let rotation = rotation_from_pan_tilt(&OrientationAngles::new(pan, 90.0));
        let angles = normalize(&pan_tilt_from_rotation(&rotation), &profile)?;
        assert!(angular_distance(angles.pan, pan) < 1e-9, "{pan} -> {}", angles.pan);
        assert_abs_diff_eq!(angles.tilt, 90.0, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn test_far_out_of_frame_click_with_undistortion() -> Result<(), OrientError> {
    let projector = PinholeProjector::new(reference_intrinsics()?).with_undistort(UndistortMode::iterative());
    let resolver = GazeResolver::new(projector, GimbalProfile::default());
    let home = OrientationAngles::default();

    for pixel in [Pixel::new(-5000, -5000), Pixel::new(8000, 743)] {
        let target = resolver.resolve(pixel, &home)?;
        assert!(resolver.profile().contains(&target), "{pixel:?} gave {target:?}");
    }

    // the click to the right still turns the camera to the right
    let target = resolver.resolve(Pixel::new(8000, 743), &home)?;
    assert!(target.pan > 180.0);
    Ok(())
}

#[test]
fn test_randomized_output_range() -> Result<(), OrientError> {
    let resolver = reference_resolver()?;
    let profile = *resolver.profile();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let current = OrientationAngles::new(rng.random_range(0.0..360.0), rng.random_range(-15.0..=90.0));
        let pixel = Pixel::new(
            rng.random_range(0..FRAME_WIDTH),
            rng.random_range(0..FRAME_HEIGHT),
        );
        let target = resolver.resolve(pixel, &current)?;
        assert!(
            profile.contains(&target),
            "{pixel:?} from {current:?} gave {target:?}"
        );
    }
    Ok(())
}

#[test]
fn test_randomized_reprojection() -> Result<(), OrientError> {
    let resolver = reference_resolver()?;
    let profile = *resolver.profile();
    let mut rng = StdRng::seed_from_u64(1234);

    let mut checked = 0;
    for _ in 0..500 {
        let current = OrientationAngles::new(rng.random_range(0.0..360.0), rng.random_range(-15.0..=90.0));
        let pixel = Pixel::new(
            rng.random_range(0..FRAME_WIDTH),
            rng.random_range(0..FRAME_HEIGHT),
        );
        let target = resolver.resolve(pixel, &current)?;

        // clamped targets no longer center the click
        if target.tilt <= profile.tilt_min() || target.tilt >= profile.tilt_max() - 1e-6 {
            continue;
        }

        let (u, v) = resolver
            .gaze_pixel(&current, &target)
            .expect("the clicked point is in front of the camera");
        assert_abs_diff_eq!(u, pixel.x as f64, epsilon = 1e-6);
        assert_abs_diff_eq!(v, pixel.y as f64, epsilon = 1e-6);
        checked += 1;
    }
    assert!(checked > 100);
    Ok(())
}

#[test]
fn test_compose_extract_consistency() -> Result<(), OrientError> {
    let profile = GimbalProfile::default();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..500 {
        let pan = rng.random_range(0.0..360.0);
        let tilt = rng.random_range(-15.0..=90.0);
        let rotation = rotation_from_pan_tilt(&OrientationAngles::new(pan, tilt));
        let angles = normalize(&pan_tilt_from_rotation(&rotation), &profile)?;
        // pan is poorly conditioned right next to the vertical
        assert!(angular_distance(angles.pan, pan) < 1e-6, "{pan} -> {}", angles.pan);
        assert_abs_diff_eq!(angles.tilt, tilt, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn test_successive_clicks_agree_on_world_point() -> Result<(), OrientError> {
    let resolver = reference_resolver()?;
    let home = OrientationAngles::new(20.0, 10.0);

    // aim at a first point, then click where a second point now appears
    let first = resolver.resolve(Pixel::new(400, 300), &home)?;
    let second = resolver.resolve(Pixel::new(2000, 1200), &home)?;

    let (u, v) = resolver
        .gaze_pixel(&first, &second)
        .expect("the second point is still in front of the camera");
    let again = resolver.resolve_point(u, v, &first)?;

    assert!(angular_distance(again.pan, second.pan) < 1e-6);
    assert_abs_diff_eq!(again.tilt, second.tilt, epsilon = 1e-6);
    Ok(())
}
