//! Cross-component conditioning scenarios on synthetic terrain.

use approx::assert_relative_eq;
use geo_types::line_string;
use hydroburn_adjust::burn::burn_lines;
use hydroburn_adjust::interpolate::RasterInterpolator;
use hydroburn_adjust::sampling::{sample_line_z, SamplingParams};
use hydroburn_adjust::window::{extract_window, WindowParams};
use hydroburn_adjust::workflow::{condition_dtm, ConditionParams};
use hydroburn_core::raster::{BoundingBox, GeoTransform, Raster};
use hydroburn_core::vector::{LineZ, Point3};

/// Rolling synthetic terrain, 1 map unit per pixel
fn terrain(rows: usize, cols: usize) -> Raster<f64> {
    let mut raster = Raster::new(rows, cols);
    raster.set_transform(GeoTransform::new(0.0, rows as f64, 1.0, -1.0));
    raster.set_nodata(Some(-9999.0));
    for row in 0..rows {
        for col in 0..cols {
            let (x, y) = raster.pixel_to_geo(col, row);
            let z = 50.0 + 5.0 * (x * 0.3).sin() + 3.0 * (y * 0.2).cos() + 0.1 * x;
            raster.set(row, col, z).unwrap();
        }
    }
    raster
}

#[test]
fn window_sampling_matches_direct_sampling() {
    let source = terrain(40, 40);
    let bbox = BoundingBox::new(10.3, 17.8, 21.2, 28.9);

    let window = extract_window(&source, &bbox, &WindowParams { margin_pixels: 2 }).unwrap();

    let direct = RasterInterpolator::new(&source).unwrap();
    let windowed = RasterInterpolator::new(&window).unwrap();

    // Corners and center of the box sample identically from the window
    // copy and from the full raster
    let center = bbox.center();
    let queries = [
        (bbox.x_min, bbox.y_min),
        (bbox.x_min, bbox.y_max),
        (bbox.x_max, bbox.y_min),
        (bbox.x_max, bbox.y_max),
        (center.x, center.y),
    ];

    for (x, y) in queries {
        let from_source = direct.sample_one(x, y);
        let from_window = windowed.sample_one(x, y);
        assert!(from_source.is_finite());
        assert_relative_eq!(from_window, from_source, epsilon = 1e-10);
    }
}

#[test]
fn sampled_line_burns_back_to_terrain_elevation() {
    let source = terrain(40, 40);
    let line = line_string![(x: 5.0, y: 20.3), (x: 15.0, y: 20.3)];

    let sampled = sample_line_z(&source, &line, &SamplingParams::default())
        .unwrap()
        .unwrap();

    // Endpoint elevations come from the terrain itself
    let direct = RasterInterpolator::new(&source).unwrap();
    assert_relative_eq!(
        sampled.points()[0].z,
        direct.sample_one(5.0, 20.3),
        epsilon = 1e-10
    );

    let mut conditioned = source.clone();
    let burned = burn_lines(&mut conditioned, &[sampled.clone()]).unwrap();
    assert_eq!(burned, 1);

    // Burned cells now interpolate between the endpoint elevations
    let z0 = sampled.points()[0].z;
    let z1 = sampled.points()[1].z;
    let (lo, hi) = if z0 <= z1 { (z0, z1) } else { (z1, z0) };
    let row = 19; // map y = 20.3 lands in this row
    for col in 5..15 {
        let z = conditioned.get(row, col).unwrap();
        assert!(z >= lo && z <= hi, "col {} burned to {} outside [{}, {}]", col, z, lo, hi);
    }
}

#[test]
fn elevation_ramp_scenario() {
    // 10x10 grid, origin (0,0), 1x1 pixels with rows counting up in y,
    // all elevation 100
    let mut raster = Raster::filled(10, 10, 100.0);
    raster.set_transform(GeoTransform::new(0.0, 0.0, 1.0, 1.0));

    let line = LineZ::segment(Point3::new(0.5, 0.5, 10.0), Point3::new(9.5, 0.5, 20.0));
    let burned = burn_lines(&mut raster, &[line]).unwrap();
    assert_eq!(burned, 1);

    let mut previous = 10.0;
    for col in 0..10 {
        let z = raster.get(0, col).unwrap();
        assert!(
            (10.0..=20.0).contains(&z),
            "ramp cell {} out of range: {}",
            col,
            z
        );
        assert!(z >= previous);
        previous = z;
    }
    for row in 1..10 {
        for col in 0..10 {
            assert_eq!(raster.get(row, col).unwrap(), 100.0);
        }
    }
}

#[test]
fn full_conditioning_carves_a_channel_through_a_bank() {
    // Flat valley at 10 with a raised bank (an embankment carrying a road)
    // cutting across it at columns 9..11
    let mut dtm = Raster::filled(30, 30, 10.0);
    dtm.set_transform(GeoTransform::new(0.0, 30.0, 1.0, -1.0));
    for row in 0..30 {
        for col in 9..12 {
            dtm.set(row, col, 18.0).unwrap();
        }
    }

    // A culvert crossing the bank, endpoints on the valley floor
    let lines = vec![line_string![(x: 7.5, y: 15.5), (x: 13.5, y: 15.5)]];

    let (conditioned, report) =
        condition_dtm(&dtm, &lines, &[], &ConditionParams::default()).unwrap();

    assert_eq!(report.line_stats.kept, 1);
    assert_eq!(report.lines_burned, 1);

    // The bank cells along the crossing now carry valley-floor elevation:
    // water can flow through
    let row = 14; // map y = 15.5 -> row 14
    for col in 9..12 {
        let z = conditioned.get(row, col).unwrap();
        assert!(z <= 10.0 + 1e-9, "bank not carved at col {}: {}", col, z);
    }

    // Away from the crossing the bank still stands
    assert_eq!(conditioned.get(5, 10).unwrap(), 18.0);
    // And the source DTM is untouched
    assert_eq!(dtm.get(14, 10).unwrap(), 18.0);
}
