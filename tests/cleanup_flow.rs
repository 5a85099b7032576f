use camola_matte::segmentation::{remove_background, Matte, MatteSegmenter, SegmentationModel};
use camola_matte::{
    composite, despill, threshold_cutoff, BackgroundColor, Cleaned, CleanupConfig, EdgeFilter,
    Pipeline, Raster, ThresholdCutoff,
};
use image::{Rgb, RgbImage};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Radial matte: opaque center fading to faint corners
struct DiscModel;

impl SegmentationModel for DiscModel {
    fn segment(&mut self, frame: &RgbImage) -> anyhow::Result<Matte> {
        let (width, height) = frame.dimensions();
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let radius = cx.min(cy);

        Ok((0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    let dist = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
                    (1.5 - dist / radius).clamp(0.0, 1.0)
                })
            })
            .collect())
    }
}

fn gray_frame() -> RgbImage {
    RgbImage::from_pixel(32, 32, Rgb([200, 200, 200]))
}

#[test]
fn reference_scenarios() {
    init_tracing();

    let despilled = despill(&Raster::from_pixel(1, 1, [200, 200, 200, 50]), 0.2).unwrap();
    assert_eq!(despilled.pixel(0, 0), [167, 167, 167, 50]);

    let cut = threshold_cutoff(&Raster::from_pixel(1, 1, [10, 10, 10, 90]), 100).unwrap();
    assert_eq!(cut.pixel(0, 0), [10, 10, 10, 0]);

    let flat = composite(
        &Raster::from_pixel(1, 1, [0, 255, 0, 128]),
        BackgroundColor::new(255, 255, 255, 255),
    );
    assert_eq!(flat.pixel(0, 0), [127, 255, 127, 255]);
}

#[test]
fn both_filter_orders_from_segmenter_output() {
    init_tracing();

    let mut segmenter = MatteSegmenter::new(DiscModel);
    let frame = gray_frame();

    let despill_first = Pipeline::builder()
        .despill(0.1)
        .unwrap()
        .threshold(180)
        .unwrap()
        .build();
    let threshold_first = Pipeline::builder()
        .threshold(180)
        .unwrap()
        .despill(0.1)
        .unwrap()
        .build();

    let a = remove_background(&mut segmenter, &frame, &despill_first).unwrap();
    let b = remove_background(&mut segmenter, &frame, &threshold_first).unwrap();

    // Same alpha either way: despill never touches alpha
    assert_eq!(a.raster().alpha_matte(), b.raster().alpha_matte());

    // Soft pixels that were cut first keep their original color
    let corner_ring = b
        .raster()
        .as_raw()
        .chunks_exact(4)
        .filter(|px| px[3] == 0)
        .all(|px| px[..3] == [200, 200, 200]);
    assert!(corner_ring);
    assert_ne!(a, b);

    // Surviving soft pixels are darkened identically by both orders
    for (pa, pb) in a
        .raster()
        .as_raw()
        .chunks_exact(4)
        .zip(b.raster().as_raw().chunks_exact(4))
    {
        if pa[3] >= 180 {
            assert_eq!(pa, pb);
        }
    }
}

#[test]
fn config_driven_flow_produces_opaque_output() {
    init_tracing();

    let config = CleanupConfig::from_toml_str(
        r#"
        alpha_threshold = 100
        background_color = [255, 255, 255, 255]
        "#,
    )
    .unwrap();
    let pipeline = config.to_pipeline().unwrap();

    let mut segmenter = MatteSegmenter::new(DiscModel);
    let cleaned = remove_background(&mut segmenter, &gray_frame(), &pipeline).unwrap();

    let raster = match cleaned {
        Cleaned::Opaque(raster) => raster,
        Cleaned::Transparent(_) => panic!("expected composited output"),
    };
    assert!(raster.as_raw().chunks_exact(4).all(|px| px[3] == 255));
    // Corner alpha is below the cutoff, so it shows the white backdrop
    assert_eq!(raster.pixel(0, 0), [255, 255, 255, 255]);
    // Center is opaque foreground
    assert_eq!(raster.pixel(16, 16), [200, 200, 200, 255]);
}

#[test]
fn threshold_cutoff_is_idempotent_on_segmented_raster() {
    let mut segmenter = MatteSegmenter::new(DiscModel);
    let raster = remove_background(&mut segmenter, &gray_frame(), &Pipeline::default())
        .unwrap()
        .into_raster();
    assert!(raster.soft_edge_count() > 0);

    let filter = ThresholdCutoff::new(200).unwrap();
    let once = filter.apply(&raster);
    assert_eq!(filter.apply(&once), once);
}
