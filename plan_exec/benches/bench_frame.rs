//! # Plan Display Frame Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::nav::{Plan, PlanPosition, PlanTrack};
use nalgebra::{Similarity3, Translation3, UnitQuaternion};
use plan_lib::{
    config::{DrawStyle, PlanDisplaySettings},
    plugin::draw_frame,
    render::{PrimitiveList, RasterCanvas, Rgba},
    route::{arc_length_at, interpolate_position, prepare_for_display},
    tf::{StaticTransforms, Transform},
};

fn frame_benchmark(c: &mut Criterion) {
    // ---- Build a long winding plan ----

    let xy: Vec<(f64, f64)> = (0..2000)
        .map(|i| {
            let t = i as f64 * 0.05;
            (t * 2.0, (t * 0.7).sin() * 20.0)
        })
        .collect();
    let mut plan = Plan::from_xy("bench", &xy);
    plan.header.frame_id = "/odom".into();

    let track = PlanTrack::new("bench", PlanPosition::along(150.0));

    let mut tf = StaticTransforms::new("/map");
    tf.insert(
        "/odom",
        Similarity3::from_parts(
            Translation3::new(100.0, -40.0, 0.0),
            UnitQuaternion::from_euler_angles(0.0, 0.0, 0.3),
            1.0,
        ),
    );

    let settings = PlanDisplaySettings {
        draw_style: DrawStyle::points_and_lines(),
        ..Default::default()
    };

    // ---- Geometry only ----

    let transform = Transform::Similarity(Similarity3::from_parts(
        Translation3::new(100.0, -40.0, 0.0),
        UnitQuaternion::from_euler_angles(0.0, 0.0, 0.3),
        1.0,
    ));

    c.bench_function("route::prepare_for_display", |b| {
        b.iter(|| prepare_for_display(black_box(&plan), &transform, "/map"))
    });

    let display_plan = prepare_for_display(&plan, &transform, "/map");
    c.bench_function("route::interpolate_position", |b| {
        b.iter(|| {
            let d = arc_length_at(&display_plan, black_box(&track.plan_position));
            interpolate_position(&display_plan, d, true)
        })
    });

    // ---- Whole frames ----

    c.bench_function("draw_frame::primitive_list", |b| {
        b.iter(|| {
            let mut canvas = PrimitiveList::new();
            draw_frame(&mut canvas, &tf, Some(&plan), Some(&track), &settings).unwrap()
        })
    });

    let mut raster = RasterCanvas::new(800, 600, Rgba::WHITE);
    c.bench_function("draw_frame::raster", |b| {
        b.iter(|| {
            use plan_lib::render::Canvas;
            raster.set_view(200.0, 0.0, 0.5);
            draw_frame(&mut raster, &tf, Some(&plan), Some(&track), &settings).unwrap()
        })
    });
}

criterion_group!(benches, frame_benchmark);
criterion_main!(benches);
