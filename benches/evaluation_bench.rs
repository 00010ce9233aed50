use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use groundforge::distance::DistanceSet;
use groundforge::ensemble::{MultiModel2004, MultiModelInputs};
use groundforge::geo::{self, GeoPoint};
use groundforge::models::{Imt, ModelEvaluator, StdDevType};
use groundforge::prob::SigmaTruncation;
use groundforge::surface::RuptureSurface;

fn setup_surface() -> RuptureSurface {
    let a = GeoPoint::new(34.0, -118.5, 2.0);
    let b = geo::destination(&a, 1.2, 42.0, 0.0);
    RuptureSurface::planar(&[a, b], 40.0, 14.0, 1.0).expect("valid surface")
}

fn scattered_sites(n: usize) -> Vec<GeoPoint> {
    fastrand::seed(7);
    (0..n)
        .map(|_| {
            GeoPoint::surface(
                33.5 + fastrand::f64() * 1.5,
                -119.0 + fastrand::f64() * 1.5,
            )
        })
        .collect()
}

fn inputs_for(surface: &RuptureSurface, site: &GeoPoint) -> MultiModelInputs {
    let ds = DistanceSet::compute(surface, site);
    MultiModelInputs {
        mag: 7.1,
        rake_deg: 90.0,
        dip_deg: surface.ave_dip,
        r_rup: ds.r_rup,
        r_jb: ds.r_jb,
        r_seis: ds.r_seis,
        on_hanging_wall: ds.hanging_wall,
        hanging_wall_taper: ds.hanging_wall_taper,
        vs30: 400.0,
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let surface = setup_surface();
    let sites = scattered_sites(256);
    let ensemble = MultiModel2004::new().expect("Failed to build the roster");

    c.bench_function("distance_set (256 sites)", |b| {
        b.iter(|| {
            for site in &sites {
                black_box(DistanceSet::compute(black_box(&surface), site));
            }
        })
    });

    let inputs: Vec<MultiModelInputs> = sites.iter().map(|s| inputs_for(&surface, s)).collect();

    c.bench_function("multi_model_mean (256 sites)", |b| {
        b.iter(|| {
            for s in &inputs {
                black_box(ensemble.mean(black_box(s), Imt::Sa(1.0)).unwrap());
            }
        })
    });

    c.bench_function("multi_model_exceed_curve", |b| {
        let levels: Vec<f64> = (0..20).map(|i| -6.0 + i as f64 * 0.3).collect();
        let s = &inputs[0];
        b.iter(|| {
            black_box(
                ensemble
                    .exceed_curve(
                        black_box(s),
                        Imt::Pga,
                        &levels,
                        StdDevType::Total,
                        SigmaTruncation::TwoSided(3.0),
                    )
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
