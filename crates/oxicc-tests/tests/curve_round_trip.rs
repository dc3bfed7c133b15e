//! Tone curves read from profiles
//!
//! Whatever encoding a TRC arrives in, the forward and inverse tables of the
//! resulting curve must agree to within one forward-table step.

use std::sync::Arc;

use oxicc_core::lut::{self, GAMMA_LEN, GAMMA_SCALE_FLOAT, INVERSE_GAMMA_LEN, INVERSE_GAMMA_SCALE};
use oxicc_core::math::gamma::srgb_gamma_decode;
use oxicc_core::resources::IccResources;
use oxicc_core::{Curve, KnownCurve, parse};
use oxicc_tests::builder::{curv_gamma, curv_raw_gamma, curv_table, para, sample_curve};
use oxicc_tests::{ProfileBuilder, SRGB_PARAMETERS, SRGB_PRIMARIES};

const TOLERANCE: f32 = 1.0 / GAMMA_SCALE_FLOAT as f32;

/// BT.709 transfer as parametric type 3
const BT709_PARAMETERS: [f64; 5] = [1.0 / 0.45, 1.0 / 1.099, 0.099 / 1.099, 1.0 / 4.5, 0.081];

fn rgb_curve(trc: &[u8]) -> Arc<Curve> {
    let profile = parse(&ProfileBuilder::rgb().matrix_trc(SRGB_PRIMARIES, trc).build());
    Arc::clone(profile.as_matrix_profile().expect("matrix profile").curve())
}

fn grey_curve(trc: &[u8]) -> Arc<Curve> {
    let profile = parse(&ProfileBuilder::grey().tag(b"kTRC", trc).build());
    Arc::clone(profile.as_curve_profile().expect("curve profile").curve())
}

fn assert_round_trips(name: &str, curve: &Curve) {
    assert_eq!(curve.gamma().len(), GAMMA_LEN, "{}", name);
    assert_eq!(curve.inverse_gamma().len(), INVERSE_GAMMA_LEN, "{}", name);

    for j in 0..=GAMMA_SCALE_FLOAT {
        let linear = j as f32 / GAMMA_SCALE_FLOAT as f32;
        let encoded = lut::interpolate(curve.gamma(), GAMMA_SCALE_FLOAT, linear);
        let back = lut::interpolate(curve.inverse_gamma(), INVERSE_GAMMA_SCALE, encoded);
        assert!(
            (back - linear).abs() <= TOLERANCE,
            "{}: {} came back as {}",
            name,
            linear,
            back
        );
    }
}

#[test]
fn test_resource_curves() {
    for (name, bytes) in [
        ("srgb", IccResources::srgb_v4()),
        ("srgb compact", IccResources::srgb_compact()),
        ("sgrey", IccResources::sgrey_v4()),
        ("adobe", IccResources::adobe_rgb_v4()),
        ("adobe compact", IccResources::adobe_rgb_compact()),
        ("p3", IccResources::display_p3_v4()),
        ("p3 compact", IccResources::display_p3_compact()),
    ] {
        let profile = parse(bytes);
        assert_round_trips(name, profile.as_curve_profile().unwrap().curve());
    }
}

#[test]
fn test_power_curves() {
    let gamma_18 = rgb_curve(&curv_gamma(1.8));
    assert_eq!(gamma_18.known(), KnownCurve::Custom);
    assert_round_trips("curv 1.8", &gamma_18);

    let gamma_22 = rgb_curve(&curv_raw_gamma(0x233));
    assert!(Arc::ptr_eq(&gamma_22, &Curve::adobe_rgb()));
    assert_round_trips("curv 2.2", &gamma_22);

    let gamma_26 = grey_curve(&curv_gamma(2.6));
    assert_round_trips("curv 2.6", &gamma_26);
    // u8Fixed8 stores 2.6 as 666/256
    let mid = lut::interpolate(gamma_26.inverse_gamma(), INVERSE_GAMMA_SCALE, 0.5);
    assert!((mid - 0.5f32.powf(666.0 / 256.0)).abs() < 1e-4);

    let para_22 = grey_curve(&para(0, &[2.2]));
    assert!(Arc::ptr_eq(&para_22, &Curve::adobe_rgb()));
}

#[test]
fn test_parametric_curves() {
    let bt709 = rgb_curve(&para(3, &BT709_PARAMETERS));
    assert_eq!(bt709.known(), KnownCurve::Custom);
    assert_round_trips("bt709", &bt709);

    let srgb = rgb_curve(&para(3, &SRGB_PARAMETERS));
    assert!(Arc::ptr_eq(&srgb, &Curve::srgb()));

    // Type 4 with zero offsets is the same function as type 3
    let mut full = SRGB_PARAMETERS.to_vec();
    full.extend([0.0, 0.0]);
    assert!(Arc::ptr_eq(&rgb_curve(&para(4, &full)), &Curve::srgb()));

    let offset = grey_curve(&para(2, &[2.0, 1.0, 0.0, 0.05]));
    assert!((offset.inverse_gamma()[0] - 0.05).abs() < 1e-4);
}

#[test]
fn test_identity_forms_are_linear() {
    for trc in [
        curv_table(&[]),
        curv_raw_gamma(0x100),
        curv_table(&[0, u16::MAX]),
        para(0, &[1.0]),
    ] {
        let profile = parse(&ProfileBuilder::grey().tag(b"kTRC", trc).build());
        let curve = profile.as_curve_profile().unwrap();
        assert!(curve.is_linear());
        assert_round_trips("identity", curve.curve());
    }
}

#[test]
fn test_sampled_curves() {
    let gamma_22 = rgb_curve(&curv_table(&sample_curve(256, |x| x.powf(2.2))));
    assert_eq!(gamma_22.known(), KnownCurve::Custom);
    assert_round_trips("sampled 2.2", &gamma_22);

    let srgb = rgb_curve(&curv_table(&sample_curve(1024, srgb_gamma_decode)));
    assert!(Arc::ptr_eq(&srgb, &Curve::srgb()));

    let decreasing = grey_curve(&curv_table(&sample_curve(64, |x| 1.0 - x)));
    assert_round_trips("decreasing", &decreasing);
    assert!((decreasing.inverse_gamma()[0] - 1.0).abs() < 1e-6);
}
