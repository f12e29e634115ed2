//! Unit tests for min-max scaling

use sagefin::forecast::MinMaxScaler;

use crate::common::price_series;

#[test]
fn test_round_trip_reconstructs_closes() {
    let closes = price_series("AAPL", 500).closes();
    let scaler = MinMaxScaler::fit(&closes).unwrap();
    let restored = scaler.inverse_transform(&scaler.transform(&closes));
    for (original, back) in closes.iter().zip(&restored) {
        assert!((original - back).abs() < 1e-9, "{} vs {}", original, back);
    }
}

#[test]
fn test_scaled_values_stay_in_unit_range() {
    let closes = price_series("AAPL", 200).closes();
    let scaler = MinMaxScaler::fit(&closes).unwrap();
    let scaled = scaler.transform(&closes);
    assert!(scaled.iter().all(|v| (-1e-12..=1.0 + 1e-12).contains(v)));
    assert!(scaled.iter().any(|&v| v.abs() < 1e-12));
    assert!(scaled.iter().any(|&v| (v - 1.0).abs() < 1e-12));
}

#[test]
fn test_custom_range_round_trip() {
    let closes = [3.0, -2.0, 8.5, 1.25];
    let scaler = MinMaxScaler::fit_with_range(&closes, (-1.0, 1.0)).unwrap();
    assert!((scaler.transform_one(-2.0) + 1.0).abs() < 1e-12);
    assert!((scaler.transform_one(8.5) - 1.0).abs() < 1e-12);
    for &c in &closes {
        assert!((scaler.inverse_one(scaler.transform_one(c)) - c).abs() < 1e-9);
    }
}

#[test]
fn test_inverse_maps_values_outside_fitted_range() {
    let scaler = MinMaxScaler::fit(&[100.0, 200.0]).unwrap();
    assert!((scaler.inverse_one(1.1) - 210.0).abs() < 1e-9);
}
