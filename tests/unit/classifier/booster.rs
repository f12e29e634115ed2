//! Unit tests for the tree ensemble against the shipped demo model

use sagefin::classifier::{CategoryModel, ModelError, Objective, TreeEnsemble};

use crate::common::fixture_model_path;

fn model() -> TreeEnsemble {
    TreeEnsemble::load(fixture_model_path(), None).unwrap()
}

#[test]
fn test_fixture_model_shape() {
    let model = model();
    assert_eq!(model.num_class(), 6);
    assert_eq!(model.num_trees(), 6);
    assert_eq!(model.objective(), Objective::MultiSoftmax);
    assert_eq!(
        model.feature_names(),
        &["amount".to_string(), "merchant_code".to_string()]
    );
}

#[test]
fn test_merchant_buckets() {
    let model = model();
    let cases = [
        ([20.0, 0.0], 0),
        ([20.0, 3.0], 1),
        ([42.0, 7.0], 2),
        ([2500.0, 1.0], 3),
        ([20.0, 9.0], 4),
        ([20.0, 15.0], 5),
    ];
    for (row, expected) in cases {
        assert_eq!(model.predict_row(&row).unwrap(), expected, "row {:?}", row);
    }
}

#[test]
fn test_missing_merchant_code_falls_back_to_default_branches() {
    // Every merchant split defaults left: only the "< 2" tree scores +1
    assert_eq!(model().predict_row(&[20.0, f32::NAN]).unwrap(), 0);
}

#[test]
fn test_wrong_width_row_is_rejected() {
    assert!(matches!(
        model().predict_row(&[1.0]),
        Err(ModelError::FeatureCount { expected: 2, got: 1 })
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = TreeEnsemble::load("does/not/exist.json", None).unwrap_err();
    assert!(matches!(err, ModelError::Io { .. }));
}

#[test]
fn test_garbage_file_is_a_json_error() {
    assert!(matches!(
        TreeEnsemble::from_json_str("{\"learner\": 3}", None),
        Err(ModelError::Json(_))
    ));
}
