mod common;

use common::*;
use image::DynamicImage;
use rten_tensor::NdTensor;
use rten_tensor::prelude::*;
use shapesketch::classifier::preprocessing::{preprocess_bitmap, to_input_tensor, to_normalized_rgb};
use shapesketch::classifier::{INPUT_SHAPE, ModelSelector, argmax, classify};
use shapesketch::drawing::CANVAS_SIZE;

#[test]
fn test_preprocess_shape_and_range() {
    let tensor = preprocess_bitmap(&drawn_bitmap());

    assert_eq!(tensor.shape(), INPUT_SHAPE);
    assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    // White background and black ink
    assert_eq!(tensor[[0, 10, 290, 0]], 1.0);
    assert_eq!(tensor[[0, 150, 150, 2]], 0.0);
}

#[test]
fn test_preprocess_is_idempotent_on_normalized_input() {
    let source = drawn_bitmap().to_dynamic();
    let normalized = DynamicImage::ImageRgb32F(to_normalized_rgb(&source));

    let first: Vec<f32> = to_input_tensor(&source).iter().copied().collect();
    let second: Vec<f32> = to_input_tensor(&normalized).iter().copied().collect();

    assert_eq!(first, second);
}

#[test]
fn test_preprocess_ignores_alpha() {
    let rgba = drawn_bitmap().to_dynamic();
    let rgb = DynamicImage::ImageRgb8(rgba.to_rgb8());

    let a: Vec<f32> = to_input_tensor(&rgba).iter().copied().collect();
    let b: Vec<f32> = to_input_tensor(&rgb).iter().copied().collect();

    assert_eq!(a, b);
}

#[test]
fn test_argmax_picks_highest() {
    assert_eq!(argmax(&[0.1, 0.2, 0.6, 0.05, 0.05]), 2);
    assert_eq!(argmax(&[-3.0, -1.0, -2.0]), 1);
}

#[test]
fn test_argmax_ties_and_nan_resolve_to_earliest() {
    assert_eq!(argmax(&[0.2, 0.4, 0.4, 0.0, 0.0]), 1);
    assert_eq!(argmax(&[f32::NAN; 5]), 0);
    assert_eq!(argmax(&[f32::NAN, 0.1, f32::NAN, 0.3, 0.2]), 3);
}

#[test]
fn test_every_label_is_reachable() -> anyhow::Result<()> {
    let input = preprocess_bitmap(&drawn_bitmap());

    for class in ShapeClass::ALL {
        let classifier = FixedClassifier::new(scores_for(class));
        let prediction = classify(&classifier, &input)?;
        assert_eq!(prediction.class, class);
        assert_eq!(prediction.confidence(), 0.8);
    }

    Ok(())
}

#[test]
fn test_blank_canvas_still_gets_a_label() -> anyhow::Result<()> {
    let input = preprocess_bitmap(&blank_bitmap());
    let classifier = FixedClassifier::new(vec![f32::NAN; 5]);

    let prediction = classify(&classifier, &input)?;

    assert!(ShapeClass::ALL.contains(&prediction.class));
    Ok(())
}

#[test]
fn test_wrong_input_shape_is_rejected() {
    let classifier = FixedClassifier::new(scores_for(ShapeClass::Circle));
    let input = NdTensor::<f32, 4>::zeros([1, CANVAS_SIZE as usize, CANVAS_SIZE as usize, 4]);

    let err = classify(&classifier, &input).unwrap_err();

    assert!(err.to_string().contains("shape"));
    assert_eq!(classifier.calls(), 0);
}

#[test]
fn test_wrong_score_count_is_rejected() {
    let classifier = FixedClassifier::new(vec![0.5, 0.5, 0.0]);
    let input = preprocess_bitmap(&drawn_bitmap());

    let err = classify(&classifier, &input).unwrap_err();

    assert!(err.to_string().contains("3 scores"));
}

#[test]
fn test_missing_model_names_expected_path() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let selector = ModelSelector::new(dir.path());

    let first = selector.load(ModelChoice::Sgd).unwrap_err().to_string();
    let second = selector.load(ModelChoice::Sgd).unwrap_err().to_string();

    let expected = dir.path().join("model2_sgd.rten");
    assert!(first.contains(&expected.display().to_string()));
    assert!(first.contains("Model 2 SGD"));
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_corrupt_model_fails_to_load() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("model1_adam.rten"), b"not a model")?;
    let selector = ModelSelector::new(dir.path());

    assert!(selector.load(ModelChoice::Adam).is_err());
    Ok(())
}

#[test]
fn test_artifact_paths() {
    let selector = ModelSelector::new("models");

    assert_eq!(
        selector.artifact_path(ModelChoice::Adam),
        std::path::Path::new("models/model1_adam.rten")
    );
    assert_eq!(
        selector.artifact_path(ModelChoice::Rmsprop),
        std::path::Path::new("models/model3_rmsprop.rten")
    );
}
