mod common;

use common::*;

#[test]
fn test_model_choice_parsing() {
    assert_eq!("Model 1 Adam".parse::<ModelChoice>(), Ok(ModelChoice::Adam));
    assert_eq!("sgd".parse::<ModelChoice>(), Ok(ModelChoice::Sgd));
    assert_eq!("model_3_rmsprop".parse::<ModelChoice>(), Ok(ModelChoice::Rmsprop));
    assert!("Pilih Model".parse::<ModelChoice>().is_err());
    assert!("".parse::<ModelChoice>().is_err());
}

#[test]
fn test_model_folder_names() {
    assert_eq!(ModelChoice::Adam.folder_name(), "Model_1_Adam");
    assert_eq!(ModelChoice::Sgd.folder_name(), "Model_2_SGD");
    assert_eq!(ModelChoice::Rmsprop.folder_name(), "Model_3_Rmsprop");
}

#[test]
fn test_shape_labels_in_output_order() {
    let labels: Vec<&str> = ShapeClass::ALL.iter().map(|c| c.label()).collect();

    assert_eq!(
        labels,
        ["jajargenjang", "lingkaran", "segiempat", "segitiga", "trapesium"]
    );
    assert_eq!(ShapeClass::from_index(1), Some(ShapeClass::Circle));
    assert_eq!(ShapeClass::from_index(5), None);
}

#[test]
fn test_shape_parsing() {
    assert_eq!("Segitiga".parse::<ShapeClass>(), Ok(ShapeClass::Triangle));
    assert_eq!(" trapesium ".parse::<ShapeClass>(), Ok(ShapeClass::Trapezoid));
    assert!("hexagon".parse::<ShapeClass>().is_err());
}
