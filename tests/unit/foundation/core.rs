use super::*;

#[test]
fn element_id_display_is_stable() {
    assert_eq!(ElementId(7).to_string(), "#7");
}

#[test]
fn non_negative_secs_rejects_nan_and_negatives() {
    assert!(is_non_negative_secs(0.0));
    assert!(is_non_negative_secs(12.5));
    assert!(!is_non_negative_secs(-0.1));
    assert!(!is_non_negative_secs(f64::NAN));
    assert!(!is_non_negative_secs(f64::INFINITY));
}
