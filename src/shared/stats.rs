/// Arithmetic mean of a sample set. `None` when there are no samples,
/// which is distinct from a mean of zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of a sample set, averaging the two middle values for even
/// counts. `None` when there are no samples.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Largest sample. `None` when there are no samples.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

#[test]
fn mean_test() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
}

#[test]
fn mean_empty_test() {
    assert_eq!(mean(&[]), None);
}

#[test]
fn median_odd_test() {
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
}

#[test]
fn median_even_test() {
    assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
}

#[test]
fn median_empty_test() {
    assert_eq!(median(&[]), None);
}

#[test]
fn max_test() {
    assert_eq!(max(&[1.0, 5.0, 3.0]), Some(5.0));
    assert_eq!(max(&[]), None);
}
