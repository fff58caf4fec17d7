//! Multiple-comparison correction.

/// Holm-Bonferroni step-down adjustment.
///
/// Returns adjusted p-values in the order of the input. Sorted ascending, the
/// value at rank `j` (0-based) becomes `min(p · (n - j), 1)`, raised to the
/// running maximum of all lower ranks so adjusted values never decrease with
/// rank. Ties keep their input order.
pub fn holm_bonferroni(p_values: &[f64]) -> Vec<f64> {
    let n = p_values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; n];
    let mut running_max = 0.0_f64;
    for (rank, &index) in order.iter().enumerate() {
        let candidate = (p_values[index] * (n - rank) as f64).min(1.0);
        running_max = running_max.max(candidate);
        adjusted[index] = running_max;
    }
    adjusted
}
