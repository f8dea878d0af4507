
#[cfg(test)]
mod tests {
    use landheat::metrics::{MetricField, MetricKind};

    // Tests metric names and fusion order
    // Verified by reordering MetricKind::ALL
    #[test]
    fn test_metric_kinds() {
        let names: Vec<String> = MetricKind::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["arterial", "junction", "zoning"]);
    }

    // Tests the zero fallback is flagged degenerate
    // Verified by clearing the flag in zeros
    #[test]
    fn test_zero_fallback() {
        let field = MetricField::zeros(MetricKind::Zoning, (3, 4));
        assert!(field.degenerate);
        assert_eq!(field.dim(), (3, 4));
        assert!(field.values.iter().all(|&value| value == 0.0));
    }
}
