/// Round half away from zero to `precision` decimal places.
pub fn round(number: f64, precision: i32) -> f64 {
    let scale = 10_f64.powi(precision);
    (number * scale).round() / scale
}

/// Sort in place, largest first.
pub fn sort_descending(values: &mut [i64]) {
    values.sort_unstable_by(|a, b| b.cmp(a));
}

/// Group the integer part in threes with spaces; the fraction is kept as
/// the shortest decimal that round-trips.
///
/// `spacef(1234567.89)` is `"1 234 567.89"`.
pub fn spacef(value: f64) -> String {
    let mut out = String::new();
    let magnitude = if value < 0.0 {
        out.push('-');
        -value
    } else {
        value
    };

    let rendered = magnitude.to_string();
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let head = int_part.len() % 3;
    let mut groups: Vec<&str> = Vec::with_capacity(int_part.len() / 3 + 1);
    if head > 0 {
        groups.push(&int_part[..head]);
    }
    groups.extend(
        (head..int_part.len())
            .step_by(3)
            .map(|start| &int_part[start..start + 3]),
    );
    out.push_str(&groups.join(" "));

    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// [`spacef`] with the fraction cut (not rounded) to `decimals` digits.
///
/// `spacef_with_digits(1234567.89, 1)` is `"1 234 567.8"`; with `0` the
/// fraction and point are dropped.
pub fn spacef_with_digits(value: f64, decimals: usize) -> String {
    let mut formatted = spacef(value);
    if let Some(dot) = formatted.find('.') {
        if decimals == 0 {
            formatted.truncate(dot);
        } else if dot + 1 + decimals < formatted.len() {
            formatted.truncate(dot + 1 + decimals);
        }
    }
    formatted
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn spacef_groups_thousands() {
        assert_eq!(spacef(1_234_567.89), "1 234 567.89");
        assert_eq!(spacef(123_456.0), "123 456");
        assert_eq!(spacef(1000.5), "1 000.5");
        assert_eq!(spacef(12.0), "12");
        assert_eq!(spacef(0.25), "0.25");
    }

    #[test]
    fn spacef_keeps_sign() {
        assert_eq!(spacef(-9_876_543.21), "-9 876 543.21");
    }

    #[test]
    fn spacef_with_digits_truncates() {
        assert_eq!(spacef_with_digits(1_234_567.89, 1), "1 234 567.8");
        assert_eq!(spacef_with_digits(1_234_567.89, 0), "1 234 567");
        assert_eq!(spacef_with_digits(1_234_567.89, 4), "1 234 567.89");
        assert_eq!(spacef_with_digits(42.0, 2), "42");
    }

    #[test]
    fn round_to_precision() {
        assert!((round(1.23456, 2) - 1.23).abs() < f64::EPSILON);
        assert!((round(2.5, 0) - 3.0).abs() < f64::EPSILON);
        assert!((round(-1.25, 1) + 1.3).abs() < 1e-9);
    }

    #[test]
    fn sort_descending_orders_largest_first() {
        let mut values = vec![3, -1, 10, 3, 7];
        sort_descending(&mut values);
        assert_eq!(values, vec![10, 7, 3, 3, -1]);
    }
}
