/// Rounds `value` to `decimals` digits after the point.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}

/// Formats an optional f64 to `decimals` places, or returns "—" if None or non-finite.
pub fn fmt_opt(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.decimals$}"),
        _ => "—".to_owned(),
    }
}

/// Lowercase file-name-safe version of a chart title.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(85.0), 2), "85.00");
        assert_eq!(fmt_opt(Some(2.0 / 3.0), 2), "0.67");
        assert_eq!(fmt_opt(None, 2), "—");
        assert_eq!(fmt_opt(Some(f64::NAN), 2), "—");
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(7.0710678, 2) - 7.07).abs() < 1e-12);
        assert!((round_to(-1.005, 0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Distribution of math"), "distribution-of-math");
        assert_eq!(slugify("science vs math!"), "science-vs-math");
    }
}
