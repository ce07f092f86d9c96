use pretty_dtoa::{dtoa, FmtFloatConfig};

const FLOAT_CONFIG: FmtFloatConfig = FmtFloatConfig::default()
    .add_point_zero(false)
    .max_significant_digits(9);

pub fn format_f64(f: f64) -> String {
    dtoa(f, FLOAT_CONFIG)
}

pub fn format_f64_vec(v: &[f64]) -> String {
    let a: Vec<String> = v.iter().map(|f| format_f64(*f)).collect();
    format!("[{}]", a.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(format_f64(100.0), "100");
        assert_eq!(format_f64(-0.25), "-0.25");
        assert_eq!(format_f64_vec(&[1.0, 1.1, 0.0]), "[1, 1.1, 0]");
    }
}
