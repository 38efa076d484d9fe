//! Human-readable price formatting.

/// Format a price with `$`, thousands grouping, and cents only when the
/// value has a fractional part: `1500` → `$1,500`, `19.99` → `$19.99`.
pub fn fmt_precio(precio: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let cents = (precio * 100.0).round() as i64;
    let entero = group_thousands(cents.abs() / 100);
    let frac = (cents.abs() % 100) as u8;
    let sign = if cents < 0 { "-" } else { "" };

    if frac == 0 {
        format!("{sign}${entero}")
    } else {
        format!("{sign}${entero}.{frac:02}")
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_prices_group_thousands() {
        assert_eq!(fmt_precio(1500.0), "$1,500");
        assert_eq!(fmt_precio(1_234_567.0), "$1,234,567");
        assert_eq!(fmt_precio(999.0), "$999");
        assert_eq!(fmt_precio(0.0), "$0");
    }

    #[test]
    fn fractional_prices_keep_two_decimals() {
        assert_eq!(fmt_precio(19.99), "$19.99");
        assert_eq!(fmt_precio(1500.5), "$1,500.50");
    }

    #[test]
    fn negative_prices_carry_the_sign() {
        assert_eq!(fmt_precio(-12.5), "-$12.50");
    }
}
