//! Display formatting for prices and package slugs.

/// Format whole dollars with thousands separators: `2749` → `$2,749`.
pub fn format_price(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Slug of a package name: lower-cased, ` package` dropped, and the first
/// remaining space turned into `-`.
pub fn package_slug(name: &str) -> String {
    let lowered = name.to_lowercase().replacen(" package", "", 1);
    lowered.replacen(' ', "-", 1)
}
