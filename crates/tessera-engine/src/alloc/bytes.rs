/// ISO 80000 binary prefixes, indexed by power of 1024.
const PREFIXES: [&str; 9] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];

/// Formats a byte count with a binary prefix and three decimals.
///
/// Values below 1024 print as a plain integer (`"123B"`); larger ones use
/// `floor(log_1024(bytes))` as the prefix (`"446.083KiB"`, `"26.454MiB"`).
pub fn pretty_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes}B");
    }

    let exp = bytes.ilog(1024);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    format!("{value:.3}{}B", PREFIXES[exp as usize])
}
