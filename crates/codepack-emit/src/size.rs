//! Human-readable byte sizes.

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Format a byte count as `B`, `KB` or `MB` with one decimal place.
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}
