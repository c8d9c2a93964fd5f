/// Lower-case and trim. No other transformation, never fails.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}
