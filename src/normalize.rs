// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Normalization of the heterogeneous string encodings found in collector
//! output: DIMM size strings, localized sensor numbers, and PCI class
//! descriptions with trailing bracketed codes.

/// Sentinel strings reported by BMC tooling when a value is unavailable.
const UNAVAILABLE_SENTINELS: [&str; 6] = [
    "na",
    "n/a",
    "disabled",
    "not available",
    "not specified",
    "unknown",
];

/// Parses a module size string into whole gigabytes.
///
/// Accepts `"32 GB"`, `"32GB"`, `"1024 MB"`/`"1024MB"` (floor-divided into
/// GB), a bare integer (assumed GB), or falls back to the first embedded
/// integer. `"No Module Installed"`, empty input, and strings with no
/// digits all yield 0 rather than an error; an empty slot contributes
/// nothing to capacity totals.
///
/// # Examples
///
/// ```
/// use hwqa::parse_size_gb;
///
/// assert_eq!(parse_size_gb("32 GB"), 32);
/// assert_eq!(parse_size_gb("1024 MB"), 1);
/// assert_eq!(parse_size_gb("No Module Installed"), 0);
/// ```
pub fn parse_size_gb(input: &str) -> u64 {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "No Module Installed" {
        return 0;
    }

    let upper = trimmed.to_ascii_uppercase();
    if let Some(rest) = upper.strip_suffix("GB") {
        return rest.trim().parse().unwrap_or(0);
    }
    if let Some(rest) = upper.strip_suffix("MB") {
        return rest.trim().parse::<u64>().map(|mb| mb / 1024).unwrap_or(0);
    }
    if upper.bytes().all(|b| b.is_ascii_digit()) {
        return upper.parse().unwrap_or(0);
    }

    first_integer(&upper).unwrap_or(0)
}

fn first_integer(input: &str) -> Option<u64> {
    let start = input.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &input[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Parses a sensor value string into a float.
///
/// Returns `None` ("unavailable") for the BMC sentinel strings (`na`,
/// `n/a`, `disabled`, `not available`, `not specified`, `unknown`, empty)
/// and for malformed input; a decimal comma from localized tooling is
/// normalized to a dot first. Never panics.
///
/// # Examples
///
/// ```
/// use hwqa::parse_numeric;
///
/// assert_eq!(parse_numeric("3,3"), Some(3.3));
/// assert_eq!(parse_numeric("na"), None);
/// ```
pub fn parse_numeric(input: &str) -> Option<f64> {
    let lower = input.trim().to_ascii_lowercase();
    if lower.is_empty() || UNAVAILABLE_SENTINELS.contains(&lower.as_str()) {
        return None;
    }

    lower.replace(',', ".").parse().ok()
}

/// Strips the trailing bracketed numeric code from a PCI class description,
/// e.g. `"Ethernet controller [0200]"` becomes `"Ethernet controller"`.
/// Empty input maps to `"Unknown"`.
pub fn clean_device_class(class: &str) -> &str {
    if class.is_empty() {
        return "Unknown";
    }
    class.split(" [").next().unwrap_or(class).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_gb_units() {
        assert_eq!(parse_size_gb("32 GB"), 32);
        assert_eq!(parse_size_gb("32GB"), 32);
        assert_eq!(parse_size_gb("1024 MB"), 1);
        assert_eq!(parse_size_gb("2048MB"), 2);
        assert_eq!(parse_size_gb("512 MB"), 0);
        assert_eq!(parse_size_gb("64"), 64);
    }

    #[test]
    fn test_parse_size_gb_empty_slot() {
        assert_eq!(parse_size_gb("No Module Installed"), 0);
        assert_eq!(parse_size_gb(""), 0);
        assert_eq!(parse_size_gb("   "), 0);
    }

    #[test]
    fn test_parse_size_gb_fallback() {
        // first embedded integer wins, no digits yields zero
        assert_eq!(parse_size_gb("Size: 16 modules"), 16);
        assert_eq!(parse_size_gb("garbage"), 0);
    }

    #[test]
    fn test_parse_numeric_sentinels() {
        assert_eq!(parse_numeric("na"), None);
        assert_eq!(parse_numeric("N/A"), None);
        assert_eq!(parse_numeric("Disabled"), None);
        assert_eq!(parse_numeric("Not Available"), None);
        assert_eq!(parse_numeric("not specified"), None);
        assert_eq!(parse_numeric("Unknown"), None);
        assert_eq!(parse_numeric(""), None);
    }

    #[test]
    fn test_parse_numeric_values() {
        assert_eq!(parse_numeric("3.30"), Some(3.3));
        assert_eq!(parse_numeric("3,3"), Some(3.3));
        assert_eq!(parse_numeric(" 45 "), Some(45.0));
        assert_eq!(parse_numeric("-12.5"), Some(-12.5));
        assert_eq!(parse_numeric("1.2.3"), None);
    }

    #[test]
    fn test_clean_device_class() {
        assert_eq!(
            clean_device_class("Ethernet controller [0200]"),
            "Ethernet controller"
        );
        assert_eq!(clean_device_class("Host bridge"), "Host bridge");
        assert_eq!(clean_device_class(""), "Unknown");
    }
}
