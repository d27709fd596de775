use std::path::Path;

/// Longest report identifier a spreadsheet tab accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Report identifier for a capture file: the file name without its final
/// extension, cut to [`MAX_SHEET_NAME_LEN`] characters
pub fn sheet_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    if stem.is_empty() {
        return truncate_sheet_name("capture");
    }
    truncate_sheet_name(&stem)
}

pub fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_directory_and_extension() {
        assert_eq!(sheet_name(Path::new("captures/checkout.har")), "checkout");
        assert_eq!(sheet_name(Path::new("home.mobile.json")), "home.mobile");
    }

    #[test]
    fn test_truncates_to_31_characters() {
        let name = sheet_name(Path::new(
            "www.example.com_2024-05-01_checkout-flow-desktop.har",
        ));
        assert_eq!(name, "www.example.com_2024-05-01_chec");
        assert_eq!(name.chars().count(), 31);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let long = "é".repeat(40);
        assert_eq!(truncate_sheet_name(&long).chars().count(), 31);
    }

    #[test]
    fn test_empty_name_falls_back() {
        assert_eq!(sheet_name(Path::new("")), "capture");
    }
}
