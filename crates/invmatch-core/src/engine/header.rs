//! Header extraction - vendor name and invoice number from the leading
//! lines of the document.

use tracing::debug;

use super::rules::patterns::{INVOICE_NUMBER, VENDOR_LABEL};
use crate::models::{HeaderConfig, VendorInfo};

/// Scans the top of the document for vendor/invoice metadata. Runs
/// independently of the line classifier.
pub struct HeaderExtractor {
    scan_lines: usize,
}

impl HeaderExtractor {
    pub fn new(config: &HeaderConfig) -> Self {
        Self {
            scan_lines: config.scan_lines,
        }
    }

    /// Extract vendor info from the leading lines. Both fields default to
    /// empty strings when not found - never an error.
    pub fn extract_vendor_info(&self, lines: &[&str]) -> VendorInfo {
        let window: Vec<&str> = lines.iter().take(self.scan_lines).copied().collect();

        let name = self.vendor_name(&window);
        let invoice_number = self.invoice_number(&window);

        debug!("header: vendor={name:?} invoice_number={invoice_number:?}");
        VendorInfo {
            name,
            invoice_number,
        }
    }

    fn vendor_name(&self, window: &[&str]) -> String {
        for (i, line) in window.iter().enumerate() {
            let trimmed = line.trim();
            if let Some(caps) = VENDOR_LABEL.captures(trimmed) {
                let rest = caps[1].trim();
                if !rest.is_empty() {
                    return rest.to_string();
                }
                // Keyword occupies the whole line: the vendor is the next
                // non-empty line.
                if let Some(next) = window[i + 1..].iter().find(|l| !l.trim().is_empty()) {
                    return next.trim().to_string();
                }
            }
        }

        // No keyword anywhere in the window: first non-empty line that
        // does not itself look like an invoice-number line.
        window
            .iter()
            .map(|l| l.trim())
            .find(|l| !l.is_empty() && !INVOICE_NUMBER.is_match(l))
            .unwrap_or_default()
            .to_string()
    }

    fn invoice_number(&self, window: &[&str]) -> String {
        window
            .iter()
            .find_map(|line| INVOICE_NUMBER.captures(line.trim()))
            .map(|caps| caps[1].to_string())
            .unwrap_or_default()
    }
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new(&HeaderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labeled_vendor_on_one_line() {
        let extractor = HeaderExtractor::default();
        let info = extractor.extract_vendor_info(&["Vendor: Fresh Farms Ltd", "Tomatoes 5 kg"]);
        assert_eq!(info.name, "Fresh Farms Ltd");
    }

    #[test]
    fn keyword_only_line_takes_the_next_line() {
        let extractor = HeaderExtractor::default();
        let info = extractor.extract_vendor_info(&["Supplier:", "", "Green Grocers Inc"]);
        assert_eq!(info.name, "Green Grocers Inc");
    }

    #[test]
    fn mid_line_keyword_takes_trailing_text() {
        let extractor = HeaderExtractor::default();
        let info = extractor.extract_vendor_info(&["Bill from Acme Wholesale"]);
        assert_eq!(info.name, "Acme Wholesale");
    }

    #[test]
    fn falls_back_to_first_plain_line() {
        let extractor = HeaderExtractor::default();
        let info = extractor.extract_vendor_info(&[
            "",
            "Invoice #INV-2024-001",
            "Green Grocers Inc",
            "Tomatoes 5 kg",
        ]);
        assert_eq!(info.name, "Green Grocers Inc");
        assert_eq!(info.invoice_number, "INV-2024-001");
    }

    #[test]
    fn only_the_leading_window_is_scanned() {
        let extractor = HeaderExtractor::new(&HeaderConfig { scan_lines: 2 });
        let info = extractor.extract_vendor_info(&["", "", "Vendor: Too Far Down"]);
        assert_eq!(info.name, "");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let extractor = HeaderExtractor::default();
        let info = extractor.extract_vendor_info(&[]);
        assert_eq!(info.name, "");
        assert_eq!(info.invoice_number, "");
    }
}
