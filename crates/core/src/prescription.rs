//! Digital prescription printout.
//!
//! The prescription is a fixed combined regimen for both conditions. It is not derived from
//! an assessment result.

use serde::{Deserialize, Serialize};

const STANDARD_ITEMS: [&str; 5] = [
    "Metformin 500mg twice daily (2 lần/ngày)",
    "Vitamin B12 supplementation (Bổ sung B12)",
    "Amlodipine 5mg daily (1 lần/ngày)",
    "Monitor kidney function (Theo dõi chức năng thận)",
    "Retina screening annually (Tầm soát võng mạc hàng năm)",
];

pub const PRESCRIPTION_TITLE: &str = "Smart Digital Prescription (Đơn thuốc số thông minh)";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub items: Vec<String>,
}

impl Prescription {
    /// The combined diabetes and hypertension regimen.
    pub fn standard() -> Self {
        Self {
            items: STANDARD_ITEMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Renders the items as a bulleted list, one `- item` per line.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for item in &self.items {
            output.push_str("- ");
            output.push_str(item);
            output.push('\n');
        }
        output
    }
}

impl Default for Prescription {
    fn default() -> Self {
        Self::standard()
    }
}
