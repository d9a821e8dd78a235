//! Height and weight conversions for the card footer.
//!
//! The provider reports height in decimetres and weight in hectograms.

const INCHES_PER_DECIMETRE: f64 = 3.937;
const WEIGHT_DIVISOR: f64 = 28.3495;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Height {
    pub feet: u32,
    /// May be 12: a rounded-up remainder is not carried into `feet`.
    pub inches: u32,
}

impl std::fmt::Display for Height {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

pub fn convert_height(raw_height: u32) -> Height {
    let total_inches = raw_height as f64 * INCHES_PER_DECIMETRE;
    Height {
        feet: (total_inches / 12.0).floor() as u32,
        inches: (total_inches % 12.0).round() as u32,
    }
}

/// 磅數，四捨五入到小數一位
pub fn convert_weight(raw_weight: u32) -> f64 {
    (raw_weight as f64 / WEIGHT_DIVISOR * 10.0).round() / 10.0
}

pub fn format_height(raw_height: u32) -> String {
    convert_height(raw_height).to_string()
}

pub fn format_weight(raw_weight: u32) -> String {
    format!("{:.1} lbs", convert_weight(raw_weight))
}
