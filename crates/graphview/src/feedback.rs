/// Sequential 6-step palette, light to dark, driven by the entanglement
/// intensity.
pub const PALETTE: [&str; 6] = [
    "#FEEDDE", "#FDD0A2", "#FDAE6B", "#FD8D3C", "#E6550D", "#A63603",
];

/// Decimal digits shown for the two indices.
pub const DISPLAY_DIGITS: i32 = 5;

/// Last similarity indices received from the backend. Zero until the first
/// successful analysis; display-only and never part of any request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntanglementIndices {
    pub intensity: f64,
    pub homogeneity: f64,
}

/// What the chrome applies: the bucket color for the feedback frame (and
/// any active lasso fill), plus the rounded index values to display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackStyle {
    pub color: &'static str,
    pub intensity: f64,
    pub homogeneity: f64,
}

/// Intensity to palette bucket: `round(intensity * 5) mod 6`, so an
/// intensity rounding to 6 wraps back to the lightest step.
pub fn bucket(intensity: f64) -> usize {
    ((intensity * 5.0).round() as i64).rem_euclid(6) as usize
}

pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

impl EntanglementIndices {
    pub fn new(intensity: f64, homogeneity: f64) -> Self {
        Self {
            intensity,
            homogeneity,
        }
    }

    pub fn style(&self) -> FeedbackStyle {
        FeedbackStyle {
            color: PALETTE[bucket(self.intensity)],
            intensity: round_to(self.intensity, DISPLAY_DIGITS),
            homogeneity: round_to(self.homogeneity, DISPLAY_DIGITS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        assert_eq!(bucket(0.0), 0);
        assert_eq!(bucket(0.2), 1);
        assert_eq!(bucket(0.5), 3); // 2.5 rounds away from zero
        assert_eq!(bucket(1.0), 5);
    }

    #[test]
    fn bucket_wraps_when_rounding_to_six() {
        assert_eq!(bucket(1.11), 0);
        assert_eq!(bucket(1.2), 0);
    }

    #[test]
    fn style_uses_the_palette_and_rounds_for_display() {
        let style = EntanglementIndices::new(0.4123456, 0.999999).style();
        assert_eq!(style.color, PALETTE[2]);
        assert_eq!(style.intensity, 0.41235);
        assert_eq!(style.homogeneity, 1.0);
    }

    #[test]
    fn default_indices_map_to_the_lightest_step() {
        let style = EntanglementIndices::default().style();
        assert_eq!(style.color, PALETTE[0]);
        assert_eq!(style.intensity, 0.0);
    }
}
