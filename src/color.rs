use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// Continuous colour scales used by the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Black → red → yellow → white.
    Hot,
    Turbo,
    Viridis,
    /// Reversed red-yellow-blue diverging scale: blue for low, red for high.
    RdYlBuR,
}

type Stop = (f32, [u8; 3]);

const HOT: &[Stop] = &[
    (0.0, [0, 0, 0]),
    (0.3, [230, 0, 0]),
    (0.6, [255, 210, 0]),
    (1.0, [255, 255, 255]),
];

const TURBO: &[Stop] = &[
    (0.0, [0x30, 0x12, 0x3b]),
    (0.071, [0x41, 0x45, 0xab]),
    (0.143, [0x46, 0x75, 0xed]),
    (0.214, [0x39, 0xa2, 0xfc]),
    (0.286, [0x1b, 0xcf, 0xd4]),
    (0.357, [0x24, 0xec, 0xa6]),
    (0.429, [0x61, 0xfc, 0x6c]),
    (0.5, [0xa4, 0xfc, 0x3b]),
    (0.571, [0xd1, 0xe8, 0x34]),
    (0.643, [0xf3, 0xc6, 0x3a]),
    (0.714, [0xfe, 0x9b, 0x2d]),
    (0.786, [0xf3, 0x63, 0x15]),
    (0.857, [0xd9, 0x38, 0x06]),
    (0.929, [0xb1, 0x19, 0x01]),
    (1.0, [0x7a, 0x04, 0x02]),
];

const VIRIDIS: &[Stop] = &[
    (0.0, [0x44, 0x01, 0x54]),
    (0.111, [0x48, 0x28, 0x78]),
    (0.222, [0x3e, 0x49, 0x89]),
    (0.333, [0x31, 0x68, 0x8e]),
    (0.444, [0x26, 0x82, 0x8e]),
    (0.556, [0x1f, 0x9e, 0x89]),
    (0.667, [0x35, 0xb7, 0x79]),
    (0.778, [0x6e, 0xce, 0x58]),
    (0.889, [0xb5, 0xde, 0x2b]),
    (1.0, [0xfd, 0xe7, 0x25]),
];

const RDYLBU_R: &[Stop] = &[
    (0.0, [0x31, 0x36, 0x95]),
    (0.1, [0x45, 0x75, 0xb4]),
    (0.2, [0x74, 0xad, 0xd1]),
    (0.3, [0xab, 0xd9, 0xe9]),
    (0.4, [0xe0, 0xf3, 0xf8]),
    (0.5, [0xff, 0xff, 0xbf]),
    (0.6, [0xfe, 0xe0, 0x90]),
    (0.7, [0xfd, 0xae, 0x61]),
    (0.8, [0xf4, 0x6d, 0x43]),
    (0.9, [0xd7, 0x30, 0x27]),
    (1.0, [0xa5, 0x00, 0x26]),
];

impl ColorScale {
    pub fn name(self) -> &'static str {
        match self {
            ColorScale::Hot => "Hot",
            ColorScale::Turbo => "Turbo",
            ColorScale::Viridis => "Viridis",
            ColorScale::RdYlBuR => "RdYlBu_r",
        }
    }

    fn stops(self) -> &'static [Stop] {
        match self {
            ColorScale::Hot => HOT,
            ColorScale::Turbo => TURBO,
            ColorScale::Viridis => VIRIDIS,
            ColorScale::RdYlBuR => RDYLBU_R,
        }
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range and NaN are clamped.
    ///
    /// Neighbouring stops are blended in linear RGB.
    pub fn sample(self, t: f64) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
        let stops = self.stops();

        let upper = stops
            .iter()
            .position(|(pos, _)| *pos >= t)
            .unwrap_or(stops.len() - 1)
            .max(1);
        let (p0, c0) = stops[upper - 1];
        let (p1, c1) = stops[upper];
        let span = p1 - p0;
        let factor = if span > 0.0 { (t - p0) / span } else { 0.0 };

        let mixed = linear(c0).mix(linear(c1), factor.clamp(0.0, 1.0));
        let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Colour for `value` on a `[min, max]` domain. A degenerate domain maps
    /// everything to the middle of the scale.
    pub fn map(self, value: f64, min: f64, max: f64) -> Color32 {
        let range = max - min;
        if range.is_nan() || range.abs() <= f64::EPSILON {
            return self.sample(0.5);
        }
        self.sample((value - min) / range)
    }
}

fn linear([r, g, b]: [u8; 3]) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}
