/* # colour spaces */

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HSB {
    // all values are in the [0,1] interval
    pub hue: f64,
    pub sat: f64,
    pub brt: f64,
}

impl HSB {
    pub fn new(hue: f64, sat: f64, brt: f64) -> Self {
        HSB { hue, sat, brt }
    }

    pub fn paint(&self) -> String {
        RGB::from(self).paint()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RGB {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGB {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        RGB { r, g, b }
    }

    /// parse `#rgb` or `#rrggbb`, the hash being optional
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex
            .chars()
            .filter(char::is_ascii_hexdigit)
            .collect::<String>();
        let digits = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits,
            _ => return None,
        };
        let channel = |j: usize| u8::from_str_radix(&digits[2 * j..2 * j + 2], 16).ok();
        Some(RGB::new(channel(0)?, channel(1)?, channel(2)?))
    }

    /// brighten or darken every channel by a relative amount
    pub fn shade(&self, lum: f64) -> Self {
        fn channel(c: u8, lum: f64) -> u8 {
            let c = c as f64;
            (c + c * lum).clamp(0.0, 255.0).round() as u8
        }

        RGB::new(
            channel(self.r, lum),
            channel(self.g, lum),
            channel(self.b, lum),
        )
    }

    pub fn paint(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<&HSB> for RGB {
    fn from(hsb: &HSB) -> Self {
        fn hsb2u8(n: u8, hue: f64, sat: f64, brt: f64) -> u8 {
            let k: f64 = (n as f64 + hue * 6.0) % 6.0;
            (255.0 * brt * (1.0 - sat * 0.0_f64.max(1.0_f64.min(k.min(4.0 - k))))).round() as u8
        }

        let HSB { hue, sat, brt } = hsb;
        RGB::new(
            hsb2u8(5, *hue, *sat, *brt),
            hsb2u8(3, *hue, *sat, *brt),
            hsb2u8(1, *hue, *sat, *brt),
        )
    }
}

/// darken or lighten a hex colour, colours that fail to parse are passed through
pub fn luminance(hex: &str, lum: f64) -> String {
    match RGB::parse(hex) {
        Some(rgb) => rgb.shade(lum).hex(),
        None => hex.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hsb2rgb() {
        assert_eq!(RGB::from(&HSB::new(0.0, 1.0, 1.0)), RGB::new(255, 0, 0));
        assert_eq!(RGB::from(&HSB::new(1.0 / 3.0, 1.0, 1.0)).g, 255);
        assert_eq!(RGB::from(&HSB::new(2.0 / 3.0, 1.0, 1.0)).b, 255);
        assert_eq!(RGB::from(&HSB::new(0.5, 0.0, 1.0)), RGB::new(255, 255, 255));
    }

    #[test]
    fn parsing() {
        assert_eq!(RGB::parse("#eee"), Some(RGB::new(238, 238, 238)));
        assert_eq!(RGB::parse("FFBEA0"), Some(RGB::new(255, 190, 160)));
        assert_eq!(RGB::parse("#12"), None);
    }

    #[test]
    fn shading() {
        assert_eq!(luminance("#eee", -0.2), "#bebebe");
        assert_eq!(luminance("#808080", 0.5), "#c0c0c0");
        assert_eq!(luminance("#ffffff", 0.5), "#ffffff");
        assert_eq!(luminance("url(#x)", 0.5), "url(#x)");
    }
}
