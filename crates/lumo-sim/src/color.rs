//! CSS-style color handling and the built-in neon palettes.

use rand::{Rng, rngs::StdRng};

/// An RGB color with an alpha channel in `[0, 1]`. The default is opaque
/// black.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::opaque(0, 0, 0)
    }
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// The same color at a different alpha.
    pub fn faded(self, alpha: f64) -> Self {
        Self { a: alpha, ..self }
    }
}

/// Neon stroke colors used on the dark theme.
pub const DARK_PALETTE: [&str; 8] = [
    "#00FFFF", "#FF00FF", "#39FF14", "#FF073A", "#FFEA00", "#00FF6A", "#7F00FF", "#00B3FF",
];

/// Deeper variants that stay readable on the light theme.
pub const LIGHT_PALETTE: [&str; 8] = [
    "#008B8B", "#8B008B", "#006400", "#8B0000", "#B8860B", "#0047AB", "#2E0854", "#005F6A",
];

/// The handful of CSS color keywords worth knowing about here.
const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
];

/// Parse a CSS color: `#rgb`, `#rrggbb`, `rgb(...)`, `rgba(...)`, or a named
/// color from the table above.
pub fn parse_css(input: &str) -> Option<Rgba> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        return parse_components(body, true);
    }
    if let Some(body) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        return parse_components(body, false);
    }
    NAMED
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|&(_, [r, g, b])| Rgba::opaque(r, g, b))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let nibble = |c: char| c.to_digit(16).map(|d| d as u8);
    let chars: Vec<char> = hex.chars().collect();
    match chars.len() {
        3 => {
            let r = nibble(chars[0])?;
            let g = nibble(chars[1])?;
            let b = nibble(chars[2])?;
            Some(Rgba::opaque(r * 17, g * 17, b * 17))
        }
        6 => {
            let byte = |hi: char, lo: char| Some(nibble(hi)? * 16 + nibble(lo)?);
            Some(Rgba::opaque(
                byte(chars[0], chars[1])?,
                byte(chars[2], chars[3])?,
                byte(chars[4], chars[5])?,
            ))
        }
        _ => None,
    }
}

fn parse_components(body: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v = s.parse::<f64>().ok()?;
        Some(v.clamp(0.0, 255.0).round() as u8)
    };
    let a = if with_alpha {
        parts[3].parse::<f64>().ok()?.clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a,
    })
}

/// Re-emit `css` as an `rgba(...)` string at the given alpha.
///
/// Falls back to returning the input unchanged when it cannot be parsed.
pub fn transparent_variant(css: &str, alpha: f64) -> String {
    match parse_css(css) {
        Some(c) => format!("rgba({},{},{},{})", c.r, c.g, c.b, alpha),
        None => css.to_string(),
    }
}

/// The light/dark color pairs particles draw from.
#[derive(Clone, Debug)]
pub struct Palette {
    dark: Vec<Rgba>,
    light: Vec<Rgba>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_css(&[], &[])
    }
}

impl Palette {
    /// Build from user-supplied CSS strings. Unparseable entries are skipped;
    /// an empty result falls back to the built-in neon palette.
    pub fn from_css(dark: &[String], light: &[String]) -> Self {
        Self {
            dark: parse_list(dark, &DARK_PALETTE),
            light: parse_list(light, &LIGHT_PALETTE),
        }
    }

    /// Draw one light and one dark entry, independently.
    pub fn pick(&self, rng: &mut StdRng) -> (Rgba, Rgba) {
        let light = self.light[rng.gen_range(0..self.light.len())];
        let dark = self.dark[rng.gen_range(0..self.dark.len())];
        (light, dark)
    }
}

fn parse_list(entries: &[String], fallback: &[&str]) -> Vec<Rgba> {
    let mut parsed: Vec<Rgba> = entries.iter().filter_map(|s| parse_css(s)).collect();
    if parsed.is_empty() {
        parsed = fallback.iter().filter_map(|s| parse_css(s)).collect();
    }
    if parsed.is_empty() {
        parsed.push(Rgba::WHITE);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_css("#00FFFF"), Some(Rgba::opaque(0, 255, 255)));
        assert_eq!(parse_css("#0ff"), Some(Rgba::opaque(0, 255, 255)));
        assert_eq!(parse_css("  #8b0000 "), Some(Rgba::opaque(139, 0, 0)));
        assert_eq!(parse_css("#12345"), None);
        assert_eq!(parse_css("#gggggg"), None);
    }

    #[test]
    fn test_parse_functional() {
        assert_eq!(parse_css("rgb(1, 2, 3)"), Some(Rgba::opaque(1, 2, 3)));
        let c = parse_css("rgba(255, 7, 58, 0.5)").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 7, 58));
        assert!((c.a - 0.5).abs() < 1e-9);
        assert_eq!(parse_css("rgb(1, 2)"), None);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_css("white"), Some(Rgba::WHITE));
        assert_eq!(parse_css("Cyan"), Some(Rgba::opaque(0, 255, 255)));
        assert_eq!(parse_css("blurple"), None);
    }

    #[test]
    fn test_transparent_variant() {
        assert_eq!(transparent_variant("#FF073A", 0.1), "rgba(255,7,58,0.1)");
        assert_eq!(transparent_variant("white", 0.5), "rgba(255,255,255,0.5)");
        // Malformed input comes back unchanged.
        assert_eq!(transparent_variant("not-a-color", 0.5), "not-a-color");
    }

    #[test]
    fn test_palette_fallback() {
        let palette = Palette::default();
        assert_eq!(palette.dark.len(), 8);
        assert_eq!(palette.light.len(), 8);

        let junk = vec!["nope".to_string(), "#12".to_string()];
        let palette = Palette::from_css(&junk, &junk);
        assert_eq!(palette.dark.len(), 8);

        let custom = vec!["#112233".to_string(), "junk".to_string()];
        let palette = Palette::from_css(&custom, &[]);
        assert_eq!(palette.dark, vec![Rgba::opaque(0x11, 0x22, 0x33)]);
    }

    #[test]
    fn test_palette_pick_stays_in_palette() {
        let palette = Palette::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let (light, dark) = palette.pick(&mut rng);
            assert!(palette.light.contains(&light));
            assert!(palette.dark.contains(&dark));
        }
    }
}
