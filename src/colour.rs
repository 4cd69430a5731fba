/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a CSS-style colour string, as handed to the drawing port by the
    /// page renderer. Understands `#rgb`, `#rrggbb`, `rgb(r, g, b)` and a few
    /// colour names. Returns [None] for anything else; backends decide what to
    /// substitute.
    pub fn parse(s: &str) -> Option<Colour> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let channels: Vec<u8> = args
                .split(',')
                .map(|c| c.trim().parse::<u8>())
                .collect::<Result<_, _>>()
                .ok()?;
            return match channels.as_slice() {
                &[r, g, b] => Some(Colour::new_rgb_bytes(r, g, b)),
                _ => None,
            };
        }

        match lower.as_str() {
            "black" => Some(colours::BLACK),
            "white" => Some(colours::WHITE),
            "red" => Some(Colour::new_rgb_bytes(255, 0, 0)),
            "green" => Some(Colour::new_rgb_bytes(0, 128, 0)),
            "blue" => Some(Colour::new_rgb_bytes(0, 0, 255)),
            "gray" | "grey" => Some(Colour::Grey { g: 128.0 / 255.0 }),
            _ => None,
        }
    }

    /// Convert to 8-bit RGB, for raster surfaces
    pub fn to_rgb_bytes(self) -> [u8; 3] {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match self {
            Colour::RGB { r, g, b } => [to_byte(r), to_byte(g), to_byte(b)],
            Colour::CMYK { c, m, y, k } => [
                to_byte((1.0 - c) * (1.0 - k)),
                to_byte((1.0 - m) * (1.0 - k)),
                to_byte((1.0 - y) * (1.0 - k)),
            ],
            Colour::Grey { g } => [to_byte(g); 3],
        }
    }
}

fn parse_hex(hex: &str) -> Option<Colour> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Colour::new_rgb_bytes(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
        )),
        6 => Some(Colour::new_rgb_bytes(byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

/// The colour a surface currently paints with. A colour string that doesn't
/// parse is ignored and the previous colour stays, starting from black.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Pen {
    current: Colour,
}

impl Default for Pen {
    fn default() -> Self {
        Pen {
            current: colours::BLACK,
        }
    }
}

impl Pen {
    /// Switch to `colour` if it parses and return the colour to paint with
    pub fn pick(&mut self, colour: &str) -> Colour {
        match Colour::parse(colour) {
            Some(parsed) => self.current = parsed,
            None => log::warn!("ignoring unparseable colour `{colour}`"),
        }
        self.current
    }

    pub fn current(&self) -> Colour {
        self.current
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Colour::parse("#3C3"), Some(Colour::new_rgb_bytes(0x33, 0xcc, 0x33)));
        assert_eq!(Colour::parse("#33cc33"), Colour::parse("#3c3"));
        assert_eq!(Colour::parse("#fff").map(Colour::to_rgb_bytes), Some([255, 255, 255]));
    }

    #[test]
    fn parses_rgb_function_and_names() {
        assert_eq!(Colour::parse("rgb(10, 20, 30)"), Some(Colour::new_rgb_bytes(10, 20, 30)));
        assert_eq!(Colour::parse(" Black "), Some(colours::BLACK));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Colour::parse("#12"), None);
        assert_eq!(Colour::parse("#gggggg"), None);
        assert_eq!(Colour::parse("rgb(1,2)"), None);
        assert_eq!(Colour::parse("chartreuse-ish"), None);
    }

    #[test]
    fn pen_keeps_the_last_good_colour() {
        let mut pen = Pen::default();
        assert_eq!(pen.pick("not a colour"), colours::BLACK);
        let green = pen.pick("#3C3");
        assert_eq!(pen.pick("#zz"), green);
        assert_eq!(pen.current(), green);
    }

    #[test]
    fn cmyk_to_rgb() {
        let cyan = Colour::CMYK {
            c: 1.0,
            m: 0.0,
            y: 0.0,
            k: 0.0,
        };
        assert_eq!(cyan.to_rgb_bytes(), [0, 255, 255]);
    }
}
