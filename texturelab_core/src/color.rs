// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight-alpha 8-bit colors and CSS-style color parsing.

use core::fmt;

/// An 8-bit-per-channel RGBA color with straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque white, the fallback canvas background.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with explicit alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns `true` if the alpha channel is 255.
    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Parses a CSS color value.
    ///
    /// Accepted forms are `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, the
    /// `rgb()`/`rgba()` functions (comma or space separated, channels as
    /// numbers or percentages, optional alpha), the 148 CSS named colors, and
    /// `transparent`. Other color functions such as `hsl()` are rejected.
    ///
    /// Matching is case-insensitive; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = function_args(s, "rgba").or_else(|| function_args(s, "rgb")) {
            return parse_rgb_function(args).ok_or(ColorParseError::BadFunction);
        }
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| s.eq_ignore_ascii_case(name))
            .map(|&(_, color)| color)
            .ok_or(ColorParseError::UnknownKeyword)
    }
}

/// Returns the text between the parentheses of `name(...)`.
fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let head = s.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    s[name.len()..]
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Parses `r, g, b[, a]` or `r g b[ / a]`.
fn parse_rgb_function(args: &str) -> Option<Color> {
    let (channels, alpha) = if args.contains(',') {
        let mut parts = args.split(',');
        let channels = [parts.next()?, parts.next()?, parts.next()?];
        let alpha = parts.next();
        if parts.next().is_some() {
            return None;
        }
        (channels, alpha)
    } else {
        let (channels, alpha) = match args.split_once('/') {
            Some((channels, alpha)) => (channels, Some(alpha)),
            None => (args, None),
        };
        let mut parts = channels.split_ascii_whitespace();
        let channels = [parts.next()?, parts.next()?, parts.next()?];
        if parts.next().is_some() {
            return None;
        }
        (channels, alpha)
    };
    let [r, g, b] = channels;
    let a = match alpha {
        Some(a) => unit_component(a.trim(), 1.0)?,
        None => 255,
    };
    Some(Color::rgba(
        unit_component(r.trim(), 255.0)?,
        unit_component(g.trim(), 255.0)?,
        unit_component(b.trim(), 255.0)?,
        a,
    ))
}

/// Maps a number in `0..=full` (or a percentage) onto `0..=255`.
fn unit_component(value: &str, full: f64) -> Option<u8> {
    let fraction = match value.strip_suffix('%') {
        Some(pct) => pct.trim_end().parse::<f64>().ok()? / 100.0,
        None => value.parse::<f64>().ok()? / full,
    };
    if !fraction.is_finite() {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the scaled value is clamped to 0.5..=255.5, so truncation rounds"
    )]
    let channel = (fraction.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    Some(channel)
}

fn parse_hex(hex: &str) -> Result<Color, ColorParseError> {
    let digits = hex.as_bytes();
    let mut nibbles = [0_u8; 8];
    if digits.len() > nibbles.len() {
        return Err(ColorParseError::BadLength(digits.len()));
    }
    for (slot, &d) in nibbles.iter_mut().zip(digits) {
        *slot = hex_value(d).ok_or(ColorParseError::BadDigit)?;
    }
    let n = &nibbles;
    match digits.len() {
        3 => Ok(Color::rgb(n[0] * 17, n[1] * 17, n[2] * 17)),
        4 => Ok(Color::rgba(n[0] * 17, n[1] * 17, n[2] * 17, n[3] * 17)),
        6 => Ok(Color::rgb(
            (n[0] << 4) | n[1],
            (n[2] << 4) | n[3],
            (n[4] << 4) | n[5],
        )),
        8 => Ok(Color::rgba(
            (n[0] << 4) | n[1],
            (n[2] << 4) | n[3],
            (n[4] << 4) | n[5],
            (n[6] << 4) | n[7],
        )),
        len => Err(ColorParseError::BadLength(len)),
    }
}

const fn hex_value(d: u8) -> Option<u8> {
    match d {
        b'0'..=b'9' => Some(d - b'0'),
        b'a'..=b'f' => Some(d - b'a' + 10),
        b'A'..=b'F' => Some(d - b'A' + 10),
        _ => None,
    }
}

/// CSS named colors, alphabetical.
const NAMED_COLORS: [(&str, Color); 148] = [
    ("aliceblue", Color::rgb(0xf0, 0xf8, 0xff)),
    ("antiquewhite", Color::rgb(0xfa, 0xeb, 0xd7)),
    ("aqua", Color::rgb(0x00, 0xff, 0xff)),
    ("aquamarine", Color::rgb(0x7f, 0xff, 0xd4)),
    ("azure", Color::rgb(0xf0, 0xff, 0xff)),
    ("beige", Color::rgb(0xf5, 0xf5, 0xdc)),
    ("bisque", Color::rgb(0xff, 0xe4, 0xc4)),
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("blanchedalmond", Color::rgb(0xff, 0xeb, 0xcd)),
    ("blue", Color::rgb(0x00, 0x00, 0xff)),
    ("blueviolet", Color::rgb(0x8a, 0x2b, 0xe2)),
    ("brown", Color::rgb(0xa5, 0x2a, 0x2a)),
    ("burlywood", Color::rgb(0xde, 0xb8, 0x87)),
    ("cadetblue", Color::rgb(0x5f, 0x9e, 0xa0)),
    ("chartreuse", Color::rgb(0x7f, 0xff, 0x00)),
    ("chocolate", Color::rgb(0xd2, 0x69, 0x1e)),
    ("coral", Color::rgb(0xff, 0x7f, 0x50)),
    ("cornflowerblue", Color::rgb(0x64, 0x95, 0xed)),
    ("cornsilk", Color::rgb(0xff, 0xf8, 0xdc)),
    ("crimson", Color::rgb(0xdc, 0x14, 0x3c)),
    ("cyan", Color::rgb(0x00, 0xff, 0xff)),
    ("darkblue", Color::rgb(0x00, 0x00, 0x8b)),
    ("darkcyan", Color::rgb(0x00, 0x8b, 0x8b)),
    ("darkgoldenrod", Color::rgb(0xb8, 0x86, 0x0b)),
    ("darkgray", Color::rgb(0xa9, 0xa9, 0xa9)),
    ("darkgreen", Color::rgb(0x00, 0x64, 0x00)),
    ("darkgrey", Color::rgb(0xa9, 0xa9, 0xa9)),
    ("darkkhaki", Color::rgb(0xbd, 0xb7, 0x6b)),
    ("darkmagenta", Color::rgb(0x8b, 0x00, 0x8b)),
    ("darkolivegreen", Color::rgb(0x55, 0x6b, 0x2f)),
    ("darkorange", Color::rgb(0xff, 0x8c, 0x00)),
    ("darkorchid", Color::rgb(0x99, 0x32, 0xcc)),
    ("darkred", Color::rgb(0x8b, 0x00, 0x00)),
    ("darksalmon", Color::rgb(0xe9, 0x96, 0x7a)),
    ("darkseagreen", Color::rgb(0x8f, 0xbc, 0x8f)),
    ("darkslateblue", Color::rgb(0x48, 0x3d, 0x8b)),
    ("darkslategray", Color::rgb(0x2f, 0x4f, 0x4f)),
    ("darkslategrey", Color::rgb(0x2f, 0x4f, 0x4f)),
    ("darkturquoise", Color::rgb(0x00, 0xce, 0xd1)),
    ("darkviolet", Color::rgb(0x94, 0x00, 0xd3)),
    ("deeppink", Color::rgb(0xff, 0x14, 0x93)),
    ("deepskyblue", Color::rgb(0x00, 0xbf, 0xff)),
    ("dimgray", Color::rgb(0x69, 0x69, 0x69)),
    ("dimgrey", Color::rgb(0x69, 0x69, 0x69)),
    ("dodgerblue", Color::rgb(0x1e, 0x90, 0xff)),
    ("firebrick", Color::rgb(0xb2, 0x22, 0x22)),
    ("floralwhite", Color::rgb(0xff, 0xfa, 0xf0)),
    ("forestgreen", Color::rgb(0x22, 0x8b, 0x22)),
    ("fuchsia", Color::rgb(0xff, 0x00, 0xff)),
    ("gainsboro", Color::rgb(0xdc, 0xdc, 0xdc)),
    ("ghostwhite", Color::rgb(0xf8, 0xf8, 0xff)),
    ("gold", Color::rgb(0xff, 0xd7, 0x00)),
    ("goldenrod", Color::rgb(0xda, 0xa5, 0x20)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("greenyellow", Color::rgb(0xad, 0xff, 0x2f)),
    ("grey", Color::rgb(0x80, 0x80, 0x80)),
    ("honeydew", Color::rgb(0xf0, 0xff, 0xf0)),
    ("hotpink", Color::rgb(0xff, 0x69, 0xb4)),
    ("indianred", Color::rgb(0xcd, 0x5c, 0x5c)),
    ("indigo", Color::rgb(0x4b, 0x00, 0x82)),
    ("ivory", Color::rgb(0xff, 0xff, 0xf0)),
    ("khaki", Color::rgb(0xf0, 0xe6, 0x8c)),
    ("lavender", Color::rgb(0xe6, 0xe6, 0xfa)),
    ("lavenderblush", Color::rgb(0xff, 0xf0, 0xf5)),
    ("lawngreen", Color::rgb(0x7c, 0xfc, 0x00)),
    ("lemonchiffon", Color::rgb(0xff, 0xfa, 0xcd)),
    ("lightblue", Color::rgb(0xad, 0xd8, 0xe6)),
    ("lightcoral", Color::rgb(0xf0, 0x80, 0x80)),
    ("lightcyan", Color::rgb(0xe0, 0xff, 0xff)),
    ("lightgoldenrodyellow", Color::rgb(0xfa, 0xfa, 0xd2)),
    ("lightgray", Color::rgb(0xd3, 0xd3, 0xd3)),
    ("lightgreen", Color::rgb(0x90, 0xee, 0x90)),
    ("lightgrey", Color::rgb(0xd3, 0xd3, 0xd3)),
    ("lightpink", Color::rgb(0xff, 0xb6, 0xc1)),
    ("lightsalmon", Color::rgb(0xff, 0xa0, 0x7a)),
    ("lightseagreen", Color::rgb(0x20, 0xb2, 0xaa)),
    ("lightskyblue", Color::rgb(0x87, 0xce, 0xfa)),
    ("lightslategray", Color::rgb(0x77, 0x88, 0x99)),
    ("lightslategrey", Color::rgb(0x77, 0x88, 0x99)),
    ("lightsteelblue", Color::rgb(0xb0, 0xc4, 0xde)),
    ("lightyellow", Color::rgb(0xff, 0xff, 0xe0)),
    ("lime", Color::rgb(0x00, 0xff, 0x00)),
    ("limegreen", Color::rgb(0x32, 0xcd, 0x32)),
    ("linen", Color::rgb(0xfa, 0xf0, 0xe6)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("mediumaquamarine", Color::rgb(0x66, 0xcd, 0xaa)),
    ("mediumblue", Color::rgb(0x00, 0x00, 0xcd)),
    ("mediumorchid", Color::rgb(0xba, 0x55, 0xd3)),
    ("mediumpurple", Color::rgb(0x93, 0x70, 0xdb)),
    ("mediumseagreen", Color::rgb(0x3c, 0xb3, 0x71)),
    ("mediumslateblue", Color::rgb(0x7b, 0x68, 0xee)),
    ("mediumspringgreen", Color::rgb(0x00, 0xfa, 0x9a)),
    ("mediumturquoise", Color::rgb(0x48, 0xd1, 0xcc)),
    ("mediumvioletred", Color::rgb(0xc7, 0x15, 0x85)),
    ("midnightblue", Color::rgb(0x19, 0x19, 0x70)),
    ("mintcream", Color::rgb(0xf5, 0xff, 0xfa)),
    ("mistyrose", Color::rgb(0xff, 0xe4, 0xe1)),
    ("moccasin", Color::rgb(0xff, 0xe4, 0xb5)),
    ("navajowhite", Color::rgb(0xff, 0xde, 0xad)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("oldlace", Color::rgb(0xfd, 0xf5, 0xe6)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("olivedrab", Color::rgb(0x6b, 0x8e, 0x23)),
    ("orange", Color::rgb(0xff, 0xa5, 0x00)),
    ("orangered", Color::rgb(0xff, 0x45, 0x00)),
    ("orchid", Color::rgb(0xda, 0x70, 0xd6)),
    ("palegoldenrod", Color::rgb(0xee, 0xe8, 0xaa)),
    ("palegreen", Color::rgb(0x98, 0xfb, 0x98)),
    ("paleturquoise", Color::rgb(0xaf, 0xee, 0xee)),
    ("palevioletred", Color::rgb(0xdb, 0x70, 0x93)),
    ("papayawhip", Color::rgb(0xff, 0xef, 0xd5)),
    ("peachpuff", Color::rgb(0xff, 0xda, 0xb9)),
    ("peru", Color::rgb(0xcd, 0x85, 0x3f)),
    ("pink", Color::rgb(0xff, 0xc0, 0xcb)),
    ("plum", Color::rgb(0xdd, 0xa0, 0xdd)),
    ("powderblue", Color::rgb(0xb0, 0xe0, 0xe6)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("rebeccapurple", Color::rgb(0x66, 0x33, 0x99)),
    ("red", Color::rgb(0xff, 0x00, 0x00)),
    ("rosybrown", Color::rgb(0xbc, 0x8f, 0x8f)),
    ("royalblue", Color::rgb(0x41, 0x69, 0xe1)),
    ("saddlebrown", Color::rgb(0x8b, 0x45, 0x13)),
    ("salmon", Color::rgb(0xfa, 0x80, 0x72)),
    ("sandybrown", Color::rgb(0xf4, 0xa4, 0x60)),
    ("seagreen", Color::rgb(0x2e, 0x8b, 0x57)),
    ("seashell", Color::rgb(0xff, 0xf5, 0xee)),
    ("sienna", Color::rgb(0xa0, 0x52, 0x2d)),
    ("silver", Color::rgb(0xc0, 0xc0, 0xc0)),
    ("skyblue", Color::rgb(0x87, 0xce, 0xeb)),
    ("slateblue", Color::rgb(0x6a, 0x5a, 0xcd)),
    ("slategray", Color::rgb(0x70, 0x80, 0x90)),
    ("slategrey", Color::rgb(0x70, 0x80, 0x90)),
    ("snow", Color::rgb(0xff, 0xfa, 0xfa)),
    ("springgreen", Color::rgb(0x00, 0xff, 0x7f)),
    ("steelblue", Color::rgb(0x46, 0x82, 0xb4)),
    ("tan", Color::rgb(0xd2, 0xb4, 0x8c)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("thistle", Color::rgb(0xd8, 0xbf, 0xd8)),
    ("tomato", Color::rgb(0xff, 0x63, 0x47)),
    ("turquoise", Color::rgb(0x40, 0xe0, 0xd0)),
    ("violet", Color::rgb(0xee, 0x82, 0xee)),
    ("wheat", Color::rgb(0xf5, 0xde, 0xb3)),
    ("white", Color::rgb(0xff, 0xff, 0xff)),
    ("whitesmoke", Color::rgb(0xf5, 0xf5, 0xf5)),
    ("yellow", Color::rgb(0xff, 0xff, 0x00)),
    ("yellowgreen", Color::rgb(0x9a, 0xcd, 0x32)),
];

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Errors from [`Color::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    /// The input was empty or only whitespace.
    Empty,
    /// A hex color had a digit count other than 3, 4, 6, or 8.
    BadLength(usize),
    /// A hex color contained a non-hex character.
    BadDigit,
    /// An `rgb()` or `rgba()` value had malformed arguments.
    BadFunction,
    /// The input was neither a hex color nor a known keyword.
    UnknownKeyword,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty color value"),
            Self::BadLength(len) => write!(f, "hex color has {len} digits"),
            Self::BadDigit => f.write_str("hex color contains a non-hex digit"),
            Self::BadFunction => f.write_str("malformed rgb() color"),
            Self::UnknownKeyword => f.write_str("unrecognized color keyword"),
        }
    }
}

impl core::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn parses_long_hex() {
        assert_eq!(Color::parse("#ff8000"), Ok(Color::rgb(255, 128, 0)));
        assert_eq!(Color::parse("#FF800080"), Ok(Color::rgba(255, 128, 0, 128)));
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!(Color::parse("#fff"), Ok(Color::WHITE));
        assert_eq!(Color::parse("#0008"), Ok(Color::rgba(0, 0, 0, 0x88)));
    }

    #[test]
    fn parses_keywords_and_trims() {
        assert_eq!(Color::parse("  White "), Ok(Color::WHITE));
        assert_eq!(Color::parse("black"), Ok(Color::BLACK));
        assert_eq!(Color::parse("transparent"), Ok(Color::TRANSPARENT));
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(Color::parse(""), Err(ColorParseError::Empty));
        assert_eq!(Color::parse("#12345"), Err(ColorParseError::BadLength(5)));
        assert_eq!(Color::parse("#123456789"), Err(ColorParseError::BadLength(9)));
        assert_eq!(Color::parse("#ggg"), Err(ColorParseError::BadDigit));
        assert_eq!(Color::parse("tealish"), Err(ColorParseError::UnknownKeyword));
        assert_eq!(Color::parse("hsl(0, 0%, 0%)"), Err(ColorParseError::UnknownKeyword));
        assert_eq!(Color::parse("rgb(1, 2)"), Err(ColorParseError::BadFunction));
        assert_eq!(Color::parse("rgb(1, 2, x)"), Err(ColorParseError::BadFunction));
        assert_eq!(Color::parse("rgb(1 2 3 4)"), Err(ColorParseError::BadFunction));
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(Color::parse("beige"), Ok(Color::rgb(0xf5, 0xf5, 0xdc)));
        assert_eq!(Color::parse("RebeccaPurple"), Ok(Color::rgb(0x66, 0x33, 0x99)));
        assert_eq!(Color::parse("grey"), Color::parse("gray"));
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(Color::parse("rgb(255, 128, 0)"), Ok(Color::rgb(255, 128, 0)));
        assert_eq!(Color::parse("RGB( 10 20 30 )"), Ok(Color::rgb(10, 20, 30)));
        assert_eq!(
            Color::parse("rgba(0, 0, 0, 0.5)"),
            Ok(Color::rgba(0, 0, 0, 128))
        );
        assert_eq!(
            Color::parse("rgb(100% 0% 50% / 25%)"),
            Ok(Color::rgba(255, 0, 128, 64))
        );
        // Out-of-range channels clamp like CSS.
        assert_eq!(Color::parse("rgb(300, -5, 0)"), Ok(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn display_uses_hex() {
        assert_eq!(Color::rgb(1, 2, 255).to_string(), "#0102ff");
        assert_eq!(Color::rgba(0, 0, 0, 16).to_string(), "#00000010");
    }
}
