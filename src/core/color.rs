use egui::Color32;

/// RGBA 颜色（配置文件中的颜色统一解析为该类型）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorRgba {
    /// 解析 `#RRGGBB` / `#RRGGBBAA` 十六进制颜色串
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if hex.len() == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };
        Some(Self { r, g, b, a })
    }

    pub fn as_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_six_digit_hex() {
        let c = ColorRgba::from_hex("#d4af37").unwrap();
        assert_eq!(c.as_array(), [0xd4, 0xaf, 0x37, 255]);
    }

    #[test]
    fn parses_eight_digit_hex() {
        let c = ColorRgba::from_hex("#ffffff3c").unwrap();
        assert_eq!(c.a, 0x3c);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(ColorRgba::from_hex("d4af37"), None);
        assert_eq!(ColorRgba::from_hex("#d4af"), None);
        assert_eq!(ColorRgba::from_hex("#zzzzzz"), None);
    }
}
