/// 16位打包颜色：高位起依次为5位红、6位绿、5位蓝
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xffff);
    /// 未配置背景色时的默认值
    pub const MAGENTA: Rgb565 = Rgb565(0xf81f);

    /// 由8位RGB分量打包，丢弃各通道的低位
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Rgb565((((r & 0xf8) as u16) << 8) | (((g & 0xfc) as u16) << 3) | ((b >> 3) as u16))
    }

    /// 展开为8位RGB分量，低位补零
    pub const fn to_rgb888(self) -> [u8; 3] {
        [
            ((self.0 & 0xf800) >> 8) as u8,
            ((self.0 & 0x07e0) >> 3) as u8,
            ((self.0 & 0x001f) << 3) as u8,
        ]
    }
}

/// 单通道8位插值，先截断小数部分再加回起点
pub fn lerp8(a: u8, b: u8, progress: f32) -> u8 {
    let delta = (b as i16 - a as i16) as f32 * progress;
    (a as i16 + delta as i16).clamp(0, 255) as u8
}

/// 两个RGB565颜色之间的逐通道混合
///
/// `lerp_color(c, c, t) == c`，`lerp_color(a, b, 0.0) == a`，`lerp_color(a, b, 1.0) == b`。
/// 非有限的 `progress` 视为0。
pub fn lerp_color(from: Rgb565, to: Rgb565, progress: f32) -> Rgb565 {
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let [from_r, from_g, from_b] = from.to_rgb888();
    let [to_r, to_g, to_b] = to.to_rgb888();
    Rgb565::from_rgb888(
        lerp8(from_r, to_r, progress),
        lerp8(from_g, to_g, progress),
        lerp8(from_b, to_b, progress),
    )
}

/// 将 [0, 1] 的标量映射到色相渐变（黑→红→黄→绿→青→蓝→品红→白）
///
/// 越界输入先截断；用于立方体各面的基础色和噪声着色。
pub fn map_color(value: f32) -> Rgb565 {
    let hue = if value.is_finite() {
        value.clamp(0.0, 1.0) * 5.0
    } else {
        0.0
    };

    let (r, g, b) = if hue < 1.0 {
        (hue, 0.0, 0.0)
    } else if hue < 2.0 {
        (1.0, hue - 1.0, 0.0)
    } else if hue < 3.0 {
        (3.0 - hue, 1.0, hue - 2.0)
    } else if hue < 4.0 {
        (hue - 3.0, 4.0 - hue, 1.0)
    } else {
        (1.0, hue - 4.0, 1.0)
    };

    Rgb565((((r * 31.0) as u16) << 11) | (((g * 63.0) as u16) << 5) | ((b * 31.0) as u16))
}

/// 将RGB565像素序列展开为紧凑的RGB8字节流（用于PNG导出）
pub fn rgb565_to_rgb8_bytes(pixels: &[Rgb565]) -> Vec<u8> {
    pixels.iter().flat_map(|pixel| pixel.to_rgb888()).collect()
}

/// 解析 "r,g,b"（0-255）格式的颜色字符串
pub fn parse_rgb888(s: &str) -> Result<Rgb565, String> {
    let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
    if parts.len() != 3 {
        return Err(format!("颜色格式错误 '{}'，应为 'r,g,b'", s));
    }
    let mut channels = [0u8; 3];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        *channel = part
            .parse::<u8>()
            .map_err(|e| format!("无法解析颜色分量 '{}': {}", part, e))?;
    }
    Ok(Rgb565::from_rgb888(channels[0], channels[1], channels[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_and_unpack() {
        assert_eq!(Rgb565::from_rgb888(255, 255, 255), Rgb565::WHITE);
        assert_eq!(Rgb565::from_rgb888(255, 0, 0), Rgb565(0xf800));
        assert_eq!(Rgb565::from_rgb888(0, 255, 0), Rgb565(0x07e0));
        assert_eq!(Rgb565::from_rgb888(0, 0, 255), Rgb565(0x001f));
        assert_eq!(Rgb565(0xf800).to_rgb888(), [248, 0, 0]);
    }

    #[test]
    fn test_lerp_color_identities() {
        let samples = [0x0000u16, 0xffff, 0xf81f, 0x1234, 0xabcd, 0x07e0];
        for &a in &samples {
            for &b in &samples {
                let (a, b) = (Rgb565(a), Rgb565(b));
                assert_eq!(lerp_color(a, b, 0.0), a);
                assert_eq!(lerp_color(a, b, 1.0), b);
                for t in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
                    assert_eq!(lerp_color(a, a, t), a);
                }
            }
        }
    }

    #[test]
    fn test_lerp_color_midpoint() {
        let mid = lerp_color(Rgb565::BLACK, Rgb565::WHITE, 0.5);
        let [r, g, b] = mid.to_rgb888();
        assert_eq!([r, g, b], [120, 124, 120]);
    }

    #[test]
    fn test_lerp_color_clamps_progress() {
        let a = Rgb565(0x1234);
        assert_eq!(lerp_color(a, Rgb565::WHITE, -3.0), a);
        assert_eq!(lerp_color(a, Rgb565::WHITE, 7.0), Rgb565::WHITE);
        assert_eq!(lerp_color(a, Rgb565::WHITE, f32::NAN), a);
    }

    #[test]
    fn test_map_color_endpoints() {
        assert_eq!(map_color(0.0), Rgb565::BLACK);
        assert_eq!(map_color(1.0), Rgb565::WHITE);
        assert_eq!(map_color(0.2), Rgb565(0xf800));
        assert_eq!(map_color(-1.0), Rgb565::BLACK);
    }

    #[test]
    fn test_parse_rgb888() {
        assert_eq!(parse_rgb888("255, 0, 255"), Ok(Rgb565::MAGENTA));
        assert!(parse_rgb888("1,2").is_err());
        assert!(parse_rgb888("1,2,300").is_err());
    }
}
