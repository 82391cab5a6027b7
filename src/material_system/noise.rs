//! 二维格点梯度噪声
//!
//! 格点哈希使用固定的256项置换表（索引对256取模，相当于复制到512项），
//! 梯度由哈希值经 `fract(i / 41)` 生成，再以泰勒展开的平方根倒数近似归一化。

use crate::geometry::math::Vec2;

/// 全局置换表，只读、无生命周期
static PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// 格点坐标的取模周期
const LATTICE_MODULUS: i64 = 289;
/// 输出缩放，使结果大致落在 [-1, 1]
const OUTPUT_SCALE: f64 = 2.3;

/// 格点间的插值权重曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fade {
    /// 固定权重 (1, 0.9999)，格内几乎不做平滑插值；跨格点边界不连续
    #[default]
    Legacy,
    /// 五次平滑曲线 `6t⁵ - 15t⁴ + 10t³`，跨格点边界连续
    Quintic,
}

impl Fade {
    /// 由配置字符串解析
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "legacy" => Ok(Fade::Legacy),
            "quintic" => Ok(Fade::Quintic),
            other => Err(format!("未知的噪声插值曲线: '{}'", other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Fade::Legacy => "legacy",
            Fade::Quintic => "quintic",
        }
    }

    fn weights(&self, offset: &Vec2) -> Vec2 {
        match self {
            Fade::Legacy => Vec2::new(1.0, 0.9999),
            Fade::Quintic => offset.map(|t| t * t * t * (t * (t * 6.0 - 15.0) + 10.0)),
        }
    }
}

fn permute(x: i64) -> i64 {
    PERMUTATION[x.rem_euclid(256) as usize] as i64
}

fn fract(x: f64) -> f64 {
    x - x.floor()
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn taylor_inv_sqrt(r: f64) -> f64 {
    1.79284291400159 - 0.85373472095314 * r
}

/// 格点的伪随机梯度（近似单位长度）
fn gradient(hash: i64) -> Vec2 {
    let gx = fract(hash as f64 * (1.0 / 41.0)) * 2.0 - 1.0;
    let gy = gx.abs() - 0.5;
    let gx = gx - (gx + 0.5).floor();
    let g = Vec2::new(gx, gy);
    g * taylor_inv_sqrt(g.dot(&g))
}

/// 使用五次平滑曲线的连续噪声
pub fn noise2d(p: &Vec2) -> f64 {
    noise2d_with(p, Fade::Quintic)
}

/// 指定插值曲线的二维梯度噪声，结果大致位于 [-1, 1]
pub fn noise2d_with(p: &Vec2, fade: Fade) -> f64 {
    let floor = p.map(f64::floor);
    let offset = p.map(fract);

    // 格点坐标对289取模；floor 在 i64 范围内饱和
    let x0 = (floor.x as i64).rem_euclid(LATTICE_MODULUS);
    let y0 = (floor.y as i64).rem_euclid(LATTICE_MODULUS);
    let x1 = (x0 + 1) % LATTICE_MODULUS;
    let y1 = (y0 + 1) % LATTICE_MODULUS;

    let hash = |ix: i64, iy: i64| permute(permute(ix) + iy);

    let g00 = gradient(hash(x0, y0));
    let g10 = gradient(hash(x1, y0));
    let g01 = gradient(hash(x0, y1));
    let g11 = gradient(hash(x1, y1));

    let n00 = g00.dot(&Vec2::new(offset.x, offset.y));
    let n10 = g10.dot(&Vec2::new(offset.x - 1.0, offset.y));
    let n01 = g01.dot(&Vec2::new(offset.x, offset.y - 1.0));
    let n11 = g11.dot(&Vec2::new(offset.x - 1.0, offset.y - 1.0));

    let weights = fade.weights(&offset);
    let n_x0 = lerp(n00, n10, weights.x);
    let n_x1 = lerp(n01, n11, weights.x);
    OUTPUT_SCALE * lerp(n_x0, n_x1, weights.y)
}
