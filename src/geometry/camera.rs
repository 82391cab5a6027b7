use crate::geometry::math::Vec3;

/// 以有理数表示的角速度：每帧 `numerator / denominator` 度
///
/// 相位用精确的整数取模计算，帧计数无论增长到多大，三角函数的输入都保持在 [0, 360) 度内。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRate {
    pub numerator: u64,
    pub denominator: u64,
}

impl PhaseRate {
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// 第 `frame` 帧时的相位（度，范围 [0, 360)）
    pub fn degrees_at(&self, frame: u64) -> f64 {
        let denominator = self.denominator.max(1) as u128;
        let period = 360 * denominator;
        let phase = (self.numerator as u128 * frame as u128) % period;
        phase as f64 / denominator as f64
    }

    /// 第 `frame` 帧时的相位（弧度）
    pub fn radians_at(&self, frame: u64) -> f64 {
        self.degrees_at(frame).to_radians()
    }
}

/// 相机X分量：每帧1度
const CAMERA_X_RATE: PhaseRate = PhaseRate::new(1, 1);
/// 相机Y分量：每帧0.77度
const CAMERA_Y_RATE: PhaseRate = PhaseRate::new(77, 100);
/// 相机Z分量：每帧0.3度
const CAMERA_Z_RATE: PhaseRate = PhaseRate::new(3, 10);
/// 相机Y分量的固定相位偏移（弧度）
const CAMERA_Y_OFFSET_RAD: f64 = 5e8;

/// 根据帧序号计算相机位置
///
/// X、Y为两条不同频率的正弦轨迹，Z在 [0, 4] 之间往复，确保立方体阵列始终位于相机前方。
pub fn camera_position(frame: u64) -> Vec3 {
    Vec3::new(
        4.0 * CAMERA_X_RATE.radians_at(frame).sin(),
        4.0 * (CAMERA_Y_OFFSET_RAD + CAMERA_Y_RATE.radians_at(frame)).sin(),
        2.0 + 2.0 * CAMERA_Z_RATE.radians_at(frame).cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_wraps_exactly() {
        let rate = PhaseRate::new(77, 100);
        // 0.77 * 36000 = 27720 度，正好是360的整数倍
        assert_eq!(rate.degrees_at(36_000), 0.0);
        assert_eq!(rate.degrees_at(36_001), 0.77);
        assert_eq!(rate.degrees_at(100), 77.0);
    }

    #[test]
    fn test_phase_stays_bounded_for_huge_frames() {
        let rate = PhaseRate::new(3, 10);
        let huge = u64::MAX - 7;
        let degrees = rate.degrees_at(huge);
        assert!(degrees.is_finite());
        assert!((0.0..360.0).contains(&degrees));
    }

    #[test]
    fn test_camera_at_frame_zero() {
        let camera = camera_position(0);
        assert_eq!(camera.x, 0.0);
        assert!((camera.y - 4.0 * 5e8_f64.sin()).abs() < 1e-12);
        assert!((camera.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_camera_path_is_periodic() {
        // 所有分量的公共周期为 36000 帧
        let a = camera_position(123);
        let b = camera_position(123 + 36_000 * 5);
        assert!((a - b).norm() < 1e-12);
    }
}
