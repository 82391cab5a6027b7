use nalgebra::{Matrix3, Rotation3, Vector2, Vector3};

/// 二维向量（虚拟屏幕坐标、噪声采样点）
pub type Vec2 = Vector2<f64>;
/// 三维向量（局部空间、相机空间坐标与法线）
pub type Vec3 = Vector3<f64>;

/// 归一化向量，长度为零或非有限时返回零向量
///
/// 调用方必须能够容忍退化几何：零向量参与点积的结果恒为0。
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    let length = v.norm();
    if length > 0.0 && length.is_finite() {
        v.unscale(length)
    } else {
        Vec3::zeros()
    }
}

/// 计算三角形的单位法线 `normalize(cross(p2 - p1, p3 - p1))`
///
/// 顶点的环绕顺序决定法线方向；退化三角形返回零向量。
pub fn normal(p1: &Vec3, p2: &Vec3, p3: &Vec3) -> Vec3 {
    normalize_or_zero(&(p2 - p1).cross(&(p3 - p1)))
}

/// 由欧拉角（度）构建组合旋转矩阵 Rz·Ry·Rx
///
/// # 参数
/// * `angles_deg` - 绕X、Y、Z轴的旋转角度，单位为度
pub fn rotation_matrix(angles_deg: &Vec3) -> Matrix3<f64> {
    let rx = Rotation3::from_axis_angle(&Vec3::x_axis(), angles_deg.x.to_radians());
    let ry = Rotation3::from_axis_angle(&Vec3::y_axis(), angles_deg.y.to_radians());
    let rz = Rotation3::from_axis_angle(&Vec3::z_axis(), angles_deg.z.to_radians());
    (rz * ry * rx).into_inner()
}

/// 将同一个组合旋转一次性应用到一批顶点上
pub fn rotate_vertices(vertices: &[Vec3], angles_deg: &Vec3) -> Vec<Vec3> {
    let rotation = rotation_matrix(angles_deg);
    vertices.iter().map(|v| rotation * v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_normal_of_xy_triangle() {
        let n = normal(
            &Vec3::new(0.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
        );
        assert!((n - Vec3::new(0.0, 0.0, 1.0)).norm() < EPS);
    }

    #[test]
    fn test_normalize_zero_vector_returns_zero() {
        assert_eq!(normalize_or_zero(&Vec3::zeros()), Vec3::zeros());
        let degenerate = normal(&Vec3::x(), &Vec3::x(), &Vec3::x());
        assert_eq!(degenerate, Vec3::zeros());
    }

    #[test]
    fn test_rotation_order_is_z_y_x() {
        // 先绕X转90度再绕Z转90度：Y轴 -> Z轴 -> Z轴
        let rotated = rotation_matrix(&Vec3::new(90.0, 0.0, 90.0)) * Vec3::y();
        assert!((rotated - Vec3::z()).norm() < EPS);

        // X轴：绕X不变，绕Z转90度 -> Y轴
        let rotated = rotation_matrix(&Vec3::new(90.0, 0.0, 90.0)) * Vec3::x();
        assert!((rotated - Vec3::y()).norm() < EPS);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = Vec3::new(0.3, -1.2, 2.5);
        let rotated = rotate_vertices(&[v], &Vec3::new(17.0, 123.0, -48.0));
        assert!((rotated[0].norm() - v.norm()).abs() < EPS);
    }
}
