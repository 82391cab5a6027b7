use crate::geometry::math::{Vec3, rotate_vertices};
use nalgebra::Point2;

/// 将局部空间顶点变换到相机空间
///
/// 先应用物体旋转（Rz·Ry·Rx，单位为度），再平移 `position - camera`。
pub fn local_to_camera(
    local_vertices: &[Vec3],
    rotation_deg: &Vec3,
    position: &Vec3,
    camera: &Vec3,
) -> Vec<Vec3> {
    let offset = position - camera;
    let mut vertices = rotate_vertices(local_vertices, rotation_deg);
    for vertex in &mut vertices {
        *vertex += offset;
    }
    vertices
}

/// 针孔投影：投影平面位于相机前方一个单位处
///
/// z 为零时结果为非有限值，调用方负责在投影前剔除这类顶点。
pub fn project_to_plane(camera_space: &Vec3) -> Point2<f64> {
    Point2::new(
        camera_space.x / camera_space.z,
        camera_space.y / camera_space.z,
    )
}

/// 将虚拟屏幕坐标（[-1, 1]）映射到像素坐标
///
/// 使用截断取整并在 i32 范围内饱和；非有限坐标返回 `None`。
pub fn screen_to_pixel(point: &Point2<f64>, width: usize, height: usize) -> Option<(i32, i32)> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    let pixel_x = width as f64 * (1.0 + point.x) / 2.0;
    let pixel_y = height as f64 * (1.0 + point.y) / 2.0;
    Some((pixel_x as i32, pixel_y as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_divides_by_depth() {
        let p = project_to_plane(&Vec3::new(2.0, -1.0, 4.0));
        assert_eq!(p, Point2::new(0.5, -0.25));
    }

    #[test]
    fn test_screen_mapping_corners() {
        assert_eq!(screen_to_pixel(&Point2::new(-1.0, -1.0), 160, 240), Some((0, 0)));
        assert_eq!(screen_to_pixel(&Point2::new(0.0, 0.0), 160, 240), Some((80, 120)));
        assert_eq!(screen_to_pixel(&Point2::new(1.0, 1.0), 160, 240), Some((160, 240)));
    }

    #[test]
    fn test_screen_mapping_rejects_non_finite() {
        assert_eq!(screen_to_pixel(&Point2::new(f64::NAN, 0.0), 160, 240), None);
        assert_eq!(screen_to_pixel(&Point2::new(0.0, f64::INFINITY), 160, 240), None);
    }

    #[test]
    fn test_screen_mapping_saturates() {
        let (x, y) = screen_to_pixel(&Point2::new(1e300, -1e300), 160, 240).unwrap();
        assert_eq!(x, i32::MAX);
        assert_eq!(y, i32::MIN);
    }

    #[test]
    fn test_local_to_camera_translates_after_rotation() {
        let out = local_to_camera(
            &[Vec3::new(1.0, 0.0, 0.0)],
            &Vec3::new(0.0, 0.0, 90.0),
            &Vec3::new(0.0, 0.0, 6.0),
            &Vec3::new(0.0, 0.0, 1.0),
        );
        assert!((out[0] - Vec3::new(0.0, 1.0, 5.0)).norm() < 1e-12);
    }
}
