use crate::core::scene_object::{Mesh, Pose};
use crate::geometry::culling::{faces_camera, in_front_of_camera};
use crate::geometry::math::Vec3;
use crate::geometry::transform::{local_to_camera, project_to_plane, screen_to_pixel};
use crate::material_system::color::{Rgb565, map_color};
use crate::material_system::light::{PointLight, apply_depth_fade};
use nalgebra::Point2;

/// 单帧有效的渲染记录，由物体发射、被光栅化器消费一次后丢弃
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// 虚拟屏幕坐标，[-1, 1] 映射到整个缓冲区
    pub p1: Point2<f64>,
    pub p2: Point2<f64>,
    pub p3: Point2<f64>,
    /// 代表深度：面的第三个顶点在相机空间中的z
    pub depth: f64,
    pub faces_camera: bool,
    pub color: Rgb565,
}

impl Triangle {
    /// 映射到像素坐标；任一顶点坐标非有限时返回 `None`
    pub fn to_pixels(&self, width: usize, height: usize) -> Option<[(i32, i32); 3]> {
        Some([
            screen_to_pixel(&self.p1, width, height)?,
            screen_to_pixel(&self.p2, width, height)?,
            screen_to_pixel(&self.p3, width, height)?,
        ])
    }
}

/// 三角形处理器，负责可见性判断、着色与深度排序
pub struct TriangleProcessor;

impl TriangleProcessor {
    /// 按当前姿态和相机位置生成网格的可见三角形
    ///
    /// 处理顺序：旋转并平移到相机空间 → 针孔投影 → 近平面剔除 → 朝向测试 →
    /// 点光源提亮 → 深度衰减。
    pub fn emit(mesh: &Mesh, pose: &Pose, camera: &Vec3, light: &PointLight) -> Vec<Triangle> {
        let local: Vec<Vec3> = mesh
            .vertices
            .iter()
            .map(|&[x, y, z]| Vec3::new(x, y, z))
            .collect();
        let view = local_to_camera(&local, &pose.rotation, &pose.position, camera);
        let projected: Vec<Point2<f64>> = view.iter().map(project_to_plane).collect();

        let mut triangles = Vec::with_capacity(mesh.faces.len());
        for face in mesh.faces {
            let [i, j, k] = face.indices;
            let (v1, v2, v3) = (&view[i], &view[j], &view[k]);

            // z ≤ NEAR_Z 的面投影无意义（除零或翻转），整面丢弃
            if !in_front_of_camera([v1, v2, v3]) {
                continue;
            }
            // 退化面的法线为零向量，同样在这里被丢弃
            if !faces_camera(v1, v2, v3) {
                continue;
            }

            let lit = light.illuminate(map_color(face.hue), v1, v2, v3);
            let depth = v3.z;
            let color = apply_depth_fade(lit, depth);

            triangles.push(Triangle {
                p1: projected[i],
                p2: projected[j],
                p3: projected[k],
                depth,
                faces_camera: true,
                color,
            });
        }
        triangles
    }

    /// 画家算法排序：深度降序（远的先画），相等深度保持原有顺序
    pub fn sort_by_depth(triangles: &mut [Triangle]) {
        triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at(depth: f64, tag: u16) -> Triangle {
        Triangle {
            p1: Point2::origin(),
            p2: Point2::origin(),
            p3: Point2::origin(),
            depth,
            faces_camera: true,
            color: Rgb565(tag),
        }
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut triangles = vec![
            triangle_at(1.0, 0),
            triangle_at(5.0, 1),
            triangle_at(3.0, 2),
            triangle_at(5.0, 3),
            triangle_at(1.0, 4),
        ];
        TriangleProcessor::sort_by_depth(&mut triangles);
        let tags: Vec<u16> = triangles.iter().map(|t| t.color.0).collect();
        assert_eq!(tags, vec![1, 3, 2, 0, 4]);
    }

    #[test]
    fn test_to_pixels_rejects_non_finite() {
        let mut t = triangle_at(1.0, 0);
        assert_eq!(t.to_pixels(10, 10), Some([(5, 5); 3]));
        t.p2 = Point2::new(f64::NAN, 0.0);
        assert_eq!(t.to_pixels(10, 10), None);
    }
}
