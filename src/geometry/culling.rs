use crate::geometry::math::{Vec3, normal, normalize_or_zero};

/// 相机空间中顶点允许的最小深度
///
/// 任一顶点 z 不大于该值的面（位于相机平面上或其后方）不做投影，直接丢弃。
pub const NEAR_Z: f64 = 1e-6;

/// 朝向测试：法线与第一个相机空间顶点的点积为正时可见
///
/// 法线按 `cross(t2 - t1, t3 - t1)` 计算，网格模板的环绕顺序使其指向实体内部。
/// 退化三角形的法线为零向量，测试结果为不可见。
pub fn faces_camera(t1: &Vec3, t2: &Vec3, t3: &Vec3) -> bool {
    normal(t1, t2, t3).dot(t1) > 0.0
}

/// 面朝光源的程度 `-normal · normalize(light - t1)`，未截断
pub fn light_facing(t1: &Vec3, t2: &Vec3, t3: &Vec3, light: &Vec3) -> f64 {
    let to_light = normalize_or_zero(&(light - t1));
    -normal(t1, t2, t3).dot(&to_light)
}

/// 三个顶点是否都位于近平面之前
pub fn in_front_of_camera(vertices: [&Vec3; 3]) -> bool {
    vertices.iter().all(|v| v.z > NEAR_Z)
}
