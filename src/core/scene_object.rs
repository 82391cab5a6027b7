use crate::core::triangle_processor::{Triangle, TriangleProcessor};
use crate::geometry::camera::PhaseRate;
use crate::geometry::math::Vec3;
use crate::material_system::light::PointLight;

/// 物体姿态：位置与欧拉角（度，按 Rz·Ry·Rx 组合）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Pose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::zeros(),
        }
    }
}

/// 网格中的一个面：三个顶点索引与色相（经 `map_color` 得到基础色）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub hue: f32,
}

impl Face {
    pub const fn new(i: usize, j: usize, k: usize, hue: f32) -> Self {
        Self {
            indices: [i, j, k],
            hue,
        }
    }
}

/// 每种形状共享的不可变网格模板（局部空间）
///
/// 面的环绕顺序约定：`cross(v2 - v1, v3 - v1)` 指向实体内部。
#[derive(Debug)]
pub struct Mesh {
    pub vertices: &'static [[f64; 3]],
    pub faces: &'static [Face],
}

/// 8个顶点、12个三角形的单位立方体
pub static CUBE_MESH: Mesh = Mesh {
    vertices: &[
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ],
    faces: &[
        Face::new(0, 1, 2, 0.2),
        Face::new(2, 3, 0, 0.2),
        Face::new(1, 5, 6, 0.3),
        Face::new(6, 2, 1, 0.3),
        Face::new(7, 6, 5, 0.4),
        Face::new(5, 4, 7, 0.4),
        Face::new(4, 0, 3, 0.5),
        Face::new(3, 7, 4, 0.5),
        Face::new(4, 5, 1, 0.6),
        Face::new(1, 0, 4, 0.6),
        Face::new(3, 2, 6, 0.7),
        Face::new(6, 7, 3, 0.7),
    ],
};

/// 正方形底面（y = 0.5）、顶点朝 -y 的四棱锥，5个顶点、6个三角形
pub static PYRAMID_MESH: Mesh = Mesh {
    vertices: &[
        [-0.5, 0.5, -0.5],
        [0.5, 0.5, -0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
        [0.0, -0.5, 0.0],
    ],
    faces: &[
        Face::new(0, 1, 2, 0.8),
        Face::new(2, 3, 0, 0.8),
        Face::new(0, 4, 1, 0.25),
        Face::new(1, 4, 2, 0.45),
        Face::new(2, 4, 3, 0.65),
        Face::new(3, 4, 0, 0.85),
    ],
};

/// 场景物体的能力接口：逐帧更新姿态并发射可见三角形
pub trait Shape {
    fn mesh(&self) -> &'static Mesh;
    fn pose(&self) -> &Pose;

    /// 由帧序号确定性地推导姿态，不依赖任何隐藏状态
    fn update(&mut self, frame: u64);

    /// 生成本帧可见、已着色、已投影的三角形
    fn emit_triangles(&self, camera: &Vec3, light: &PointLight) -> Vec<Triangle> {
        TriangleProcessor::emit(self.mesh(), self.pose(), camera, light)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pose: Pose,
}

impl Cube {
    const ROTATION_X: PhaseRate = PhaseRate::new(3, 10);
    const ROTATION_Y: PhaseRate = PhaseRate::new(6, 10);
    const ROTATION_Z_DEG: f64 = 30.0;

    pub fn new(position: Vec3) -> Self {
        Self {
            pose: Pose::at(position),
        }
    }
}

impl Shape for Cube {
    fn mesh(&self) -> &'static Mesh {
        &CUBE_MESH
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn update(&mut self, frame: u64) {
        self.pose.rotation = Vec3::new(
            Self::ROTATION_X.degrees_at(frame),
            Self::ROTATION_Y.degrees_at(frame),
            Self::ROTATION_Z_DEG,
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid {
    pose: Pose,
}

impl Pyramid {
    const ROTATION_X_DEG: f64 = 20.0;
    const ROTATION_Y: PhaseRate = PhaseRate::new(9, 20);
    const ROTATION_Z: PhaseRate = PhaseRate::new(3, 20);

    pub fn new(position: Vec3) -> Self {
        Self {
            pose: Pose::at(position),
        }
    }
}

impl Shape for Pyramid {
    fn mesh(&self) -> &'static Mesh {
        &PYRAMID_MESH
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn update(&mut self, frame: u64) {
        self.pose.rotation = Vec3::new(
            Self::ROTATION_X_DEG,
            Self::ROTATION_Y.degrees_at(frame),
            Self::ROTATION_Z.degrees_at(frame),
        );
    }
}

/// 场景中的物体，按形状静态分派
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Cube(Cube),
    Pyramid(Pyramid),
}

impl SceneObject {
    /// 由形状名称（"cube" / "pyramid"）创建
    pub fn from_shape_name(shape: &str, position: Vec3) -> Result<Self, String> {
        match shape.to_lowercase().as_str() {
            "cube" => Ok(SceneObject::Cube(Cube::new(position))),
            "pyramid" => Ok(SceneObject::Pyramid(Pyramid::new(position))),
            other => Err(format!("未知的物体形状: '{}'", other)),
        }
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            SceneObject::Cube(_) => "cube",
            SceneObject::Pyramid(_) => "pyramid",
        }
    }
}

impl Shape for SceneObject {
    fn mesh(&self) -> &'static Mesh {
        match self {
            SceneObject::Cube(cube) => cube.mesh(),
            SceneObject::Pyramid(pyramid) => pyramid.mesh(),
        }
    }

    fn pose(&self) -> &Pose {
        match self {
            SceneObject::Cube(cube) => cube.pose(),
            SceneObject::Pyramid(pyramid) => pyramid.pose(),
        }
    }

    fn update(&mut self, frame: u64) {
        match self {
            SceneObject::Cube(cube) => cube.update(frame),
            SceneObject::Pyramid(pyramid) => pyramid.update(frame),
        }
    }
}
