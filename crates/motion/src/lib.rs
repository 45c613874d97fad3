//! # Motion
//!
//! 车辆运动模型：航向、速度与噪声采样。
//!
//! 负责：
//! - 平面航向角计算 (atan2 近似，非大圆航向)
//! - 速度均匀采样 [8.0, 15.0]
//! - 航向噪声 [-5.0, +5.0] 与单步归一化
//!
//! ## 使用示例
//!
//! ```
//! use contracts::Waypoint;
//! use motion::{bearing_between, normalize_heading, MotionModel};
//!
//! let mut model = MotionModel::seeded(42);
//! let bearing = bearing_between(Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 0.0));
//! let heading = normalize_heading(bearing + model.heading_noise());
//! assert!((0.0..360.0).contains(&heading));
//! ```

mod model;

pub use model::{
    bearing_between, normalize_heading, MotionModel, HEADING_NOISE_DEG, SPEED_MAX, SPEED_MIN,
};
