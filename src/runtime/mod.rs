//! 应用生命周期和运行模式

pub mod lifetime;
pub mod modes;
