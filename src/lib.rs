//! # Net Forge
//!
//! `net_forge`负责可视化神经网络编辑器背后的“生成”环节：
//! 对用户编排的全连接网络（FCN）或卷积网络（CNN）层序列做结构校验、
//! 沿层序列推导张量形状，并确定性地生成等价的 PyTorch / Keras 源码。
//!
//! ```
//! use net_forge::codegen::generate_code;
//! use net_forge::config::{CnnConfig, ModelStyle};
//! use net_forge::layer::{Activation, CnnInput, Conv, Flatten, Output};
//! use net_forge::validator::validate_cnn;
//!
//! let config = CnnConfig::new(
//!     vec![
//!         CnnInput::new(3, 32, 32).into(),
//!         Conv::new(8, [3, 3]).into(),
//!         Flatten {}.into(),
//!         Output::new(10, Activation::Softmax).into(),
//!     ],
//!     ModelStyle::Sequential,
//! );
//! validate_cnn(&config.layers).unwrap();
//! let code = generate_code("keras", &config).unwrap();
//! assert!(code.contains("model.add(layers.Conv2D(8, (3, 3)))"));
//! ```

pub mod codegen;
pub mod config;
pub mod designer;
pub mod errors;
pub mod layer;
pub mod shape;
pub mod validator;

#[cfg(test)]
mod tests;
