/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 层（Layer）描述 - FCN/CNN两个互相独立的层类型族
 *
 * 这里的层只是“网络结构的声明”，不含任何参数或计算；
 * 下游的校验器、形状推导、代码生成器都对闭合的枚举做穷尽匹配。
 */

mod cnn;
mod fcn;

pub use cnn::{CNN_LIMITS, CnnInput, CnnLayer, CnnLimits, Conv, Flatten, Padding, Pool};
pub use fcn::{FCN_LIMITS, FcnInput, FcnLayer, FcnLimits, sample_fcn};

use crate::errors::{Bound, LayerError};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// 层的类型标签（两族共用同一套标签）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Input,
    Conv,
    Pool,
    Padding,
    Flatten,
    Dense,
    Dropout,
    Output,
}

impl LayerKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Conv => "Conv",
            Self::Pool => "Pool",
            Self::Padding => "Padding",
            Self::Flatten => "Flatten",
            Self::Dense => "Dense",
            Self::Dropout => "Dropout",
            Self::Output => "Output",
        }
    }

    /// 是否为作用于（通道×高×宽）张量的空间层
    pub const fn is_spatial(&self) -> bool {
        matches!(self, Self::Conv | Self::Pool | Self::Padding)
    }
}

impl Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 激活函数
///
/// 反序列化时对未知名称宽容处理：一律回落到`ReLU`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Activation {
    #[default]
    ReLU,
    Sigmoid,
    Tanh,
    Softmax,
}

impl Activation {
    /// 按标签名解析，无法识别的名称按`ReLU`处理
    pub fn parse(name: &str) -> Self {
        match name {
            "ReLU" => Self::ReLU,
            "Sigmoid" => Self::Sigmoid,
            "Tanh" => Self::Tanh,
            "Softmax" => Self::Softmax,
            _ => Self::ReLU,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReLU => "ReLU",
            Self::Sigmoid => "Sigmoid",
            Self::Tanh => "Tanh",
            Self::Softmax => "Softmax",
        }
    }

    /// Keras中`activation=`参数所用的小写名称
    pub const fn keras_name(&self) -> &'static str {
        match self {
            Self::ReLU => "relu",
            Self::Sigmoid => "sigmoid",
            Self::Tanh => "tanh",
            Self::Softmax => "softmax",
        }
    }

    /// PyTorch中对应的激活模块构造表达式
    pub const fn torch_module(&self) -> &'static str {
        match self {
            Self::ReLU => "nn.ReLU()",
            Self::Sigmoid => "nn.Sigmoid()",
            Self::Tanh => "nn.Tanh()",
            Self::Softmax => "nn.Softmax(dim=1)",
        }
    }
}

impl From<String> for Activation {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 两族层的共同接口
#[enum_dispatch(FcnLayer, CnnLayer)]
pub trait LayerSpec {
    /// 层的类型标签
    fn kind(&self) -> LayerKind;

    /// 结构图上该层的说明文字（多行，首行为类型名）
    fn info_text(&self) -> String;
}

// ========== 两族共用的层 ==========

/// 全连接层
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dense {
    pub size: usize,
    #[serde(default)]
    pub activation: Activation,
}

/// 随机失活层
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dropout {
    pub rate: f64,
}

/// 输出层（本质上是最后一个全连接层）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub size: usize,
    #[serde(default)]
    pub activation: Activation,
}

impl Dense {
    pub const fn new(size: usize, activation: Activation) -> Self {
        Self { size, activation }
    }
}

impl Dropout {
    pub const fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Output {
    pub const fn new(size: usize, activation: Activation) -> Self {
        Self { size, activation }
    }
}

impl LayerSpec for Dense {
    fn kind(&self) -> LayerKind {
        LayerKind::Dense
    }

    fn info_text(&self) -> String {
        format!("Dense\n{}\n{}", self.size, self.activation)
    }
}

impl LayerSpec for Dropout {
    fn kind(&self) -> LayerKind {
        LayerKind::Dropout
    }

    fn info_text(&self) -> String {
        format!("Dropout\n{}", self.rate)
    }
}

impl LayerSpec for Output {
    fn kind(&self) -> LayerKind {
        LayerKind::Output
    }

    fn info_text(&self) -> String {
        format!("Output\n{}\n{}", self.size, self.activation)
    }
}

/// 检查单个字段是否落在范围内
pub(crate) fn check_field(
    index: usize,
    kind: LayerKind,
    field: &'static str,
    value: f64,
    bound: Bound,
) -> Result<(), LayerError> {
    if bound.contains(value) {
        Ok(())
    } else {
        Err(LayerError::OutOfRange {
            index,
            kind,
            field,
            value,
            bound,
        })
    }
}
