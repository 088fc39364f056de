/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 卷积网络（CNN）的层类型
 *
 * 输入形状统一按 [通道, 高, 宽] 给出；卷积核、步长、填充均为 [高, 宽] 二元组。
 */

use super::{Activation, Dense, Dropout, LayerKind, LayerSpec, Output, check_field};
use crate::errors::{Bound, LayerError};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// CNN输入层：[通道, 高, 宽]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnnInput {
    pub size: [usize; 3],
}

/// 卷积层（无填充、步长1）：`size`为输出通道数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conv {
    pub size: usize,
    pub kernel: [usize; 2],
}

/// 最大池化层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub stride: [usize; 2],
    pub kernel: [usize; 2],
}

/// 零填充层：上下各填`padding[0]`，左右各填`padding[1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub padding: [usize; 2],
}

/// 展平层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flatten {}

impl CnnInput {
    pub const fn new(channels: usize, height: usize, width: usize) -> Self {
        Self {
            size: [channels, height, width],
        }
    }
}

impl Conv {
    pub const fn new(size: usize, kernel: [usize; 2]) -> Self {
        Self { size, kernel }
    }
}

impl Pool {
    pub const fn new(kernel: [usize; 2], stride: [usize; 2]) -> Self {
        Self { stride, kernel }
    }
}

impl Padding {
    pub const fn new(padding: [usize; 2]) -> Self {
        Self { padding }
    }
}

impl LayerSpec for CnnInput {
    fn kind(&self) -> LayerKind {
        LayerKind::Input
    }

    fn info_text(&self) -> String {
        let [c, h, w] = self.size;
        format!("Input\n{c}x{h}x{w}")
    }
}

impl LayerSpec for Conv {
    fn kind(&self) -> LayerKind {
        LayerKind::Conv
    }

    fn info_text(&self) -> String {
        format!("Conv\n{}x{}x{}", self.size, self.kernel[0], self.kernel[1])
    }
}

impl LayerSpec for Pool {
    fn kind(&self) -> LayerKind {
        LayerKind::Pool
    }

    fn info_text(&self) -> String {
        format!(
            "Pool\n{}x{}\n{}x{}",
            self.kernel[0], self.kernel[1], self.stride[0], self.stride[1]
        )
    }
}

impl LayerSpec for Padding {
    fn kind(&self) -> LayerKind {
        LayerKind::Padding
    }

    fn info_text(&self) -> String {
        format!("Padding\n{}x{}", self.padding[0], self.padding[1])
    }
}

impl LayerSpec for Flatten {
    fn kind(&self) -> LayerKind {
        LayerKind::Flatten
    }

    fn info_text(&self) -> String {
        "Flatten".to_string()
    }
}

#[enum_dispatch]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CnnLayer {
    Input(CnnInput),
    Conv(Conv),
    Pool(Pool),
    Padding(Padding),
    Flatten(Flatten),
    Dense(Dense),
    Dropout(Dropout),
    Output(Output),
}

/// CNN各字段的取值范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CnnLimits {
    pub input_channels: Bound,
    pub input_size: Bound,
    pub conv_size: Bound,
    pub conv_kernel: Bound,
    pub pool_kernel: Bound,
    pub pool_stride: Bound,
    pub padding: Bound,
    pub dense_size: Bound,
    pub output_size: Bound,
    pub dropout_rate: Bound,
}

pub const CNN_LIMITS: CnnLimits = CnnLimits {
    input_channels: Bound::new(1.0, 2048.0),
    input_size: Bound::new(1.0, 4096.0),
    conv_size: Bound::new(1.0, 2048.0),
    conv_kernel: Bound::new(1.0, 64.0),
    pool_kernel: Bound::new(1.0, 64.0),
    pool_stride: Bound::new(1.0, 64.0),
    padding: Bound::new(0.0, 64.0),
    dense_size: Bound::new(1.0, 50_000.0),
    output_size: Bound::new(1.0, 10_000.0),
    dropout_rate: Bound::new(0.01, 1.0),
};

impl CnnLayer {
    /// 表单中新增一行时的默认层（CNN包含全部层类型，故总是Some）
    pub fn empty(kind: LayerKind) -> Option<Self> {
        let layer: Self = match kind {
            LayerKind::Input => CnnInput::new(1, 1, 1).into(),
            LayerKind::Conv => Conv::new(1, [1, 1]).into(),
            LayerKind::Pool => Pool::new([1, 1], [1, 1]).into(),
            LayerKind::Padding => Padding::new([0, 0]).into(),
            LayerKind::Flatten => Flatten {}.into(),
            LayerKind::Dense => Dense::new(1, Activation::ReLU).into(),
            LayerKind::Dropout => Dropout::new(0.01).into(),
            LayerKind::Output => Output::new(1, Activation::ReLU).into(),
        };
        Some(layer)
    }

    /// 按`CNN_LIMITS`检查本层各字段（`index`仅用于错误定位）
    pub fn check_limits(&self, index: usize) -> Result<(), LayerError> {
        let limits = &CNN_LIMITS;
        let kind = self.kind();
        let check = |field: &'static str, value: usize, bound: Bound| {
            check_field(index, kind, field, value as f64, bound)
        };
        match self {
            Self::Input(l) => {
                let [c, h, w] = l.size;
                check("channels", c, limits.input_channels)?;
                check("height", h, limits.input_size)?;
                check("width", w, limits.input_size)
            }
            Self::Conv(l) => {
                check("size", l.size, limits.conv_size)?;
                check("kernel", l.kernel[0], limits.conv_kernel)?;
                check("kernel", l.kernel[1], limits.conv_kernel)
            }
            Self::Pool(l) => {
                check("kernel", l.kernel[0], limits.pool_kernel)?;
                check("kernel", l.kernel[1], limits.pool_kernel)?;
                check("stride", l.stride[0], limits.pool_stride)?;
                check("stride", l.stride[1], limits.pool_stride)
            }
            Self::Padding(l) => {
                check("padding", l.padding[0], limits.padding)?;
                check("padding", l.padding[1], limits.padding)
            }
            Self::Flatten(_) => Ok(()),
            Self::Dense(l) => check("size", l.size, limits.dense_size),
            Self::Dropout(l) => check_field(index, kind, "rate", l.rate, limits.dropout_rate),
            Self::Output(l) => check("size", l.size, limits.output_size),
        }
    }
}
