/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 全连接网络（FCN）的层类型
 */

use super::{Activation, Dense, Dropout, LayerKind, LayerSpec, Output, check_field};
use crate::errors::{Bound, LayerError};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// FCN输入层：仅有特征数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcnInput {
    pub size: usize,
}

impl FcnInput {
    pub const fn new(size: usize) -> Self {
        Self { size }
    }
}

impl LayerSpec for FcnInput {
    fn kind(&self) -> LayerKind {
        LayerKind::Input
    }

    fn info_text(&self) -> String {
        format!("Input\n{}", self.size)
    }
}

#[enum_dispatch]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FcnLayer {
    Input(FcnInput),
    Dense(Dense),
    Dropout(Dropout),
    Output(Output),
}

/// FCN各字段的取值范围
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FcnLimits {
    pub input_size: Bound,
    pub dense_size: Bound,
    pub output_size: Bound,
    pub dropout_rate: Bound,
}

pub const FCN_LIMITS: FcnLimits = FcnLimits {
    input_size: Bound::new(1.0, 100_000.0),
    dense_size: Bound::new(1.0, 50_000.0),
    output_size: Bound::new(1.0, 10_000.0),
    dropout_rate: Bound::new(0.01, 1.0),
};

impl FcnLayer {
    /// 表单中新增一行时的默认层；FCN没有的类型返回None
    pub fn empty(kind: LayerKind) -> Option<Self> {
        let layer: Self = match kind {
            LayerKind::Input => FcnInput::new(1).into(),
            LayerKind::Dense => Dense::new(1, Activation::ReLU).into(),
            LayerKind::Dropout => Dropout::new(0.01).into(),
            LayerKind::Output => Output::new(1, Activation::ReLU).into(),
            LayerKind::Conv | LayerKind::Pool | LayerKind::Padding | LayerKind::Flatten => {
                return None;
            }
        };
        Some(layer)
    }

    /// 按`FCN_LIMITS`检查本层各字段（`index`仅用于错误定位）
    pub fn check_limits(&self, index: usize) -> Result<(), LayerError> {
        let limits = &FCN_LIMITS;
        let kind = self.kind();
        match self {
            Self::Input(l) => check_field(index, kind, "size", l.size as f64, limits.input_size),
            Self::Dense(l) => check_field(index, kind, "size", l.size as f64, limits.dense_size),
            Self::Dropout(l) => check_field(index, kind, "rate", l.rate, limits.dropout_rate),
            Self::Output(l) => {
                check_field(index, kind, "size", l.size as f64, limits.output_size)
            }
        }
    }
}

/// 编辑器自带的示例网络
pub fn sample_fcn() -> Vec<FcnLayer> {
    vec![
        FcnInput::new(8).into(),
        Dense::new(16, Activation::ReLU).into(),
        Dense::new(16, Activation::Sigmoid).into(),
        Dense::new(16, Activation::Softmax).into(),
        Dense::new(16, Activation::Tanh).into(),
        Output::new(8, Activation::ReLU).into(),
    ]
}
