/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @Description  : 校验、形状推导、代码生成各阶段的错误类型
 */

use thiserror::Error;
mod bound;
pub use self::bound::*;

use crate::layer::LayerKind;

/// 层序列结构校验错误
///
/// 错误信息会原样展示给用户，故保持英文短句；`index`仅供表单定位出错的行，不参与显示
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Layer sequence is empty")]
    Empty,
    #[error("First layer must be an input layer")]
    FirstLayerNotInput,
    #[error("Input layer must be the first layer")]
    InputNotFirst { index: usize },
    #[error("Last layer must be an output layer")]
    LastLayerNotOutput,
    #[error("Output layer must be the last layer")]
    OutputNotLast { index: usize },
    #[error("Only one flatten layer is allowed")]
    DuplicateFlatten { index: usize },
    #[error("{kind} layers must come after a flatten layer")]
    MustFollowFlatten { kind: LayerKind, index: usize },
    #[error("{kind} layers must come before flatten layer")]
    MustPrecedeFlatten { kind: LayerKind, index: usize },
}

impl ValidationError {
    /// 出错层在序列中的位置（整体性错误返回None）
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Empty | Self::FirstLayerNotInput | Self::LastLayerNotOutput => None,
            Self::InputNotFirst { index }
            | Self::OutputNotLast { index }
            | Self::DuplicateFlatten { index }
            | Self::MustFollowFlatten { index, .. }
            | Self::MustPrecedeFlatten { index, .. } => Some(*index),
        }
    }
}

/// CNN形状推导错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("第{index}层（{kind}）输出的空间尺寸非正：{height}x{width}")]
    NonPositiveDimension {
        index: usize,
        kind: LayerKind,
        height: i64,
        width: i64,
    },
    #[error("第{index}层（Pool）的步长不能为0")]
    ZeroStride { index: usize },
    #[error("第{index}层（{kind}）位于展平之后，无法作用于一维张量")]
    SpatialAfterFlatten { index: usize, kind: LayerKind },
    #[error("第{index}层（{kind}）的尺寸计算溢出")]
    Overflow { index: usize, kind: LayerKind },
}

/// 单层字段越界错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayerError {
    #[error("第{index}层（{kind}）的字段`{field}`取值{value}超出范围{bound}")]
    OutOfRange {
        index: usize,
        kind: LayerKind,
        field: &'static str,
        value: f64,
        bound: Bound,
    },
}

/// 代码生成错误（整体中止，不返回部分文本）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("Unsupported framework: {0}")]
    UnsupportedFramework(String),
    #[error("Unsupported Keras model type: {0}")]
    UnsupportedModelStyle(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Layer(#[from] LayerError),
    #[error("配置解析失败：{0}")]
    InvalidConfig(String),
    #[error("导出代码文件失败：{0}")]
    ExportFailed(String),
    #[error("尚未生成任何代码")]
    NothingGenerated,
}
