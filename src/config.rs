/*
 * @Author       : 老董
 * @Date         : 2026-03-03
 * @Description  : 代码生成的输入（Configuration）与输出（GeneratedCode）
 *
 * Configuration 由调用方（表单编辑器）构建，在一次“生成”调用内只读；
 * 框架名、模型风格名只在边界处按字符串解析一次，内部一律使用闭合枚举。
 */

use crate::errors::{CodegenError, LayerError};
use crate::layer::{CnnLayer, FcnLayer};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::{self, Display};
use std::str::FromStr;

/// 下载生成代码时使用的MIME类型
pub const DOWNLOAD_MIME_TYPE: &str = "text/plain";

/// 目标框架
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    PyTorch,
    Keras,
}

impl Framework {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PyTorch => "PyTorch",
            Self::Keras => "Keras",
        }
    }
}

impl FromStr for Framework {
    type Err = CodegenError;

    /// 不区分大小写
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "pytorch" => Ok(Self::PyTorch),
            "keras" => Ok(Self::Keras),
            _ => Err(CodegenError::UnsupportedFramework(name.to_string())),
        }
    }
}

impl Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 模型代码的组织风格（仅Keras区分三种写法）
///
/// 反序列化与`FromStr`走同一条解析路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ModelStyle {
    #[default]
    Sequential,
    Functional,
    Subclassing,
}

impl ModelStyle {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Functional => "Functional",
            Self::Subclassing => "Subclassing",
        }
    }
}

impl FromStr for ModelStyle {
    type Err = CodegenError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "Sequential" => Ok(Self::Sequential),
            "Functional" => Ok(Self::Functional),
            "Subclassing" => Ok(Self::Subclassing),
            _ => Err(CodegenError::UnsupportedModelStyle(name.to_string())),
        }
    }
}

impl TryFrom<String> for ModelStyle {
    type Error = CodegenError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl Display for ModelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 网络类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkKind {
    Fcn,
    Cnn,
}

impl NetworkKind {
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Fcn => "FCN",
            Self::Cnn => "CNN",
        }
    }

    /// 下载文件名，如`CNN.py`
    pub fn download_file_name(&self) -> String {
        format!("{}.py", self.tag())
    }
}

/// 把层类型族与网络类型、字段范围检查关联起来
pub trait Network: Clone {
    const KIND: NetworkKind;

    /// 按本族的取值范围检查一层（`index`仅用于错误定位）
    fn check_limits(&self, index: usize) -> Result<(), LayerError>;
}

impl Network for FcnLayer {
    const KIND: NetworkKind = NetworkKind::Fcn;

    fn check_limits(&self, index: usize) -> Result<(), LayerError> {
        FcnLayer::check_limits(self, index)
    }
}

impl Network for CnnLayer {
    const KIND: NetworkKind = NetworkKind::Cnn;

    fn check_limits(&self, index: usize) -> Result<(), LayerError> {
        CnnLayer::check_limits(self, index)
    }
}

/// 一次代码生成的完整输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration<L> {
    pub layers: Vec<L>,
    #[serde(default)]
    pub model_style: ModelStyle,
}

pub type FcnConfig = Configuration<FcnLayer>;
pub type CnnConfig = Configuration<CnnLayer>;

impl<L> Configuration<L> {
    pub fn new(layers: Vec<L>, model_style: ModelStyle) -> Self {
        Self {
            layers,
            model_style,
        }
    }
}

impl<L: Network> Configuration<L> {
    /// 逐层检查字段范围，返回第一个越界的字段
    pub fn check_limits(&self) -> Result<(), LayerError> {
        self.layers
            .iter()
            .enumerate()
            .try_for_each(|(index, layer)| layer.check_limits(index))
    }
}

impl<L: Network + Serialize + DeserializeOwned> Configuration<L> {
    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, CodegenError> {
        serde_json::to_string_pretty(self).map_err(|e| CodegenError::InvalidConfig(e.to_string()))
    }

    /// 从 JSON 字符串解析，并检查各层字段范围
    pub fn from_json(json: &str) -> Result<Self, CodegenError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CodegenError::InvalidConfig(e.to_string()))?;
        config.check_limits()?;
        Ok(config)
    }
}

/// 生成结果：导入、模型定义、训练代码三段
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratedCode {
    pub imports: String,
    pub model: String,
    pub training: String,
}

impl GeneratedCode {
    /// 按固定顺序拼接，段与段之间空一行
    pub fn render(&self) -> String {
        format!("{}\n\n{}\n\n{}", self.imports, self.model, self.training)
    }
}

impl Display for GeneratedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
