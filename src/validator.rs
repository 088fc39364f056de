/*
 * @Author       : 老董
 * @Date         : 2026-03-03
 * @Description  : 层序列的结构校验（位置相关的放置规则）
 *
 * 单次前向扫描，O(n)；只看层的类型标签，不检查字段取值范围（那是表单输入层面的事）。
 * 检查顺序有意义：多条规则同时被违反时，只报告最先命中的那一条。
 */

use crate::errors::ValidationError;
use crate::layer::{CnnLayer, FcnLayer, LayerKind, LayerSpec};

/// 供外部（表单/编排层）使用的校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub success: bool,
    pub message: String,
}

impl From<Result<(), ValidationError>> for ValidationReport {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                message: String::new(),
            },
            Err(e) => Self {
                success: false,
                message: e.to_string(),
            },
        }
    }
}

/// 按层类型族选择对应的校验规则
pub trait Validate: LayerSpec + Sized {
    fn validate(layers: &[Self]) -> Result<(), ValidationError>;
}

impl Validate for FcnLayer {
    fn validate(layers: &[Self]) -> Result<(), ValidationError> {
        validate_fcn(layers)
    }
}

impl Validate for CnnLayer {
    fn validate(layers: &[Self]) -> Result<(), ValidationError> {
        validate_cnn(layers)
    }
}

/// 外部入口：校验任意一族的层序列，返回`{success, message}`
pub fn validate_layers<L: Validate>(layers: &[L]) -> ValidationReport {
    L::validate(layers).into()
}

/// 校验FCN层序列：首层为输入、末层为输出，且二者不出现在中间位置
pub fn validate_fcn(layers: &[FcnLayer]) -> Result<(), ValidationError> {
    let kinds = kinds_of(layers);
    check_ends(&kinds)?;
    for (index, kind) in interior(&kinds) {
        check_interior_io(index, kind)?;
    }
    Ok(())
}

/// 校验CNN层序列：在FCN规则基础上，额外约束展平层前后可出现的层
pub fn validate_cnn(layers: &[CnnLayer]) -> Result<(), ValidationError> {
    let kinds = kinds_of(layers);
    check_ends(&kinds)?;

    let mut flatten_seen = false;
    for (index, kind) in interior(&kinds) {
        check_interior_io(index, kind)?;
        match kind {
            LayerKind::Flatten if flatten_seen => {
                return Err(ValidationError::DuplicateFlatten { index });
            }
            LayerKind::Flatten => flatten_seen = true,
            LayerKind::Dense | LayerKind::Dropout if !flatten_seen => {
                return Err(ValidationError::MustFollowFlatten { kind, index });
            }
            LayerKind::Conv | LayerKind::Pool | LayerKind::Padding if flatten_seen => {
                return Err(ValidationError::MustPrecedeFlatten { kind, index });
            }
            _ => {}
        }
    }
    Ok(())
}

fn kinds_of<L: LayerSpec>(layers: &[L]) -> Vec<LayerKind> {
    layers.iter().map(LayerSpec::kind).collect()
}

/// 首末两层的规则（先首后末）
fn check_ends(kinds: &[LayerKind]) -> Result<(), ValidationError> {
    let (Some(first), Some(last)) = (kinds.first(), kinds.last()) else {
        return Err(ValidationError::Empty);
    };
    if *first != LayerKind::Input {
        return Err(ValidationError::FirstLayerNotInput);
    }
    // 仅有一层时，该层不可能同时是输入和输出
    if kinds.len() == 1 || *last != LayerKind::Output {
        return Err(ValidationError::LastLayerNotOutput);
    }
    Ok(())
}

/// 去掉首末两层后的中间层（带原始下标）
fn interior(kinds: &[LayerKind]) -> impl Iterator<Item = (usize, LayerKind)> + '_ {
    let end = kinds.len().saturating_sub(1);
    kinds
        .iter()
        .copied()
        .enumerate()
        .take(end)
        .skip(1)
}

fn check_interior_io(index: usize, kind: LayerKind) -> Result<(), ValidationError> {
    match kind {
        LayerKind::Input => Err(ValidationError::InputNotFirst { index }),
        LayerKind::Output => Err(ValidationError::OutputNotLast { index }),
        _ => Ok(()),
    }
}
