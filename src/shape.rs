/*
 * @Author       : 老董
 * @Date         : 2026-03-04
 * @Description  : CNN形状推导（Shape Propagation）
 *
 * 沿层序列前向模拟张量形状（通道×高×宽），供两处使用：
 * - PyTorch代码生成：推断 `nn.Conv2d`/`nn.Linear` 的输入通道数/特征数
 * - 结构图：每层方块的尺寸与标注文字
 *
 * 卷积为“valid”卷积（无填充、步长1）；池化按 floor((n-k)/s)+1 计算。
 * 计算在有符号整数上进行并检查溢出，任何非正或溢出的空间尺寸都会被拒绝，而不是生成无意义的代码。
 */

use crate::errors::ShapeError;
use crate::layer::{CnnLayer, LayerKind, LayerSpec};
use std::fmt::{self, Display};

/// 某层输出的三维形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeAtLayer {
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl ShapeAtLayer {
    pub const fn new(channels: usize, height: usize, width: usize) -> Self {
        Self {
            channels,
            height,
            width,
        }
    }

    /// 展平后的元素个数；乘积溢出时为None
    pub fn numel(&self) -> Option<usize> {
        self.channels
            .checked_mul(self.height)?
            .checked_mul(self.width)
    }
}

impl Display for ShapeAtLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.channels, self.height, self.width)
    }
}

/// 某层输出的形状：展平前为三维，展平后为一维
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerShape {
    Spatial(ShapeAtLayer),
    Flat(usize),
}

impl LayerShape {
    /// 作为下一层“输入宽度”的值：三维取通道数，一维取长度
    pub const fn width(&self) -> usize {
        match self {
            Self::Spatial(s) => s.channels,
            Self::Flat(n) => *n,
        }
    }
}

impl Display for LayerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spatial(s) => write!(f, "{s}"),
            Self::Flat(n) => write!(f, "{n}"),
        }
    }
}

/// 逐层推导输出形状，结果与输入层序列一一对应
///
/// 输入层之前的形状视为`0x0x0`（未经校验的序列上，随后的空间层会因尺寸非正而报错）。
pub fn propagate(layers: &[CnnLayer]) -> Result<Vec<LayerShape>, ShapeError> {
    let mut shapes = Vec::with_capacity(layers.len());
    let mut current = LayerShape::Spatial(ShapeAtLayer::default());
    for (index, layer) in layers.iter().enumerate() {
        current = step(index, layer, current)?;
        shapes.push(current);
    }
    Ok(shapes)
}

/// 每层的“输入宽度”（即前一层输出的`LayerShape::width`）
///
/// 用于填写PyTorch构造函数中的输入通道数/特征数；首层返回0。
pub fn previous_widths(layers: &[CnnLayer]) -> Result<Vec<usize>, ShapeError> {
    let shapes = propagate(layers)?;
    let widths = std::iter::once(0)
        .chain(shapes.iter().map(LayerShape::width))
        .take(layers.len())
        .collect();
    Ok(widths)
}

fn step(index: usize, layer: &CnnLayer, current: LayerShape) -> Result<LayerShape, ShapeError> {
    let kind = layer.kind();
    let spatial = || match current {
        LayerShape::Spatial(s) => Ok(s),
        LayerShape::Flat(_) => Err(ShapeError::SpatialAfterFlatten { index, kind }),
    };
    let overflow = || ShapeError::Overflow { index, kind };

    let next = match layer {
        CnnLayer::Input(l) => {
            let [c, h, w] = l.size;
            LayerShape::Spatial(ShapeAtLayer::new(c, h, w))
        }
        CnnLayer::Conv(l) => {
            let s = spatial()?;
            let height = convolved(s.height, l.kernel[0]).ok_or_else(overflow)?;
            let width = convolved(s.width, l.kernel[1]).ok_or_else(overflow)?;
            spatial_checked(index, kind, l.size, height, width)?
        }
        CnnLayer::Pool(l) => {
            let s = spatial()?;
            if l.stride[0] == 0 || l.stride[1] == 0 {
                return Err(ShapeError::ZeroStride { index });
            }
            let height = pooled(s.height, l.kernel[0], l.stride[0]).ok_or_else(overflow)?;
            let width = pooled(s.width, l.kernel[1], l.stride[1]).ok_or_else(overflow)?;
            spatial_checked(index, kind, s.channels, height, width)?
        }
        CnnLayer::Padding(l) => {
            let s = spatial()?;
            let height = padded(s.height, l.padding[0]).ok_or_else(overflow)?;
            let width = padded(s.width, l.padding[1]).ok_or_else(overflow)?;
            spatial_checked(index, kind, s.channels, height, width)?
        }
        CnnLayer::Flatten(_) => match current {
            LayerShape::Spatial(s) => LayerShape::Flat(s.numel().ok_or_else(overflow)?),
            flat @ LayerShape::Flat(_) => flat,
        },
        CnnLayer::Dense(l) => LayerShape::Flat(l.size),
        CnnLayer::Output(l) => LayerShape::Flat(l.size),
        CnnLayer::Dropout(_) => current,
    };
    Ok(next)
}

// ========== 有符号、带溢出检查的尺寸计算 ==========

fn signed(n: usize) -> Option<i64> {
    i64::try_from(n).ok()
}

/// n - (k - 1)
fn convolved(n: usize, kernel: usize) -> Option<i64> {
    signed(n)?.checked_sub(signed(kernel)?.checked_sub(1)?)
}

/// floor((n - k) / s) + 1，向负无穷取整
fn pooled(n: usize, kernel: usize, stride: usize) -> Option<i64> {
    signed(n)?
        .checked_sub(signed(kernel)?)?
        .checked_div_euclid(signed(stride)?)?
        .checked_add(1)
}

/// n + 2p
fn padded(n: usize, padding: usize) -> Option<i64> {
    signed(n)?.checked_add(signed(padding)?.checked_mul(2)?)
}

fn spatial_checked(
    index: usize,
    kind: LayerKind,
    channels: usize,
    height: i64,
    width: i64,
) -> Result<LayerShape, ShapeError> {
    if height <= 0 || width <= 0 {
        return Err(ShapeError::NonPositiveDimension {
            index,
            kind,
            height,
            width,
        });
    }
    Ok(LayerShape::Spatial(ShapeAtLayer::new(
        channels,
        height as usize,
        width as usize,
    )))
}

// ========== 结构图标注 ==========

/// 结构图上一层的标注信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerAnnotation {
    pub kind: LayerKind,
    /// 方块旁的说明文字，如"Conv\n8x3x3"
    pub info_text: String,
    /// 输出尺寸文字，如"8x30x30"
    pub size_text: String,
    pub shape: LayerShape,
}

/// 为结构图生成逐层标注
pub fn annotate(layers: &[CnnLayer]) -> Result<Vec<LayerAnnotation>, ShapeError> {
    let shapes = propagate(layers)?;
    let annotations = layers
        .iter()
        .zip(shapes)
        .map(|(layer, shape)| LayerAnnotation {
            kind: layer.kind(),
            info_text: layer.info_text(),
            size_text: shape.to_string(),
            shape,
        })
        .collect();
    Ok(annotations)
}
