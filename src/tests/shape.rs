/*
 * @Author       : 老董
 * @Date         : 2026-03-04
 * @Description  : CNN形状推导及结构图标注的单元测试
 */

use crate::errors::ShapeError;
use crate::layer::{
    Activation, CnnInput, CnnLayer, Conv, Dense, Dropout, Flatten, LayerKind, Output, Padding,
    Pool,
};
use crate::shape::{LayerShape, ShapeAtLayer, annotate, previous_widths, propagate};

fn spatial(c: usize, h: usize, w: usize) -> LayerShape {
    LayerShape::Spatial(ShapeAtLayer::new(c, h, w))
}

#[test]
fn test_conv_is_valid_convolution() -> Result<(), ShapeError> {
    let layers: Vec<CnnLayer> = vec![CnnInput::new(3, 10, 10).into(), Conv::new(4, [3, 3]).into()];
    let shapes = propagate(&layers)?;
    assert_eq!(shapes, vec![spatial(3, 10, 10), spatial(4, 8, 8)]);
    Ok(())
}

#[test]
fn test_conv_rectangular_kernel() -> Result<(), ShapeError> {
    let layers: Vec<CnnLayer> = vec![CnnInput::new(1, 12, 9).into(), Conv::new(6, [5, 2]).into()];
    assert_eq!(propagate(&layers)?[1], spatial(6, 8, 8));
    Ok(())
}

#[test]
fn test_pool_floors() -> Result<(), ShapeError> {
    // floor((7-2)/2)+1 = 3；floor((8-3)/1)+1 = 6
    let layers: Vec<CnnLayer> = vec![
        CnnInput::new(5, 7, 8).into(),
        Pool::new([2, 3], [2, 1]).into(),
    ];
    assert_eq!(propagate(&layers)?[1], spatial(5, 3, 6));
    Ok(())
}

#[test]
fn test_padding_adds_both_sides() -> Result<(), ShapeError> {
    let layers: Vec<CnnLayer> = vec![CnnInput::new(2, 4, 4).into(), Padding::new([1, 3]).into()];
    assert_eq!(propagate(&layers)?[1], spatial(2, 6, 10));
    Ok(())
}

#[test]
fn test_flatten_and_dense_chain() -> Result<(), ShapeError> {
    let layers: Vec<CnnLayer> = vec![
        CnnInput::new(1, 28, 28).into(),
        Padding::new([1, 1]).into(),
        Conv::new(16, [3, 3]).into(),
        Pool::new([2, 2], [2, 2]).into(),
        Flatten {}.into(),
        Dense::new(64, Activation::ReLU).into(),
        Dropout::new(0.25).into(),
        Output::new(10, Activation::Softmax).into(),
    ];
    let shapes = propagate(&layers)?;
    assert_eq!(shapes.len(), layers.len());
    assert_eq!(shapes[1], spatial(1, 30, 30));
    assert_eq!(shapes[2], spatial(16, 28, 28));
    assert_eq!(shapes[3], spatial(16, 14, 14));
    assert_eq!(shapes[4], LayerShape::Flat(3136));
    assert_eq!(shapes[5], LayerShape::Flat(64));
    // Dropout不改变形状
    assert_eq!(shapes[6], LayerShape::Flat(64));
    assert_eq!(shapes[7], LayerShape::Flat(10));

    let widths = previous_widths(&layers)?;
    assert_eq!(widths, vec![0, 1, 1, 16, 16, 3136, 64, 64]);
    Ok(())
}

#[test]
fn test_non_positive_dimension() {
    let layers: Vec<CnnLayer> = vec![CnnInput::new(3, 4, 6).into(), Conv::new(8, [5, 3]).into()];
    assert_eq!(
        propagate(&layers),
        Err(ShapeError::NonPositiveDimension {
            index: 1,
            kind: LayerKind::Conv,
            height: 0,
            width: 4,
        })
    );

    // 池化核大于输入：floor((2-5)/1)+1 = -2
    let layers: Vec<CnnLayer> = vec![CnnInput::new(1, 2, 2).into(), Pool::new([5, 5], [1, 1]).into()];
    assert_eq!(
        propagate(&layers),
        Err(ShapeError::NonPositiveDimension {
            index: 1,
            kind: LayerKind::Pool,
            height: -2,
            width: -2,
        })
    );
}

#[test]
fn test_zero_stride() {
    let layers: Vec<CnnLayer> = vec![CnnInput::new(1, 8, 8).into(), Pool::new([2, 2], [0, 2]).into()];
    assert_eq!(propagate(&layers), Err(ShapeError::ZeroStride { index: 1 }));
}

#[test]
fn test_spatial_after_flatten() {
    let layers: Vec<CnnLayer> = vec![
        CnnInput::new(1, 8, 8).into(),
        Flatten {}.into(),
        Conv::new(2, [1, 1]).into(),
    ];
    assert_eq!(
        propagate(&layers),
        Err(ShapeError::SpatialAfterFlatten {
            index: 2,
            kind: LayerKind::Conv,
        })
    );
}

#[test]
fn test_missing_input_collapses() {
    // 没有输入层时从0x0x0开始，卷积立即报错
    let layers: Vec<CnnLayer> = vec![Conv::new(2, [1, 1]).into()];
    assert!(matches!(
        propagate(&layers),
        Err(ShapeError::NonPositiveDimension { index: 0, .. })
    ));
    assert_eq!(propagate(&[]), Ok(vec![]));
}

#[test]
fn test_shape_display() {
    assert_eq!(ShapeAtLayer::new(8, 30, 30).to_string(), "8x30x30");
    assert_eq!(ShapeAtLayer::new(8, 30, 30).numel(), Some(7200));
    assert_eq!(ShapeAtLayer::new(usize::MAX, 2, 1).numel(), None);
    assert_eq!(LayerShape::Flat(7200).to_string(), "7200");
    assert_eq!(spatial(3, 2, 1).width(), 3);
    assert_eq!(LayerShape::Flat(12).width(), 12);
}

#[test]
fn test_annotate() -> Result<(), ShapeError> {
    let layers: Vec<CnnLayer> = vec![
        CnnInput::new(3, 32, 32).into(),
        Conv::new(8, [3, 3]).into(),
        Pool::new([2, 2], [2, 2]).into(),
        Padding::new([1, 1]).into(),
        Flatten {}.into(),
        Output::new(10, Activation::Softmax).into(),
    ];
    let annotations = annotate(&layers)?;
    let texts: Vec<(&str, &str)> = annotations
        .iter()
        .map(|a| (a.info_text.as_str(), a.size_text.as_str()))
        .collect();
    assert_eq!(
        texts,
        vec![
            ("Input\n3x32x32", "3x32x32"),
            ("Conv\n8x3x3", "8x30x30"),
            ("Pool\n2x2\n2x2", "8x15x15"),
            ("Padding\n1x1", "8x17x17"),
            ("Flatten", "2312"),
            ("Output\n10\nSoftmax", "10"),
        ]
    );
    assert_eq!(annotations[4].kind, LayerKind::Flatten);
    assert_eq!(annotations[4].shape, LayerShape::Flat(2312));
    Ok(())
}

#[test]
fn test_huge_padding_overflows() {
    let layers: Vec<CnnLayer> = vec![
        CnnInput::new(1, 8, 8).into(),
        Padding::new([1 << 62, 0]).into(),
    ];
    assert_eq!(
        propagate(&layers),
        Err(ShapeError::Overflow {
            index: 1,
            kind: LayerKind::Padding,
        })
    );
}

#[test]
fn test_unrepresentable_sizes_overflow() {
    // 超出i64范围的卷积核
    let layers: Vec<CnnLayer> = vec![
        CnnInput::new(1, 8, 8).into(),
        Conv::new(1, [usize::MAX, 1]).into(),
    ];
    assert_eq!(
        propagate(&layers),
        Err(ShapeError::Overflow {
            index: 1,
            kind: LayerKind::Conv,
        })
    );

    // 展平时元素个数溢出
    let layers: Vec<CnnLayer> = vec![
        CnnInput::new(1 << 32, 1 << 32, 1 << 32).into(),
        Flatten {}.into(),
    ];
    assert_eq!(
        propagate(&layers),
        Err(ShapeError::Overflow {
            index: 1,
            kind: LayerKind::Flatten,
        })
    );
}
