mod facade;

use crate::config::{CnnConfig, FcnConfig, ModelStyle};
use crate::layer::{
    Activation, CnnInput, Conv, Dense, Dropout, FcnInput, Flatten, Output, Padding, Pool,
};

/// Input[3,32,32] -> Conv(8,[3,3]) -> Flatten -> Output(10, Softmax)
fn small_cnn(style: ModelStyle) -> CnnConfig {
    CnnConfig::new(
        vec![
            CnnInput::new(3, 32, 32).into(),
            Conv::new(8, [3, 3]).into(),
            Flatten {}.into(),
            Output::new(10, Activation::Softmax).into(),
        ],
        style,
    )
}

/// 覆盖全部CNN层类型的网络
fn full_cnn(style: ModelStyle) -> CnnConfig {
    CnnConfig::new(
        vec![
            CnnInput::new(1, 28, 28).into(),
            Padding::new([1, 1]).into(),
            Conv::new(16, [3, 3]).into(),
            Pool::new([2, 2], [2, 2]).into(),
            Flatten {}.into(),
            Dense::new(64, Activation::ReLU).into(),
            Dropout::new(0.25).into(),
            Output::new(10, Activation::Softmax).into(),
        ],
        style,
    )
}

/// Input(4) -> Dense(8, ReLU) -> Dropout(0.5) -> Output(2, Sigmoid)
fn small_fcn(style: ModelStyle) -> FcnConfig {
    FcnConfig::new(
        vec![
            FcnInput::new(4).into(),
            Dense::new(8, Activation::ReLU).into(),
            Dropout::new(0.5).into(),
            Output::new(2, Activation::Sigmoid).into(),
        ],
        style,
    )
}

/// 断言`needles`按顺序出现在`haystack`中
fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut rest = haystack;
    for needle in needles {
        match rest.find(needle) {
            Some(pos) => rest = &rest[pos + needle.len()..],
            None => panic!("未按顺序找到`{needle}`，完整文本：\n{haystack}"),
        }
    }
}
