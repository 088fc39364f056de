//! # CNN 代码生成示例
//!
//! 展示 net_forge 的完整“生成”流程：
//! - 用 `CnnDesigner` 编排一个 LeNet 风格的卷积网络
//! - 依次切换 PyTorch / Keras 三种写法生成源码
//! - 打印结构图标注（每层输出形状）
//!
//! ## 运行
//! ```bash
//! RUST_LOG=debug cargo run --example cnn_codegen
//! ```

use net_forge::config::{Framework, ModelStyle};
use net_forge::designer::CnnDesigner;
use net_forge::errors::CodegenError;
use net_forge::layer::{Activation, CnnInput, Conv, Dense, Dropout, Flatten, Output, Padding, Pool};

fn main() -> Result<(), CodegenError> {
    env_logger::init();
    println!("=== CNN 代码生成示例 ===\n");

    // 1. 编排草稿
    let mut designer = CnnDesigner::new(Framework::PyTorch, ModelStyle::Sequential);
    designer.push(CnnInput::new(1, 28, 28).into());
    designer.push(Padding::new([2, 2]).into());
    designer.push(Conv::new(6, [5, 5]).into());
    designer.push(Pool::new([2, 2], [2, 2]).into());
    designer.push(Conv::new(16, [5, 5]).into());
    designer.push(Pool::new([2, 2], [2, 2]).into());
    designer.push(Flatten {}.into());
    designer.push(Dense::new(120, Activation::ReLU).into());
    designer.push(Dropout::new(0.5).into());
    designer.push(Output::new(10, Activation::Softmax).into());

    // 2. PyTorch
    println!("--- PyTorch ---\n{}\n", designer.generate()?);

    // 3. 结构图标注
    println!("--- 各层输出形状 ---");
    for annotation in designer.diagram()? {
        println!("{:<10} {}", annotation.kind.name(), annotation.size_text);
    }
    println!();

    // 4. Keras 三种写法
    designer.set_framework(Framework::Keras);
    for style in [
        ModelStyle::Sequential,
        ModelStyle::Functional,
        ModelStyle::Subclassing,
    ] {
        designer.set_model_style(style);
        println!("--- Keras / {style} ---\n{}\n", designer.generate()?.model);
    }

    // 5. 非法结构：生成失败，上一次的代码保持不变
    designer.insert(1, Dense::new(32, Activation::ReLU).into());
    if let Err(e) = designer.generate() {
        println!("生成失败：{e}");
    }
    println!("代码仍与草稿同步：{}", designer.in_sync());

    Ok(())
}
