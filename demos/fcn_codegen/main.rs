//! # FCN 代码生成示例
//!
//! 以编辑器自带的示例网络为草稿，生成 Keras 函数式写法的源码并保存为 `FCN.py`。
//!
//! ## 运行
//! ```bash
//! cargo run --example fcn_codegen
//! ```

use net_forge::config::{FcnConfig, Framework, ModelStyle};
use net_forge::designer::FcnDesigner;
use net_forge::errors::CodegenError;
use net_forge::layer::sample_fcn;
use net_forge::validator::validate_layers;

fn main() -> Result<(), CodegenError> {
    env_logger::init();
    println!("=== FCN 代码生成示例 ===\n");

    let layers = sample_fcn();
    let report = validate_layers(&layers);
    println!("校验结果：success={}", report.success);

    // 配置可以与 JSON 互转，便于与前端交换
    let json = FcnConfig::new(layers.clone(), ModelStyle::Functional).to_json()?;
    println!("配置 JSON：\n{json}\n");

    let mut designer = FcnDesigner::with_layers(layers, Framework::Keras, ModelStyle::Functional);
    println!("{}\n", designer.generate()?);

    let path = designer.save_code(std::env::temp_dir())?;
    println!("已保存至 {}", path.display());

    Ok(())
}
