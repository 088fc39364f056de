use super::{assert_in_order, small_cnn, small_fcn};
use crate::codegen::{generate, generate_cnn, generate_code, generate_fcn};
use crate::config::{Framework, ModelStyle};
use crate::errors::CodegenError;

#[test]
fn test_framework_lookup_is_case_insensitive() -> Result<(), CodegenError> {
    let config = small_cnn(ModelStyle::Sequential);
    let lower = generate_code("keras", &config)?;
    let mixed = generate_code("KeRaS", &config)?;
    assert_eq!(lower, mixed);
    assert_eq!(generate_code("PyTorch", &config)?, generate_code("pytorch", &config)?);
    Ok(())
}

#[test]
fn test_unsupported_framework() {
    let config = small_fcn(ModelStyle::Sequential);
    assert_eq!(
        generate_code("TensorFlow.js", &config),
        Err(CodegenError::UnsupportedFramework("TensorFlow.js".to_string()))
    );
    let message = generate_code("jax", &small_cnn(ModelStyle::Sequential))
        .unwrap_err()
        .to_string();
    assert_eq!(message, "Unsupported framework: jax");
}

#[test]
fn test_blocks_joined_by_blank_lines() -> Result<(), CodegenError> {
    let config = small_cnn(ModelStyle::Sequential);
    let code = generate(Framework::Keras, &config)?;
    let rendered = generate_code("Keras", &config)?;
    assert_eq!(
        rendered,
        format!("{}\n\n{}\n\n{}", code.imports, code.model, code.training)
    );
    assert_eq!(rendered, code.to_string());
    assert!(rendered.starts_with("from tensorflow import keras\n"));
    Ok(())
}

#[test]
fn test_generation_is_deterministic() -> Result<(), CodegenError> {
    for framework in [Framework::PyTorch, Framework::Keras] {
        for style in [
            ModelStyle::Sequential,
            ModelStyle::Functional,
            ModelStyle::Subclassing,
        ] {
            assert_eq!(
                generate_cnn(framework, &small_cnn(style))?,
                generate_cnn(framework, &small_cnn(style))?
            );
            assert_eq!(
                generate_fcn(framework, &small_fcn(style))?,
                generate_fcn(framework, &small_fcn(style))?
            );
        }
    }
    Ok(())
}

#[test]
fn test_pytorch_cnn_declares_module_class() -> Result<(), CodegenError> {
    let code = generate_code("PyTorch", &small_cnn(ModelStyle::Sequential))?;
    assert_in_order(
        &code,
        &[
            "import torch.nn as nn",
            "class CNNModel(nn.Module):",
            "def __init__(self):",
            "self.conv1 = nn.Conv2d(",
            "self.output = nn.Linear(",
            "def forward(self, x):",
            "x = self.conv1(x)",
            "x = self.output(x)",
            "def train_model(",
        ],
    );
    assert_eq!(code.matches("nn.Conv2d(").count(), 1);
    assert_eq!(code.matches("nn.Linear(").count(), 1);
    Ok(())
}

#[test]
fn test_shape_error_aborts_without_partial_output() {
    let mut config = small_cnn(ModelStyle::Sequential);
    config.layers[1] = crate::layer::Conv::new(8, [40, 3]).into();
    for framework in ["PyTorch", "Keras"] {
        assert!(matches!(
            generate_code(framework, &config),
            Err(CodegenError::Shape(_))
        ));
    }
}
