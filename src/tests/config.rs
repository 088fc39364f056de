/*
 * @Author       : 老董
 * @Date         : 2026-03-03
 * @Description  : 框架/模型风格解析与生成结果拼接的单元测试
 */

use crate::config::{
    DOWNLOAD_MIME_TYPE, Framework, GeneratedCode, ModelStyle, Network, NetworkKind,
};
use crate::errors::CodegenError;
use crate::layer::{CnnLayer, FcnLayer};

#[test]
fn test_framework_from_str() {
    assert_eq!("PyTorch".parse::<Framework>(), Ok(Framework::PyTorch));
    assert_eq!("pytorch".parse::<Framework>(), Ok(Framework::PyTorch));
    assert_eq!("KERAS".parse::<Framework>(), Ok(Framework::Keras));

    let err = "mxnet".parse::<Framework>().unwrap_err();
    assert_eq!(err, CodegenError::UnsupportedFramework("mxnet".to_string()));
    assert_eq!(err.to_string(), "Unsupported framework: mxnet");
    assert_eq!(Framework::Keras.to_string(), "Keras");
}

#[test]
fn test_model_style_from_str() {
    assert_eq!("Sequential".parse::<ModelStyle>(), Ok(ModelStyle::Sequential));
    assert_eq!("Functional".parse::<ModelStyle>(), Ok(ModelStyle::Functional));
    assert_eq!("Subclassing".parse::<ModelStyle>(), Ok(ModelStyle::Subclassing));
    assert_eq!(ModelStyle::default(), ModelStyle::Sequential);

    // 模型风格区分大小写
    let err = "sequential".parse::<ModelStyle>().unwrap_err();
    assert_eq!(err.to_string(), "Unsupported Keras model type: sequential");
}

#[test]
fn test_network_kind() {
    assert_eq!(FcnLayer::KIND, NetworkKind::Fcn);
    assert_eq!(CnnLayer::KIND, NetworkKind::Cnn);
    assert_eq!(NetworkKind::Fcn.download_file_name(), "FCN.py");
    assert_eq!(NetworkKind::Cnn.download_file_name(), "CNN.py");
    assert_eq!(DOWNLOAD_MIME_TYPE, "text/plain");
}

#[test]
fn test_generated_code_render() {
    let code = GeneratedCode {
        imports: "import a".to_string(),
        model: "model = b".to_string(),
        training: "train(c)".to_string(),
    };
    assert_eq!(code.render(), "import a\n\nmodel = b\n\ntrain(c)");
    assert_eq!(code.to_string(), code.render());
}
