/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : Keras 代码生成（Sequential / Functional / Subclassing 三种写法）
 *
 * 各层到 `layers.Xxx(...)` 构造表达式的映射由 `KerasLayer` 给出，
 * 三种写法只负责把这些表达式按各自的形式串起来，FCN 与 CNN 共用。
 */

use super::{CodeGenerator, Emitter, class_header, model_class_name};
use crate::config::{Configuration, ModelStyle, Network};
use crate::errors::CodegenError;
use crate::layer::{CnnLayer, FcnLayer, LayerKind, LayerSpec};
use crate::shape::propagate;

/// FCN × Keras
#[derive(Debug, Clone, Copy, Default)]
pub struct FcnKeras;

/// CNN × Keras
#[derive(Debug, Clone, Copy, Default)]
pub struct CnnKeras;

/// 单层到 Keras 构造表达式的映射
pub(crate) trait KerasLayer: LayerSpec + Network {
    fn keras_layer(&self) -> String;
}

impl KerasLayer for FcnLayer {
    fn keras_layer(&self) -> String {
        match self {
            Self::Input(l) => format!("layers.Input(shape=({},))", l.size),
            Self::Dense(l) => dense(l.size, l.activation.keras_name()),
            Self::Dropout(l) => dropout(l.rate),
            Self::Output(l) => dense(l.size, l.activation.keras_name()),
        }
    }
}

impl KerasLayer for CnnLayer {
    fn keras_layer(&self) -> String {
        match self {
            Self::Input(l) => {
                let [c, h, w] = l.size;
                format!("layers.Input(shape=({c}, {h}, {w}))")
            }
            Self::Conv(l) => format!(
                "layers.Conv2D({}, ({}, {}))",
                l.size, l.kernel[0], l.kernel[1]
            ),
            Self::Pool(l) => format!(
                "layers.MaxPooling2D(pool_size=({}, {}), strides=({}, {}))",
                l.kernel[0], l.kernel[1], l.stride[0], l.stride[1]
            ),
            Self::Padding(l) => format!(
                "layers.ZeroPadding2D(padding=({}, {}))",
                l.padding[0], l.padding[1]
            ),
            Self::Flatten(_) => "layers.Flatten()".to_string(),
            Self::Dense(l) => dense(l.size, l.activation.keras_name()),
            Self::Dropout(l) => dropout(l.rate),
            Self::Output(l) => dense(l.size, l.activation.keras_name()),
        }
    }
}

fn dense(size: usize, activation: &str) -> String {
    format!("layers.Dense({size}, activation='{activation}')")
}

fn dropout(rate: f64) -> String {
    format!("layers.Dropout({rate})")
}

/// Subclassing 写法中的属性名前缀
fn attr_prefix(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::Input => "input",
        LayerKind::Conv => "conv",
        LayerKind::Pool => "pool",
        LayerKind::Padding => "pad",
        LayerKind::Flatten => "flatten",
        LayerKind::Dense => "dense",
        LayerKind::Dropout => "dropout",
        LayerKind::Output => "output",
    }
}

const IMPORTS: &str = "from tensorflow import keras\nfrom tensorflow.keras import layers";

fn generate_model<L: KerasLayer>(config: &Configuration<L>) -> String {
    match config.model_style {
        ModelStyle::Sequential => sequential(&config.layers),
        ModelStyle::Functional => functional(&config.layers),
        ModelStyle::Subclassing => subclassing(&config.layers),
    }
}

/// 每层一条 `model.add(...)`
fn sequential<L: KerasLayer>(layers: &[L]) -> String {
    layers
        .iter()
        .fold(
            Emitter::starting_at("model").line(0, "model = keras.Sequential()"),
            |e, layer| e.line(0, format!("model.add({})", layer.keras_layer())),
        )
        .finish()
}

/// 输入层引入`inputs`，其余各层作用于上一个张量变量
fn functional<L: KerasLayer>(layers: &[L]) -> String {
    let e = layers
        .iter()
        .fold(Emitter::starting_at("inputs"), |e, layer| match layer.kind() {
            LayerKind::Input => e.line(0, format!("inputs = {}", layer.keras_layer())),
            _ => {
                let line = format!("x = {}({})", layer.keras_layer(), e.prev_symbol);
                e.line(0, line).symbol("x")
            }
        });
    let outputs = e.prev_symbol.clone();
    e.blank()
        .line(0, format!("model = keras.Model(inputs=inputs, outputs={outputs})"))
        .finish()
}

/// 各层为带下标的属性，`call`中依次调用
fn subclassing<L: KerasLayer>(layers: &[L]) -> String {
    layers
        .iter()
        .enumerate()
        .filter(|(_, layer)| layer.kind() != LayerKind::Input)
        .fold(
            class_header(&model_class_name::<L>(), "keras.Model"),
            |e, (index, layer)| {
                let attr = format!("{}{index}", attr_prefix(layer.kind()));
                e.line(2, format!("self.{attr} = {}", layer.keras_layer()))
                    .forward_line(2, format!("x = self.{attr}(x)"))
            },
        )
        .finish_class("def call(self, inputs):", Some("x = inputs"))
}

/// 训练代码：compile + fit，末尾附使用示例
fn training_code<L: Network>(style: ModelStyle, optimizer: &str, loss: &str) -> String {
    let mut code = format!(
        "def train_model(model, x_train, y_train, epochs=10, batch_size=32):
    model.compile(
        optimizer={optimizer},
        loss='{loss}',
        metrics=['accuracy']
    )

    history = model.fit(
        x_train, y_train,
        epochs=epochs,
        batch_size=batch_size,
        validation_split=0.2
    )
    return history

# Example usage:
# Assume x_train and y_train are defined with proper input shapes and labels
"
    );
    if style == ModelStyle::Subclassing {
        code.push_str(&format!(
            "# For Subclassing model, instantiate the subclass first => model = {}()\n",
            model_class_name::<L>()
        ));
    }
    code.push_str("# train_model(model, x_train, y_train)");
    code
}

impl CodeGenerator<FcnLayer> for FcnKeras {
    fn generate_imports(&self) -> String {
        IMPORTS.to_string()
    }

    fn generate_model(&self, config: &Configuration<FcnLayer>) -> Result<String, CodegenError> {
        Ok(generate_model(config))
    }

    fn generate_training_code(&self, config: &Configuration<FcnLayer>) -> String {
        training_code::<FcnLayer>(
            config.model_style,
            "keras.optimizers.Adam(learning_rate=0.001)",
            "mse",
        )
    }
}

impl CodeGenerator<CnnLayer> for CnnKeras {
    fn generate_imports(&self) -> String {
        IMPORTS.to_string()
    }

    fn generate_model(&self, config: &Configuration<CnnLayer>) -> Result<String, CodegenError> {
        // Keras 自行推断形状，这里只用于拒绝尺寸非正的结构
        propagate(&config.layers)?;
        Ok(generate_model(config))
    }

    fn generate_training_code(&self, config: &Configuration<CnnLayer>) -> String {
        training_code::<CnnLayer>(config.model_style, "'adam'", "categorical_crossentropy")
    }
}
