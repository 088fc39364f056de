/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : PyTorch 代码生成
 *
 * PyTorch 只有 `nn.Module` 子类一种写法，故忽略模型风格。
 * 与 Keras 不同，PyTorch 的 `nn.Linear`/`nn.Conv2d` 需要显式给出输入宽度：
 * FCN 直接沿层序列传递“前一层输出宽度”；CNN 则取自形状推导给出的 `previous_widths`
 * （展平后的第一个全连接层输入为 通道×高×宽）。
 */

use super::{CodeGenerator, Emitter, class_header, model_class_name};
use crate::config::{Configuration, Network};
use crate::errors::CodegenError;
use crate::layer::{Activation, CnnLayer, FcnLayer};
use crate::shape::previous_widths;

/// FCN × PyTorch
#[derive(Debug, Clone, Copy, Default)]
pub struct FcnPyTorch;

/// CNN × PyTorch
#[derive(Debug, Clone, Copy, Default)]
pub struct CnnPyTorch;

const IMPORTS: &str = "import torch
import torch.nn as nn
import torch.optim as optim
from torch.utils.data import DataLoader";

// ========== 两族共用的层 ==========

/// 隐藏全连接层：线性变换 + 激活，属性名共用同一个下标
fn linear(e: Emitter, index: usize, size: usize, activation: Activation) -> Emitter {
    let in_features = e.prev_width;
    e.line(2, format!("self.fc{index} = nn.Linear({in_features}, {size})"))
        .line(2, format!("self.act{index} = {}", activation.torch_module()))
        .forward_line(2, format!("x = self.fc{index}(x)"))
        .forward_line(2, format!("x = self.act{index}(x)"))
        .width(size)
}

fn dropout(e: Emitter, index: usize, rate: f64) -> Emitter {
    e.line(2, format!("self.dropout{index} = nn.Dropout(p={rate})"))
        .forward_line(2, format!("x = self.dropout{index}(x)"))
}

fn output(e: Emitter, size: usize, activation: Activation) -> Emitter {
    let in_features = e.prev_width;
    e.line(2, format!("self.output = nn.Linear({in_features}, {size})"))
        .line(2, format!("self.output_act = {}", activation.torch_module()))
        .forward_line(2, "x = self.output(x)")
        .forward_line(2, "x = self.output_act(x)")
        .width(size)
}

fn class_start<L: Network>() -> Emitter {
    class_header(&model_class_name::<L>(), "nn.Module").symbol("x")
}

fn finish_model(e: Emitter) -> String {
    e.finish_class("def forward(self, x):", None)
}

/// 训练代码：Adam + 手写训练循环，末尾附使用示例
fn training_code<L: Network>(criterion: &str, flatten_inputs: bool) -> String {
    let flatten = if flatten_inputs {
        "            inputs = inputs.view(inputs.size(0), -1)  # Flatten the input\n"
    } else {
        ""
    };
    format!(
        "def train_model(model, train_loader, num_epochs=10):
    criterion = nn.{criterion}()
    optimizer = optim.Adam(model.parameters(), lr=0.001)

    for epoch in range(num_epochs):
        running_loss = 0.0
        for inputs, labels in train_loader:
{flatten}            optimizer.zero_grad()
            outputs = model(inputs)
            loss = criterion(outputs, labels)
            loss.backward()
            optimizer.step()
            running_loss += loss.item()

        print(f'Epoch {{epoch + 1}}, Loss: {{running_loss / len(train_loader)}}')

# Example usage:
# model = {class_name}()
# train_model(model, train_loader)",
        class_name = model_class_name::<L>()
    )
}

impl CodeGenerator<FcnLayer> for FcnPyTorch {
    fn generate_imports(&self) -> String {
        IMPORTS.to_string()
    }

    fn generate_model(&self, config: &Configuration<FcnLayer>) -> Result<String, CodegenError> {
        let e = config
            .layers
            .iter()
            .enumerate()
            .fold(class_start::<FcnLayer>(), |e, (index, layer)| match layer {
                FcnLayer::Input(l) => e.width(l.size),
                FcnLayer::Dense(l) => linear(e, index, l.size, l.activation),
                FcnLayer::Dropout(l) => dropout(e, index, l.rate),
                FcnLayer::Output(l) => output(e, l.size, l.activation),
            });
        Ok(finish_model(e))
    }

    fn generate_training_code(&self, _config: &Configuration<FcnLayer>) -> String {
        training_code::<FcnLayer>("MSELoss", true)
    }
}

impl CodeGenerator<CnnLayer> for CnnPyTorch {
    fn generate_imports(&self) -> String {
        IMPORTS.to_string()
    }

    fn generate_model(&self, config: &Configuration<CnnLayer>) -> Result<String, CodegenError> {
        let widths = previous_widths(&config.layers)?;
        let e = config.layers.iter().zip(widths).enumerate().fold(
            class_start::<CnnLayer>(),
            |e, (index, (layer, in_width))| {
                let e = e.width(in_width);
                match layer {
                    CnnLayer::Input(_) => e,
                    CnnLayer::Conv(l) => {
                        let in_channels = e.prev_width;
                        e.line(
                            2,
                            format!(
                                "self.conv{index} = nn.Conv2d({in_channels}, {}, kernel_size=({}, {}))",
                                l.size, l.kernel[0], l.kernel[1]
                            ),
                        )
                        .forward_line(2, format!("x = self.conv{index}(x)"))
                    }
                    CnnLayer::Pool(l) => e
                        .line(
                            2,
                            format!(
                                "self.pool{index} = nn.MaxPool2d(kernel_size=({}, {}), stride=({}, {}))",
                                l.kernel[0], l.kernel[1], l.stride[0], l.stride[1]
                            ),
                        )
                        .forward_line(2, format!("x = self.pool{index}(x)")),
                    CnnLayer::Padding(l) => {
                        // ZeroPad2d 的顺序为 (左, 右, 上, 下)
                        let [ph, pw] = l.padding;
                        e.line(
                            2,
                            format!("self.pad{index} = nn.ZeroPad2d(({pw}, {pw}, {ph}, {ph}))"),
                        )
                        .forward_line(2, format!("x = self.pad{index}(x)"))
                    }
                    CnnLayer::Flatten(_) => e
                        .line(2, "self.flatten = nn.Flatten()")
                        .forward_line(2, "x = self.flatten(x)"),
                    CnnLayer::Dense(l) => linear(e, index, l.size, l.activation),
                    CnnLayer::Dropout(l) => dropout(e, index, l.rate),
                    CnnLayer::Output(l) => output(e, l.size, l.activation),
                }
            },
        );
        Ok(finish_model(e))
    }

    fn generate_training_code(&self, _config: &Configuration<CnnLayer>) -> String {
        training_code::<CnnLayer>("CrossEntropyLoss", false)
    }
}
