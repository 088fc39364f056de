/*
 * @Author       : 老董
 * @Date         : 2026-03-05
 * @Description  : 代码生成器 - (网络类型 × 框架) 组合的生成器矩阵及统一入口
 *
 * 每个生成器都是无状态的单元结构体，实现同一个 `CodeGenerator` 接口；
 * 入口按 `Framework` 穷尽匹配选择生成器，按 导入 → 模型 → 训练 的顺序拼接。
 * 生成过程中的“当前张量变量名 / 前一层输出宽度”放在显式的累加器 `Emitter` 里，
 * 逐层 fold，不依赖外部可变变量。
 */

mod keras;
mod pytorch;

pub use keras::{CnnKeras, FcnKeras};
pub use pytorch::{CnnPyTorch, FcnPyTorch};

use crate::config::{Configuration, Framework, GeneratedCode, Network};
use crate::errors::CodegenError;
use crate::layer::{CnnLayer, FcnLayer};
use log::debug;

/// 单个(网络类型, 框架)组合的生成能力
pub trait CodeGenerator<L> {
    /// 固定的导入语句块
    fn generate_imports(&self) -> String;

    /// 模型定义块（核心映射）
    fn generate_model(&self, config: &Configuration<L>) -> Result<String, CodegenError>;

    /// 训练代码块
    fn generate_training_code(&self, config: &Configuration<L>) -> String;
}

/// 为层类型族选择生成器
pub trait Generate: Network + Sized + 'static {
    fn generator(framework: Framework) -> &'static dyn CodeGenerator<Self>;
}

impl Generate for FcnLayer {
    fn generator(framework: Framework) -> &'static dyn CodeGenerator<Self> {
        match framework {
            Framework::PyTorch => &FcnPyTorch,
            Framework::Keras => &FcnKeras,
        }
    }
}

impl Generate for CnnLayer {
    fn generator(framework: Framework) -> &'static dyn CodeGenerator<Self> {
        match framework {
            Framework::PyTorch => &CnnPyTorch,
            Framework::Keras => &CnnKeras,
        }
    }
}

/// 生成三段代码；任一段失败则整体失败，不返回部分结果
pub fn generate<L: Generate>(
    framework: Framework,
    config: &Configuration<L>,
) -> Result<GeneratedCode, CodegenError> {
    let generator = L::generator(framework);
    let model = generator.generate_model(config)?;
    let code = GeneratedCode {
        imports: generator.generate_imports(),
        model,
        training: generator.generate_training_code(config),
    };
    debug!(
        "已生成{}/{}代码：{}层，风格{}",
        L::KIND.tag(),
        framework,
        config.layers.len(),
        config.model_style
    );
    Ok(code)
}

pub fn generate_fcn(
    framework: Framework,
    config: &Configuration<FcnLayer>,
) -> Result<GeneratedCode, CodegenError> {
    generate(framework, config)
}

pub fn generate_cnn(
    framework: Framework,
    config: &Configuration<CnnLayer>,
) -> Result<GeneratedCode, CodegenError> {
    generate(framework, config)
}

/// 外部入口：框架名不区分大小写，返回拼接好的完整源码
pub fn generate_code<L: Generate>(
    framework: &str,
    config: &Configuration<L>,
) -> Result<String, CodegenError> {
    let framework: Framework = framework.parse()?;
    generate(framework, config).map(|code| code.render())
}

// ========== 生成累加器 ==========

/// 逐层生成时携带的状态
///
/// - `text`：主代码块（如 `__init__` 中的属性定义，或顺序语句）
/// - `forward`：前向方法体（仅类写法使用）
/// - `prev_symbol`：最近一个张量的变量名
/// - `prev_width`：前一层的输出宽度（特征数/通道数）
#[derive(Debug, Clone, Default)]
pub(crate) struct Emitter {
    pub text: String,
    pub forward: String,
    pub prev_symbol: String,
    pub prev_width: usize,
}

const INDENT: &str = "    ";

impl Emitter {
    pub fn starting_at(symbol: &str) -> Self {
        Self {
            prev_symbol: symbol.to_string(),
            ..Self::default()
        }
    }

    pub fn line(mut self, depth: usize, line: impl AsRef<str>) -> Self {
        push_line(&mut self.text, depth, line.as_ref());
        self
    }

    pub fn forward_line(mut self, depth: usize, line: impl AsRef<str>) -> Self {
        push_line(&mut self.forward, depth, line.as_ref());
        self
    }

    pub fn blank(mut self) -> Self {
        self.text.push('\n');
        self
    }

    pub fn symbol(mut self, symbol: &str) -> Self {
        self.prev_symbol = symbol.to_string();
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.prev_width = width;
        self
    }

    /// 类写法：`text`为初始化块，其后接前向方法头、`forward`和返回语句
    pub fn finish_class(self, method_header: &str, preamble: Option<&str>) -> String {
        let mut out = self.text;
        out.push('\n');
        push_line(&mut out, 1, method_header);
        if let Some(preamble) = preamble {
            push_line(&mut out, 2, preamble);
        }
        out.push_str(&self.forward);
        push_line(&mut out, 2, "return x");
        out.trim_end().to_string()
    }

    pub fn finish(self) -> String {
        self.text.trim_end().to_string()
    }
}

fn push_line(buf: &mut String, depth: usize, line: &str) {
    buf.push_str(&INDENT.repeat(depth));
    buf.push_str(line);
    buf.push('\n');
}

/// 类写法的固定开头
pub(crate) fn class_header(class_name: &str, base: &str) -> Emitter {
    Emitter::default()
        .line(0, format!("class {class_name}({base}):"))
        .line(1, "def __init__(self):")
        .line(2, "super().__init__()")
}

/// 生成代码中的类名，如`CNNModel`
pub(crate) fn model_class_name<L: Network>() -> String {
    format!("{}Model", L::KIND.tag())
}

#[cfg(test)]
mod tests;
