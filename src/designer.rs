/*
 * @Author       : 老董
 * @Date         : 2026-03-06
 * @Description  : 编排层 - 对应编辑器的“生成”按钮
 *
 * 表单编辑的是草稿（draft）；点击“生成”时：
 *   校验草稿 → 检查字段范围 → 快照为已提交配置（committed）→ 生成代码并整体替换
 * 任一步失败都保留上一次生成的代码不变。
 */

use crate::codegen::{Generate, generate};
use crate::config::{Configuration, Framework, GeneratedCode, ModelStyle, Network};
use crate::errors::CodegenError;
use crate::layer::{CnnLayer, FcnLayer};
use crate::shape::{LayerAnnotation, annotate};
use crate::validator::Validate;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// 某一类网络的编辑会话
#[derive(Debug, Clone)]
pub struct Designer<L> {
    draft: Vec<L>,
    committed: Option<Configuration<L>>,
    framework: Framework,
    model_style: ModelStyle,
    code: Option<GeneratedCode>,
    in_sync: bool,
}

pub type FcnDesigner = Designer<FcnLayer>;
pub type CnnDesigner = Designer<CnnLayer>;

impl<L> Designer<L>
where
    L: Generate + Validate,
{
    pub fn new(framework: Framework, model_style: ModelStyle) -> Self {
        Self {
            draft: Vec::new(),
            committed: None,
            framework,
            model_style,
            code: None,
            in_sync: false,
        }
    }

    /// 以已有的层序列作为草稿
    pub fn with_layers(layers: Vec<L>, framework: Framework, model_style: ModelStyle) -> Self {
        Self {
            draft: layers,
            ..Self::new(framework, model_style)
        }
    }

    // ========== 草稿编辑 ==========

    pub fn draft(&self) -> &[L] {
        &self.draft
    }

    pub fn push(&mut self, layer: L) {
        self.draft.push(layer);
        self.in_sync = false;
    }

    /// 在`index`处插入；越界时追加到末尾
    pub fn insert(&mut self, index: usize, layer: L) {
        let index = index.min(self.draft.len());
        self.draft.insert(index, layer);
        self.in_sync = false;
    }

    pub fn remove(&mut self, index: usize) -> Option<L> {
        if index >= self.draft.len() {
            return None;
        }
        self.in_sync = false;
        Some(self.draft.remove(index))
    }

    /// 把`from`处的层移到`to`处（拖拽排序）；任一下标越界则不做任何事
    pub fn move_layer(&mut self, from: usize, to: usize) -> bool {
        let len = self.draft.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let layer = self.draft.remove(from);
            self.draft.insert(to, layer);
            self.in_sync = false;
        }
        true
    }

    pub fn set_framework(&mut self, framework: Framework) {
        if self.framework != framework {
            self.framework = framework;
            self.in_sync = false;
        }
    }

    pub fn set_model_style(&mut self, model_style: ModelStyle) {
        if self.model_style != model_style {
            self.model_style = model_style;
            self.in_sync = false;
        }
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn model_style(&self) -> ModelStyle {
        self.model_style
    }

    // ========== 生成 ==========

    /// 当前代码是否与草稿一致
    pub fn in_sync(&self) -> bool {
        self.in_sync
    }

    pub fn committed(&self) -> Option<&Configuration<L>> {
        self.committed.as_ref()
    }

    pub fn code(&self) -> Option<&GeneratedCode> {
        self.code.as_ref()
    }

    /// 校验草稿并生成代码；失败时保留上一次的结果
    pub fn generate(&mut self) -> Result<&GeneratedCode, CodegenError> {
        if let Err(e) = self.check_draft() {
            warn!("{}草稿未通过检查：{e}", L::KIND.tag());
            return Err(e);
        }

        let snapshot = Configuration::new(self.draft.clone(), self.model_style);
        let code = generate(self.framework, &snapshot)?;
        debug!("{}配置已提交（{}层）", L::KIND.tag(), snapshot.layers.len());

        self.committed = Some(snapshot);
        self.in_sync = true;
        Ok(&*self.code.insert(code))
    }

    fn check_draft(&self) -> Result<(), CodegenError> {
        L::validate(&self.draft)?;
        for (index, layer) in self.draft.iter().enumerate() {
            Network::check_limits(layer, index)?;
        }
        Ok(())
    }

    // ========== 导出 ==========

    /// 下载文件名，如`FCN.py`
    pub fn file_name(&self) -> String {
        L::KIND.download_file_name()
    }

    /// 把当前代码写入`dir`目录，返回文件路径
    pub fn save_code<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, CodegenError> {
        let code = self.code.as_ref().ok_or(CodegenError::NothingGenerated)?;
        let path = dir.as_ref().join(self.file_name());
        std::fs::write(&path, code.render())
            .map_err(|e| CodegenError::ExportFailed(format!("{}: {e}", path.display())))?;
        debug!("代码已保存至{}", path.display());
        Ok(path)
    }
}

impl Designer<CnnLayer> {
    /// 已提交配置的结构图标注；尚未提交时为空
    pub fn diagram(&self) -> Result<Vec<LayerAnnotation>, CodegenError> {
        match &self.committed {
            Some(config) => Ok(annotate(&config.layers)?),
            None => Ok(Vec::new()),
        }
    }
}
