// hyper_params.rs
// 训练超参数：作者、模型名、权重目录与权重文件路径、训练轮数、最大学习率、类别数和批大小。
use crate::coerce::FieldReader;
use crate::error::ValidationError;
use crate::schema::ConfigSchema;
use serde::de::{self, Deserialize, Deserializer};
use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_AUTHOR: &str = "Adriano A. Santos";
pub const DEFAULT_FILE_NAME: &str = "deeplab3plus";
pub const DEFAULT_DIR_BASE: &str = "/home/adriano/Documents/tutoriais/DeepLabv3-for-self-driving-cars/weights/";
pub const DEFAULT_WEIGHTS_PATH: &str =
    "/home/adriano/Documents/tutoriais/DeepLabv3-for-self-driving-cars/weights/deeplabv3.pt";
pub const DEFAULT_N_EPOCHS: u32 = 30;
pub const DEFAULT_MAX_LR: f64 = 3e-4;
pub const DEFAULT_N_CLASSES: u32 = 3;
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// 分割模型训练超参数
///
/// 字段之间没有交叉校验，例如不要求 `weights_path` 位于 `dir_base` 之下。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperParameters {
    pub author: String,
    /// 模型名，用作保存权重时的文件名前缀
    pub file_name: String,
    /// 权重保存目录
    pub dir_base: String,
    /// 权重文件完整路径
    pub weights_path: String,
    /// 训练轮数
    pub n_epochs: u32,
    /// 学习率上限（one-cycle调度的峰值）
    pub max_lr: f64,
    /// 分割类别数
    pub n_classes: u32,
    pub batch_size: usize,
}

impl Default for HyperParameters {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            dir_base: DEFAULT_DIR_BASE.to_string(),
            weights_path: DEFAULT_WEIGHTS_PATH.to_string(),
            n_epochs: DEFAULT_N_EPOCHS,
            max_lr: DEFAULT_MAX_LR,
            n_classes: DEFAULT_N_CLASSES,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ConfigSchema for HyperParameters {
    const NAME: &'static str = "HyperParameters";
    const FIELDS: &'static [&'static str] = &[
        "author",
        "file_name",
        "dir_base",
        "weights_path",
        "n_epochs",
        "max_lr",
        "n_classes",
        "batch_size",
    ];

    fn apply_overrides(mut self, overrides: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(overrides);
        reader.string("author", &mut self.author);
        reader.string("file_name", &mut self.file_name);
        reader.string("dir_base", &mut self.dir_base);
        reader.string("weights_path", &mut self.weights_path);
        reader.integer("n_epochs", &mut self.n_epochs);
        reader.float("max_lr", &mut self.max_lr);
        reader.integer("n_classes", &mut self.n_classes);
        reader.integer("batch_size", &mut self.batch_size);
        reader.finish(Self::NAME, Self::FIELDS)?;
        Ok(self)
    }
}

impl<'de> Deserialize<'de> for HyperParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_overrides(&map).map_err(de::Error::custom)
    }
}
