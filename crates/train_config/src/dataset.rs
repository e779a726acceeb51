// dataset.rs
// 数据集配置：数据文件所在目录、图像/标签数组文件名以及目标图像尺寸。
use crate::coerce::FieldReader;
use crate::error::ValidationError;
use crate::schema::ConfigSchema;
use serde::de::{self, Deserialize, Deserializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const DEFAULT_DIR_BASE: &str = "/home/adriano/Documents/datasets/dataset_files";
pub const DEFAULT_IMAGE_FILE: &str = "images.npy";
pub const DEFAULT_LABEL_FILE: &str = "labels.npy";
pub const DEFAULT_IMAGE_SIZE: u32 = 300;

/// 数据集配置
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetConfig {
    /// 数据文件所在目录
    pub dir_base: String,
    /// 图像数组文件名（.npy）
    pub image_file: String,
    /// 标签数组文件名（.npy）
    pub label_file: String,
    /// 训练时图像缩放到的正方形边长（像素）
    pub image_size: u32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            dir_base: DEFAULT_DIR_BASE.to_string(),
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            label_file: DEFAULT_LABEL_FILE.to_string(),
            image_size: DEFAULT_IMAGE_SIZE,
        }
    }
}

impl DatasetConfig {
    /// 图像数组文件的完整路径，不访问文件系统
    pub fn image_path(&self) -> PathBuf {
        PathBuf::from(&self.dir_base).join(&self.image_file)
    }

    /// 标签数组文件的完整路径
    pub fn label_path(&self) -> PathBuf {
        PathBuf::from(&self.dir_base).join(&self.label_file)
    }
}

impl ConfigSchema for DatasetConfig {
    const NAME: &'static str = "DatasetConfig";
    const FIELDS: &'static [&'static str] = &["dir_base", "image_file", "label_file", "image_size"];

    fn apply_overrides(mut self, overrides: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(overrides);
        reader.string("dir_base", &mut self.dir_base);
        reader.string("image_file", &mut self.image_file);
        reader.string("label_file", &mut self.label_file);
        reader.integer("image_size", &mut self.image_size);
        reader.finish(Self::NAME, Self::FIELDS)?;
        Ok(self)
    }
}

// 反序列化走同一套默认值与校验逻辑
impl<'de> Deserialize<'de> for DatasetConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_overrides(&map).map_err(de::Error::custom)
    }
}
