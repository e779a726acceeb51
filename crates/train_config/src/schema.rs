// schema.rs
// 配置结构的公共接口：带默认值构造、按字段覆盖、JSON读写与带更新的复制。
use crate::error::{ErrorKind, FieldError, Result, ValidationError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// 带默认值且在构造时做字段校验的配置结构
pub trait ConfigSchema: Default + Serialize + Sized {
    /// 类型名，用于错误报告
    const NAME: &'static str;
    /// 按声明顺序排列的字段名
    const FIELDS: &'static [&'static str];

    /// 把覆盖表中已声明的字段校验后写入 `self`，未知字段忽略
    fn apply_overrides(self, overrides: &Map<String, Value>) -> std::result::Result<Self, ValidationError>;

    /// 以默认值为基础应用覆盖
    fn from_overrides(overrides: &Map<String, Value>) -> std::result::Result<Self, ValidationError> {
        Self::default().apply_overrides(overrides)
    }

    /// 从任意JSON值构造，值必须是对象
    fn from_value(value: &Value) -> std::result::Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Self::from_overrides(map),
            other => Err(ValidationError::new(
                Self::NAME,
                vec![FieldError {
                    field: String::new(),
                    kind: ErrorKind::NotAnObject,
                    input: other.clone(),
                }],
            )),
        }
    }

    fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value)?)
    }

    fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        log::debug!("{}: 从 {} 读取配置", Self::NAME, path.display());
        Self::from_json_str(&text)
    }

    /// 返回应用了更新的新副本，`self` 保持不变
    fn with_overrides(&self, overrides: &Map<String, Value>) -> std::result::Result<Self, ValidationError>
    where
        Self: Clone,
    {
        self.clone().apply_overrides(overrides)
    }

    fn to_json_value(&self) -> Value {
        // 字段均为字符串和数字，序列化不会失败
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 写出为JSON文件，必要时创建父目录
    fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = self.to_json_string_pretty()?;
        fs::write(path, text)?;
        log::debug!("{}: 配置已写入 {}", Self::NAME, path.display());
        Ok(())
    }
}
