// error.rs
// 定义配置库通用的错误类型（IO、JSON、字段校验等）和Result类型。
use serde_json::Value;
use std::fmt;
use std::io;

/// 单个字段校验失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 期望字符串
    ExpectedString,
    /// 期望整数（或可无损转换为整数的值）
    ExpectedInteger,
    /// 期望浮点数
    ExpectedFloat,
    /// 数值超出字段类型的取值范围（如无符号字段收到负数）
    OutOfRange,
    /// 输入整体不是JSON对象
    NotAnObject,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorKind::ExpectedString => "应为字符串",
            ErrorKind::ExpectedInteger => "应为整数",
            ErrorKind::ExpectedFloat => "应为浮点数",
            ErrorKind::OutOfRange => "数值超出范围",
            ErrorKind::NotAnObject => "应为JSON对象",
        };
        f.write_str(msg)
    }
}

/// 字段级错误：字段名、失败原因和原始输入
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// 字段名，根对象错误时为空字符串
    pub field: String,
    pub kind: ErrorKind,
    /// 调用方传入的原始值
    pub input: Value,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = if self.field.is_empty() { "<root>" } else { &self.field };
        write!(f, "{}: {} (输入: {})", field, self.kind, self.input)
    }
}

/// 构造配置对象时的校验错误，收集所有失败字段
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// 配置类型名，如 "HyperParameters"
    pub model: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(model: &'static str, errors: Vec<FieldError>) -> Self {
        Self { model, errors }
    }

    /// 按字段名查找错误
    pub fn field(&self, name: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == name)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 有 {} 个字段校验失败", self.model, self.errors.len())?;
        for e in &self.errors {
            write!(f, "\n  {}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// 项目通用错误类型
#[derive(Debug)]
pub enum Error {
    /// IO错误
    Io(io::Error),
    /// JSON语法或序列化错误
    Json(serde_json::Error),
    /// 字段校验错误
    Validation(ValidationError),
    /// 其他类型错误
    Other(String),
}

/// 通用结果类型
pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO错误: {}", e),
            Error::Json(e) => write!(f, "JSON错误: {}", e),
            Error::Validation(e) => write!(f, "校验错误: {}", e),
            Error::Other(msg) => write!(f, "其他错误: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Validation(e) => Some(e),
            Error::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_display_lists_fields() {
        let err = ValidationError::new(
            "HyperParameters",
            vec![
                FieldError {
                    field: "n_epochs".to_string(),
                    kind: ErrorKind::ExpectedInteger,
                    input: json!("thirty"),
                },
                FieldError {
                    field: "author".to_string(),
                    kind: ErrorKind::ExpectedString,
                    input: json!(42),
                },
            ],
        );
        let text = err.to_string();
        assert!(text.starts_with("HyperParameters 有 2 个字段校验失败"));
        assert!(text.contains("n_epochs: 应为整数 (输入: \"thirty\")"));
        assert!(text.contains("author: 应为字符串 (输入: 42)"));
        assert_eq!(err.field("author").unwrap().kind, ErrorKind::ExpectedString);
        assert!(err.field("batch_size").is_none());
    }

    #[test]
    fn test_error_conversions() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert!(matches!(Error::from(io_err), Error::Io(_)));

        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        assert!(matches!(Error::from(json_err), Error::Json(_)));

        let v = ValidationError::new("DatasetConfig", Vec::new());
        let err = Error::from(v);
        assert!(err.to_string().starts_with("校验错误: DatasetConfig"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
