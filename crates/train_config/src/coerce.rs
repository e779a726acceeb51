// coerce.rs
// 宽松类型转换：把JSON值无损地转换为字段声明的类型（字符串、整数、浮点数），并收集字段错误。
use crate::error::{ErrorKind, FieldError, ValidationError};
use serde_json::{Map, Value};

/// 字符串字段只接受JSON字符串
pub(crate) fn coerce_string(value: &Value) -> Result<String, ErrorKind> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(ErrorKind::ExpectedString),
    }
}

/// 整数字段：接受整数、小数部分为0的浮点数、布尔值以及可解析为整数的字符串，
/// 最后检查目标类型的取值范围
pub(crate) fn coerce_integer<T: TryFrom<i64>>(value: &Value) -> Result<T, ErrorKind> {
    let wide = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if n.is_u64() {
                return Err(ErrorKind::OutOfRange);
            } else {
                let f = n.as_f64().ok_or(ErrorKind::ExpectedInteger)?;
                integral_float(f)?
            }
        }
        Value::Bool(b) => i64::from(*b),
        Value::String(s) => parse_integer(s)?,
        _ => return Err(ErrorKind::ExpectedInteger),
    };
    T::try_from(wide).map_err(|_| ErrorKind::OutOfRange)
}

/// 浮点字段：接受任意数字、布尔值以及可解析为浮点数的字符串；
/// 结果必须是有限值，JSON无法表示 inf/NaN
pub(crate) fn coerce_float(value: &Value) -> Result<f64, ErrorKind> {
    let f = match value {
        Value::Number(n) => n.as_f64().ok_or(ErrorKind::ExpectedFloat)?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| ErrorKind::ExpectedFloat)?,
        _ => return Err(ErrorKind::ExpectedFloat),
    };
    if f.is_finite() {
        Ok(f)
    } else {
        Err(ErrorKind::ExpectedFloat)
    }
}

fn parse_integer(text: &str) -> Result<i64, ErrorKind> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Ok(i);
    }
    if text.parse::<u64>().is_ok() {
        return Err(ErrorKind::OutOfRange);
    }
    match text.parse::<f64>() {
        Ok(f) => integral_float(f),
        Err(_) => Err(ErrorKind::ExpectedInteger),
    }
}

fn integral_float(f: f64) -> Result<i64, ErrorKind> {
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(ErrorKind::ExpectedInteger);
    }
    // i64::MAX as f64 会向上取整到 2^63
    if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err(ErrorKind::OutOfRange);
    }
    Ok(f as i64)
}

/// 字段读取器：逐个字段从覆盖表中取值并转换，失败时记录而不中断，
/// 最终由 `finish` 统一返回所有错误
pub(crate) struct FieldReader<'a> {
    overrides: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(overrides: &'a Map<String, Value>) -> Self {
        Self {
            overrides,
            errors: Vec::new(),
        }
    }

    pub(crate) fn string(&mut self, name: &str, slot: &mut String) {
        self.read(name, slot, coerce_string);
    }

    pub(crate) fn integer<T: TryFrom<i64>>(&mut self, name: &str, slot: &mut T) {
        self.read(name, slot, coerce_integer::<T>);
    }

    pub(crate) fn float(&mut self, name: &str, slot: &mut f64) {
        self.read(name, slot, coerce_float);
    }

    fn read<T>(&mut self, name: &str, slot: &mut T, convert: impl FnOnce(&Value) -> Result<T, ErrorKind>) {
        let Some(value) = self.overrides.get(name) else {
            return;
        };
        match convert(value) {
            Ok(v) => *slot = v,
            Err(kind) => self.errors.push(FieldError {
                field: name.to_string(),
                kind,
                input: value.clone(),
            }),
        }
    }

    /// 未声明的字段被忽略，只记录debug日志
    pub(crate) fn finish(self, model: &'static str, fields: &[&str]) -> Result<(), ValidationError> {
        for key in self.overrides.keys() {
            if !fields.contains(&key.as_str()) {
                log::debug!("{}: 忽略未知字段 '{}'", model, key);
            }
        }
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(model, self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_rejects_non_strings() {
        assert_eq!(coerce_string(&json!("images.npy")).unwrap(), "images.npy");
        assert_eq!(coerce_string(&json!(42)), Err(ErrorKind::ExpectedString));
        assert_eq!(coerce_string(&json!(true)), Err(ErrorKind::ExpectedString));
        assert_eq!(coerce_string(&Value::Null), Err(ErrorKind::ExpectedString));
    }

    #[test]
    fn test_integer_lax_inputs() {
        assert_eq!(coerce_integer::<u32>(&json!(300)), Ok(300));
        assert_eq!(coerce_integer::<u32>(&json!("30")), Ok(30));
        assert_eq!(coerce_integer::<u32>(&json!(" 12 ")), Ok(12));
        assert_eq!(coerce_integer::<u32>(&json!(256.0)), Ok(256));
        assert_eq!(coerce_integer::<u32>(&json!("64.0")), Ok(64));
        assert_eq!(coerce_integer::<u32>(&json!(true)), Ok(1));
        assert_eq!(coerce_integer::<usize>(&json!(false)), Ok(0));
    }

    #[test]
    fn test_integer_rejections() {
        assert_eq!(coerce_integer::<u32>(&json!("thirty")), Err(ErrorKind::ExpectedInteger));
        assert_eq!(coerce_integer::<u32>(&json!(256.5)), Err(ErrorKind::ExpectedInteger));
        assert_eq!(coerce_integer::<u32>(&json!("")), Err(ErrorKind::ExpectedInteger));
        assert_eq!(coerce_integer::<u32>(&json!("nan")), Err(ErrorKind::ExpectedInteger));
        assert_eq!(coerce_integer::<u32>(&json!([1])), Err(ErrorKind::ExpectedInteger));
        assert_eq!(coerce_integer::<u32>(&Value::Null), Err(ErrorKind::ExpectedInteger));
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(coerce_integer::<usize>(&json!(-1)), Err(ErrorKind::OutOfRange));
        assert_eq!(coerce_integer::<u32>(&json!(5_000_000_000u64)), Err(ErrorKind::OutOfRange));
        assert_eq!(coerce_integer::<u32>(&json!(u64::MAX)), Err(ErrorKind::OutOfRange));
        assert_eq!(coerce_integer::<u32>(&json!("18446744073709551615")), Err(ErrorKind::OutOfRange));
        assert_eq!(coerce_integer::<u32>(&json!(1e300)), Err(ErrorKind::OutOfRange));
    }

    #[test]
    fn test_float_lax_inputs() {
        assert_eq!(coerce_float(&json!(3e-4)), Ok(3e-4));
        assert_eq!(coerce_float(&json!(1)), Ok(1.0));
        assert_eq!(coerce_float(&json!("1e-3")), Ok(1e-3));
        assert_eq!(coerce_float(&json!(true)), Ok(1.0));
        assert_eq!(coerce_float(&json!("fast")), Err(ErrorKind::ExpectedFloat));
        assert_eq!(coerce_float(&json!({})), Err(ErrorKind::ExpectedFloat));
    }

    #[test]
    fn test_float_rejects_non_finite() {
        for text in ["inf", "-inf", "infinity", "NaN", " nan "] {
            assert_eq!(coerce_float(&json!(text)), Err(ErrorKind::ExpectedFloat), "{}", text);
        }
        assert_eq!(coerce_float(&json!("1e400")), Err(ErrorKind::ExpectedFloat));
    }

    #[test]
    fn test_field_reader_collects_all_errors() {
        let overrides = json!({
            "count": "many",
            "name": 7,
            "rate": "0.5",
            "extra": 1
        });
        let map = overrides.as_object().unwrap();
        let mut count: u32 = 1;
        let mut name = String::from("default");
        let mut rate = 0.1;

        let mut reader = FieldReader::new(map);
        reader.integer("count", &mut count);
        reader.string("name", &mut name);
        reader.float("rate", &mut rate);
        let err = reader.finish("Probe", &["count", "name", "rate"]).unwrap_err();

        assert_eq!(err.model, "Probe");
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.field("count").unwrap().kind, ErrorKind::ExpectedInteger);
        assert_eq!(err.field("name").unwrap().input, json!(7));
        assert_eq!(count, 1);
        assert_eq!(name, "default");
        assert_eq!(rate, 0.5);
    }
}
