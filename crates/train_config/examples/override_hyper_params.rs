use serde_json::json;
use train_config::{ConfigSchema, DatasetConfig, HyperParameters};

/// 演示默认配置、合法覆盖与非法覆盖
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = DatasetConfig::default();
    println!("数据集配置: {:?}", dataset);
    println!("图像文件: {}", dataset.image_path().display());

    // 只覆盖批大小，其余字段保持默认
    let overrides = json!({ "batch_size": 8 });
    let params = HyperParameters::from_value(&overrides)?;
    println!("\n超参数:\n{}", params.to_json_string_pretty()?);

    // 非数字的训练轮数会被拒绝
    match HyperParameters::from_value(&json!({ "n_epochs": "thirty" })) {
        Ok(p) => println!("意外成功: {:?}", p),
        Err(e) => println!("\n校验失败（预期）: {}", e),
    }

    Ok(())
}
