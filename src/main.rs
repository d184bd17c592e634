//! Higgs Guide - 托管 TTS 预测入口
//!
//! 启动流程: 加载配置 → 初始化日志 → 探测设备 → 构造引擎句柄（失败即中止）
//! → 执行一次预测。
//!
//! 用法:
//!   higgs-guide <text> [voice_style]          (output.mode = "json")
//!   higgs-guide <text> [scene_description]    (output.mode = "wav")

use std::sync::Arc;

use higgs_guide::application::Predictor;
use higgs_guide::config::{load_config, print_config, OutputMode};
use higgs_guide::infrastructure::engine::{
    select_device, DevicePreference, HttpServeEngine, HttpServeEngineConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},higgs_guide={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Higgs Guide - hosted TTS prediction");
    print_config(&config);

    // 一次性设备探测，结果注入引擎构造
    let device = select_device(DevicePreference::parse(&config.engine.device));

    // 构造引擎句柄（每进程一次；加载失败即致命）
    let engine_config = HttpServeEngineConfig {
        base_url: config.engine.url.clone(),
        model: config.engine.model.clone(),
        audio_tokenizer: config.engine.audio_tokenizer.clone(),
        device,
        timeout_secs: config.engine.timeout_secs,
    };
    let engine = Arc::new(HttpServeEngine::connect(engine_config).await?);

    let predictor = Predictor::new(
        engine,
        config.generation.clone(),
        config.output.clone(),
    );

    let mut args = std::env::args().skip(1);
    let text = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("Usage: higgs-guide <text> [voice_style|scene]"))?;
    let extra = args.next();

    match config.output.mode {
        OutputMode::Wav => {
            let path = predictor.predict_to_file(&text, extra.as_deref()).await?;
            println!("{}", path.display());
        }
        OutputMode::Json => {
            let outcome = predictor.predict(&text, extra.as_deref(), None).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
