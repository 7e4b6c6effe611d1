// src/main.rs
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;

use checkout_relay::api::{app_router, AppState};
use checkout_relay::config::AppConfig;
use checkout_relay::infrastructure::WhopClient;
use checkout_relay::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    init_tracing();

    tracing::info!("Starting checkout relay server...");

    // 設定を読み込む（必須トークンがなければ起動しない）
    let app_config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            process::exit(1);
        }
    };
    // 開発環境のみ設定全体を出す（秘密値は Debug 実装で伏せている）
    if app_config.is_development() {
        tracing::info!("Configuration loaded: {:?}", app_config);
    } else {
        tracing::info!(
            environment = %app_config.environment,
            addr = %app_config.server_addr(),
            "Configuration loaded"
        );
    }

    // 上流クライアントの作成
    let whop_client = WhopClient::new(app_config.whop.clone())?;

    let server_addr = app_config.server_addr();
    let app_state = AppState::new(app_config, Arc::new(whop_client));
    let app = app_router(app_state);

    // サーバーの起動
    let listener = TcpListener::bind(&server_addr).await?;
    tracing::info!("Router configured. Server listening on {}", server_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
