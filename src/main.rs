#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::anyhow;
use anyhow::Error;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::infrastructure::backends::BackendManager;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Penpal has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    process::exit(1);
}

#[tokio::main]
async fn main() {
    let debug_log_dir = env::var("PENPAL_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap()
            .join("penpal")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("penpal")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let ready_res = cli::parse().await;
    if let Err(ready_err) = ready_res {
        handle_error(ready_err);
        return;
    }
    if !ready_res.unwrap() {
        process::exit(0);
    }

    let backend_name = Config::get(ConfigKey::Backend);
    let Some(backend_name) = BackendName::parse(backend_name.to_string()) else {
        handle_error(anyhow!("There is no backend named {backend_name}"));
        return;
    };

    let backend = match BackendManager::get(backend_name) {
        Ok(backend) => backend,
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    // Missing credentials and unreachable backends fail here, before a
    // student ever starts writing. Everything after this point degrades to
    // fallbacks instead of failing.
    if let Err(err) = backend.health_check().await {
        handle_error(err);
        return;
    }

    if let Err(err) = ui::start(backend).await {
        handle_error(err);
        return;
    }

    process::exit(0);
}
