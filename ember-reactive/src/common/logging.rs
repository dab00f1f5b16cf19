/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

//! Tracing setup for processes embedding the engine.

use anyhow::Context;
use ember_core::config::EmberConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs a global `tracing` subscriber writing to the configured log file.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `logging.level`. Logs are written to `logging.directory`, or to `ember/logs`
/// under the XDG data home. The returned guard flushes the non-blocking writer
/// when dropped and must be kept alive for as long as logs should be written.
pub fn init_tracing(config: &EmberConfig) -> anyhow::Result<WorkerGuard> {
    let directory = match &config.logging.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)
                .with_context(|| format!("could not create log directory {}", directory.display()))?;
            directory.clone()
        }
        None => xdg::BaseDirectories::with_prefix("ember")?
            .create_data_directory("logs")
            .context("could not create log directory")?,
    };

    let file_appender = tracing_appender::rolling::never(&directory, &config.logging.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.logging.level)
            .with_context(|| format!("invalid log level '{}'", config.logging.level))?,
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("a global subscriber is already installed")?;
    Ok(guard)
}
