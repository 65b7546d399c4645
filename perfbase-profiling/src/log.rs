// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Optional stderr logging for applications that do not install their own
//! `tracing` subscriber.

use anyhow::Context;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable read when no explicit filter is given.
pub const LOG_ENV: &str = "PERFBASE_LOG";

/// Installs a global fmt subscriber writing to stderr.
///
/// `filter` uses the `EnvFilter` directive syntax (`debug`,
/// `perfbase_profiling=trace`, ...). Without one, [LOG_ENV] is consulted,
/// then `warn`. Fails if the directives do not parse or a global subscriber
/// is already installed.
pub fn init(filter: Option<&str>) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter(filter)?)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("a global tracing subscriber is already installed")?;

    debug!("Logging subsystem enabled");
    Ok(())
}

fn env_filter(filter: Option<&str>) -> anyhow::Result<EnvFilter> {
    match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("could not parse log filter {directives:?}")),
        None => Ok(EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(LevelFilter::WARN.to_string().to_lowercase()))),
    }
}
