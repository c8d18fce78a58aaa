/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Runs the routes of a JSON5 document until Ctrl-C.

use anyhow::{Context, Result};
use clap::Parser;
use file_component::FileComponent;
use route_dsl::ConfigLoader;
use route_engine::{RouteSource, RoutingContext};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const COMPONENT: &str = "configurable_router";

#[derive(Debug, Parser)]
#[command(name = "configurable-router")]
#[command(version, about = "Run integration routes described by a JSON5 document")]
struct Cli {
    /// Route document (JSON5)
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Log filter used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("invalid log level '{default_level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("unable to install tracing subscriber")
}

fn build_context(config: &Path) -> Result<RoutingContext> {
    let mut context = RoutingContext::new(COMPONENT);
    context.register_component(Arc::new(FileComponent::new()));
    context.set_loader(Arc::new(ConfigLoader));

    let route_ids = context
        .add_routes(RouteSource::Path(config))
        .with_context(|| format!("unable to load routes from {}", config.display()))?;
    if route_ids.is_empty() {
        warn!(
            component = COMPONENT,
            config = %config.display(),
            "route document defines no routes"
        );
    }
    info!(
        component = COMPONENT,
        routes = ?route_ids,
        "routes registered"
    );
    Ok(context)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let context = build_context(&cli.config)?;
    context.start().await.context("unable to start routes")?;
    info!(component = COMPONENT, "routes running, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("unable to listen for Ctrl-C")?;
    info!(component = COMPONENT, "shutdown requested");

    context.stop().await.context("routes did not stop cleanly")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build_context, Cli};
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn config_flag_is_required() {
        assert!(Cli::try_parse_from(["configurable-router"]).is_err());

        let cli = Cli::try_parse_from(["configurable-router", "--config", "routes.json5"]).unwrap();
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.config.to_str(), Some("routes.json5"));
    }

    #[test]
    fn default_config_loads() {
        let path = std::path::PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/DEFAULT_CONFIG.json5"
        ));
        let context = build_context(&path).unwrap();
        assert_eq!(context.routes().len(), 1);
        assert!(context.route("copy-input").is_some());
    }

    #[test]
    fn unknown_scheme_is_reported_with_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ routes: [{{ from: "kafka:orders" }}] }}"#).unwrap();

        let err = build_context(file.path()).err().unwrap();
        let rendered = format!("{err:#}");
        assert!(rendered.contains("unable to load routes"));
        assert!(rendered.contains("kafka"));
    }
}
