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

use crate::{FileConsumer, FileProducer};
use route_engine::{Consumer, Endpoint, EndpointConfig, Processor, Producer, RouteError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_POLL_DELAY_MS: u64 = 500;

/// Options read from the endpoint URI query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileOptions {
    pub follow: bool,
    pub delay: Duration,
    pub append: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            follow: false,
            delay: Duration::from_millis(DEFAULT_POLL_DELAY_MS),
            append: true,
        }
    }
}

impl FileOptions {
    fn from_config(config: &EndpointConfig) -> Result<Self, RouteError> {
        let defaults = Self::default();
        let invalid = |err: RouteError| config.creation_failed(err.to_string());

        Ok(Self {
            follow: config
                .params
                .get_bool("follow")
                .map_err(invalid)?
                .unwrap_or(defaults.follow),
            delay: config
                .params
                .get_u64("delay")
                .map_err(invalid)?
                .map_or(defaults.delay, Duration::from_millis),
            append: config
                .params
                .get_bool("append")
                .map_err(invalid)?
                .unwrap_or(defaults.append),
        })
    }
}

#[derive(Debug)]
pub struct FileEndpoint {
    config: EndpointConfig,
    path: PathBuf,
    options: FileOptions,
}

impl FileEndpoint {
    pub fn new(config: EndpointConfig) -> Result<Self, RouteError> {
        let path = PathBuf::from(config.require_path()?);
        let options = FileOptions::from_config(&config)?;
        Ok(Self {
            config,
            path,
            options,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> FileOptions {
        self.options
    }
}

impl Endpoint for FileEndpoint {
    fn uri(&self) -> &str {
        &self.config.raw_uri
    }

    fn create_producer(&self) -> Result<Arc<dyn Producer>, RouteError> {
        Ok(Arc::new(FileProducer::new(
            self.uri(),
            self.path.clone(),
            self.options.append,
        )))
    }

    fn create_consumer(
        &self,
        downstream: Arc<dyn Processor>,
    ) -> Result<Arc<dyn Consumer>, RouteError> {
        Ok(Arc::new(FileConsumer::new(
            self.uri(),
            self.path.clone(),
            self.options,
            downstream,
        )))
    }
}
