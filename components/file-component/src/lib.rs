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

//! # file-component
//!
//! Reference transport for the `file` scheme.
//!
//! - `from("file:<path>")` emits one exchange per line. The body is the line text without
//!   its line terminator; headers `file_name` and `line_number` (1-based) are set.
//!   `follow=true` keeps polling for appended lines every `delay` milliseconds
//!   (default 500) until the route stops; otherwise the consumer finishes at end of file.
//! - `to("file:<path>")` appends each In body plus `\n`. `append=false` truncates the
//!   file when the producer starts. Missing parent directories are created.
//!
//! ```
//! use file_component::FileComponent;
//! use route_engine::{Endpoint, RouteError, RoutingContext};
//! use std::sync::Arc;
//!
//! let context = RoutingContext::new("doc");
//! context.register_component(Arc::new(FileComponent::new()));
//!
//! let endpoint = context.get_endpoint("file:/tmp/out.txt?append=false").unwrap();
//! assert_eq!(endpoint.uri(), "file:/tmp/out.txt?append=false");
//! assert!(matches!(
//!     context.get_endpoint("file:?follow=true"),
//!     Err(RouteError::EndpointCreationFailed { .. })
//! ));
//! ```

mod consumer;
mod endpoint;
mod producer;

pub use consumer::FileConsumer;
pub use endpoint::{FileEndpoint, FileOptions};
pub use producer::FileProducer;

use route_engine::{Component, Endpoint, EndpointConfig, RouteError};
use std::sync::Arc;

pub const SCHEME: &str = "file";
pub const FILE_NAME_HEADER: &str = "file_name";
pub const LINE_NUMBER_HEADER: &str = "line_number";

#[derive(Clone, Copy, Debug, Default)]
pub struct FileComponent;

impl FileComponent {
    pub fn new() -> Self {
        Self
    }
}

impl Component for FileComponent {
    fn scheme(&self) -> &str {
        SCHEME
    }

    fn create_endpoint(&self, config: EndpointConfig) -> Result<Arc<dyn Endpoint>, RouteError> {
        Ok(Arc::new(FileEndpoint::new(config)?))
    }
}
