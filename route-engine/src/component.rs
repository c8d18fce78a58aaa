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

//! Transport capability contracts.
//!
//! A transport plugs into the engine by implementing four independent traits:
//! [`Component`] (factory for one URI scheme), [`Endpoint`] (a bound resource),
//! [`Producer`] (sends exchanges to the resource) and [`Consumer`] (reads the resource and
//! drives exchanges into a downstream [`Processor`]).

use crate::control_plane::EndpointConfig;
use crate::error::RouteError;
use crate::processor::Processor;
use crate::runtime::RouteContext;
use async_trait::async_trait;
use std::sync::Arc;

pub trait Component: Send + Sync {
    /// Registration key. Matched exactly and case-sensitively against URI schemes.
    fn scheme(&self) -> &str;

    fn create_endpoint(&self, config: EndpointConfig) -> Result<Arc<dyn Endpoint>, RouteError>;
}

/// A resolved resource. One instance per distinct URI string is cached and shared by
/// every producer and consumer created from it.
pub trait Endpoint: Send + Sync {
    fn uri(&self) -> &str;

    fn create_producer(&self) -> Result<Arc<dyn Producer>, RouteError>;

    fn create_consumer(
        &self,
        downstream: Arc<dyn Processor>,
    ) -> Result<Arc<dyn Consumer>, RouteError>;
}

/// A [`Processor`] that sends to an endpoint. `start`/`stop` are idempotent and
/// `process` outside the started window fails with [`RouteError::ProducerNotStarted`].
pub trait Producer: Processor {
    fn endpoint_uri(&self) -> &str;
}

#[async_trait]
pub trait Consumer: Send + Sync {
    fn endpoint_uri(&self) -> &str;

    /// Spawns the consumer loop. Calling it while running is a no-op.
    async fn start(&self, ctx: &RouteContext) -> Result<(), RouteError>;

    /// Signals the loop and waits for the in-flight exchange to complete. Calling it
    /// while stopped is a no-op.
    async fn stop(&self, ctx: &RouteContext) -> Result<(), RouteError>;
}
