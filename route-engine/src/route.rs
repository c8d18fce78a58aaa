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

//! Runtime route: one consumer driving one top-level pipeline.

use crate::component::Consumer;
use crate::error::RouteError;
use crate::observability::events;
use crate::processor::{PipelineProcessor, Processor};
use crate::runtime::RouteContext;
use parking_lot::Mutex;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{info, warn};

const COMPONENT: &str = "route";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteStatus {
    Stopped,
    Started,
}

pub struct Route {
    id: String,
    input_uri: String,
    consumer: Arc<dyn Consumer>,
    pipeline: Arc<PipelineProcessor>,
    ctx: RouteContext,
    status: Mutex<RouteStatus>,
    lifecycle: tokio::sync::Mutex<()>,
}

impl Route {
    pub(crate) fn new(
        id: String,
        input_uri: String,
        consumer: Arc<dyn Consumer>,
        pipeline: Arc<PipelineProcessor>,
        ctx: RouteContext,
    ) -> Self {
        Self {
            id,
            input_uri,
            consumer,
            pipeline,
            ctx,
            status: Mutex::new(RouteStatus::Stopped),
            lifecycle: tokio::sync::Mutex::new(()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input_uri(&self) -> &str {
        &self.input_uri
    }

    pub fn consumer(&self) -> &Arc<dyn Consumer> {
        &self.consumer
    }

    pub fn pipeline(&self) -> &Arc<PipelineProcessor> {
        &self.pipeline
    }

    pub fn context(&self) -> &RouteContext {
        &self.ctx
    }

    pub fn status(&self) -> RouteStatus {
        *self.status.lock()
    }

    /// Opens the pipeline's producers and nested consumers, then starts the input
    /// consumer. A started route is left untouched.
    pub async fn start(&self) -> Result<(), RouteError> {
        let _guard = self.lifecycle.lock().await;
        if self.status() == RouteStatus::Started {
            return Ok(());
        }

        if let Err(err) = self.pipeline.start(&self.ctx).await {
            self.release_pipeline("pipeline start").await;
            return Err(err);
        }
        if let Err(err) = self.consumer.start(&self.ctx).await {
            self.release_pipeline("consumer start").await;
            return Err(err);
        }

        *self.status.lock() = RouteStatus::Started;
        info!(
            event = events::ROUTE_START,
            component = COMPONENT,
            route_id = %self.id,
            uri = %self.input_uri,
            "route started"
        );
        Ok(())
    }

    /// Stops the input consumer first, then the pipeline. Both get a stop attempt; the
    /// consumer's error wins when both fail.
    pub async fn stop(&self) -> Result<(), RouteError> {
        let _guard = self.lifecycle.lock().await;
        if self.status() == RouteStatus::Stopped {
            return Ok(());
        }

        let consumer_result = self.consumer.stop(&self.ctx).await;
        let pipeline_result = self.pipeline.stop(&self.ctx).await;
        *self.status.lock() = RouteStatus::Stopped;

        info!(
            event = events::ROUTE_STOP,
            component = COMPONENT,
            route_id = %self.id,
            uri = %self.input_uri,
            "route stopped"
        );
        consumer_result.and(pipeline_result)
    }
}

impl Route {
    /// Stops every pipeline step after a failed start. Steps that never started treat
    /// the stop as a no-op.
    async fn release_pipeline(&self, failed_stage: &str) {
        if let Err(err) = self.pipeline.stop(&self.ctx).await {
            warn!(
                component = COMPONENT,
                route_id = %self.id,
                failed_stage,
                err = %err,
                "pipeline cleanup after failed start did not complete"
            );
        }
    }
}

impl Debug for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("input_uri", &self.input_uri)
            .field("steps", &self.pipeline.len())
            .field("status", &self.status())
            .finish()
    }
}
