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

//! Error kinds reported by resolution, compilation and route execution.

use std::sync::Arc;
use thiserror::Error;

/// Boxed adapter-level cause carried by lifecycle and I/O failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("malformed endpoint URI '{uri}': {reason}")]
    MalformedUri { uri: String, reason: &'static str },

    #[error("no component registered for scheme '{scheme}' (uri: {uri})")]
    UnknownScheme { scheme: String, uri: String },

    #[error("component '{scheme}' could not create endpoint '{uri}': {reason}")]
    EndpointCreationFailed {
        scheme: String,
        uri: String,
        reason: String,
    },

    #[error("invalid value '{value}' for endpoint parameter '{key}': {reason}")]
    InvalidParameter {
        key: String,
        value: String,
        reason: String,
    },

    #[error("route '{route_id}' failed to compile at step {position}: {source}")]
    RouteCompilationFailed {
        route_id: String,
        position: usize,
        #[source]
        source: Box<RouteError>,
    },

    #[error("route id '{0}' is already registered")]
    DuplicateRouteId(String),

    #[error("consumer for '{uri}' failed to start: {source}")]
    ConsumerStartFailed {
        uri: String,
        #[source]
        source: BoxError,
    },

    #[error("consumer for '{uri}' failed to stop: {source}")]
    ConsumerStopFailed {
        uri: String,
        #[source]
        source: BoxError,
    },

    #[error("producer for '{uri}' is not started")]
    ProducerNotStarted { uri: String },

    #[error("producer for '{uri}' failed: {source}")]
    ProducerFailed {
        uri: String,
        #[source]
        source: BoxError,
    },

    #[error("pipeline step {position} failed: {source}")]
    PipelineStepFailed {
        position: usize,
        #[source]
        source: Box<RouteError>,
    },

    #[error("exchange '{exchange_id}' carries a terminal error: {source}")]
    ExchangeFailed {
        exchange_id: String,
        #[source]
        source: Arc<RouteError>,
    },

    #[error("predicate evaluation failed: {0}")]
    PredicateFailed(String),

    #[error("route '{route_id}' failed to start: {source}")]
    RouteStartFailed {
        route_id: String,
        #[source]
        source: Box<RouteError>,
    },

    #[error("route '{route_id}' failed to stop: {source}")]
    RouteStopFailed {
        route_id: String,
        #[source]
        source: Box<RouteError>,
    },

    #[error("no route loader configured")]
    NoLoaderConfigured,

    #[error("{loader} does not accept a {source_kind} route source")]
    UnsupportedSource {
        loader: &'static str,
        source_kind: &'static str,
    },

    #[error("loading routes failed: {0}")]
    LoadFailed(String),

    #[error("processing failed: {0}")]
    Processing(String),
}

impl RouteError {
    pub fn processing(message: impl Into<String>) -> Self {
        RouteError::Processing(message.into())
    }

    /// Walks through wrapping layers (pipeline positions, route lifecycle, compilation and
    /// exchange error slots) and returns the error that originally failed.
    pub fn root_cause(&self) -> &RouteError {
        match self {
            RouteError::PipelineStepFailed { source, .. }
            | RouteError::RouteCompilationFailed { source, .. }
            | RouteError::RouteStartFailed { source, .. }
            | RouteError::RouteStopFailed { source, .. } => source.root_cause(),
            RouteError::ExchangeFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
