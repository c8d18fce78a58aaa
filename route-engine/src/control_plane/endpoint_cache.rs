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

//! Endpoint resolution with per-URI identity.

use crate::component::Endpoint;
use crate::control_plane::component_registry::ComponentRegistry;
use crate::control_plane::endpoint_uri::parse_endpoint_uri;
use crate::error::RouteError;
use crate::observability::events;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

const COMPONENT: &str = "endpoint_cache";

/// Cache keyed by the exact URI string. Two URIs that differ only in query order are
/// distinct entries.
#[derive(Default)]
pub(crate) struct EndpointCache {
    endpoints: RwLock<HashMap<String, Arc<dyn Endpoint>>>,
}

impl EndpointCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the cached endpoint for `uri`, creating it through the registered
    /// component on first use. Concurrent callers for the same URI all observe the
    /// single instance that won the insert; failures are never cached.
    pub(crate) fn get_or_create(
        &self,
        uri: &str,
        registry: &ComponentRegistry,
    ) -> Result<Arc<dyn Endpoint>, RouteError> {
        if let Some(endpoint) = self.endpoints.read().get(uri) {
            trace!(
                event = events::ENDPOINT_CACHE_HIT,
                component = COMPONENT,
                uri = uri,
                "endpoint cache hit"
            );
            return Ok(endpoint.clone());
        }

        let config = parse_endpoint_uri(uri)?;
        let component = registry
            .get(&config.scheme)
            .ok_or_else(|| RouteError::UnknownScheme {
                scheme: config.scheme.clone(),
                uri: uri.to_string(),
            })?;

        let mut endpoints = self.endpoints.write();
        if let Some(endpoint) = endpoints.get(uri) {
            return Ok(endpoint.clone());
        }

        let scheme = config.scheme.clone();
        let endpoint = component
            .create_endpoint(config)
            .map_err(|err| match err {
                RouteError::EndpointCreationFailed { .. } => err,
                other => RouteError::EndpointCreationFailed {
                    scheme,
                    uri: uri.to_string(),
                    reason: other.to_string(),
                },
            })
            .inspect_err(|err| {
                warn!(
                    event = events::ENDPOINT_CREATE_FAILED,
                    component = COMPONENT,
                    uri = uri,
                    err = %err,
                    "endpoint creation failed"
                );
            })?;
        endpoints.insert(uri.to_string(), endpoint.clone());
        debug!(
            event = events::ENDPOINT_CREATE,
            component = COMPONENT,
            uri = uri,
            "endpoint created"
        );
        Ok(endpoint)
    }

    pub(crate) fn len(&self) -> usize {
        self.endpoints.read().len()
    }
}
