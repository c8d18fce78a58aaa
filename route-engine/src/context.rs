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

//! Top-level routing context.

use crate::component::{Component, Endpoint};
use crate::control_plane::component_registry::ComponentRegistry;
use crate::control_plane::endpoint_cache::EndpointCache;
use crate::definition::compiler::{compile_route, EndpointResolver};
use crate::definition::{RouteDefinition, RouteLoader, RouteSource};
use crate::error::RouteError;
use crate::exchange::Exchange;
use crate::observability::events;
use crate::route::Route;
use crate::runtime::RouteContext;
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const COMPONENT: &str = "routing_context";

/// Owns the component registry, the endpoint cache, the configured loader and every
/// registered route.
///
/// Route registration needs `&mut self`; lifecycle calls take `&self`. Dropping the
/// context cancels every consumer loop it started.
pub struct RoutingContext {
    name: String,
    registry: ComponentRegistry,
    endpoints: EndpointCache,
    loader: Option<Arc<dyn RouteLoader>>,
    routes: Vec<Arc<Route>>,
    shutdown: CancellationToken,
}

impl RoutingContext {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            registry: ComponentRegistry::new(),
            endpoints: EndpointCache::new(),
            loader: None,
            routes: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn register_component(&self, component: Arc<dyn Component>) {
        self.registry.register(component);
    }

    pub fn component(&self, scheme: &str) -> Option<Arc<dyn Component>> {
        self.registry.get(scheme)
    }

    pub fn schemes(&self) -> Vec<String> {
        self.registry.schemes()
    }

    /// Resolves `uri` to its shared endpoint instance, creating it on first use.
    pub fn get_endpoint(&self, uri: &str) -> Result<Arc<dyn Endpoint>, RouteError> {
        self.endpoints.get_or_create(uri, &self.registry)
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    pub fn set_loader(&mut self, loader: Arc<dyn RouteLoader>) {
        self.loader = Some(loader);
    }

    /// Loads definitions from `source` through the configured loader and registers them.
    /// Returns the ids of the added routes.
    pub fn add_routes(&mut self, source: RouteSource<'_>) -> Result<Vec<String>, RouteError> {
        let loader = self.loader.clone().ok_or(RouteError::NoLoaderConfigured)?;
        let source_kind = source.kind();
        let definitions = loader.load(source)?;
        debug!(
            event = events::ROUTES_LOAD,
            component = COMPONENT,
            context = %self.name,
            loader = loader.name(),
            source_kind,
            definitions = definitions.len(),
            "route definitions loaded"
        );
        self.add_route_definitions(definitions)
    }

    /// Compiles every definition and registers the batch. Nothing is registered unless
    /// every definition compiles.
    pub fn add_route_definitions(
        &mut self,
        definitions: Vec<RouteDefinition>,
    ) -> Result<Vec<String>, RouteError> {
        let mut seen: HashSet<String> = self
            .routes
            .iter()
            .map(|route| route.id().to_string())
            .collect();
        let explicit: HashSet<&str> = definitions
            .iter()
            .map(RouteDefinition::id)
            .filter(|id| !id.is_empty())
            .collect();
        let mut staged: Vec<Arc<Route>> = Vec::with_capacity(definitions.len());

        for definition in &definitions {
            let route_id = if definition.id().is_empty() {
                generate_route_id(self.routes.len() + staged.len() + 1, |candidate| {
                    seen.contains(candidate) || explicit.contains(candidate)
                })
            } else {
                definition.id().to_string()
            };
            if !seen.insert(route_id.clone()) {
                return Err(RouteError::DuplicateRouteId(route_id));
            }

            debug!(
                event = events::ROUTE_COMPILE,
                component = COMPONENT,
                route_id = %route_id,
                uri = definition.input_uri(),
                steps = definition.steps().len(),
                "compiling route"
            );
            let route = self.build_route(route_id, definition).inspect_err(|err| {
                warn!(
                    event = events::ROUTE_COMPILE_FAILED,
                    component = COMPONENT,
                    context = %self.name,
                    uri = definition.input_uri(),
                    err = %err,
                    "route registration aborted"
                );
            })?;
            staged.push(Arc::new(route));
        }

        let ids: Vec<String> = staged.iter().map(|route| route.id().to_string()).collect();
        for route in &staged {
            info!(
                event = events::ROUTE_ADDED,
                component = COMPONENT,
                route_id = route.id(),
                uri = route.input_uri(),
                "route added"
            );
        }
        self.routes.extend(staged);
        Ok(ids)
    }

    fn build_route(
        &self,
        route_id: String,
        definition: &RouteDefinition,
    ) -> Result<Route, RouteError> {
        let input = self.get_endpoint(definition.input_uri())?;
        let pipeline = Arc::new(compile_route(self, &route_id, definition)?);
        let consumer = input.create_consumer(pipeline.clone())?;
        let ctx = RouteContext::with_parent(&route_id, &self.shutdown);

        Ok(Route::new(
            route_id,
            definition.input_uri().to_string(),
            consumer,
            pipeline,
            ctx,
        ))
    }

    /// Starts routes in registration order. The first failure stops the walk; routes
    /// already started stay started and are skipped on the next call.
    pub async fn start(&self) -> Result<(), RouteError> {
        info!(
            component = COMPONENT,
            context = %self.name,
            routes = self.routes.len(),
            "starting routes"
        );
        for route in &self.routes {
            if let Err(err) = route.start().await {
                warn!(
                    event = events::ROUTE_START_FAILED,
                    component = COMPONENT,
                    route_id = route.id(),
                    err = %err,
                    "route failed to start"
                );
                return Err(RouteError::RouteStartFailed {
                    route_id: route.id().to_string(),
                    source: Box::new(err),
                });
            }
        }
        Ok(())
    }

    /// Stops routes in reverse registration order. Every route gets a stop attempt and
    /// the first failure is returned.
    pub async fn stop(&self) -> Result<(), RouteError> {
        info!(
            component = COMPONENT,
            context = %self.name,
            routes = self.routes.len(),
            "stopping routes"
        );
        let mut first_err = None;
        for route in self.routes.iter().rev() {
            if let Err(err) = route.stop().await {
                warn!(
                    event = events::ROUTE_STOP_FAILED,
                    component = COMPONENT,
                    route_id = route.id(),
                    err = %err,
                    "route failed to stop"
                );
                first_err.get_or_insert(RouteError::RouteStopFailed {
                    route_id: route.id().to_string(),
                    source: Box::new(err),
                });
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    pub fn route(&self, id: &str) -> Option<&Arc<Route>> {
        self.routes.iter().find(|route| route.id() == id)
    }

    pub fn new_exchange(&self) -> Exchange {
        Exchange::new()
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }
}

/// `route<N>` for the first N from `start` whose id is not taken.
fn generate_route_id(start: usize, taken: impl Fn(&str) -> bool) -> String {
    (start..)
        .map(|n| format!("route{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_default()
}

impl EndpointResolver for RoutingContext {
    fn resolve_endpoint(&self, uri: &str) -> Result<Arc<dyn Endpoint>, RouteError> {
        self.get_endpoint(uri)
    }
}

impl Drop for RoutingContext {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
