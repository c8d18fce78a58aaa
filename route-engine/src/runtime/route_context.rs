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

//! Execution context handed to processors, predicates and lifecycle calls.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Per-route context: the owning route id and the route's shutdown token.
///
/// Cheap to clone. The token is a child of the owning context's token, so tearing down
/// the context cancels every route.
#[derive(Clone)]
pub struct RouteContext {
    route_id: Arc<str>,
    shutdown: CancellationToken,
}

impl RouteContext {
    pub fn new(route_id: &str) -> Self {
        Self::with_parent(route_id, &CancellationToken::new())
    }

    pub(crate) fn with_parent(route_id: &str, parent: &CancellationToken) -> Self {
        Self {
            route_id: Arc::from(route_id),
            shutdown: parent.child_token(),
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Debug for RouteContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteContext")
            .field("route_id", &self.route_id)
            .field("shutting_down", &self.is_shutting_down())
            .finish()
    }
}
