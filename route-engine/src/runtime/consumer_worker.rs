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

//! Cancellable background loop shared by consumer implementations.

use crate::error::RouteError;
use crate::exchange::Exchange;
use crate::observability::{events, fields};
use crate::processor::Processor;
use crate::runtime::RouteContext;
use parking_lot::Mutex;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

const COMPONENT: &str = "consumer_worker";

struct RunningLoop {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns at most one spawned consumer loop.
///
/// The loop receives a cancellation token that fires on [`ConsumerWorker::stop`] or when
/// the owning route or context shuts down. Loops must check it between exchanges and
/// never abandon an exchange midway.
pub struct ConsumerWorker {
    endpoint_uri: String,
    running: Mutex<Option<RunningLoop>>,
}

impl ConsumerWorker {
    pub fn new(endpoint_uri: impl Into<String>) -> Self {
        Self {
            endpoint_uri: endpoint_uri.into(),
            running: Mutex::new(None),
        }
    }

    pub fn endpoint_uri(&self) -> &str {
        &self.endpoint_uri
    }

    /// Spawns `run_loop` unless a previous loop is still alive.
    pub fn start<F, Fut>(&self, ctx: &RouteContext, run_loop: F) -> Result<(), RouteError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut running = self.running.lock();
        if running
            .as_ref()
            .is_some_and(|current| !current.handle.is_finished())
        {
            trace!(
                component = COMPONENT,
                route_id = ctx.route_id(),
                uri = %self.endpoint_uri,
                "consumer loop already running"
            );
            return Ok(());
        }

        let cancel = ctx.shutdown_token().child_token();
        let handle = tokio::spawn(run_loop(cancel.clone()));
        *running = Some(RunningLoop { cancel, handle });

        debug!(
            event = events::CONSUMER_LOOP_START,
            component = COMPONENT,
            route_id = ctx.route_id(),
            uri = %self.endpoint_uri,
            "consumer loop spawned"
        );
        Ok(())
    }

    /// Cancels the loop and waits for it to finish its in-flight exchange.
    pub async fn stop(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        let Some(current) = self.running.lock().take() else {
            return Ok(());
        };

        current.cancel.cancel();
        match current.handle.await {
            Ok(()) => {
                debug!(
                    event = events::CONSUMER_LOOP_EXIT,
                    component = COMPONENT,
                    route_id = ctx.route_id(),
                    uri = %self.endpoint_uri,
                    "consumer loop joined"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    event = events::CONSUMER_LOOP_ABORTED,
                    component = COMPONENT,
                    route_id = ctx.route_id(),
                    uri = %self.endpoint_uri,
                    err = %err,
                    "consumer loop terminated abnormally"
                );
                Err(RouteError::ConsumerStopFailed {
                    uri: self.endpoint_uri.clone(),
                    source: Box::new(err),
                })
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .as_ref()
            .is_some_and(|current| !current.handle.is_finished())
    }
}

/// Runs one exchange through `downstream`.
///
/// A failure is recorded on the exchange and logged; it never ends the consumer loop.
/// The finished exchange is handed back to the caller.
pub async fn dispatch_exchange(
    ctx: &RouteContext,
    downstream: &dyn Processor,
    mut exchange: Exchange,
) -> Exchange {
    match downstream.process(ctx, &mut exchange).await {
        Ok(()) => {
            trace!(
                event = events::EXCHANGE_COMPLETED,
                component = COMPONENT,
                route_id = ctx.route_id(),
                exchange_id = exchange.id(),
                "exchange completed"
            );
        }
        Err(err) => {
            warn!(
                event = events::EXCHANGE_FAILED,
                component = COMPONENT,
                route_id = ctx.route_id(),
                exchange_id = exchange.id(),
                body = %fields::body_preview(&exchange),
                err = %err,
                "exchange failed"
            );
            if !exchange.has_error() {
                exchange.set_error(err);
            }
        }
    }
    exchange
}
