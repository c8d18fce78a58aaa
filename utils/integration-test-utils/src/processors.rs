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

use async_trait::async_trait;
use parking_lot::Mutex;
use route_engine::{Exchange, Message, Processor, RouteContext, RouteError};
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;

/// Captures a copy of the In message of every exchange it sees.
#[derive(Default)]
pub struct RecordingProcessor {
    name: String,
    seen: Mutex<Vec<Message>>,
}

impl RecordingProcessor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.seen.lock().clone()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.seen
            .lock()
            .iter()
            .map(|message| message.body().cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Polls until at least `expected` exchanges were recorded or `timeout` elapses.
    pub async fn wait_for(&self, expected: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.count() >= expected {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl Processor for RecordingProcessor {
    async fn process(
        &self,
        _ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        self.seen.lock().push(exchange.r#in().clone());
        Ok(())
    }
}

/// Fails every exchange with a processing error carrying `reason`.
pub struct FailingProcessor {
    reason: String,
    fail_start: bool,
}

impl FailingProcessor {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
            fail_start: false,
        }
    }

    /// Also refuses to start, with the same reason.
    pub fn unstartable(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
            fail_start: true,
        }
    }
}

#[async_trait]
impl Processor for FailingProcessor {
    async fn process(
        &self,
        _ctx: &RouteContext,
        _exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        Err(RouteError::processing(self.reason.clone()))
    }

    async fn start(&self, _ctx: &RouteContext) -> Result<(), RouteError> {
        if self.fail_start {
            return Err(RouteError::processing(self.reason.clone()));
        }
        Ok(())
    }
}
