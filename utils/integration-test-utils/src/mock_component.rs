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

//! In-memory transport used to drive routes from tests.
//!
//! Consumers do not spawn a loop; tests push exchanges with [`MockConsumer::emit`].
//! Lifecycle transitions of every producer and consumer are appended to a shared
//! [`Journal`] as `producer:start:<uri>`, `consumer:stop:<uri>` and so on.

use async_trait::async_trait;
use parking_lot::Mutex;
use route_engine::{
    dispatch_exchange, Component, Consumer, Endpoint, EndpointConfig, Exchange, Processor,
    Producer, RouteContext, RouteError,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Default)]
struct Behavior {
    fail_endpoint: HashSet<String>,
    fail_consumer_start: HashSet<String>,
    fail_consumer_stop: HashSet<String>,
}

type SharedBehavior = Arc<Mutex<Behavior>>;

pub struct MockComponent {
    scheme: String,
    created: AtomicUsize,
    endpoints: Mutex<HashMap<String, Arc<MockEndpoint>>>,
    behavior: SharedBehavior,
    journal: Journal,
}

impl MockComponent {
    pub fn new(scheme: &str) -> Self {
        Self::with_journal(scheme, Journal::default())
    }

    pub fn with_journal(scheme: &str, journal: Journal) -> Self {
        Self {
            scheme: scheme.to_string(),
            created: AtomicUsize::new(0),
            endpoints: Mutex::new(HashMap::new()),
            behavior: SharedBehavior::default(),
            journal,
        }
    }

    pub fn fail_endpoint(&self, uri: &str) {
        self.behavior.lock().fail_endpoint.insert(uri.to_string());
    }

    pub fn fail_consumer_start(&self, uri: &str) {
        self.behavior
            .lock()
            .fail_consumer_start
            .insert(uri.to_string());
    }

    pub fn fail_consumer_stop(&self, uri: &str) {
        self.behavior.lock().fail_consumer_stop.insert(uri.to_string());
    }

    /// Number of `create_endpoint` calls, failed ones included.
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn endpoint(&self, uri: &str) -> Option<Arc<MockEndpoint>> {
        self.endpoints.lock().get(uri).cloned()
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().clone()
    }
}

impl Component for MockComponent {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn create_endpoint(&self, config: EndpointConfig) -> Result<Arc<dyn Endpoint>, RouteError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        if self.behavior.lock().fail_endpoint.contains(&config.raw_uri) {
            return Err(config.creation_failed("configured to fail"));
        }

        let endpoint = Arc::new(MockEndpoint {
            config,
            behavior: self.behavior.clone(),
            journal: self.journal.clone(),
            producers: Mutex::new(Vec::new()),
            consumers: Mutex::new(Vec::new()),
        });
        self.endpoints
            .lock()
            .insert(endpoint.config.raw_uri.clone(), endpoint.clone());
        Ok(endpoint)
    }
}

pub struct MockEndpoint {
    config: EndpointConfig,
    behavior: SharedBehavior,
    journal: Journal,
    producers: Mutex<Vec<Arc<MockProducer>>>,
    consumers: Mutex<Vec<Arc<MockConsumer>>>,
}

impl MockEndpoint {
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn consumers(&self) -> Vec<Arc<MockConsumer>> {
        self.consumers.lock().clone()
    }

    pub fn producers(&self) -> Vec<Arc<MockProducer>> {
        self.producers.lock().clone()
    }

    /// Bodies sent through every producer of this endpoint, in send order per producer.
    pub fn sent_bodies(&self) -> Vec<Value> {
        self.producers
            .lock()
            .iter()
            .flat_map(|producer| producer.sent())
            .collect()
    }
}

impl Endpoint for MockEndpoint {
    fn uri(&self) -> &str {
        &self.config.raw_uri
    }

    fn create_producer(&self) -> Result<Arc<dyn Producer>, RouteError> {
        let producer = Arc::new(MockProducer {
            uri: self.config.raw_uri.clone(),
            started: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
            journal: self.journal.clone(),
        });
        self.producers.lock().push(producer.clone());
        Ok(producer)
    }

    fn create_consumer(
        &self,
        downstream: Arc<dyn Processor>,
    ) -> Result<Arc<dyn Consumer>, RouteError> {
        let consumer = Arc::new(MockConsumer {
            uri: self.config.raw_uri.clone(),
            downstream,
            ctx: Mutex::new(None),
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
            behavior: self.behavior.clone(),
            journal: self.journal.clone(),
        });
        self.consumers.lock().push(consumer.clone());
        Ok(consumer)
    }
}

pub struct MockConsumer {
    uri: String,
    downstream: Arc<dyn Processor>,
    ctx: Mutex<Option<RouteContext>>,
    starts: AtomicUsize,
    stops: AtomicUsize,
    behavior: SharedBehavior,
    journal: Journal,
}

impl MockConsumer {
    pub fn is_started(&self) -> bool {
        self.ctx.lock().is_some()
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    /// Pushes one exchange with `body` through the downstream processor, the way a real
    /// consumer loop would.
    pub async fn emit(&self, body: impl Into<Value>) -> Result<Exchange, RouteError> {
        self.emit_exchange(Exchange::with_body(body)).await
    }

    pub async fn emit_exchange(&self, exchange: Exchange) -> Result<Exchange, RouteError> {
        let ctx = self
            .ctx
            .lock()
            .clone()
            .ok_or_else(|| RouteError::processing(format!("consumer '{}' is stopped", self.uri)))?;
        Ok(dispatch_exchange(&ctx, self.downstream.as_ref(), exchange).await)
    }
}

#[async_trait]
impl Consumer for MockConsumer {
    fn endpoint_uri(&self) -> &str {
        &self.uri
    }

    async fn start(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        if self.behavior.lock().fail_consumer_start.contains(&self.uri) {
            return Err(RouteError::ConsumerStartFailed {
                uri: self.uri.clone(),
                source: "configured to fail".into(),
            });
        }

        let mut current = self.ctx.lock();
        if current.is_none() {
            *current = Some(ctx.clone());
            self.starts.fetch_add(1, Ordering::SeqCst);
            self.journal.lock().push(format!("consumer:start:{}", self.uri));
        }
        Ok(())
    }

    async fn stop(&self, _ctx: &RouteContext) -> Result<(), RouteError> {
        let was_running = self.ctx.lock().take().is_some();
        if was_running {
            self.stops.fetch_add(1, Ordering::SeqCst);
            self.journal.lock().push(format!("consumer:stop:{}", self.uri));
        }
        if self.behavior.lock().fail_consumer_stop.contains(&self.uri) {
            return Err(RouteError::ConsumerStopFailed {
                uri: self.uri.clone(),
                source: "configured to fail".into(),
            });
        }
        Ok(())
    }
}

pub struct MockProducer {
    uri: String,
    started: AtomicBool,
    sent: Mutex<Vec<Value>>,
    journal: Journal,
}

impl MockProducer {
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Value> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Processor for MockProducer {
    async fn process(
        &self,
        _ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        if !self.is_started() {
            return Err(RouteError::ProducerNotStarted {
                uri: self.uri.clone(),
            });
        }
        let body = exchange.r#in().body().cloned().unwrap_or(Value::Null);
        self.sent.lock().push(body);
        Ok(())
    }

    async fn start(&self, _ctx: &RouteContext) -> Result<(), RouteError> {
        if !self.started.swap(true, Ordering::SeqCst) {
            self.journal.lock().push(format!("producer:start:{}", self.uri));
        }
        Ok(())
    }

    async fn stop(&self, _ctx: &RouteContext) -> Result<(), RouteError> {
        if self.started.swap(false, Ordering::SeqCst) {
            self.journal.lock().push(format!("producer:stop:{}", self.uri));
        }
        Ok(())
    }
}

impl Producer for MockProducer {
    fn endpoint_uri(&self) -> &str {
        &self.uri
    }
}
