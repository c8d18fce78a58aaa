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

//! Message-shaping processors and the nested-consumer lifecycle holder.

use crate::component::Consumer;
use crate::error::RouteError;
use crate::exchange::{Exchange, Message};
use crate::observability::{events, fields};
use crate::processor::Processor;
use crate::runtime::RouteContext;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Value source for header and body steps.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Constant(Value),
    Header(String),
    Body,
}

impl Expression {
    pub fn constant(value: impl Into<Value>) -> Self {
        Expression::Constant(value.into())
    }

    pub fn header(name: impl Into<String>) -> Self {
        Expression::Header(name.into())
    }

    /// Evaluates against the In message. A missing header or body yields `Null`.
    pub fn evaluate(&self, exchange: &Exchange) -> Value {
        match self {
            Expression::Constant(value) => value.clone(),
            Expression::Header(name) => exchange.r#in().header(name).cloned().unwrap_or(Value::Null),
            Expression::Body => exchange.r#in().body().cloned().unwrap_or(Value::Null),
        }
    }
}

pub struct SetHeaderProcessor {
    name: String,
    expression: Expression,
}

impl SetHeaderProcessor {
    pub fn new(name: impl Into<String>, expression: Expression) -> Self {
        Self {
            name: name.into(),
            expression,
        }
    }
}

#[async_trait]
impl Processor for SetHeaderProcessor {
    async fn process(
        &self,
        _ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        let value = self.expression.evaluate(exchange);
        exchange.in_mut().set_header(self.name.clone(), value);
        Ok(())
    }
}

/// Replaces the In body in place.
pub struct SetBodyProcessor {
    expression: Expression,
}

impl SetBodyProcessor {
    pub fn new(expression: Expression) -> Self {
        Self { expression }
    }
}

#[async_trait]
impl Processor for SetBodyProcessor {
    async fn process(
        &self,
        _ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        let value = self.expression.evaluate(exchange);
        exchange.in_mut().set_body(value);
        Ok(())
    }
}

/// Writes the Out message: In headers carried over, body from the expression.
pub struct TransformProcessor {
    expression: Expression,
}

impl TransformProcessor {
    pub fn new(expression: Expression) -> Self {
        Self { expression }
    }
}

#[async_trait]
impl Processor for TransformProcessor {
    async fn process(
        &self,
        _ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        let mut out = Message::with_body(self.expression.evaluate(exchange));
        *out.headers_mut() = exchange.r#in().headers().clone();
        exchange.set_out(out);
        Ok(())
    }
}

pub struct LogProcessor {
    message: String,
}

impl LogProcessor {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Processor for LogProcessor {
    async fn process(
        &self,
        ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        info!(
            event = events::EXCHANGE_LOG,
            route_id = ctx.route_id(),
            exchange_id = exchange.id(),
            body = %fields::body_preview(exchange),
            "{}",
            self.message
        );
        Ok(())
    }
}

/// Compiled form of a nested `from` step.
///
/// Message flow is driven by the held consumer's own loop, so `process` does nothing;
/// the holder only ties the consumer to the route lifecycle.
pub struct ConsumerHolder {
    consumer: Arc<dyn Consumer>,
}

impl ConsumerHolder {
    pub fn new(consumer: Arc<dyn Consumer>) -> Self {
        Self { consumer }
    }

    pub fn consumer(&self) -> &Arc<dyn Consumer> {
        &self.consumer
    }
}

#[async_trait]
impl Processor for ConsumerHolder {
    async fn process(
        &self,
        _ctx: &RouteContext,
        _exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        Ok(())
    }

    async fn start(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        self.consumer.start(ctx).await
    }

    async fn stop(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        self.consumer.stop(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_header_copies_from_body() {
        let mut exchange = Exchange::with_body("payload");
        SetHeaderProcessor::new("copy", Expression::Body)
            .process(&RouteContext::new("t"), &mut exchange)
            .await
            .unwrap();
        assert_eq!(exchange.r#in().header("copy"), Some(&json!("payload")));
    }

    #[tokio::test]
    async fn set_body_from_missing_header_is_null() {
        let mut exchange = Exchange::with_body("payload");
        SetBodyProcessor::new(Expression::header("absent"))
            .process(&RouteContext::new("t"), &mut exchange)
            .await
            .unwrap();
        assert_eq!(exchange.r#in().body(), Some(&Value::Null));
    }

    #[tokio::test]
    async fn transform_populates_out_with_in_headers() {
        let mut exchange = Exchange::with_body("in");
        exchange.in_mut().set_header("kept", 1);
        TransformProcessor::new(Expression::constant("out"))
            .process(&RouteContext::new("t"), &mut exchange)
            .await
            .unwrap();

        let out = exchange.out().expect("out populated");
        assert_eq!(out.body_str(), Some("out"));
        assert_eq!(out.header("kept"), Some(&json!(1)));
        assert_eq!(exchange.r#in().body_str(), Some("in"));
    }
}
