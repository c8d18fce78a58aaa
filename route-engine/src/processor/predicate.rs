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

//! Branch conditions for content-based routing.

use crate::error::RouteError;
use crate::exchange::Exchange;
use crate::runtime::RouteContext;
use serde_json::Value;
use std::sync::Arc;

pub trait Predicate: Send + Sync {
    fn evaluate(&self, ctx: &RouteContext, exchange: &Exchange) -> Result<bool, RouteError>;
}

impl<F> Predicate for F
where
    F: Fn(&RouteContext, &Exchange) -> Result<bool, RouteError> + Send + Sync,
{
    fn evaluate(&self, ctx: &RouteContext, exchange: &Exchange) -> Result<bool, RouteError> {
        self(ctx, exchange)
    }
}

struct HeaderEquals {
    name: String,
    value: Value,
}

impl Predicate for HeaderEquals {
    fn evaluate(&self, _ctx: &RouteContext, exchange: &Exchange) -> Result<bool, RouteError> {
        Ok(exchange.r#in().header(&self.name) == Some(&self.value))
    }
}

struct HeaderExists(String);

impl Predicate for HeaderExists {
    fn evaluate(&self, _ctx: &RouteContext, exchange: &Exchange) -> Result<bool, RouteError> {
        Ok(exchange.r#in().header(&self.0).is_some())
    }
}

struct BodyEquals(Value);

impl Predicate for BodyEquals {
    fn evaluate(&self, _ctx: &RouteContext, exchange: &Exchange) -> Result<bool, RouteError> {
        Ok(exchange.r#in().body() == Some(&self.0))
    }
}

struct BodyContains(String);

impl Predicate for BodyContains {
    fn evaluate(&self, _ctx: &RouteContext, exchange: &Exchange) -> Result<bool, RouteError> {
        match exchange.r#in().body() {
            None => Ok(false),
            Some(Value::String(text)) => Ok(text.contains(&self.0)),
            Some(other) => Err(RouteError::PredicateFailed(format!(
                "body_contains expects a text body, got {other}"
            ))),
        }
    }
}

struct Not(Arc<dyn Predicate>);

impl Predicate for Not {
    fn evaluate(&self, ctx: &RouteContext, exchange: &Exchange) -> Result<bool, RouteError> {
        self.0.evaluate(ctx, exchange).map(|matched| !matched)
    }
}

pub fn header_equals(name: impl Into<String>, value: impl Into<Value>) -> Arc<dyn Predicate> {
    Arc::new(HeaderEquals {
        name: name.into(),
        value: value.into(),
    })
}

pub fn header_exists(name: impl Into<String>) -> Arc<dyn Predicate> {
    Arc::new(HeaderExists(name.into()))
}

pub fn body_equals(value: impl Into<Value>) -> Arc<dyn Predicate> {
    Arc::new(BodyEquals(value.into()))
}

/// Substring match on a text body. Non-text bodies are an evaluation error.
pub fn body_contains(text: impl Into<String>) -> Arc<dyn Predicate> {
    Arc::new(BodyContains(text.into()))
}

pub fn not(predicate: Arc<dyn Predicate>) -> Arc<dyn Predicate> {
    Arc::new(Not(predicate))
}

pub fn from_fn<F>(f: F) -> Arc<dyn Predicate>
where
    F: Fn(&RouteContext, &Exchange) -> Result<bool, RouteError> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RouteContext {
        RouteContext::new("predicates")
    }

    #[test]
    fn header_predicates() {
        let mut exchange = Exchange::new();
        exchange.in_mut().set_header("type", "order");

        assert!(header_equals("type", "order").evaluate(&ctx(), &exchange).unwrap());
        assert!(!header_equals("type", "invoice").evaluate(&ctx(), &exchange).unwrap());
        assert!(header_exists("type").evaluate(&ctx(), &exchange).unwrap());
        assert!(!header_exists("missing").evaluate(&ctx(), &exchange).unwrap());
    }

    #[test]
    fn body_predicates() {
        let exchange = Exchange::with_body("hello world");

        assert!(body_equals("hello world").evaluate(&ctx(), &exchange).unwrap());
        assert!(body_contains("world").evaluate(&ctx(), &exchange).unwrap());
        assert!(!not(body_contains("world")).evaluate(&ctx(), &exchange).unwrap());
        assert!(!body_contains("x").evaluate(&ctx(), &Exchange::new()).unwrap());
    }

    #[test]
    fn body_contains_rejects_non_text_body() {
        let exchange = Exchange::with_body(12);
        let err = body_contains("1")
            .evaluate(&ctx(), &exchange)
            .expect_err("numeric body");
        assert!(matches!(err, RouteError::PredicateFailed(_)));
    }

    #[test]
    fn closures_are_predicates() {
        let predicate = from_fn(|ctx: &RouteContext, _exchange: &Exchange| {
            Ok(ctx.route_id() == "predicates")
        });
        assert!(predicate.evaluate(&ctx(), &Exchange::new()).unwrap());
    }
}
