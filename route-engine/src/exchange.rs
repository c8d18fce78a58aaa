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

//! Message and exchange data model.
//!
//! An [`Exchange`] is created by a consumer for one unit of work and lives for the
//! duration of a single pipeline execution. Payloads and header values are untyped
//! [`serde_json::Value`]s.

use crate::error::RouteError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub type Headers = HashMap<String, Value>;
pub type Properties = HashMap<String, Value>;

/// Body plus headers. Bodies are shared on clone, headers are copied.
#[derive(Clone, Debug, Default)]
pub struct Message {
    body: Option<Arc<Value>>,
    headers: Headers,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(body: impl Into<Value>) -> Self {
        let mut message = Self::new();
        message.set_body(body);
        message
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_deref()
    }

    /// Body as text, when the payload is a JSON string.
    pub fn body_str(&self) -> Option<&str> {
        self.body().and_then(Value::as_str)
    }

    pub fn set_body(&mut self, body: impl Into<Value>) {
        self.body = Some(Arc::new(body.into()));
    }

    pub fn clear_body(&mut self) {
        self.body = None;
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn header(&self, key: &str) -> Option<&Value> {
        self.headers.get(key)
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.headers.insert(key.into(), value.into());
    }

    pub fn remove_header(&mut self, key: &str) -> Option<Value> {
        self.headers.remove(key)
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    #[cfg(test)]
    fn shares_body_with(&self, other: &Message) -> bool {
        match (&self.body, &other.body) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub struct Exchange {
    id: String,
    in_message: Message,
    out_message: Option<Message>,
    error: Option<Arc<RouteError>>,
    properties: Properties,
}

impl Exchange {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().hyphenated().to_string(),
            in_message: Message::new(),
            out_message: None,
            error: None,
            properties: Properties::new(),
        }
    }

    pub fn with_body(body: impl Into<Value>) -> Self {
        let mut exchange = Self::new();
        exchange.in_message.set_body(body);
        exchange
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn r#in(&self) -> &Message {
        &self.in_message
    }

    pub fn in_mut(&mut self) -> &mut Message {
        &mut self.in_message
    }

    pub fn set_in(&mut self, message: Message) {
        self.in_message = message;
    }

    pub fn out(&self) -> Option<&Message> {
        self.out_message.as_ref()
    }

    /// Out message, created empty on first access.
    pub fn out_mut(&mut self) -> &mut Message {
        self.out_message.get_or_insert_with(Message::new)
    }

    pub fn set_out(&mut self, message: Message) {
        self.out_message = Some(message);
    }

    pub fn take_out(&mut self) -> Option<Message> {
        self.out_message.take()
    }

    pub fn has_out(&self) -> bool {
        self.out_message.is_some()
    }

    /// Replaces In with the Out message, if one was produced. Returns whether a
    /// promotion happened.
    pub fn promote_out(&mut self) -> bool {
        match self.out_message.take() {
            Some(out) => {
                self.in_message = out;
                true
            }
            None => false,
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Marks the exchange as failed. Pipelines stop before running the next step.
    pub fn set_error(&mut self, error: RouteError) {
        self.error = Some(Arc::new(error));
    }

    pub fn error(&self) -> Option<&Arc<RouteError>> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn clear_error(&mut self) -> Option<Arc<RouteError>> {
        self.error.take()
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies headers and properties, shares the body payloads and the error, and derives
/// the identifier `<id>_clone`.
impl Clone for Exchange {
    fn clone(&self) -> Self {
        Self {
            id: format!("{}_clone", self.id),
            in_message: self.in_message.clone(),
            out_message: self.out_message.clone(),
            error: self.error.clone(),
            properties: self.properties.clone(),
        }
    }
}
