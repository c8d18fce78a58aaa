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

//! Route intermediate representation.
//!
//! Loaders produce [`RouteDefinition`]s; the context compiles them into processor graphs.
//! Definitions are plain data and are never mutated after construction.

pub mod compiler;
mod loader;

pub use loader::{DefinitionsLoader, RouteBuilder, RouteLoader, RouteSource};

use crate::processor::{Expression, Predicate, Processor};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RouteDefinition {
    id: String,
    input_uri: String,
    steps: Vec<StepDefinition>,
}

impl RouteDefinition {
    /// An empty `id` asks the context to assign `route<N>` on registration.
    pub fn new(
        id: impl Into<String>,
        input_uri: impl Into<String>,
        steps: Vec<StepDefinition>,
    ) -> Self {
        Self {
            id: id.into(),
            input_uri: input_uri.into(),
            steps,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input_uri(&self) -> &str {
        &self.input_uri
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }
}

#[derive(Clone)]
pub enum StepDefinition {
    /// Send to the endpoint through a producer.
    To(String),
    /// Nested consumer feeding the steps that follow it in the same list.
    From(String),
    Choice(ChoiceDefinition),
    SetHeader { name: String, expression: Expression },
    SetBody(Expression),
    Transform(Expression),
    Log(String),
    Process(Arc<dyn Processor>),
}

impl StepDefinition {
    pub fn kind(&self) -> &'static str {
        match self {
            StepDefinition::To(_) => "to",
            StepDefinition::From(_) => "from",
            StepDefinition::Choice(_) => "choice",
            StepDefinition::SetHeader { .. } => "set_header",
            StepDefinition::SetBody(_) => "set_body",
            StepDefinition::Transform(_) => "transform",
            StepDefinition::Log(_) => "log",
            StepDefinition::Process(_) => "process",
        }
    }
}

impl Debug for StepDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StepDefinition::To(uri) => f.debug_tuple("To").field(uri).finish(),
            StepDefinition::From(uri) => f.debug_tuple("From").field(uri).finish(),
            StepDefinition::Choice(choice) => f.debug_tuple("Choice").field(choice).finish(),
            StepDefinition::SetHeader { name, expression } => f
                .debug_struct("SetHeader")
                .field("name", name)
                .field("expression", expression)
                .finish(),
            StepDefinition::SetBody(expression) => {
                f.debug_tuple("SetBody").field(expression).finish()
            }
            StepDefinition::Transform(expression) => {
                f.debug_tuple("Transform").field(expression).finish()
            }
            StepDefinition::Log(message) => f.debug_tuple("Log").field(message).finish(),
            StepDefinition::Process(_) => f.write_str("Process(..)"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChoiceDefinition {
    pub whens: Vec<WhenDefinition>,
    pub otherwise: Option<Vec<StepDefinition>>,
}

#[derive(Clone)]
pub struct WhenDefinition {
    pub predicate: Arc<dyn Predicate>,
    pub steps: Vec<StepDefinition>,
}

impl Debug for WhenDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhenDefinition")
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
