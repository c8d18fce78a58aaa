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

//! JSON5 route documents.
//!
//! ```json5
//! {
//!   routes: [
//!     {
//!       id: "orders",
//!       from: "file:in.txt",
//!       steps: [
//!         { set_header: { name: "source", value: { constant: "file" } } },
//!         { choice: {
//!             when: [{ condition: { body_contains: "urgent" }, steps: [{ to: "file:urgent.txt" }] }],
//!             otherwise: [{ to: "file:normal.txt" }],
//!         } },
//!       ],
//!     },
//!   ],
//! }
//! ```

use route_engine::{
    predicate, ChoiceDefinition, Expression, Predicate, RouteDefinition, RouteError,
    RouteLoader, RouteSource, StepDefinition, WhenDefinition,
};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "config_loader";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesConfig {
    pub routes: Vec<RouteConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    #[serde(default)]
    pub id: String,
    pub from: String,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepConfig {
    To(String),
    From(String),
    SetHeader { name: String, value: ValueConfig },
    SetBody(ValueConfig),
    Transform(ValueConfig),
    Log(String),
    Choice(ChoiceConfig),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueConfig {
    Constant(Value),
    Header(String),
    Body,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoiceConfig {
    pub when: Vec<WhenConfig>,
    #[serde(default)]
    pub otherwise: Option<Vec<StepConfig>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhenConfig {
    pub condition: ConditionConfig,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionConfig {
    HeaderEquals { name: String, value: Value },
    HeaderExists(String),
    BodyEquals(Value),
    BodyContains(String),
    Not(Box<ConditionConfig>),
}

impl RoutesConfig {
    pub fn parse(document: &str) -> Result<Self, RouteError> {
        json5::from_str(document)
            .map_err(|err| RouteError::LoadFailed(format!("invalid route document: {err}")))
    }

    pub fn into_definitions(self) -> Vec<RouteDefinition> {
        self.routes
            .into_iter()
            .map(RouteConfig::into_definition)
            .collect()
    }
}

impl RouteConfig {
    pub fn into_definition(self) -> RouteDefinition {
        RouteDefinition::new(self.id, self.from, convert_steps(self.steps))
    }
}

fn convert_steps(steps: Vec<StepConfig>) -> Vec<StepDefinition> {
    steps.into_iter().map(StepDefinition::from).collect()
}

impl From<StepConfig> for StepDefinition {
    fn from(step: StepConfig) -> Self {
        match step {
            StepConfig::To(uri) => StepDefinition::To(uri),
            StepConfig::From(uri) => StepDefinition::From(uri),
            StepConfig::SetHeader { name, value } => StepDefinition::SetHeader {
                name,
                expression: value.into(),
            },
            StepConfig::SetBody(value) => StepDefinition::SetBody(value.into()),
            StepConfig::Transform(value) => StepDefinition::Transform(value.into()),
            StepConfig::Log(message) => StepDefinition::Log(message),
            StepConfig::Choice(choice) => StepDefinition::Choice(ChoiceDefinition {
                whens: choice
                    .when
                    .into_iter()
                    .map(|when| WhenDefinition {
                        predicate: when.condition.into_predicate(),
                        steps: convert_steps(when.steps),
                    })
                    .collect(),
                otherwise: choice.otherwise.map(convert_steps),
            }),
        }
    }
}

impl From<ValueConfig> for Expression {
    fn from(value: ValueConfig) -> Self {
        match value {
            ValueConfig::Constant(value) => Expression::Constant(value),
            ValueConfig::Header(name) => Expression::Header(name),
            ValueConfig::Body => Expression::Body,
        }
    }
}

impl ConditionConfig {
    pub fn into_predicate(self) -> Arc<dyn Predicate> {
        match self {
            ConditionConfig::HeaderEquals { name, value } => predicate::header_equals(name, value),
            ConditionConfig::HeaderExists(name) => predicate::header_exists(name),
            ConditionConfig::BodyEquals(value) => predicate::body_equals(value),
            ConditionConfig::BodyContains(text) => predicate::body_contains(text),
            ConditionConfig::Not(inner) => predicate::not(inner.into_predicate()),
        }
    }
}

/// Loads JSON5 route documents from a file path or an in-memory string.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    fn read(path: &Path) -> Result<String, RouteError> {
        fs::read_to_string(path).map_err(|err| {
            RouteError::LoadFailed(format!("unable to read {}: {err}", path.display()))
        })
    }
}

impl RouteLoader for ConfigLoader {
    fn name(&self) -> &'static str {
        "ConfigLoader"
    }

    fn load(&self, source: RouteSource<'_>) -> Result<Vec<RouteDefinition>, RouteError> {
        let document = match source {
            RouteSource::Path(path) => {
                debug!(component = COMPONENT, path = %path.display(), "reading route document");
                Self::read(path)?
            }
            RouteSource::Document(document) => document.to_string(),
            other => return Err(self.unsupported(&other)),
        };

        let definitions = RoutesConfig::parse(&document)?.into_definitions();
        debug!(
            component = COMPONENT,
            definitions = definitions.len(),
            "route document parsed"
        );
        Ok(definitions)
    }
}
