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

use route_engine::{
    ChoiceDefinition, Expression, Predicate, Processor, RouteDefinition, StepDefinition,
    WhenDefinition,
};
use std::sync::Arc;

/// Starts a route definition reading from `uri`.
pub fn from(uri: &str) -> RouteDsl {
    RouteDsl {
        id: String::new(),
        input_uri: uri.to_string(),
        steps: Vec::new(),
    }
}

/// Step-appending vocabulary shared by routes and choice branches.
pub trait StepSink: Sized {
    fn push_step(&mut self, step: StepDefinition);

    fn step(mut self, step: StepDefinition) -> Self {
        self.push_step(step);
        self
    }

    fn to(self, uri: &str) -> Self {
        self.step(StepDefinition::To(uri.to_string()))
    }

    /// Nested consumer; the steps appended after it become its downstream.
    fn from(self, uri: &str) -> Self {
        self.step(StepDefinition::From(uri.to_string()))
    }

    fn set_header(self, name: &str, expression: Expression) -> Self {
        self.step(StepDefinition::SetHeader {
            name: name.to_string(),
            expression,
        })
    }

    fn set_body(self, expression: Expression) -> Self {
        self.step(StepDefinition::SetBody(expression))
    }

    fn transform(self, expression: Expression) -> Self {
        self.step(StepDefinition::Transform(expression))
    }

    fn log(self, message: &str) -> Self {
        self.step(StepDefinition::Log(message.to_string()))
    }

    fn process(self, processor: Arc<dyn Processor>) -> Self {
        self.step(StepDefinition::Process(processor))
    }

    fn choice(self, build: impl FnOnce(ChoiceDsl) -> ChoiceDsl) -> Self {
        let choice = build(ChoiceDsl::default());
        self.step(StepDefinition::Choice(choice.into_definition()))
    }
}

#[derive(Debug)]
pub struct RouteDsl {
    id: String,
    input_uri: String,
    steps: Vec<StepDefinition>,
}

impl RouteDsl {
    pub fn route_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn build(self) -> RouteDefinition {
        RouteDefinition::new(self.id, self.input_uri, self.steps)
    }
}

impl StepSink for RouteDsl {
    fn push_step(&mut self, step: StepDefinition) {
        self.steps.push(step);
    }
}

impl From<RouteDsl> for RouteDefinition {
    fn from(dsl: RouteDsl) -> Self {
        dsl.build()
    }
}

/// Step list of a choice branch.
#[derive(Debug, Default)]
pub struct Steps {
    steps: Vec<StepDefinition>,
}

impl Steps {
    pub fn into_steps(self) -> Vec<StepDefinition> {
        self.steps
    }
}

impl StepSink for Steps {
    fn push_step(&mut self, step: StepDefinition) {
        self.steps.push(step);
    }
}

#[derive(Debug, Default)]
pub struct ChoiceDsl {
    whens: Vec<WhenDefinition>,
    otherwise: Option<Vec<StepDefinition>>,
}

impl ChoiceDsl {
    pub fn when(
        mut self,
        predicate: Arc<dyn Predicate>,
        build: impl FnOnce(Steps) -> Steps,
    ) -> Self {
        self.whens.push(WhenDefinition {
            predicate,
            steps: build(Steps::default()).into_steps(),
        });
        self
    }

    /// Sets the fallback branch. A second call replaces the first.
    pub fn otherwise(mut self, build: impl FnOnce(Steps) -> Steps) -> Self {
        self.otherwise = Some(build(Steps::default()).into_steps());
        self
    }

    pub fn into_definition(self) -> ChoiceDefinition {
        ChoiceDefinition {
            whens: self.whens,
            otherwise: self.otherwise,
        }
    }
}

/// Accumulates definitions inside a route builder.
#[derive(Debug, Default)]
pub struct RouteCollection {
    definitions: Vec<RouteDefinition>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, route: impl Into<RouteDefinition>) -> &mut Self {
        self.definitions.push(route.into());
        self
    }

    pub fn definitions(&self) -> &[RouteDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{from, RouteCollection, StepSink};
    use route_engine::{predicate, Expression, StepDefinition};

    #[test]
    fn steps_keep_declaration_order() {
        let definition = from("mock:in")
            .log("received")
            .from("mock:nested")
            .transform(Expression::Body)
            .to("mock:out")
            .build();

        let kinds: Vec<&str> = definition.steps().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec!["log", "from", "transform", "to"]);
        assert_eq!(definition.id(), "");
        assert_eq!(definition.input_uri(), "mock:in");
    }

    #[test]
    fn choice_collects_branches_and_fallback() {
        let definition = from("mock:in")
            .choice(|c| {
                c.when(predicate::header_exists("a"), |s| s.to("mock:a"))
                    .when(predicate::header_exists("b"), |s| s.to("mock:b").log("b"))
                    .otherwise(|s| s.to("mock:other"))
            })
            .build();

        let StepDefinition::Choice(choice) = &definition.steps()[0] else {
            panic!("expected a choice step");
        };
        assert_eq!(choice.whens.len(), 2);
        assert_eq!(choice.whens[1].steps.len(), 2);
        assert_eq!(choice.otherwise.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn collection_accepts_dsl_and_definitions() {
        let mut routes = RouteCollection::new();
        routes
            .add(from("mock:a").route_id("a").to("mock:out"))
            .add(from("mock:b").build());
        assert_eq!(routes.len(), 2);
        assert_eq!(routes.definitions()[0].id(), "a");
    }
}
