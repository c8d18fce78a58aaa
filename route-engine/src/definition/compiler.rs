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

//! Recursive compilation of step definitions into processors.

use crate::component::Endpoint;
use crate::definition::{ChoiceDefinition, RouteDefinition, StepDefinition};
use crate::error::RouteError;
use crate::processor::{
    ChoiceProcessor, ConsumerHolder, LogProcessor, PipelineProcessor, Processor,
    SetBodyProcessor, SetHeaderProcessor, TransformProcessor, WhenBranch,
};
use std::sync::Arc;

/// Endpoint lookup used while compiling. Implemented by the routing context.
pub trait EndpointResolver {
    fn resolve_endpoint(&self, uri: &str) -> Result<Arc<dyn Endpoint>, RouteError>;
}

/// Compiles a route's step list into its top-level pipeline. Failures carry the route id
/// and the position of the offending top-level step.
pub fn compile_route(
    resolver: &dyn EndpointResolver,
    route_id: &str,
    definition: &RouteDefinition,
) -> Result<PipelineProcessor, RouteError> {
    compile_step_list(resolver, definition.steps())
        .map(PipelineProcessor::new)
        .map_err(|(position, err)| RouteError::RouteCompilationFailed {
            route_id: route_id.to_string(),
            position,
            source: Box::new(err),
        })
}

/// Compiles a step list. A `From` step's consumer feeds a pipeline made of the processors
/// compiled for the steps after it, so later steps are compiled first.
pub fn compile_steps(
    resolver: &dyn EndpointResolver,
    steps: &[StepDefinition],
) -> Result<Vec<Arc<dyn Processor>>, RouteError> {
    compile_step_list(resolver, steps).map_err(|(_, err)| err)
}

fn compile_step_list(
    resolver: &dyn EndpointResolver,
    steps: &[StepDefinition],
) -> Result<Vec<Arc<dyn Processor>>, (usize, RouteError)> {
    let mut compiled: Vec<Option<Arc<dyn Processor>>> = vec![None; steps.len()];

    for (position, step) in steps.iter().enumerate() {
        if !matches!(step, StepDefinition::From(_)) {
            let processor = compile_step(resolver, step).map_err(|err| (position, err))?;
            compiled[position] = Some(processor);
        }
    }

    for position in (0..steps.len()).rev() {
        if let StepDefinition::From(uri) = &steps[position] {
            let downstream: Vec<Arc<dyn Processor>> =
                compiled[position + 1..].iter().flatten().cloned().collect();
            let holder = compile_from(resolver, uri, PipelineProcessor::new(downstream))
                .map_err(|err| (position, err))?;
            compiled[position] = Some(holder);
        }
    }

    Ok(compiled.into_iter().flatten().collect())
}

/// Compiles one step. A lone `From` gets an empty downstream pipeline.
pub fn compile_step(
    resolver: &dyn EndpointResolver,
    step: &StepDefinition,
) -> Result<Arc<dyn Processor>, RouteError> {
    let processor: Arc<dyn Processor> = match step {
        StepDefinition::To(uri) => {
            resolver.resolve_endpoint(uri)?.create_producer()? as Arc<dyn Processor>
        }
        StepDefinition::From(uri) => {
            return compile_from(resolver, uri, PipelineProcessor::default());
        }
        StepDefinition::Choice(choice) => Arc::new(compile_choice(resolver, choice)?),
        StepDefinition::SetHeader { name, expression } => {
            Arc::new(SetHeaderProcessor::new(name.clone(), expression.clone()))
        }
        StepDefinition::SetBody(expression) => Arc::new(SetBodyProcessor::new(expression.clone())),
        StepDefinition::Transform(expression) => {
            Arc::new(TransformProcessor::new(expression.clone()))
        }
        StepDefinition::Log(message) => Arc::new(LogProcessor::new(message.clone())),
        StepDefinition::Process(processor) => processor.clone(),
    };
    Ok(processor)
}

fn compile_from(
    resolver: &dyn EndpointResolver,
    uri: &str,
    downstream: PipelineProcessor,
) -> Result<Arc<dyn Processor>, RouteError> {
    let consumer = resolver
        .resolve_endpoint(uri)?
        .create_consumer(Arc::new(downstream))?;
    Ok(Arc::new(ConsumerHolder::new(consumer)))
}

fn compile_choice(
    resolver: &dyn EndpointResolver,
    choice: &ChoiceDefinition,
) -> Result<ChoiceProcessor, RouteError> {
    let mut branches = Vec::with_capacity(choice.whens.len());
    for when in &choice.whens {
        let steps = compile_steps(resolver, &when.steps)?;
        branches.push(WhenBranch {
            predicate: when.predicate.clone(),
            processor: Arc::new(PipelineProcessor::new(steps)),
        });
    }

    let otherwise = match &choice.otherwise {
        Some(steps) => {
            let steps = compile_steps(resolver, steps)?;
            Some(Arc::new(PipelineProcessor::new(steps)) as Arc<dyn Processor>)
        }
        None => None,
    };

    Ok(ChoiceProcessor::new(branches, otherwise))
}
