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

//! Executable graph nodes.
//!
//! Everything a compiled route runs is a [`Processor`]. Composite processors
//! ([`PipelineProcessor`], [`ChoiceProcessor`]) forward the lifecycle hooks to their
//! children so producers deep inside a branch are opened when the route starts.

mod choice;
mod pipeline;
pub mod predicate;
mod steps;

pub use choice::{ChoiceProcessor, WhenBranch};
pub use pipeline::PipelineProcessor;
pub use predicate::Predicate;
pub use steps::{
    ConsumerHolder, Expression, LogProcessor, SetBodyProcessor, SetHeaderProcessor,
    TransformProcessor,
};

use crate::error::RouteError;
use crate::exchange::Exchange;
use crate::runtime::RouteContext;
use async_trait::async_trait;

#[async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, ctx: &RouteContext, exchange: &mut Exchange)
        -> Result<(), RouteError>;

    /// Acquires resources before the first exchange arrives. Must be idempotent.
    async fn start(&self, _ctx: &RouteContext) -> Result<(), RouteError> {
        Ok(())
    }

    /// Releases resources. Must be idempotent.
    async fn stop(&self, _ctx: &RouteContext) -> Result<(), RouteError> {
        Ok(())
    }
}
