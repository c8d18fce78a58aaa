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

use crate::error::RouteError;
use crate::exchange::Exchange;
use crate::observability::events;
use crate::processor::{Predicate, Processor};
use crate::runtime::RouteContext;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, trace};

const COMPONENT: &str = "choice";

#[derive(Clone)]
pub struct WhenBranch {
    pub predicate: Arc<dyn Predicate>,
    pub processor: Arc<dyn Processor>,
}

/// Content-based router: first matching branch wins, `otherwise` is the fallback,
/// and no match without a fallback passes the exchange through untouched.
#[derive(Clone, Default)]
pub struct ChoiceProcessor {
    branches: Vec<WhenBranch>,
    otherwise: Option<Arc<dyn Processor>>,
}

impl ChoiceProcessor {
    pub fn new(branches: Vec<WhenBranch>, otherwise: Option<Arc<dyn Processor>>) -> Self {
        Self {
            branches,
            otherwise,
        }
    }

    fn all_processors(&self) -> impl Iterator<Item = &Arc<dyn Processor>> {
        self.branches
            .iter()
            .map(|branch| &branch.processor)
            .chain(self.otherwise.iter())
    }
}

#[async_trait]
impl Processor for ChoiceProcessor {
    async fn process(
        &self,
        ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        for (index, branch) in self.branches.iter().enumerate() {
            if branch.predicate.evaluate(ctx, exchange)? {
                debug!(
                    event = events::CHOICE_BRANCH_SELECTED,
                    component = COMPONENT,
                    route_id = ctx.route_id(),
                    exchange_id = exchange.id(),
                    branch = index,
                    "when branch matched"
                );
                return branch.processor.process(ctx, exchange).await;
            }
        }

        match &self.otherwise {
            Some(otherwise) => {
                debug!(
                    event = events::CHOICE_OTHERWISE,
                    component = COMPONENT,
                    route_id = ctx.route_id(),
                    exchange_id = exchange.id(),
                    "no branch matched, running otherwise"
                );
                otherwise.process(ctx, exchange).await
            }
            None => {
                trace!(
                    event = events::CHOICE_NO_MATCH,
                    component = COMPONENT,
                    route_id = ctx.route_id(),
                    exchange_id = exchange.id(),
                    "no branch matched"
                );
                Ok(())
            }
        }
    }

    async fn start(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        for processor in self.all_processors() {
            processor.start(ctx).await?;
        }
        Ok(())
    }

    async fn stop(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        let mut first_err = None;
        for processor in self.all_processors() {
            if let Err(err) = processor.stop(ctx).await {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
