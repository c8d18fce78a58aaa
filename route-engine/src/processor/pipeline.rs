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
use crate::processor::Processor;
use crate::runtime::RouteContext;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "pipeline";

/// Ordered, short-circuiting sequence of processors.
///
/// Children run in declaration order. Before each child the exchange's error slot is
/// checked; a set slot or a failing child ends the run. An Out message left by a child
/// becomes the In message of the next one.
#[derive(Clone, Default)]
pub struct PipelineProcessor {
    children: Vec<Arc<dyn Processor>>,
}

impl PipelineProcessor {
    pub fn new(children: Vec<Arc<dyn Processor>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Arc<dyn Processor>] {
        &self.children
    }
}

#[async_trait]
impl Processor for PipelineProcessor {
    async fn process(
        &self,
        ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        for (position, child) in self.children.iter().enumerate() {
            if let Some(err) = exchange.error() {
                debug!(
                    event = events::PIPELINE_SHORT_CIRCUIT,
                    component = COMPONENT,
                    route_id = ctx.route_id(),
                    exchange_id = exchange.id(),
                    position,
                    "exchange carries an error, skipping remaining steps"
                );
                return Err(RouteError::ExchangeFailed {
                    exchange_id: exchange.id().to_string(),
                    source: err.clone(),
                });
            }

            if let Err(err) = child.process(ctx, exchange).await {
                return Err(RouteError::PipelineStepFailed {
                    position,
                    source: Box::new(err),
                });
            }

            exchange.promote_out();
        }

        Ok(())
    }

    async fn start(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        // Downstream first, so nothing upstream can emit into an unstarted step.
        for child in self.children.iter().rev() {
            child.start(ctx).await?;
        }
        Ok(())
    }

    async fn stop(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        let mut first_err = None;
        for (position, child) in self.children.iter().enumerate() {
            if let Err(err) = child.stop(ctx).await {
                warn!(
                    component = COMPONENT,
                    route_id = ctx.route_id(),
                    position,
                    err = %err,
                    "pipeline step failed to stop"
                );
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineProcessor;
    use crate::error::RouteError;
    use crate::exchange::Exchange;
    use crate::processor::Processor;
    use crate::runtime::RouteContext;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Step {
        name: &'static str,
        fail: bool,
        journal: Journal,
    }

    #[async_trait]
    impl Processor for Step {
        async fn process(
            &self,
            _ctx: &RouteContext,
            exchange: &mut Exchange,
        ) -> Result<(), RouteError> {
            self.journal.lock().push(format!("process:{}", self.name));
            if self.fail {
                return Err(RouteError::processing(format!("{} failed", self.name)));
            }
            exchange.in_mut().set_header(self.name, true);
            Ok(())
        }

        async fn start(&self, _ctx: &RouteContext) -> Result<(), RouteError> {
            self.journal.lock().push(format!("start:{}", self.name));
            Ok(())
        }

        async fn stop(&self, _ctx: &RouteContext) -> Result<(), RouteError> {
            self.journal.lock().push(format!("stop:{}", self.name));
            if self.fail {
                return Err(RouteError::processing(format!("{} stop failed", self.name)));
            }
            Ok(())
        }
    }

    fn step(name: &'static str, fail: bool, journal: &Journal) -> Arc<dyn Processor> {
        Arc::new(Step {
            name,
            fail,
            journal: journal.clone(),
        })
    }

    #[tokio::test]
    async fn failing_child_stops_the_pipeline() {
        let journal = Journal::default();
        let pipeline = PipelineProcessor::new(vec![
            step("a", false, &journal),
            step("b", true, &journal),
            step("c", false, &journal),
        ]);
        let mut exchange = Exchange::new();

        let err = pipeline
            .process(&RouteContext::new("test"), &mut exchange)
            .await
            .expect_err("b fails");

        assert!(matches!(err, RouteError::PipelineStepFailed { position: 1, .. }));
        assert!(matches!(err.root_cause(), RouteError::Processing(msg) if msg == "b failed"));
        assert_eq!(*journal.lock(), vec!["process:a", "process:b"]);
        assert!(!exchange.has_error());
    }

    #[tokio::test]
    async fn error_slot_short_circuits_before_next_child() {
        struct Poison;

        #[async_trait]
        impl Processor for Poison {
            async fn process(
                &self,
                _ctx: &RouteContext,
                exchange: &mut Exchange,
            ) -> Result<(), RouteError> {
                exchange.set_error(RouteError::processing("poisoned"));
                Ok(())
            }
        }

        let journal = Journal::default();
        let pipeline =
            PipelineProcessor::new(vec![Arc::new(Poison), step("after", false, &journal)]);
        let mut exchange = Exchange::new();

        let err = pipeline
            .process(&RouteContext::new("test"), &mut exchange)
            .await
            .expect_err("error slot set");

        assert!(matches!(err, RouteError::ExchangeFailed { .. }));
        assert!(journal.lock().is_empty());
    }

    #[tokio::test]
    async fn out_message_becomes_next_in() {
        struct ToUpper;

        #[async_trait]
        impl Processor for ToUpper {
            async fn process(
                &self,
                _ctx: &RouteContext,
                exchange: &mut Exchange,
            ) -> Result<(), RouteError> {
                let upper = exchange.r#in().body_str().unwrap_or_default().to_uppercase();
                exchange.out_mut().set_body(upper);
                Ok(())
            }
        }

        let pipeline = PipelineProcessor::new(vec![Arc::new(ToUpper)]);
        let mut exchange = Exchange::with_body("abc");
        pipeline
            .process(&RouteContext::new("test"), &mut exchange)
            .await
            .expect("pipeline succeeds");

        assert_eq!(exchange.r#in().body_str(), Some("ABC"));
        assert!(exchange.out().is_none());
    }

    #[tokio::test]
    async fn lifecycle_starts_downstream_first_and_stops_everything() {
        let journal = Journal::default();
        let pipeline = PipelineProcessor::new(vec![
            step("a", true, &journal),
            step("b", false, &journal),
        ]);
        let ctx = RouteContext::new("test");

        pipeline.start(&ctx).await.expect("start succeeds");
        let err = pipeline.stop(&ctx).await.expect_err("a fails to stop");

        assert!(matches!(err, RouteError::Processing(msg) if msg == "a stop failed"));
        assert_eq!(
            *journal.lock(),
            vec!["start:b", "start:a", "stop:a", "stop:b"]
        );
    }

    #[tokio::test]
    async fn empty_pipeline_is_a_no_op() {
        let pipeline = PipelineProcessor::default();
        let mut exchange = Exchange::with_body("unchanged");
        pipeline
            .process(&RouteContext::new("test"), &mut exchange)
            .await
            .expect("empty pipeline succeeds");
        assert!(pipeline.is_empty());
        assert_eq!(exchange.r#in().body_str(), Some("unchanged"));
    }
}
