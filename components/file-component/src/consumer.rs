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

use crate::endpoint::FileOptions;
use crate::{FILE_NAME_HEADER, LINE_NUMBER_HEADER};
use async_trait::async_trait;
use route_engine::observability::events;
use route_engine::{
    dispatch_exchange, Consumer, ConsumerWorker, Exchange, Processor, RouteContext, RouteError,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const COMPONENT: &str = "file_consumer";

/// Line-per-exchange reader. The file is opened when the consumer starts, so a missing
/// file surfaces as a start failure.
pub struct FileConsumer {
    path: PathBuf,
    options: FileOptions,
    downstream: Arc<dyn Processor>,
    worker: ConsumerWorker,
}

impl FileConsumer {
    pub(crate) fn new(
        uri: &str,
        path: PathBuf,
        options: FileOptions,
        downstream: Arc<dyn Processor>,
    ) -> Self {
        Self {
            path,
            options,
            downstream,
            worker: ConsumerWorker::new(uri),
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_running()
    }
}

#[async_trait]
impl Consumer for FileConsumer {
    fn endpoint_uri(&self) -> &str {
        self.worker.endpoint_uri()
    }

    async fn start(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        if self.worker.is_running() {
            return Ok(());
        }

        let file = File::open(&self.path)
            .await
            .map_err(|err| RouteError::ConsumerStartFailed {
                uri: self.endpoint_uri().to_string(),
                source: Box::new(err),
            })?;

        let reader = LineReader {
            ctx: ctx.clone(),
            file_name: self.path.display().to_string(),
            options: self.options,
            downstream: self.downstream.clone(),
        };
        self.worker
            .start(ctx, move |cancel| reader.run(BufReader::new(file), cancel))
    }

    async fn stop(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        self.worker.stop(ctx).await
    }
}

struct LineReader {
    ctx: RouteContext,
    file_name: String,
    options: FileOptions,
    downstream: Arc<dyn Processor>,
}

impl LineReader {
    async fn run(self, mut reader: BufReader<File>, cancel: CancellationToken) {
        let mut line_number: u64 = 0;
        let mut pending = String::new();

        loop {
            let read = tokio::select! {
                _ = cancel.cancelled() => break,
                read = reader.read_line(&mut pending) => read,
            };

            match read {
                Ok(0) => {
                    if !self.options.follow || !self.idle(&cancel).await {
                        break;
                    }
                    continue;
                }
                // a partial line in follow mode waits for the writer to finish it
                Ok(_) if !pending.ends_with('\n') && self.options.follow => {
                    if !self.idle(&cancel).await {
                        break;
                    }
                    continue;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(
                        component = COMPONENT,
                        route_id = self.ctx.route_id(),
                        file = %self.file_name,
                        line_number,
                        err = %err,
                        "read failed, consumer stops"
                    );
                    break;
                }
            }

            line_number += 1;
            let exchange = self.exchange_for(&pending, line_number);
            pending.clear();
            dispatch_exchange(&self.ctx, self.downstream.as_ref(), exchange).await;
        }

        debug!(
            event = events::CONSUMER_LOOP_EXIT,
            component = COMPONENT,
            route_id = self.ctx.route_id(),
            file = %self.file_name,
            lines = line_number,
            "file consumer finished"
        );
    }

    /// Waits one poll interval. Returns false when cancelled meanwhile.
    async fn idle(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.options.delay) => true,
        }
    }

    fn exchange_for(&self, raw: &str, line_number: u64) -> Exchange {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut exchange = Exchange::with_body(line);
        exchange
            .in_mut()
            .set_header(FILE_NAME_HEADER, self.file_name.clone());
        exchange.in_mut().set_header(LINE_NUMBER_HEADER, line_number);
        exchange
    }
}
