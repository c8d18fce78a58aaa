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

use async_trait::async_trait;
use route_engine::observability::events;
use route_engine::{Exchange, Processor, Producer, RouteContext, RouteError};
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, trace};

const COMPONENT: &str = "file_producer";

/// Appends one line per exchange. The file handle is held between `start` and `stop`.
pub struct FileProducer {
    uri: String,
    path: PathBuf,
    append: bool,
    file: Mutex<Option<File>>,
}

impl FileProducer {
    pub(crate) fn new(uri: &str, path: PathBuf, append: bool) -> Self {
        Self {
            uri: uri.to_string(),
            path,
            append,
            file: Mutex::new(None),
        }
    }

    fn failed(&self, err: std::io::Error) -> RouteError {
        RouteError::ProducerFailed {
            uri: self.uri.clone(),
            source: Box::new(err),
        }
    }

    async fn open(&self) -> Result<File, RouteError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| self.failed(err))?;
        }

        let mut options = OpenOptions::new();
        options.create(true);
        if self.append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options.open(&self.path).await.map_err(|err| self.failed(err))
    }
}

fn render_line(body: &Value) -> String {
    match body {
        Value::String(text) => format!("{text}\n"),
        other => format!("{other}\n"),
    }
}

#[async_trait]
impl Processor for FileProducer {
    async fn process(
        &self,
        ctx: &RouteContext,
        exchange: &mut Exchange,
    ) -> Result<(), RouteError> {
        let mut guard = self.file.lock().await;
        let Some(file) = guard.as_mut() else {
            return Err(RouteError::ProducerNotStarted {
                uri: self.uri.clone(),
            });
        };
        let Some(body) = exchange.r#in().body() else {
            return Ok(());
        };

        let line = render_line(body);
        file.write_all(line.as_bytes())
            .await
            .map_err(|err| self.failed(err))?;
        file.flush().await.map_err(|err| self.failed(err))?;

        trace!(
            event = events::PRODUCER_SEND_OK,
            component = COMPONENT,
            route_id = ctx.route_id(),
            exchange_id = exchange.id(),
            uri = %self.uri,
            bytes = line.len(),
            "line written"
        );
        Ok(())
    }

    async fn start(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        let mut guard = self.file.lock().await;
        if guard.is_some() {
            return Ok(());
        }
        *guard = Some(self.open().await?);
        debug!(
            event = events::PRODUCER_START,
            component = COMPONENT,
            route_id = ctx.route_id(),
            uri = %self.uri,
            append = self.append,
            "file opened for writing"
        );
        Ok(())
    }

    async fn stop(&self, ctx: &RouteContext) -> Result<(), RouteError> {
        let Some(mut file) = self.file.lock().await.take() else {
            return Ok(());
        };
        file.flush().await.map_err(|err| self.failed(err))?;
        debug!(
            event = events::PRODUCER_STOP,
            component = COMPONENT,
            route_id = ctx.route_id(),
            uri = %self.uri,
            "file closed"
        );
        Ok(())
    }
}

impl Producer for FileProducer {
    fn endpoint_uri(&self) -> &str {
        &self.uri
    }
}

#[cfg(test)]
mod tests {
    use super::{render_line, FileProducer};
    use route_engine::{Exchange, Processor, RouteContext, RouteError};
    use serde_json::json;

    #[test]
    fn strings_are_raw_and_other_values_are_json() {
        assert_eq!(render_line(&json!("plain")), "plain\n");
        assert_eq!(render_line(&json!({ "a": 1 })), "{\"a\":1}\n");
        assert_eq!(render_line(&json!(42)), "42\n");
    }

    #[tokio::test]
    async fn process_outside_started_window_fails() {
        let dir = tempfile::tempdir().unwrap();
        let producer = FileProducer::new("file:out.txt", dir.path().join("out.txt"), true);
        let ctx = RouteContext::new("t");

        let err = producer
            .process(&ctx, &mut Exchange::with_body("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, RouteError::ProducerNotStarted { .. }));

        producer.start(&ctx).await.unwrap();
        producer.start(&ctx).await.unwrap();
        producer
            .process(&ctx, &mut Exchange::with_body("x"))
            .await
            .unwrap();
        producer.stop(&ctx).await.unwrap();
        producer.stop(&ctx).await.unwrap();

        assert!(producer
            .process(&ctx, &mut Exchange::with_body("y"))
            .await
            .is_err());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "x\n"
        );
    }

    #[tokio::test]
    async fn creates_parent_directories_and_truncates_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.txt");
        let ctx = RouteContext::new("t");

        let appending = FileProducer::new("file:a", path.clone(), true);
        appending.start(&ctx).await.unwrap();
        appending
            .process(&ctx, &mut Exchange::with_body("old"))
            .await
            .unwrap();
        appending
            .process(&ctx, &mut Exchange::new())
            .await
            .unwrap();
        appending.stop(&ctx).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\n");

        let truncating = FileProducer::new("file:b", path.clone(), false);
        truncating.start(&ctx).await.unwrap();
        truncating
            .process(&ctx, &mut Exchange::with_body(json!([1, 2])))
            .await
            .unwrap();
        truncating.stop(&ctx).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1,2]\n");
    }
}
