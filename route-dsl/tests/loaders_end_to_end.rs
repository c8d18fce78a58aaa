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

use integration_test_utils::{init_logging, MockComponent, RecordingProcessor};
use route_dsl::{from, routes_from_fn, ConfigLoader, DslLoader, StepSink};
use route_engine::{predicate, Exchange, Expression, RouteSource, RoutingContext};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;

#[tokio::test]
async fn builder_routes_run_through_the_context() {
    init_logging();
    let component = Arc::new(MockComponent::new("mock"));
    let recorder = Arc::new(RecordingProcessor::new("tail"));
    let mut context = RoutingContext::new("dsl");
    context.register_component(component.clone());
    context.set_loader(Arc::new(DslLoader));

    let tail = recorder.clone();
    let mut builder = routes_from_fn(move |routes| {
        routes.add(
            from("mock:in")
                .route_id("greetings")
                .choice(|c| {
                    c.when(predicate::header_equals("lang", "fr"), |s| {
                        s.set_body(Expression::constant("bonjour"))
                    })
                    .otherwise(|s| s.set_body(Expression::constant("hello")))
                })
                .process(tail.clone())
                .to("mock:out"),
        );
        Ok(())
    });

    let ids = context.add_routes(RouteSource::Builder(&mut builder)).unwrap();
    assert_eq!(ids, vec!["greetings"]);
    context.start().await.unwrap();

    let input = component.endpoint("mock:in").unwrap().consumers().remove(0);
    let mut french = Exchange::new();
    french.in_mut().set_header("lang", "fr");
    input.emit_exchange(french).await.unwrap();
    input.emit(json!(null)).await.unwrap();

    assert_eq!(
        component.endpoint("mock:out").unwrap().sent_bodies(),
        vec![json!("bonjour"), json!("hello")]
    );
    assert_eq!(recorder.count(), 2);
    context.stop().await.unwrap();
}

#[tokio::test]
async fn config_file_routes_run_through_the_context() {
    init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            routes: [{{
                from: "mock:in",
                steps: [
                    {{ transform: {{ constant: {{ wrapped: true }} }} }},
                    {{ to: "mock:out" }},
                ],
            }}],
        }}"#
    )
    .unwrap();

    let component = Arc::new(MockComponent::new("mock"));
    let mut context = RoutingContext::new("config");
    context.register_component(component.clone());
    context.set_loader(Arc::new(ConfigLoader));

    let ids = context.add_routes(RouteSource::Path(file.path())).unwrap();
    assert_eq!(ids, vec!["route1"]);
    context.start().await.unwrap();

    let input = component.endpoint("mock:in").unwrap().consumers().remove(0);
    input.emit("raw").await.unwrap();
    assert_eq!(
        component.endpoint("mock:out").unwrap().sent_bodies(),
        vec![json!({ "wrapped": true })]
    );
    context.stop().await.unwrap();
}
