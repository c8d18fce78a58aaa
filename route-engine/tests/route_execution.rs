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

use integration_test_utils::{init_logging, FailingProcessor, MockComponent, RecordingProcessor};
use route_engine::{
    predicate, ChoiceDefinition, Exchange, Expression, RouteDefinition, RouteError,
    RoutingContext, StepDefinition, WhenDefinition,
};
use serde_json::json;
use std::sync::Arc;

async fn started(definitions: Vec<RouteDefinition>) -> (RoutingContext, Arc<MockComponent>) {
    init_logging();
    let component = Arc::new(MockComponent::new("mock"));
    let mut context = RoutingContext::new("execution");
    context.register_component(component.clone());
    context.add_route_definitions(definitions).unwrap();
    context.start().await.unwrap();
    (context, component)
}

fn sent(component: &MockComponent, uri: &str) -> Vec<serde_json::Value> {
    component
        .endpoint(uri)
        .map(|endpoint| endpoint.sent_bodies())
        .unwrap_or_default()
}

#[tokio::test]
async fn choice_routes_on_headers() {
    let choice = StepDefinition::Choice(ChoiceDefinition {
        whens: vec![
            WhenDefinition {
                predicate: predicate::header_equals("type", "order"),
                steps: vec![StepDefinition::To("mock:orders".to_string())],
            },
            WhenDefinition {
                predicate: predicate::header_exists("type"),
                steps: vec![StepDefinition::To("mock:typed".to_string())],
            },
        ],
        otherwise: Some(vec![StepDefinition::To("mock:rest".to_string())]),
    });
    let (context, component) =
        started(vec![RouteDefinition::new("cbr", "mock:in", vec![choice])]).await;
    let input = component.endpoint("mock:in").unwrap().consumers().remove(0);

    let mut order = Exchange::with_body("o-1");
    order.in_mut().set_header("type", "order");
    let mut invoice = Exchange::with_body("i-1");
    invoice.in_mut().set_header("type", "invoice");

    input.emit_exchange(order).await.unwrap();
    input.emit_exchange(invoice).await.unwrap();
    input.emit("plain").await.unwrap();

    assert_eq!(sent(&component, "mock:orders"), vec![json!("o-1")]);
    assert_eq!(sent(&component, "mock:typed"), vec![json!("i-1")]);
    assert_eq!(sent(&component, "mock:rest"), vec![json!("plain")]);
    context.stop().await.unwrap();
}

#[tokio::test]
async fn failing_step_stops_the_exchange_but_not_the_route() {
    let recorder = Arc::new(RecordingProcessor::new("after"));
    let (context, component) = started(vec![RouteDefinition::new(
        "failing",
        "mock:in",
        vec![
            StepDefinition::Choice(ChoiceDefinition {
                whens: vec![WhenDefinition {
                    predicate: predicate::body_equals("bad"),
                    steps: vec![StepDefinition::Process(Arc::new(FailingProcessor::new(
                        "rejected",
                    )))],
                }],
                otherwise: None,
            }),
            StepDefinition::Process(recorder.clone()),
        ],
    )])
    .await;
    let input = component.endpoint("mock:in").unwrap().consumers().remove(0);

    let failed = input.emit("bad").await.unwrap();
    let error = failed.error().expect("error recorded").clone();
    assert!(matches!(
        &*error,
        RouteError::PipelineStepFailed { position: 0, .. }
    ));
    assert!(matches!(error.root_cause(), RouteError::Processing(msg) if msg == "rejected"));
    assert_eq!(recorder.count(), 0);

    let ok = input.emit("good").await.unwrap();
    assert!(!ok.has_error());
    assert_eq!(recorder.bodies(), vec![json!("good")]);
    context.stop().await.unwrap();
}

#[tokio::test]
async fn shaping_steps_feed_the_producer() {
    let (context, component) = started(vec![RouteDefinition::new(
        "shape",
        "mock:in",
        vec![
            StepDefinition::SetHeader {
                name: "original".to_string(),
                expression: Expression::Body,
            },
            StepDefinition::Transform(Expression::constant(json!({ "wrapped": true }))),
            StepDefinition::Log("shaped".to_string()),
            StepDefinition::To("mock:out".to_string()),
            StepDefinition::SetBody(Expression::header("original")),
            StepDefinition::To("mock:out".to_string()),
        ],
    )])
    .await;
    let input = component.endpoint("mock:in").unwrap().consumers().remove(0);

    let exchange = input.emit("raw").await.unwrap();
    assert!(!exchange.has_error());
    assert_eq!(exchange.r#in().header("original"), Some(&json!("raw")));

    let producers = component.endpoint("mock:out").unwrap().producers();
    assert_eq!(producers.len(), 2);
    assert_eq!(producers[0].sent(), vec![json!({ "wrapped": true })]);
    assert_eq!(producers[1].sent(), vec![json!("raw")]);
    context.stop().await.unwrap();
}

#[tokio::test]
async fn nested_from_feeds_the_steps_after_it() {
    let (context, component) = started(vec![RouteDefinition::new(
        "nested",
        "mock:outer",
        vec![
            StepDefinition::Log("outer".to_string()),
            StepDefinition::From("mock:inner".to_string()),
            StepDefinition::To("mock:out".to_string()),
        ],
    )])
    .await;

    let inner = component.endpoint("mock:inner").unwrap().consumers().remove(0);
    assert!(inner.is_started());

    inner.emit("from-inner").await.unwrap();
    let outer = component.endpoint("mock:outer").unwrap().consumers().remove(0);
    outer.emit("from-outer").await.unwrap();

    assert_eq!(
        sent(&component, "mock:out"),
        vec![json!("from-inner"), json!("from-outer")]
    );

    context.stop().await.unwrap();
    assert!(!inner.is_started());
}
