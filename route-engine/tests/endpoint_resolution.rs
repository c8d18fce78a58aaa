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

use integration_test_utils::MockComponent;
use route_engine::{Endpoint, RouteError, RoutingContext};
use std::sync::Arc;

fn context_with_mock() -> (RoutingContext, Arc<MockComponent>) {
    let component = Arc::new(MockComponent::new("mock"));
    let context = RoutingContext::new("resolution");
    context.register_component(component.clone());
    (context, component)
}

#[test]
fn same_uri_resolves_to_same_instance() {
    let (context, component) = context_with_mock();

    let first = context.get_endpoint("mock:a?x=1").unwrap();
    let second = context.get_endpoint("mock:a?x=1").unwrap();
    let reordered = context.get_endpoint("mock:a?y=2&x=1").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &reordered));
    assert_eq!(component.created_count(), 2);
    assert_eq!(context.endpoint_count(), 2);
    assert_eq!(first.uri(), "mock:a?x=1");
}

#[test]
fn concurrent_first_resolution_creates_one_endpoint() {
    let (context, component) = context_with_mock();

    let resolved: Vec<Arc<dyn Endpoint>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| scope.spawn(|| context.get_endpoint("mock:shared").unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(component.created_count(), 1);
    assert!(resolved
        .iter()
        .all(|endpoint| Arc::ptr_eq(endpoint, &resolved[0])));
}

#[test]
fn parameters_reach_the_component() {
    let (context, component) = context_with_mock();
    context
        .get_endpoint("mock:orders?k=v1&k=v2&delay=250")
        .unwrap();

    let endpoint = component.endpoint("mock:orders?k=v1&k=v2&delay=250").unwrap();
    let params = &endpoint.config().params;
    assert_eq!(params.path(), Some("orders"));
    assert_eq!(params.get_string("k"), Some("v1"));
    assert_eq!(params.get_u64("delay").unwrap(), Some(250));
}

#[test]
fn resolution_errors() {
    let (context, component) = context_with_mock();

    assert!(matches!(
        context.get_endpoint("no-delimiter"),
        Err(RouteError::MalformedUri { .. })
    ));
    assert!(matches!(
        context.get_endpoint("Mock:a"),
        Err(RouteError::UnknownScheme { scheme, .. }) if scheme == "Mock"
    ));

    component.fail_endpoint("mock:broken");
    for _ in 0..2 {
        assert!(matches!(
            context.get_endpoint("mock:broken"),
            Err(RouteError::EndpointCreationFailed { uri, .. }) if uri == "mock:broken"
        ));
    }
    assert_eq!(component.created_count(), 2);
    assert_eq!(context.endpoint_count(), 0);
}

#[test]
fn replacing_a_component_keeps_cached_endpoints() {
    let (context, first) = context_with_mock();
    let cached = context.get_endpoint("mock:a").unwrap();

    let second = Arc::new(MockComponent::new("mock"));
    context.register_component(second.clone());

    assert!(Arc::ptr_eq(&cached, &context.get_endpoint("mock:a").unwrap()));
    context.get_endpoint("mock:b").unwrap();
    assert_eq!((first.created_count(), second.created_count()), (1, 1));
    assert_eq!(context.schemes(), vec!["mock".to_string()]);
}
