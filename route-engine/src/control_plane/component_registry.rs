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

//! Scheme-keyed component registration.

use crate::component::Component;
use crate::observability::events;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "component_registry";

#[derive(Default)]
pub(crate) struct ComponentRegistry {
    components: RwLock<HashMap<String, Arc<dyn Component>>>,
}

impl ComponentRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers under `component.scheme()`. A later registration for the same scheme
    /// replaces the earlier one; endpoints already cached keep their original component.
    pub(crate) fn register(&self, component: Arc<dyn Component>) {
        let scheme = component.scheme().to_string();
        let previous = self.components.write().insert(scheme.clone(), component);

        if previous.is_some() {
            warn!(
                event = events::COMPONENT_REPLACE,
                component = COMPONENT,
                scheme = %scheme,
                "component replaced"
            );
        } else {
            debug!(
                event = events::COMPONENT_REGISTER,
                component = COMPONENT,
                scheme = %scheme,
                "component registered"
            );
        }
    }

    pub(crate) fn get(&self, scheme: &str) -> Option<Arc<dyn Component>> {
        self.components.read().get(scheme).cloned()
    }

    pub(crate) fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.components.read().keys().cloned().collect();
        schemes.sort();
        schemes
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentRegistry;
    use crate::component::{Component, Endpoint};
    use crate::control_plane::EndpointConfig;
    use crate::error::RouteError;
    use std::sync::Arc;

    struct Named(&'static str, &'static str);

    impl Component for Named {
        fn scheme(&self) -> &str {
            self.0
        }

        fn create_endpoint(
            &self,
            config: EndpointConfig,
        ) -> Result<Arc<dyn Endpoint>, RouteError> {
            Err(config.creation_failed(self.1))
        }
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let registry = ComponentRegistry::new();
        registry.register(Arc::new(Named("mock", "first")));
        registry.register(Arc::new(Named("mock", "second")));
        registry.register(Arc::new(Named("file", "file")));

        assert_eq!(registry.schemes(), vec!["file".to_string(), "mock".to_string()]);

        let config = crate::control_plane::parse_endpoint_uri("mock:x").unwrap();
        let err = registry
            .get("mock")
            .expect("registered")
            .create_endpoint(config)
            .err()
            .expect("named component always fails");
        assert!(err.to_string().contains("second"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = ComponentRegistry::new();
        registry.register(Arc::new(Named("mock", "m")));
        assert!(registry.get("MOCK").is_none());
        assert!(registry.get("mock").is_some());
    }
}
