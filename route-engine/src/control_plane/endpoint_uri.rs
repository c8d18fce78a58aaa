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

//! Endpoint URI parsing into typed endpoint configuration.
//!
//! Grammar: `scheme:opaque-or-path[?key=value[&key=value...]]`. The scheme ends at the
//! first `:`. The percent-decoded resource part becomes the `path` parameter and each query key maps to
//! the value of its first occurrence.

use crate::error::RouteError;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::str::FromStr;
use url::form_urlencoded;

pub const PATH_PARAM: &str = "path";

/// Resolved endpoint parameters. Accessors report absence or bad values as results and
/// never panic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointParams {
    values: HashMap<String, String>,
}

impl EndpointParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts unless the key is already present; the first value wins.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let mut inserted = false;
        self.values.entry(key.into()).or_insert_with(|| {
            inserted = true;
            value.into()
        });
        inserted
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn path(&self) -> Option<&str> {
        self.get_string(PATH_PARAM)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, RouteError> {
        self.get_parsed(key, "expected 'true' or 'false'")
    }

    pub fn get_u64(&self, key: &str) -> Result<Option<u64>, RouteError> {
        self.get_parsed(key, "expected an unsigned integer")
    }

    fn get_parsed<T: FromStr>(
        &self,
        key: &str,
        expectation: &str,
    ) -> Result<Option<T>, RouteError> {
        let Some(raw) = self.get_string(key) else {
            return Ok(None);
        };
        raw.parse::<T>()
            .map(Some)
            .map_err(|_| RouteError::InvalidParameter {
                key: key.to_string(),
                value: raw.to_string(),
                reason: expectation.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EndpointParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = EndpointParams::new();
        for (key, value) in iter {
            params.insert_if_absent(key, value);
        }
        params
    }
}

/// Everything a component needs to build an endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    pub raw_uri: String,
    pub scheme: String,
    pub params: EndpointParams,
}

impl EndpointConfig {
    /// The `path` parameter, or an endpoint-creation error naming the URI.
    pub fn require_path(&self) -> Result<&str, RouteError> {
        self.params
            .path()
            .ok_or_else(|| self.creation_failed("missing resource path"))
    }

    pub fn creation_failed(&self, reason: impl Into<String>) -> RouteError {
        RouteError::EndpointCreationFailed {
            scheme: self.scheme.clone(),
            uri: self.raw_uri.clone(),
            reason: reason.into(),
        }
    }
}

pub fn parse_endpoint_uri(raw_uri: &str) -> Result<EndpointConfig, RouteError> {
    let Some((scheme, remainder)) = raw_uri.split_once(':') else {
        return Err(RouteError::MalformedUri {
            uri: raw_uri.to_string(),
            reason: "missing scheme delimiter ':'",
        });
    };
    if scheme.is_empty() {
        return Err(RouteError::MalformedUri {
            uri: raw_uri.to_string(),
            reason: "empty scheme",
        });
    }

    let without_fragment = remainder
        .split_once('#')
        .map_or(remainder, |(before, _)| before);
    let (path, query) = without_fragment
        .split_once('?')
        .map_or((without_fragment, None), |(path, query)| (path, Some(query)));

    let path = percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| RouteError::MalformedUri {
            uri: raw_uri.to_string(),
            reason: "path is not valid UTF-8 once percent-decoded",
        })?;

    let mut params = EndpointParams::new();
    if !path.is_empty() {
        params.insert_if_absent(PATH_PARAM, path);
    }
    if let Some(query) = query {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key == PATH_PARAM {
                continue;
            }
            params.insert_if_absent(key, value);
        }
    }

    Ok(EndpointConfig {
        raw_uri: raw_uri.to_string(),
        scheme: scheme.to_string(),
        params,
    })
}
