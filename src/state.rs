// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::config::GateConfig;

/// Shared application state: the immutable gate policy.
///
/// The gate is stateless per request; this is read-only configuration,
/// cloned cheaply into every handler and middleware invocation.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<GateConfig>,
}

impl AppState {
    pub fn new(gate: GateConfig) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }
}
