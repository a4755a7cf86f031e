// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout map tracker: log runs and rides by clicking a point on a map.
//!
//! This crate holds the workout state (store, persistence, map markers and
//! list entries) and serves it to a thin web client over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::InteractionController;
use tokio::sync::Mutex;

/// Shared application state.
///
/// Gestures run one at a time to completion under the controller lock.
/// Storage I/O is synchronous and happens while the lock is held, so a
/// gesture's save lands before the next gesture starts.
pub struct AppState {
    pub config: Config,
    pub controller: Mutex<InteractionController>,
}

impl AppState {
    pub fn new(config: Config, controller: InteractionController) -> Self {
        Self {
            config,
            controller: Mutex::new(controller),
        }
    }
}
