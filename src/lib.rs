// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod reconcile;
pub mod recurrence;
pub mod series;
pub mod snapshot;
pub mod store;
pub mod utils;
pub mod views;
