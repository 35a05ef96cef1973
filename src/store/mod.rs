// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyed persistence for the ledger collections. Nothing in here knows
//! about balances; pairing writes with their balance effect happens in
//! [`crate::ledger`].

pub mod accounts;
pub mod categories;
pub mod goals;
pub mod transactions;
