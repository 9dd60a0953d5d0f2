// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend integration layer.

pub mod merge_api;

pub use merge_api::MergeApiClient;
