// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models exchanged with the merge backend.

pub mod activity;
pub mod merge;

pub use activity::Activity;
pub use merge::{AuthStatusResponse, AuthUrlResponse, ErrorBody, MergeRequest, MergeResponse};
