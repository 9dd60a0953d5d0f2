// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The merger page: state, actions, and rendering.

pub mod home;
pub mod view;

pub use home::{HomePage, MergeOptions};
pub use view::PageView;
