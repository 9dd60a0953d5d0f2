// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation helpers shared by all pages.

pub mod theme;

pub use theme::Theme;
