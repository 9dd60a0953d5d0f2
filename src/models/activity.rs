// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava activity summary as listed by the merge backend.

use serde::{Deserialize, Serialize};

use crate::time_utils::format_start_date;

/// Read-only activity record. Held in backend order and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Start date/time (ISO 8601)
    pub start_date: String,
    /// Activity type (Ride, Run, Hike, etc.)
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: u64,
    /// Elapsed time in seconds
    pub elapsed_time: u64,
    /// Elevation gain in meters
    pub total_elevation_gain: f64,
    #[serde(default)]
    pub workout_type: Option<i64>,
    /// Average speed in m/s
    pub average_speed: f64,
    /// Max speed in m/s
    pub max_speed: f64,
    pub has_heartrate: bool,
    #[serde(default)]
    pub average_heartrate: Option<f64>,
    #[serde(default)]
    pub max_heartrate: Option<f64>,
    pub heartrate_opt_out: bool,
    pub display_hide_heartrate_option: bool,
    #[serde(default)]
    pub elev_high: Option<f64>,
    #[serde(default)]
    pub elev_low: Option<f64>,
    /// Personal records set during the activity
    pub pr_count: u32,
    pub total_photo_count: u32,
    /// Whether the athlete has given kudos
    pub has_kudoed: bool,
}

impl Activity {
    /// Row label: `"{name} - {start date} - {type}"`.
    pub fn label(&self) -> String {
        format!(
            "{} - {} - {}",
            self.name,
            format_start_date(&self.start_date),
            self.activity_type
        )
    }
}
