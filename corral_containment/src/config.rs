// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine settings.

use alloc::format;
use alloc::string::{String, ToString};
use corral_event_state::resize::{AnchorZones, ResizeChord};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::query::Predicate;

/// When containers fit themselves to their members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizingMode {
    /// Never fit automatically. Explicit [`crate::GroupingEngine::resize_to_fit`] still works.
    Disabled,
    /// Fit every container on every tick.
    Always,
    /// Fit a container on the tick after its members moved, resized, joined or left.
    #[default]
    Reactive,
}

/// Tunables for detection, fitting, and interaction.
///
/// Missing keys take their default when deserialized, so partial JSON
/// documents are valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Auto-fit policy.
    pub resizing_mode: ResizingMode,
    /// After a reactive fit, schedule one more refresh-and-fit pass.
    pub two_pass_resize: bool,
    /// Ticks until that extra pass.
    pub two_pass_delay_frames: u32,
    /// Horizontal padding between members and the container edge.
    pub padding_x: f64,
    /// Vertical padding between members and the container edge.
    pub padding_y: f64,
    /// Floor for the vertical padding on sides that carry controls.
    pub min_vertical_padding: f64,
    /// Apply the vertical padding floor above the content.
    pub reserve_top_controls: bool,
    /// Apply the vertical padding floor below the content.
    pub reserve_bottom_controls: bool,
    /// Height of the header bar drawn above the content region.
    pub header_height: f64,
    /// Smallest container width.
    pub min_width: f64,
    /// Smallest content height, excluding the header bar.
    pub min_content_height: f64,
    /// Width an empty container falls back to.
    pub default_width: f64,
    /// Height an empty container falls back to.
    pub default_height: f64,
    /// Grid unit for drag-resizing. Auto-fit never snaps.
    pub snap_to_grid: Option<f64>,
    /// Predicate used when a container refreshes its own membership.
    pub default_predicate: Predicate,
    /// Predicate committed when a drag-resize is released.
    pub resize_predicate: Predicate,
    /// Predicate for live highlighting while drag-resizing; `None` disables it.
    pub alt_predicate: Option<Predicate>,
    /// Predicate for the one-shot detection of a freshly created container.
    pub initial_predicate: Predicate,
    /// Drop pass-through elements from every query.
    pub exclude_pass_through: bool,
    /// Drop pass-through elements from the query committed on resize release.
    pub exclude_pass_through_when_resizing: bool,
    /// Button and modifiers that arm a drag-resize.
    pub resize_chord: ResizeChord,
    /// Anchor hit zone extents at zoom 1.
    pub anchor_zones: AnchorZones,
    /// Fit the container after a drag-resize commits.
    pub resize_to_fit_on_release: bool,
    /// Refresh membership before the first delta of a move gesture.
    pub refresh_on_move: bool,
    /// Detect members one tick after a fresh container registers.
    pub detect_on_creation: bool,
    /// Do not seed fresh containers from the host selection.
    pub ignore_selection_on_creation: bool,
    /// Containers drag their members along when moved.
    pub group_movement: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resizing_mode: ResizingMode::Reactive,
            two_pass_resize: true,
            two_pass_delay_frames: 2,
            padding_x: 30.0,
            padding_y: 30.0,
            min_vertical_padding: 24.0,
            reserve_top_controls: true,
            reserve_bottom_controls: true,
            header_height: 32.0,
            min_width: 125.0,
            min_content_height: 80.0,
            default_width: 225.0,
            default_height: 150.0,
            snap_to_grid: None,
            default_predicate: Predicate::FullyContained,
            resize_predicate: Predicate::FullyContained,
            alt_predicate: Some(Predicate::Intersect),
            initial_predicate: Predicate::PointInRect,
            exclude_pass_through: false,
            exclude_pass_through_when_resizing: false,
            resize_chord: ResizeChord::default(),
            anchor_zones: AnchorZones::default(),
            resize_to_fit_on_release: true,
            refresh_on_move: false,
            detect_on_creation: true,
            ignore_selection_on_creation: false,
            group_movement: true,
        }
    }
}

fn non_negative(key: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key,
            value: value.to_string(),
        })
    }
}

fn positive(key: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key,
            value: value.to_string(),
        })
    }
}

impl Settings {
    /// Check every value is in range.
    pub fn validate(&self) -> ConfigResult<()> {
        non_negative("padding_x", self.padding_x)?;
        non_negative("padding_y", self.padding_y)?;
        non_negative("min_vertical_padding", self.min_vertical_padding)?;
        non_negative("header_height", self.header_height)?;
        positive("min_width", self.min_width)?;
        positive("min_content_height", self.min_content_height)?;
        positive("anchor_zones.corner", self.anchor_zones.corner)?;
        positive("anchor_zones.side", self.anchor_zones.side)?;
        if let Some(unit) = self.snap_to_grid {
            positive("snap_to_grid", unit)?;
        }
        if self.default_width < self.min_width {
            return Err(ConfigError::ValueOutOfRange {
                key: "default_width",
                value: format!("{} < min_width {}", self.default_width, self.min_width),
            });
        }
        if self.default_height < self.min_content_height {
            return Err(ConfigError::ValueOutOfRange {
                key: "default_height",
                value: format!(
                    "{} < min_content_height {}",
                    self.default_height, self.min_content_height
                ),
            });
        }
        if self.two_pass_resize && self.two_pass_delay_frames == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "two_pass_delay_frames",
                value: "0".into(),
            });
        }
        Ok(())
    }

    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Decode(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string(self).map_err(|e| ConfigError::Decode(e.to_string()))
    }

    /// Vertical padding above the content.
    pub fn top_padding(&self) -> f64 {
        if self.reserve_top_controls {
            self.padding_y.max(self.min_vertical_padding)
        } else {
            self.padding_y
        }
    }

    /// Vertical padding below the content.
    pub fn bottom_padding(&self) -> f64 {
        if self.reserve_bottom_controls {
            self.padding_y.max(self.min_vertical_padding)
        } else {
            self.padding_y
        }
    }
}
