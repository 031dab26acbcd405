/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Signboard – unattended school signage display engine
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── clock/      – wall-clock source + clock/date string formatting
//! ├── config/     – YAML display settings (loading, validation, publication)
//! ├── schedule/   – day-type selection and period resolution
//! ├── rotation/   – media/logo, goals and news rotation state
//! └── engine/     – timer loops and display snapshot publishing
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod rotation;
pub mod schedule;
