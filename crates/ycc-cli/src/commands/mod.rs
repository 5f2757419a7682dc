// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Command implementations for the ycc CLI.

pub mod explain;
pub mod phase;
