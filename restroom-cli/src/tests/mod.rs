//! Shared test harness modules for the restroom CLI.

use super::*;

mod helpers;
mod rank_steps;
