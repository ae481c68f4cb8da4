//! Shared test harness modules for the GeoNames CLI.

use super::*;

mod helpers;
mod steps;
