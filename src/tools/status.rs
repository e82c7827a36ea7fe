//! Sous Status Tool
//!
//! Provides runtime status information about the Sous service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Ingredient scaling instructions for AI assistants
pub const SCALING_INSTRUCTIONS: &str = r#"
# Sous Ingredient Scaling Instructions

This guide explains how to parse, scale, and display recipe ingredients
using the Sous tools.

## Overview

Sous turns free-form ingredient text into structured records and back:

1. **Parse** - "2 cups flour" becomes `{quantity: 2, unit: "cups", name: "flour"}`
2. **Scale** - multiply quantities for a different serving count
3. **Format** - render records back into human-readable lines

Every operation is tolerant: lines that do not parse come back as usable
records with an `error` diagnostic instead of failing the call.

## Supported Line Shapes

Lines are matched whole, in this order; the first shape that fits wins:

| Shape | Example |
|-------|---------|
| qty + unit + name | `2 cups flour` |
| qty + unit + of + name | `3 tbsp of olive oil` |
| name - qty + unit | `butter - 2 tbsp` |
| qty + name | `2 large eggs` (unit defaults to "piece") |

Quantities may be integers (`2`), decimals (`0.5`), fractions (`3/4`),
or mixed numbers (`1 1/2`). Anything else defaults to 1.

## Supported Units

| Category | Units |
|----------|-------|
| Volume (base ml) | ml, l/liter, tsp, tbsp, fl oz, cup, pint, quart, gallon |
| Weight (base g) | mg, g, kg, oz, lb |
| Count (base 1) | piece, each, item, unit, dozen |

Unrecognized units (pinch, scoop, clove, ...) are preserved as written;
they scale numerically but never convert.

## Step-by-Step: Scaling a Recipe

**Preferred: one `scale_recipe` call for the whole list.**

```
scale_recipe(
  lines: ["2 cups flour", "1 1/2 tsp baking soda", "1 egg"],
  original_servings: 4,
  target_servings: 8,
  smart: true
)
```

Returns the scale factor, one structured record per line, and a ready
`display` string for each.

### The smart flag

With `smart: true`, a scaled quantity is re-expressed in the most
readable unit for its new size: 8 tbsp of butter scaled 4x reports as
"2 cups", not "32 tbsps". With `smart: false`, units never change.

Use `smart: false` when the user wants to see their own units preserved
(e.g. editing a recipe they wrote); use `smart: true` for display
surfaces and narration.

## Single-Ingredient Tools

| Task | Tool |
|------|------|
| Parse one line | `parse_ingredient` |
| Parse a whole list | `parse_ingredients` |
| Scale one line | `scale_ingredient` |
| Convert between units | `convert_units` |
| Suggest a display unit | `get_optimal_unit` |
| Render structured fields | `format_ingredient` |

### Converting units

```
convert_units(value: 236.588, from_unit: "ml", to_unit: "cup")
```

Conversions only work within one category. A cross-category request
(cups to kg) returns the original value unchanged with an `error` field
explaining the mismatch - check `error` before trusting the unit.

## Reading Results

- `quantity`/`unit`/`name` are always present and always usable.
- `error` is a non-fatal diagnostic. Common values:
  - `"Could not parse ingredient details"` - no line shape matched; the
    whole line became the name with quantity 1.
  - `"Invalid ingredient format"` - a non-string entry in a parsed list.
  - `"cannot convert ..."` - a cross-category conversion was skipped.
- `display` strings pluralize units with a plain `s` suffix, so expect
  the occasional "2 ozs"; that is working as intended.

## Common Mistakes to Avoid

1. **Scaling by serving counts yourself.** Pass `original_servings` and
   `target_servings` to `scale_recipe`; do not precompute the factor.
2. **Treating `error` as failure.** The record around it is still valid;
   surface the diagnostic to the user only when it matters.
3. **Expecting nutrition data.** Sous only handles quantities, units,
   and names; it does not know what flour weighs or contains.
"#;

/// Runtime status of the Sous service
#[derive(Debug, Clone, Serialize)]
pub struct SousStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> SousStatus {
        let build_info = BuildInfo::current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        SousStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
