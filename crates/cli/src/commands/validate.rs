//! `validate` command implementation.

use anyhow::{Context, Result};
use route::FileRouteSource;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    route_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RouteSummary>,
}

#[derive(Serialize)]
struct RouteSummary {
    waypoint_count: usize,
    skipped_line_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped_lines: Vec<usize>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(route = %args.route.display(), "Validating route file");

    let result = validate_route(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Route validation failed")
    }
}

fn validate_route(args: &ValidateArgs) -> ValidationResult {
    let route_path = args.route.display().to_string();

    // Check file exists
    if !args.route.exists() {
        return ValidationResult {
            valid: false,
            route_path,
            error: Some(format!("File not found: {}", args.route.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to parse
    match FileRouteSource::new(&args.route).parse() {
        Ok(parsed) => {
            if parsed.waypoints.is_empty() {
                return ValidationResult {
                    valid: false,
                    route_path,
                    error: Some("Route has no usable waypoints".to_string()),
                    warnings: None,
                    summary: Some(RouteSummary {
                        waypoint_count: 0,
                        skipped_line_count: parsed.skipped_lines.len(),
                        skipped_lines: parsed.skipped_lines,
                    }),
                };
            }

            let warnings = collect_warnings(&parsed);

            ValidationResult {
                valid: true,
                route_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(RouteSummary {
                    waypoint_count: parsed.waypoints.len(),
                    skipped_line_count: parsed.skipped_lines.len(),
                    skipped_lines: parsed.skipped_lines,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            route_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect route warnings (non-fatal issues)
fn collect_warnings(parsed: &route::ParsedRoute) -> Vec<String> {
    let mut warnings = Vec::new();

    if !parsed.skipped_lines.is_empty() {
        warnings.push(format!(
            "{} malformed line(s) skipped: {:?}",
            parsed.skipped_lines.len(),
            parsed.skipped_lines
        ));
    }

    if parsed.waypoints.len() == 1 {
        warnings.push("Route has a single waypoint - reported bearing stays at 0".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Route is valid: {}", result.route_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Waypoints: {}", summary.waypoint_count);
            println!("  Skipped lines: {}", summary.skipped_line_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Route is invalid: {}", result.route_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
