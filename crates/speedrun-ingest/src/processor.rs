//! Raw run → [`RunRecord`] normalization

use crate::validate::SkipReason;
use chrono::NaiveDate;
use serde_json::Value;
use speedrun_common::platforms::platform_name;
use speedrun_common::types::{RunRecord, UNKNOWN_PLAYER};
use tracing::warn;

/// Normalize a validated raw run
///
/// Any nested field that is missing or has the wrong type discards the
/// record with [`SkipReason::Malformed`]; nothing here panics on bad input.
pub fn process_run(run: &Value) -> Result<RunRecord, SkipReason> {
    let result = extract(run);
    if let Err(ref reason) = result {
        let run_id = run.get("id").and_then(Value::as_str).unwrap_or("?");
        warn!(run_id, %reason, "Discarding unprocessable run");
    }
    result
}

fn extract(run: &Value) -> Result<RunRecord, SkipReason> {
    let run_id = string_at(run, "/id", "id")?;
    let category = string_at(run, "/category", "category")?;

    let date = run
        .pointer("/date")
        .and_then(Value::as_str)
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .ok_or(SkipReason::Malformed { field: "date" })?;

    let time_seconds = run
        .pointer("/times/primary_t")
        .and_then(Value::as_f64)
        .filter(|t| t.is_finite() && *t > 0.0)
        .ok_or(SkipReason::Malformed {
            field: "times.primary_t",
        })?;

    let players = run
        .pointer("/players")
        .and_then(Value::as_array)
        .ok_or(SkipReason::Malformed { field: "players" })?;
    let player = match players.first() {
        None => UNKNOWN_PLAYER.to_string(),
        Some(first) => first
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(SkipReason::Malformed { field: "players[0].id" })?,
    };

    let status = run
        .pointer("/status/status")
        .and_then(Value::as_str)
        .ok_or(SkipReason::Malformed {
            field: "status.status",
        })?;

    let platform_id = run
        .pointer("/system/platform")
        .and_then(Value::as_str)
        .ok_or(SkipReason::Malformed {
            field: "system.platform",
        })?;

    let emulator = run
        .pointer("/system/emulated")
        .and_then(Value::as_bool)
        .ok_or(SkipReason::Malformed {
            field: "system.emulated",
        })?;

    Ok(RunRecord {
        run_id,
        category,
        date,
        time_seconds,
        player,
        verified: status == "verified",
        platform: platform_name(platform_id).to_string(),
        emulator,
    })
}

fn string_at(run: &Value, pointer: &str, field: &'static str) -> Result<String, SkipReason> {
    run.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SkipReason::Malformed { field })
}
