//! `ipokit countdown`: print the time remaining until a target.

use anyhow::bail;
use chrono::{DateTime, Utc};
use ipokit_core::config::CountdownConfig;
use ipokit_widgets::{CountdownState, CountdownUnits};

/// Units enabled by the config; unset flags default to shown.
pub fn units_from_config(config: Option<&CountdownConfig>) -> CountdownUnits {
    let Some(config) = config else {
        return CountdownUnits::all();
    };
    CountdownUnits {
        days: config.show_days.unwrap_or(true),
        hours: config.show_hours.unwrap_or(true),
        minutes: config.show_minutes.unwrap_or(true),
        seconds: config.show_seconds.unwrap_or(true),
    }
}

/// Parse a comma-separated unit list such as `hours,minutes`.
pub fn parse_units(list: &str) -> anyhow::Result<CountdownUnits> {
    let mut units = CountdownUnits {
        days: false,
        hours: false,
        minutes: false,
        seconds: false,
    };
    for unit in list.split(',').map(str::trim).filter(|u| !u.is_empty()) {
        match unit.to_lowercase().as_str() {
            "d" | "day" | "days" => units.days = true,
            "h" | "hour" | "hours" => units.hours = true,
            "m" | "minute" | "minutes" => units.minutes = true,
            "s" | "second" | "seconds" => units.seconds = true,
            other => bail!("Unknown unit '{other}'. Expected days, hours, minutes or seconds"),
        }
    }
    Ok(units)
}

/// Print the decomposition of `target - now`.
pub fn run_countdown(
    target: DateTime<Utc>,
    now: DateTime<Utc>,
    units: CountdownUnits,
    json: bool,
) -> anyhow::Result<CountdownState> {
    let state = CountdownState::between(now, target, units);
    let completed = target <= now;

    if json {
        let mut value = serde_json::to_value(state)?;
        value["completed"] = serde_json::Value::Bool(completed);
        println!("{value}");
    } else if completed {
        println!("{state} (completed)");
    } else {
        println!("{state}");
    }
    Ok(state)
}
