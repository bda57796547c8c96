//! Display helpers for distances and durations.

/// `850 m` below one kilometer, `12.3 km` above.
pub fn format_distance(distance_m: f64) -> String {
    if !distance_m.is_finite() || distance_m < 0.0 {
        return "-".to_string();
    }
    if distance_m < 1000.0 {
        format!("{:.0} m", distance_m)
    } else {
        format!("{:.1} km", distance_m / 1000.0)
    }
}

/// `2h 05m`, `14m` or `40s`.
pub fn format_duration(time_s: f64) -> String {
    if !time_s.is_finite() || time_s < 0.0 {
        return "-".to_string();
    }
    let total = time_s.round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{total}s")
    }
}
