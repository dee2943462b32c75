/// Format an average percentage, trimming a trailing ".0"
pub fn format_average(pct: f64) -> String {
    if pct == pct.floor() {
        format!("{}%", pct as i64)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Singular/plural day count, e.g. "1 day", "4 days"
pub fn format_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// One glyph per calendar cell
pub fn day_glyph(due: bool, completed: bool) -> &'static str {
    match (due, completed) {
        (true, true) => "●",
        (true, false) => "○",
        (false, true) => "◆",
        (false, false) => "·",
    }
}

/// Heat glyph for a daily completion percentage
pub fn percent_glyph(pct: f64) -> &'static str {
    if pct >= 100.0 {
        "●"
    } else if pct >= 50.0 {
        "◕"
    } else if pct > 0.0 {
        "◑"
    } else {
        "○"
    }
}
