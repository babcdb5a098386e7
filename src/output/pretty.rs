use std::fmt::Write as _;

use colored::Colorize;

use crate::habits::{Habit, HabitLogs, HabitReport, IntegrityReport};

/// Format the habit registry as a numbered list
pub fn format_habits_pretty(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return "Habits (0)\n  No habits".to_string();
    }

    let mut output = format!("Habits ({})\n", habits.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for (i, habit) in habits.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:>3}. {}  {}",
            i + 1,
            habit.name.bold(),
            unit_label(&habit.unit).dimmed()
        );
    }

    output
}

/// Format one habit's log as a table
pub fn format_habit_logs_pretty(logs: &HabitLogs) -> String {
    let mut output = format!(
        "{}  {}\n",
        logs.habit.name.bold(),
        unit_label(&logs.habit.unit).dimmed()
    );
    output.push_str(&"─".repeat(40));
    output.push('\n');

    if logs.entries.is_empty() {
        output.push_str("  No entries\n");
        return output;
    }

    let _ = writeln!(
        output,
        "  {:>6}  {:>10}  {}",
        "ID".dimmed(),
        "Quantity".dimmed(),
        "Logged at".dimmed()
    );
    for entry in &logs.entries {
        let _ = writeln!(
            output,
            "  {:>6}  {:>10}  {}",
            entry.id,
            entry.quantity.to_string().cyan(),
            entry.timestamp
        );
    }
    let _ = writeln!(
        output,
        "  {} {} {}",
        "Total:".dimmed(),
        logs.total_quantity().to_string().green(),
        logs.habit.unit
    );

    output
}

/// Format every habit with its log
pub fn format_all_logs_pretty(all: &[HabitLogs]) -> String {
    if all.is_empty() {
        return "Habits (0)\n  No habits".to_string();
    }

    let mut output = format!("Habits ({})\n\n", all.len());
    for logs in all {
        output.push_str(&format_habit_logs_pretty(logs));
        output.push('\n');
    }

    output
}

/// Format a habit report
pub fn format_report_pretty(report: &HabitReport) -> String {
    let mut output = format!("Report: {}\n", report.habit.name.bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    let _ = writeln!(
        output,
        "  {}: {}",
        "Times logged".dimmed(),
        report.times.to_string().cyan()
    );
    let _ = writeln!(
        output,
        "  {}: {} {}",
        "Total quantity".dimmed(),
        report.total_quantity.to_string().green(),
        report.habit.unit
    );
    if let Some(average) = report.average_quantity() {
        let _ = writeln!(
            output,
            "  {}: {average:.2} {}",
            "Average".dimmed(),
            report.habit.unit
        );
    }
    if let Some(first) = &report.first_logged {
        let _ = writeln!(output, "  {}: {first}", "First logged".dimmed());
    }
    if let Some(last) = &report.last_logged {
        let _ = writeln!(output, "  {}: {last}", "Last logged".dimmed());
    }

    output
}

/// Format an integrity report
pub fn format_integrity_pretty(report: &IntegrityReport) -> String {
    if report.is_consistent() {
        return format!("{} registry and log tables match", "✓".green());
    }

    let mut output = format!("{} registry and log tables disagree\n", "✗".red());
    for name in &report.missing_tables {
        let _ = writeln!(output, "  missing log table: {}", name.yellow());
    }
    for name in &report.orphaned_tables {
        let _ = writeln!(output, "  unregistered table: {}", name.yellow());
    }

    output
}

fn unit_label(unit: &str) -> String {
    if unit.is_empty() {
        "(no unit)".to_string()
    } else {
        format!("[{unit}]")
    }
}
