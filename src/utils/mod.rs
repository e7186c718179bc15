//! Some utility functions

pub mod comparison;

use crate::calendar::MarkerMap;
use crate::task::Task;

/// A debug utility that pretty-prints a task, with the current fill of its checkbox
pub fn print_task(task: &Task, transition_value: Option<f32>) {
    let completion = if task.completed() { "✓" } else { " " };
    let fill = match transition_value {
        None => String::from("  ?"),
        Some(value) => format!("{:3.0}", value * 100.0),
    };
    println!("    [{}] {}% {}\t{} → {}\t{}",
        completion, fill, task.name(), task.start_day(), task.end_day(), task.id());
}

/// A debug utility that pretty-prints calendar markers
pub fn print_markers(markers: &MarkerMap) {
    for (day, marker) in markers {
        let dot = marker.dot_color.as_ref()
            .map(|c| c.to_hex_string())
            .unwrap_or_default();
        let selected = if marker.is_selected() { "(selected)" } else { "" };
        println!("    {} {} {}", day, dot, selected);
    }
}
