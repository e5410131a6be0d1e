use crate::types::metrics::{StatCard, TripMetrics};

/// Formats metrics into the dashboard's stat cards.
pub fn summarize(metrics: &TripMetrics) -> Vec<StatCard> {
    let mut cards = Vec::with_capacity(8);

    if let Some(speed) = metrics.instantaneous_speed_kmh {
        cards.push(card("Speed", format_speed(speed)));
    }

    cards.push(card(
        "Distance",
        format!("{:.2} km", metrics.total_distance_meters / 1000.0),
    ));
    cards.push(card("Max speed", format_speed(metrics.max_speed_kmh)));
    cards.push(card("Avg speed", format_speed(metrics.avg_speed_kmh)));
    cards.push(card("Moving", format_minutes(metrics.moving_seconds)));
    cards.push(card("Stopped", format_minutes(metrics.stopped_seconds)));
    cards.push(card("Hard braking", metrics.hard_brake_count.to_string()));
    cards.push(card("Hard acceleration", metrics.hard_accel_count.to_string()));

    cards
}

fn card(label: &str, value: String) -> StatCard {
    StatCard {
        label: label.to_string(),
        value,
    }
}

fn format_speed(kmh: f64) -> String {
    format!("{:.1} km/h", kmh)
}

fn format_minutes(seconds: f64) -> String {
    format!("{:.1} min", seconds / 60.0)
}
