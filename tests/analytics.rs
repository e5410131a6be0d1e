use trip_telemetry::analytics::distance::EARTH_RADIUS_M;
use trip_telemetry::analytics::segment::{AccelEvent, Segment};
use trip_telemetry::analytics::{analyze, distance_meters, TripAccumulator};
use trip_telemetry::types::metrics::TripMetrics;
use trip_telemetry::types::sample::{GeoSample, RawSample};

const EPS: f64 = 1e-6;

/// Longitude reached after travelling `meters` east along the equator.
fn east_of(lon: f64, meters: f64) -> f64 {
    lon + (meters / EARTH_RADIUS_M).to_degrees()
}

/// Equator samples whose segments run at the given speeds, `step_secs` apart.
fn equator_trip(speeds_kmh: &[f64], step_secs: i64) -> Vec<GeoSample> {
    let mut lon = 0.0;
    let mut samples = vec![GeoSample::new(0.0, lon, 0)];
    for (i, speed) in speeds_kmh.iter().enumerate() {
        lon = east_of(lon, speed / 3.6 * step_secs as f64);
        samples.push(GeoSample::new(0.0, lon, (i as i64 + 1) * step_secs * 1000));
    }
    samples
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn distance_to_self_is_zero() {
    for (lat, lon) in [(0.0, 0.0), (-32.48, -58.23), (89.9, 179.9), (-90.0, -180.0)] {
        assert_eq!(distance_meters(lat, lon, lat, lon), 0.0);
    }
}

#[test]
fn distance_is_symmetric() {
    let ab = distance_meters(52.52, 13.405, 48.8566, 2.3522);
    let ba = distance_meters(48.8566, 2.3522, 52.52, 13.405);
    assert_close(ab, ba, "symmetry");
}

#[test]
fn one_degree_of_latitude_at_equator() {
    let d = distance_meters(0.0, 0.0, 1.0, 0.0);
    assert!((d - 111_195.0).abs() < 1.0, "got {d}");
}

#[test]
fn berlin_to_paris_is_about_878_km() {
    let d = distance_meters(52.5200, 13.4050, 48.8566, 2.3522);
    assert!((d - 878_000.0).abs() < 10_000.0, "got {d}");
}

#[test]
fn antipodal_points_do_not_produce_nan() {
    let d = distance_meters(0.0, 0.0, 0.0, 180.0);
    assert!(d.is_finite());
    assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
}

#[test]
fn empty_and_single_sample_sequences_are_zeroed() {
    assert_eq!(analyze(&[]), TripMetrics::default());
    assert_eq!(analyze(&[GeoSample::new(-32.48, -58.23, 0)]), TripMetrics::default());
}

#[test]
fn three_point_trip_splits_speed_and_time() {
    let trip = equator_trip(&[5.0, 3.0], 10);
    let metrics = analyze(&trip);

    assert_close(metrics.moving_seconds, 20.0, "moving");
    assert_close(metrics.stopped_seconds, 0.0, "stopped");
    assert_close(metrics.max_speed_kmh, 5.0, "max speed");
    assert_close(metrics.avg_speed_kmh, 4.0, "avg speed");
    assert_close(metrics.total_distance_meters, 5.0 / 3.6 * 10.0 + 3.0 / 3.6 * 10.0, "distance");
    assert_eq!(metrics.instantaneous_speed_kmh, None);
}

#[test]
fn slow_segments_count_as_stopped() {
    let trip = equator_trip(&[1.5, 0.0, 10.0], 30);
    let metrics = analyze(&trip);

    assert_close(metrics.moving_seconds, 30.0, "moving");
    assert_close(metrics.stopped_seconds, 60.0, "stopped");
}

#[test]
fn non_advancing_timestamp_only_adds_distance() {
    let a = GeoSample::new(0.0, 0.0, 0);
    let b = GeoSample::new(0.0, east_of(0.0, 100.0), 10_000);
    let c = GeoSample::new(0.0, east_of(0.0, 150.0), 10_000);
    let d = GeoSample::new(0.0, east_of(0.0, 200.0), 5_000);

    let metrics = analyze(&[a, b, c, d]);

    assert_close(metrics.total_distance_meters, 200.0, "distance");
    assert_close(metrics.moving_seconds + metrics.stopped_seconds, 10.0, "elapsed");
    assert_close(metrics.max_speed_kmh, 36.0, "max speed");
    assert_close(metrics.avg_speed_kmh, 36.0, "avg speed");
}

#[test]
fn extreme_timestamps_do_not_overflow() {
    let trip = [
        GeoSample::new(0.0, 0.0, i64::MIN),
        GeoSample::new(0.0, 0.001, i64::MAX),
        GeoSample::new(0.0, 0.002, i64::MIN),
    ];

    let metrics = analyze(&trip);

    assert!(metrics.total_distance_meters > 200.0);
    assert!(metrics.max_speed_kmh.is_finite());
    assert!(metrics.stopped_seconds > 0.0);
    assert_eq!(metrics.moving_seconds, 0.0);

    let mut acc = TripAccumulator::new();
    for sample in trip {
        acc.push(sample);
    }
    assert_eq!(acc.metrics().stopped_seconds, metrics.stopped_seconds);
}

#[test]
fn no_positive_duration_means_zero_speeds() {
    let a = GeoSample::new(0.0, 0.0, 1_000);
    let b = GeoSample::new(0.0, east_of(0.0, 50.0), 1_000);

    let metrics = analyze(&[a, b]);

    assert!(metrics.total_distance_meters > 49.0);
    assert_eq!(metrics.max_speed_kmh, 0.0);
    assert_eq!(metrics.avg_speed_kmh, 0.0);
    assert_eq!(metrics.moving_seconds + metrics.stopped_seconds, 0.0);
}

#[test]
fn accel_thresholds_are_strict() {
    let base = GeoSample::new(0.0, 0.0, 0).with_accel(0.0);
    let at = |accel: f64| GeoSample::new(0.0, 0.0, 1_000).with_accel(accel);

    assert_eq!(Segment::between(&base, &at(-2.5)).accel_event, None);
    assert_eq!(Segment::between(&base, &at(2.5)).accel_event, None);
    assert_eq!(
        Segment::between(&base, &at(-2.6)).accel_event,
        Some(AccelEvent::HardBrake)
    );
    assert_eq!(
        Segment::between(&base, &at(2.6)).accel_event,
        Some(AccelEvent::HardAccel)
    );
}

#[test]
fn accel_events_need_readings_on_both_ends() {
    let trip = [
        GeoSample::new(0.0, 0.0, 0).with_accel(5.0),
        GeoSample::new(0.0, 0.0, 1_000),
        GeoSample::new(0.0, 0.0, 2_000).with_accel(-5.0),
        GeoSample::new(0.0, 0.0, 3_000).with_accel(-9.0),
        GeoSample::new(0.0, 0.0, 4_000).with_accel(-1.0),
    ];

    let metrics = analyze(&trip);

    assert_eq!(metrics.hard_brake_count, 1);
    assert_eq!(metrics.hard_accel_count, 1);
}

#[test]
fn streaming_matches_batch() {
    let mut trip = equator_trip(&[12.0, 0.5, 40.0, 33.0, 1.0, 60.0], 7);
    trip[2].timestamp_millis = trip[1].timestamp_millis;
    for (i, sample) in trip.iter_mut().enumerate() {
        sample.accel = Some(if i % 2 == 0 { 3.0 } else { -0.5 });
    }

    let batch = analyze(&trip);

    let mut acc = TripAccumulator::new();
    let mut live = TripMetrics::default();
    for sample in &trip {
        live = acc.push(*sample);
    }

    assert_close(live.total_distance_meters, batch.total_distance_meters, "distance");
    assert_close(live.max_speed_kmh, batch.max_speed_kmh, "max speed");
    assert_close(live.avg_speed_kmh, batch.avg_speed_kmh, "avg speed");
    assert_close(live.moving_seconds, batch.moving_seconds, "moving");
    assert_close(live.stopped_seconds, batch.stopped_seconds, "stopped");
    assert_eq!(live.hard_brake_count, batch.hard_brake_count);
    assert_eq!(live.hard_accel_count, batch.hard_accel_count);
}

#[test]
fn first_push_after_reset_has_no_segment() {
    let mut acc = TripAccumulator::new();
    acc.push(GeoSample::new(0.0, 0.0, 0));
    acc.push(GeoSample::new(0.0, 1.0, 60_000));
    assert!(acc.metrics().total_distance_meters > 0.0);

    acc.reset();
    assert_eq!(acc.metrics(), TripMetrics::default());
    assert!(acc.last_sample().is_none());

    let metrics = acc.push(GeoSample::new(10.0, 10.0, 120_000));
    assert_eq!(metrics.total_distance_meters, 0.0);
    assert_eq!(metrics.instantaneous_speed_kmh, None);
}

#[test]
fn instantaneous_speed_tracks_latest_segment() {
    let trip = equator_trip(&[30.0, 10.0], 5);
    let mut acc = TripAccumulator::new();

    acc.push(trip[0]);
    let after_first = acc.push(trip[1]);
    assert_close(after_first.instantaneous_speed_kmh.unwrap_or_default(), 30.0, "first segment");

    let after_second = acc.push(trip[2]);
    assert_close(after_second.instantaneous_speed_kmh.unwrap_or_default(), 10.0, "second segment");
    assert_close(after_second.max_speed_kmh, 30.0, "max speed");
}

#[test]
fn malformed_raw_push_leaves_state_untouched() {
    let mut acc = TripAccumulator::new();
    acc.push(GeoSample::new(0.0, 0.0, 0));
    let before = acc.metrics();

    let missing_lng = RawSample {
        lat: Some(1.0),
        lng: None,
        timestamp: Some(1_000),
        accel: None,
    };
    assert!(acc.push_raw(&missing_lng).is_err());
    assert_eq!(acc.metrics(), before);
    assert_eq!(acc.last_sample().map(|s| s.timestamp_millis), Some(0));

    let zero_lat = RawSample {
        lat: Some(0.0),
        lng: Some(east_of(0.0, 100.0)),
        timestamp: Some(10_000),
        accel: None,
    };
    let metrics = acc.push_raw(&zero_lat).expect("zero latitude is a real coordinate");
    assert_close(metrics.total_distance_meters, 100.0, "distance");
}
