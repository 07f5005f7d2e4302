//! Tests for per-zone counting, schedule compression and the sinks

use occupancy_generator::facility::BuildingLayout;
use occupancy_generator::output::compact::SCHEDULE_NAME_PREFIX;
use occupancy_generator::output::{CompactScheduleSink, JsonLinesSink, MemorySink, ScheduleSink};
use occupancy_generator::simulation::{OccupancyAggregator, PopulationOrchestrator};
use occupancy_generator::types::{SimulationConfig, TimeOfDay, MINUTES_PER_DAY};
use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use tempfile::tempdir;

fn layout() -> BuildingLayout {
    BuildingLayout::from_links(
        &["Foyer", "Open Plan", "Kitchen", "Studio"],
        &[("Outdoor", &["Foyer"]), ("Foyer", &["Open Plan"]), ("Open Plan", &["Kitchen", "Studio"])],
    )
}

fn orchestrator(seed: u64) -> PopulationOrchestrator {
    let config = SimulationConfig {
        occupant_count: 12,
        seed: Some(seed),
        lunch_room: Some("Kitchen".to_string()),
        meeting_room: Some("Studio".to_string()),
        ..Default::default()
    };
    PopulationOrchestrator::new(config, &layout()).unwrap()
}

#[test]
fn test_compression_round_trip() {
    let mut orchestrator = orchestrator(31);
    let date = orchestrator.config().start_date;
    let day = orchestrator.generate_day(date).unwrap();
    let counts = orchestrator.count(&day.guests);

    for zone in orchestrator.graph().building_zones() {
        let per_second = counts.zone(zone);
        let segments = OccupancyAggregator::compress(per_second);
        let samples = OccupancyAggregator::expand(&segments);

        assert_eq!(samples.len(), MINUTES_PER_DAY as usize);
        for (minute, sample) in samples.iter().enumerate() {
            assert_eq!(*sample, per_second[(minute + 1) * 60 - 1]);
        }

        assert_eq!(segments.first().unwrap().start, TimeOfDay::MIDNIGHT);
        assert_eq!(segments.last().unwrap().end, TimeOfDay::END_OF_DAY);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert_eq!(pair[0].end.seconds() % 60, 0);
        }

        let weighted: u64 = segments.iter().map(|segment| segment.occupant_seconds()).sum();
        let sampled: u64 = samples.iter().map(|&count| count as u64 * 60).sum();
        assert_eq!(weighted, sampled);
    }
}

#[test]
fn test_offices_fill_during_the_day() {
    let mut orchestrator = orchestrator(32);
    let mut sink = MemorySink::new();
    let stats = orchestrator.run(&mut sink).unwrap();

    let present = stats.days[0].present_occupants as u32;
    let total_mid_afternoon: u32 = sink
        .days
        .values()
        .next()
        .unwrap()
        .values()
        .map(|breakpoints| {
            breakpoints
                .iter()
                .find(|breakpoint| breakpoint.end.seconds() > 15 * 3600)
                .map_or(0, |breakpoint| breakpoint.count)
        })
        .sum();
    assert!(total_mid_afternoon >= present);
    assert!(!sink.days.values().next().unwrap().contains_key("Outdoor"));
}

#[test]
fn test_compact_output_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedules.idf");

    let mut orchestrator = orchestrator(33);
    {
        let mut sink = CompactScheduleSink::new(BufWriter::new(File::create(&path).unwrap()));
        orchestrator.run(&mut sink).unwrap();
    }

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("Schedule:Compact,").count(), 4);
    assert!(text.contains("Generated_Schedule_Zone_Open Plan_2020-03-25,"));
    assert!(text.contains("Through: 12/31,"));
    assert!(text.contains("For: Weekdays"));
    assert_eq!(text.matches("Until 24:00, ").count(), 4);
}

#[test]
fn test_compact_names_unique_over_several_days() {
    let config = SimulationConfig { days: 3, ..orchestrator(35).config().clone() };
    let mut orchestrator = PopulationOrchestrator::new(config, &layout()).unwrap();
    let mut sink = CompactScheduleSink::new(Vec::new());
    orchestrator.run(&mut sink).unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let names: Vec<&str> =
        text.lines().map(str::trim).filter(|line| line.starts_with(SCHEDULE_NAME_PREFIX)).collect();
    let unique: BTreeSet<&str> = names.iter().copied().collect();
    assert_eq!(names.len(), 12);
    assert_eq!(unique.len(), 12);
    assert!(unique.contains("Generated_Schedule_Zone_Kitchen_2020-03-27,"));
}

#[test]
fn test_json_lines_output() {
    let mut orchestrator = orchestrator(34);
    let mut sink = JsonLinesSink::new(Vec::new());
    orchestrator.run(&mut sink).unwrap();
    sink.finish().unwrap();
    assert_eq!(sink.records_written(), 4);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    for line in text.lines() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        let breakpoints = record["breakpoints"].as_array().unwrap();
        assert_eq!(breakpoints.last().unwrap()["end"], "24:00");
        assert_eq!(record["date"], "2020-03-25");
    }
}
