//! Tests for the activities painted on occupant and guest timelines

use occupancy_generator::facility::BuildingLayout;
use occupancy_generator::occupant::Person;
use occupancy_generator::simulation::PopulationOrchestrator;
use occupancy_generator::types::{Location, OccupantState, SimulationConfig, SECONDS_PER_DAY};

fn layout() -> BuildingLayout {
    BuildingLayout::from_links(
        &["Lobby", "Hall", "Office", "Cafe", "Conference"],
        &[("Outdoor", &["Lobby"]), ("Lobby", &["Hall"]), ("Hall", &["Office", "Cafe", "Conference"])],
    )
}

fn quiet_day(occupants: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        occupant_count: occupants,
        seed: Some(seed),
        absence_probability: 0.0,
        arrival_flex_secs: 600,
        guest_lambda: 0.0,
        colleague_visit_lambda: 0.0,
        lunch_room: Some("Cafe".to_string()),
        meeting_room: Some("Conference".to_string()),
        ..Default::default()
    }
}

fn hm(hour: usize, minute: usize) -> usize {
    hour * 3600 + minute * 60
}

#[test]
fn test_single_occupant_day() {
    let mut orchestrator = PopulationOrchestrator::new(quiet_day(1, 3), &layout()).unwrap();
    let date = orchestrator.config().start_date;
    let day = orchestrator.generate_day(date).unwrap();
    assert_eq!(day.present, vec![0]);
    assert!(day.guests.is_empty());

    let graph = orchestrator.graph();
    let cafe = graph.zone_id("Cafe").unwrap();
    let conference = graph.zone_id("Conference").unwrap();
    let occupant = &orchestrator.occupants()[0];
    let timeline = occupant.timeline();

    assert_eq!(timeline.len(), SECONDS_PER_DAY as usize);
    assert_eq!(occupant.location_at(hm(3, 0)), Location::Unset);
    assert_eq!(occupant.location_at(hm(23, 0)), Location::Unset);
    assert_eq!(occupant.state_at(hm(3, 0)), OccupantState::NotPresent);
    assert_eq!(occupant.zone_at(hm(11, 0)), Some(occupant.office));
    assert_eq!(occupant.state_at(hm(11, 0)), OccupantState::Working);

    // Lunch starts at least twenty minutes after service opens
    let lunch_seconds: Vec<usize> =
        (0..timeline.len()).filter(|&s| timeline.get(s) == Location::Zone(cafe)).collect();
    assert!(lunch_seconds.len() >= 600);
    assert!(lunch_seconds.iter().all(|&s| s >= hm(12, 20) && s < hm(15, 0)));

    // The meeting room is reached at least five minutes before 16:00
    assert_eq!(occupant.location_at(hm(15, 55)), Location::Zone(conference));
    assert_eq!(occupant.state_at(hm(16, 5)), OccupantState::Meeting);
    assert!(timeline.count(Location::Zone(conference)) < 3600);

    for second in 0..timeline.len() {
        if let Some(zone) = occupant.zone_at(second) {
            assert!(graph.is_building_zone(zone));
        }
    }
}

#[test]
fn test_every_occupant_follows_the_same_routine() {
    let mut orchestrator = PopulationOrchestrator::new(quiet_day(5, 8), &layout()).unwrap();
    let date = orchestrator.config().start_date;
    orchestrator.generate_day(date).unwrap();

    let conference = orchestrator.graph().zone_id("Conference").unwrap();
    for occupant in orchestrator.occupants() {
        assert!(occupant.is_present_today());
        assert!(occupant.plan().is_layered());
        assert_eq!(occupant.location_at(hm(16, 1)), Location::Zone(conference));
        assert_eq!(&occupant.plan().render(), occupant.timeline());
    }
}

#[test]
fn test_guests_stay_on_their_path() {
    let config = SimulationConfig { guest_lambda: 8.0, ..quiet_day(4, 17) };
    let mut orchestrator = PopulationOrchestrator::new(config, &layout()).unwrap();
    let date = orchestrator.config().start_date;
    let entry = orchestrator.roles().entry;
    let max_hop = 4;

    let mut checked = 0;
    for _ in 0..5 {
        let day = orchestrator.generate_day(date).unwrap();
        for guest in &day.guests {
            let appointment = &guest.appointment;
            let hops = guest.path.len() - 1;
            assert_eq!(guest.path.first(), Some(&entry));
            assert_eq!(guest.path.last(), Some(&appointment.location));

            for second in 0..SECONDS_PER_DAY as usize {
                if let Some(zone) = guest.zone_at(second) {
                    assert!(guest.path.contains(&zone));
                }
            }
            for second in appointment.start as usize..appointment.end as usize {
                assert_eq!(guest.zone_at(second), Some(appointment.location));
                assert_eq!(guest.state_at(second), OccupantState::AttendingAppointment);
            }
            for second in (0..appointment.start as usize).filter(|&s| guest.is_present_at(s)) {
                assert!(matches!(
                    guest.state_at(second),
                    OccupantState::Arriving | OccupantState::AttendingAppointment
                ));
            }
            for second in (appointment.end as usize..SECONDS_PER_DAY as usize)
                .filter(|&s| guest.is_present_at(s))
            {
                assert_eq!(guest.state_at(second), OccupantState::Departing);
            }
            let gone = appointment.end as usize + hops * max_hop;
            assert!((gone..SECONDS_PER_DAY as usize).all(|s| !guest.is_present_at(s)));
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_hosts_are_painted_for_their_appointments() {
    let config = SimulationConfig { guest_lambda: 6.0, ..quiet_day(3, 29) };
    let mut orchestrator = PopulationOrchestrator::new(config, &layout()).unwrap();
    let date = orchestrator.config().start_date;
    let day = orchestrator.generate_day(date).unwrap();

    for appointment in &day.appointments {
        let host = orchestrator
            .occupants()
            .iter()
            .find(|occupant| occupant.id == appointment.host)
            .unwrap();
        if appointment.end > appointment.start {
            let middle = ((appointment.start + appointment.end) / 2) as usize;
            assert_eq!(host.zone_at(middle), Some(appointment.location));
        }
    }
}
