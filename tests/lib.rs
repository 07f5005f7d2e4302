// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use occupancy_generator::*;


// Day generation
mod activity_engine_tests;

// Counting, compression and sinks
mod aggregator_tests;


#[test]
fn test_core_id_types() {
    let occupant = OccupantId::new();
    let guest = GuestId::new();

    assert_ne!(occupant, OccupantId::new());
    assert_ne!(guest, GuestId::new());
    assert!(occupant.to_string().starts_with("OCC_"));
    assert!(guest.to_string().starts_with("GUEST_"));
    assert_eq!(ZoneId(4).index(), 4);
}

#[test]
fn test_enum_types() {
    let activities = [
        ActivityType::Arrival,
        ActivityType::Working,
        ActivityType::Departure,
        ActivityType::Lunch,
        ActivityType::Meeting,
        ActivityType::HostingGuest,
        ActivityType::VisitingColleague,
        ActivityType::ReceivingColleague,
        ActivityType::GuestVisit,
    ];

    for pair in activities.windows(2) {
        assert!(pair[0].layer() <= pair[1].layer() || pair[1] == ActivityType::GuestVisit);
    }
    assert_eq!(ActivityType::Lunch.state(), OccupantState::Lunch);
    assert_eq!("compact".parse::<OutputFormat>(), Ok(OutputFormat::Compact));
    assert!(!Location::Unset.is_present());
}
