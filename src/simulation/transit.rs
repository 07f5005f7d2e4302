//! Transit painting: turning a zone path and anchor times into paint ops
//!
//! A round trip over the path `z[0] .. z[N-1]` is described by `2N` hop
//! timestamps. The `2N - 1` intervals between them walk out along the path,
//! dwell at the far end and walk back: interval `i` is spent in
//! `z[N - 1 - |i - (N - 1)|]`.

use crate::occupant::PaintOp;
use crate::simulation::ActivityDistributions;
use crate::types::{ActivityType, Location, ZoneId};
use rand::Rng;

/// Activities painted on the outbound leg, the dwell and the return leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripActivities {
    /// Walking towards the far end of the path
    pub outbound: ActivityType,
    /// Time at the far end
    pub dwell: ActivityType,
    /// Walking back
    pub inbound: ActivityType,
}

impl TripActivities {
    /// Entry to office in the morning, office, office to entry in the evening
    pub const COMMUTE: Self = Self {
        outbound: ActivityType::Arrival,
        dwell: ActivityType::Working,
        inbound: ActivityType::Departure,
    };

    /// Entry to the appointment, the appointment itself, back out to the entry
    pub const GUEST_VISIT: Self = Self {
        outbound: ActivityType::Arrival,
        dwell: ActivityType::GuestVisit,
        inbound: ActivityType::Departure,
    };

    /// A round trip painted as one activity throughout
    pub const fn uniform(activity: ActivityType) -> Self {
        Self { outbound: activity, dwell: activity, inbound: activity }
    }
}

/// `hops + 1` ascending timestamps starting at `anchor`
pub fn forward_stamps<R: Rng>(
    anchor: i64,
    hops: usize,
    dists: &ActivityDistributions,
    rng: &mut R,
) -> Vec<i64> {
    let mut stamps = Vec::with_capacity(hops + 1);
    let mut t = anchor;
    stamps.push(t);
    for _ in 0..hops {
        t += dists.hop(rng);
        stamps.push(t);
    }
    stamps
}

/// `hops + 1` ascending timestamps ending at `anchor`
pub fn backward_stamps<R: Rng>(
    anchor: i64,
    hops: usize,
    dists: &ActivityDistributions,
    rng: &mut R,
) -> Vec<i64> {
    let mut stamps = Vec::with_capacity(hops + 1);
    let mut t = anchor;
    stamps.push(t);
    for _ in 0..hops {
        t -= dists.hop(rng);
        stamps.push(t);
    }
    stamps.reverse();
    stamps
}

/// Clamp every stamp to at least the previous one
pub fn make_monotonic(stamps: &mut [i64]) {
    for i in 1..stamps.len() {
        if stamps[i] < stamps[i - 1] {
            stamps[i] = stamps[i - 1];
        }
    }
}

/// Paint ops for a round trip over `path` with `2 * path.len()` stamps
///
/// Stamps are repaired to be monotonic first. A mismatched stamp count or an
/// empty path paints nothing.
pub fn paint_trip(path: &[ZoneId], stamps: &[i64], activities: TripActivities) -> Vec<PaintOp> {
    let n = path.len();
    if n == 0 || stamps.len() != 2 * n {
        return Vec::new();
    }

    let mut stamps = stamps.to_vec();
    make_monotonic(&mut stamps);

    let far = n - 1;
    (0..2 * n - 1)
        .map(|i| {
            let zone = path[far - i.abs_diff(far)];
            let activity = match i.cmp(&far) {
                std::cmp::Ordering::Less => activities.outbound,
                std::cmp::Ordering::Equal => activities.dwell,
                std::cmp::Ordering::Greater => activities.inbound,
            };
            PaintOp::new(activity, stamps[i], stamps[i + 1], Location::Zone(zone))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimulationConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_hops() -> ActivityDistributions {
        let config = SimulationConfig { hop_base_secs: 3, hop_jitter_secs: 0, ..Default::default() };
        ActivityDistributions::new(&config).unwrap()
    }

    #[test]
    fn test_stamp_directions() {
        let dists = fixed_hops();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(forward_stamps(100, 2, &dists, &mut rng), vec![100, 103, 106]);
        assert_eq!(backward_stamps(100, 2, &dists, &mut rng), vec![94, 97, 100]);
        assert_eq!(forward_stamps(100, 0, &dists, &mut rng), vec![100]);
    }

    #[test]
    fn test_round_trip_zones() {
        let path = [ZoneId(0), ZoneId(1), ZoneId(2)];
        let stamps = [10, 13, 16, 100, 103, 106];
        let ops = paint_trip(&path, &stamps, TripActivities::COMMUTE);

        let zones: Vec<Location> = ops.iter().map(|op| op.location).collect();
        assert_eq!(
            zones,
            vec![
                Location::Zone(ZoneId(0)),
                Location::Zone(ZoneId(1)),
                Location::Zone(ZoneId(2)),
                Location::Zone(ZoneId(1)),
                Location::Zone(ZoneId(0)),
            ]
        );
        assert_eq!(ops[2].activity, ActivityType::Working);
        assert_eq!((ops[2].start, ops[2].end), (16, 100));
        assert_eq!(ops[0].activity, ActivityType::Arrival);
        assert_eq!(ops[4].activity, ActivityType::Departure);
        assert_eq!(ops[4].end, 106);
    }

    #[test]
    fn test_single_zone_trip_is_one_dwell() {
        let ops = paint_trip(&[ZoneId(7)], &[50, 80], TripActivities::uniform(ActivityType::Lunch));
        assert_eq!(ops.len(), 1);
        assert_eq!((ops[0].start, ops[0].end), (50, 80));
    }

    #[test]
    fn test_non_monotonic_stamps_are_repaired() {
        let ops = paint_trip(&[ZoneId(0), ZoneId(1)], &[100, 90, 200, 195], TripActivities::COMMUTE);
        assert!(ops.iter().all(|op| op.start <= op.end));
        assert_eq!(ops[0].duration(), 0);
        assert!(paint_trip(&[ZoneId(0)], &[1, 2, 3], TripActivities::COMMUTE).is_empty());
    }
}
