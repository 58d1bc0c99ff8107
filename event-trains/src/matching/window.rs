//! Wait-window matching.

use chrono::Duration;

use crate::domain::{Event, TrainArrival};

/// A train that gets in at most `wait` before an event starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The arriving train
    pub train: TrainArrival,
    /// The event it reaches in time
    pub event: Event,
    /// Time between arrival and event start; never negative
    pub time_diff: Duration,
}

/// Find every (train, event) pair where the event starts no earlier than
/// the train's arrival and no later than `wait` after it.
///
/// Both bounds are inclusive. Every satisfying pair is returned, ordered by
/// train (outer) then event (inner). A negative `wait` matches nothing.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use event_trains::domain::{Event, TrainArrival, parse_timestamp};
/// use event_trains::matching::match_events;
///
/// let train = TrainArrival::new(
///     "123",
///     "Express",
///     parse_timestamp("2024-05-01T10:00:00+05:30").unwrap(),
///     "ERN",
/// );
/// let event = Event::new("Meetup", "", parse_timestamp("2024-05-01T10:10:00+05:30").unwrap());
///
/// let matches = match_events(&[train], &[event], Duration::minutes(15));
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].time_diff.num_seconds(), 600);
/// ```
pub fn match_events(trains: &[TrainArrival], events: &[Event], wait: Duration) -> Vec<Match> {
    let mut matches = Vec::new();

    if wait < Duration::zero() {
        return matches;
    }

    for train in trains {
        let earliest = train.scheduled_arrival;
        // Past the representable range there is no upper bound
        let latest = earliest.checked_add_signed(wait);

        for event in events {
            let in_window =
                earliest <= event.date && latest.is_none_or(|latest| event.date <= latest);

            if in_window {
                matches.push(Match {
                    train: train.clone(),
                    event: event.clone(),
                    time_diff: event.date.signed_duration_since(earliest),
                });
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedTime, parse_timestamp};

    fn at(s: &str) -> FeedTime {
        parse_timestamp(&format!("2024-05-01T{s}+05:30")).unwrap()
    }

    fn train(no: &str, arrival: &str) -> TrainArrival {
        TrainArrival::new(no, format!("Train {no}"), at(arrival), "ERN")
    }

    fn event(name: &str, start: &str) -> Event {
        Event::new(name, "", at(start))
    }

    fn pairs(matches: &[Match]) -> Vec<(&str, &str)> {
        matches
            .iter()
            .map(|m| (m.train.train_no.as_str(), m.event.name.as_str()))
            .collect()
    }

    #[test]
    fn event_within_window_matches() {
        let matches = match_events(
            &[train("123", "10:00:00")],
            &[event("Meetup", "10:10:00")],
            Duration::minutes(15),
        );

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].time_diff, Duration::seconds(600));
    }

    #[test]
    fn coincident_event_matches_zero_window() {
        let matches = match_events(
            &[train("1", "10:00:00")],
            &[event("E", "10:00:00")],
            Duration::zero(),
        );

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].time_diff, Duration::zero());
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let wait = Duration::minutes(15);
        let on_edge = match_events(&[train("1", "10:00:00")], &[event("E", "10:15:00")], wait);
        let past_edge = match_events(&[train("1", "10:00:00")], &[event("E", "10:15:01")], wait);

        assert_eq!(on_edge.len(), 1);
        assert!(past_edge.is_empty());
    }

    #[test]
    fn event_before_arrival_never_matches() {
        let matches = match_events(
            &[train("1", "10:00:00")],
            &[event("E", "09:59:59")],
            Duration::hours(5),
        );

        assert!(matches.is_empty());
    }

    #[test]
    fn negative_window_is_empty() {
        let matches = match_events(
            &[train("1", "10:00:00"), train("2", "09:58:00")],
            &[event("E", "10:00:00"), event("F", "09:56:00")],
            Duration::minutes(-5),
        );

        assert!(matches.is_empty());
    }

    #[test]
    fn huge_negative_window_is_empty() {
        // Far enough below zero that arrival + wait leaves chrono's range
        let wait = crate::matching::wait_from_minutes(-200_000_000_000).unwrap();
        assert!(train("1", "10:00:00").scheduled_arrival.checked_add_signed(wait).is_none());

        let matches = match_events(&[train("1", "10:00:00")], &[event("E", "10:10:00")], wait);

        assert!(matches.is_empty());
    }

    #[test]
    fn empty_inputs() {
        let trains = [train("1", "10:00:00")];
        let events = [event("E", "10:05:00")];

        assert!(match_events(&trains, &[], Duration::minutes(30)).is_empty());
        assert!(match_events(&[], &events, Duration::minutes(30)).is_empty());
    }

    #[test]
    fn ties_are_not_deduplicated() {
        let matches = match_events(
            &[train("1", "10:00:00"), train("2", "10:00:00")],
            &[event("A", "10:05:00"), event("B", "10:05:00")],
            Duration::minutes(10),
        );

        assert_eq!(
            pairs(&matches),
            [("1", "A"), ("1", "B"), ("2", "A"), ("2", "B")]
        );
    }

    #[test]
    fn duplicate_inputs_give_duplicate_matches() {
        let t = train("1", "10:00:00");
        let matches = match_events(
            &[t.clone(), t],
            &[event("A", "10:05:00")],
            Duration::minutes(10),
        );

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], matches[1]);
    }

    #[test]
    fn output_is_train_major_in_input_order() {
        let matches = match_events(
            &[train("late", "11:00:00"), train("early", "09:00:00")],
            &[
                event("Z", "11:30:00"),
                event("Y", "09:10:00"),
                event("X", "11:05:00"),
            ],
            Duration::hours(1),
        );

        assert_eq!(
            pairs(&matches),
            [("late", "Z"), ("late", "X"), ("early", "Y")]
        );
    }

    #[test]
    fn compares_instants_across_offsets() {
        let t = train("1", "10:00:00");
        // 04:40 UTC is 10:10 IST
        let e = Event::new(
            "UTC event",
            "",
            parse_timestamp("2024-05-01T04:40:00+00:00").unwrap(),
        );

        let matches = match_events(&[t], &[e], Duration::minutes(15));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].time_diff, Duration::minutes(10));
    }

    #[test]
    fn window_spans_midnight() {
        let t = TrainArrival::new(
            "1",
            "Night",
            parse_timestamp("2024-05-01T23:50:00+05:30").unwrap(),
            "ERN",
        );
        let e = Event::new(
            "Early",
            "",
            parse_timestamp("2024-05-02T00:10:00+05:30").unwrap(),
        );

        let matches = match_events(&[t], &[e], Duration::minutes(30));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].time_diff, Duration::minutes(20));
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let matches = match_events(
            &[train("1", "10:00:00")],
            &[event("E", "12:00:00")],
            Duration::MAX,
        );

        assert_eq!(matches.len(), 1);
    }
}
