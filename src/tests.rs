#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use uuid::Uuid;

    use crate::chat::engine::{ChatEngine, Outbound};
    use crate::chat::protocol::{ParticipantId, ServerWsMessage};

    fn connect(engine: &mut ChatEngine) -> ParticipantId {
        let id = Uuid::new_v4();
        engine.on_connect(id);
        id
    }

    fn events_for(events: &[Outbound], to: ParticipantId) -> Vec<ServerWsMessage> {
        events
            .iter()
            .filter(|o| o.to == to)
            .map(|o| o.event.clone())
            .collect()
    }

    /// Pair two fresh participants and return them.
    fn paired_couple(engine: &mut ChatEngine) -> (ParticipantId, ParticipantId) {
        let a = connect(engine);
        let b = connect(engine);
        engine.find_partner(a);
        engine.find_partner(b);
        assert!(engine.room_of(a).is_some());
        (a, b)
    }

    #[test]
    fn test_user_count_broadcast_on_connect() {
        let mut engine = ChatEngine::new();
        let a = Uuid::new_v4();
        let events = engine.on_connect(a);
        assert_eq!(events, vec![Outbound { to: a, event: ServerWsMessage::UserCount { count: 1 } }]);

        let b = Uuid::new_v4();
        let events = engine.on_connect(b);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|o| o.event == ServerWsMessage::UserCount { count: 2 }));
        assert!(events.iter().any(|o| o.to == a));
        assert!(events.iter().any(|o| o.to == b));
    }

    #[test]
    fn test_first_seeker_waits_then_second_pairs() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);
        let b = connect(&mut engine);

        let events = engine.find_partner(a);
        assert_eq!(events, vec![Outbound { to: a, event: ServerWsMessage::Searching }]);
        assert!(engine.is_waiting(a));

        let events = engine.find_partner(b);
        let to_a = events_for(&events, a);
        let to_b = events_for(&events, b);
        assert_eq!(to_a.len(), 1);
        assert_eq!(to_b.len(), 1);
        let (room_a, room_b) = match (&to_a[0], &to_b[0]) {
            (
                ServerWsMessage::PartnerFound { room_id: ra },
                ServerWsMessage::PartnerFound { room_id: rb },
            ) => (*ra, *rb),
            other => panic!("expected partner-found for both, got {other:?}"),
        };
        assert_eq!(room_a, room_b);
        assert!(!engine.is_waiting(a));
        assert_eq!(engine.room_of(a), Some(room_a));
        assert_eq!(engine.room_of(b), Some(room_a));
    }

    #[test]
    fn test_fifo_pairs_with_oldest_waiting() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);
        let b = connect(&mut engine);
        let c = connect(&mut engine);
        let d = connect(&mut engine);
        engine.enqueue_waiting(a);
        engine.enqueue_waiting(b);
        engine.enqueue_waiting(c);

        let events = engine.find_partner(d);
        assert_eq!(events_for(&events, a).len(), 1);
        assert_eq!(engine.room_of(d), engine.room_of(a));
        assert!(engine.room_of(b).is_none());
        assert!(engine.room_of(c).is_none());
        assert_eq!(engine.waiting(), &[b, c]);
    }

    #[test]
    fn test_stale_waiting_entry_skipped_and_pruned() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);
        let b = connect(&mut engine);
        let c = connect(&mut engine);
        engine.enqueue_waiting(a);
        engine.enqueue_waiting(b);

        // A's connection vanished without a disconnect signal.
        engine.sever_connection(a);

        let events = engine.find_partner(c);
        assert_eq!(events_for(&events, a).len(), 0);
        assert_eq!(events_for(&events, b).len(), 1);
        assert_eq!(engine.room_of(c), engine.room_of(b));
        assert!(!engine.is_waiting(a));
    }

    #[test]
    fn test_stale_lone_waiter_pruned_not_paired() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);
        let b = connect(&mut engine);
        engine.find_partner(a);

        // A's connection vanished without a disconnect signal.
        engine.sever_connection(a);

        let events = engine.find_partner(b);
        assert_eq!(events, vec![Outbound { to: b, event: ServerWsMessage::Searching }]);
        assert!(!engine.is_waiting(a));
        assert!(engine.is_waiting(b));
        assert_eq!(engine.room_count(), 0);
    }

    #[test]
    fn test_find_partner_is_noop_when_already_paired() {
        let mut engine = ChatEngine::new();
        let (a, _b) = paired_couple(&mut engine);
        let room = engine.room_of(a);

        let events = engine.find_partner(a);
        assert!(events.is_empty());
        assert_eq!(engine.room_of(a), room);
        assert_eq!(engine.room_count(), 1);
        assert!(!engine.is_waiting(a));
    }

    #[test]
    fn test_lone_seeker_stays_waiting_and_never_self_pairs() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);

        let events = engine.find_partner(a);
        assert_eq!(events, vec![Outbound { to: a, event: ServerWsMessage::Searching }]);
        // Repeat request: still waiting once, searching re-emitted, no room.
        let events = engine.find_partner(a);
        assert_eq!(events, vec![Outbound { to: a, event: ServerWsMessage::Searching }]);
        assert_eq!(engine.waiting(), &[a]);
        assert_eq!(engine.room_count(), 0);
    }

    #[test]
    fn test_relay_reaches_partner_only() {
        let mut engine = ChatEngine::new();
        let (a, b) = paired_couple(&mut engine);

        let events = engine.relay_message(a, "hi".to_string());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].to, b);
        match &events[0].event {
            ServerWsMessage::ReceiveMessage { id, text, timestamp, sender } => {
                assert!(!id.is_nil());
                assert_eq!(text, "hi");
                assert_eq!(sender, "stranger");
                assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
            }
            other => panic!("expected receive-message, got {other:?}"),
        }
    }

    #[test]
    fn test_relay_dropped_when_not_paired() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);
        assert!(engine.relay_message(a, "hello?".to_string()).is_empty());

        // Waiting participants are not paired either.
        engine.find_partner(a);
        assert!(engine.relay_message(a, "anyone?".to_string()).is_empty());
    }

    #[test]
    fn test_cancel_search_confirms_only_actual_removal() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);
        let b = connect(&mut engine);

        engine.find_partner(a);
        let events = engine.cancel_search(a);
        assert_eq!(events, vec![Outbound { to: a, event: ServerWsMessage::SearchCancelled }]);
        assert!(!engine.is_waiting(a));

        // Second cancel: nothing was removed, nothing is confirmed.
        assert!(engine.cancel_search(a).is_empty());

        // A cancelled, so B starts waiting instead of pairing with A.
        let events = engine.find_partner(b);
        assert_eq!(events, vec![Outbound { to: b, event: ServerWsMessage::Searching }]);
        assert!(engine.room_of(b).is_none());
    }

    #[test]
    fn test_end_chat_notifies_peer_only_and_tears_down_room() {
        let mut engine = ChatEngine::new();
        let (a, b) = paired_couple(&mut engine);

        let events = engine.end_chat(a);
        assert_eq!(events, vec![Outbound { to: b, event: ServerWsMessage::ChatEnded }]);
        assert!(engine.room_of(a).is_none());
        assert!(engine.room_of(b).is_none());
        assert_eq!(engine.room_count(), 0);

        // Ending again is a no-op for either side.
        assert!(engine.end_chat(a).is_empty());
        assert!(engine.end_chat(b).is_empty());
    }

    #[test]
    fn test_disconnect_of_paired_participant_cleans_up_everything() {
        let mut engine = ChatEngine::new();
        let (a, b) = paired_couple(&mut engine);

        let events = engine.on_disconnect(a);
        let to_b = events_for(&events, b);
        assert!(to_b.contains(&ServerWsMessage::PartnerDisconnected));
        assert!(to_b.contains(&ServerWsMessage::UserCount { count: 1 }));
        assert!(events_for(&events, a).is_empty());

        assert_eq!(engine.connected_count(), 1);
        assert_eq!(engine.room_count(), 0);
        assert!(engine.room_of(b).is_none());

        // The survivor's session is gone: relay and end-chat are no-ops.
        assert!(engine.relay_message(b, "still there?".to_string()).is_empty());
        assert!(engine.end_chat(b).is_empty());
    }

    #[test]
    fn test_disconnect_of_waiting_participant_dequeues() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);
        let b = connect(&mut engine);
        engine.find_partner(a);

        engine.on_disconnect(a);
        assert!(!engine.is_waiting(a));

        // B cannot be paired with the departed A.
        let events = engine.find_partner(b);
        assert_eq!(events, vec![Outbound { to: b, event: ServerWsMessage::Searching }]);
    }

    #[test]
    fn test_waiting_and_room_index_stay_disjoint() {
        let mut engine = ChatEngine::new();
        let a = connect(&mut engine);
        let b = connect(&mut engine);
        let c = connect(&mut engine);
        engine.find_partner(a);
        engine.find_partner(b);
        engine.find_partner(c);
        // A and B paired; C waiting.
        for id in [a, b, c] {
            assert!(
                !(engine.is_waiting(id) && engine.room_of(id).is_some()),
                "participant {id} is both waiting and paired"
            );
        }
        assert!(engine.is_waiting(c));
        assert!(engine.room_of(a).is_some());

        engine.end_chat(a);
        for id in [a, b, c] {
            assert!(!(engine.is_waiting(id) && engine.room_of(id).is_some()));
        }
    }
}
