//! Derived identifier list for submission.
//!
//! There is deliberately no stored list of uploaded identifiers anywhere in
//! the crate: the list is recomputed from slot state on every read, so it can
//! never drift from the sequence under arbitrary removal order.

use crate::models::ImageSlot;

/// Server identifiers of all successful slots, in current sequence order
/// (not completion order).
pub fn server_ids(slots: &[ImageSlot]) -> Vec<String> {
    slots
        .iter()
        .filter_map(|slot| slot.status.server_id().map(str::to_string))
        .collect()
}

pub fn success_count(slots: &[ImageSlot]) -> usize {
    slots.iter().filter(|slot| slot.is_success()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImageSlot, SlotStatus};
    use uuid::Uuid;

    fn slot(status: SlotStatus) -> ImageSlot {
        ImageSlot {
            local_key: Uuid::new_v4(),
            display_url: None,
            status,
        }
    }

    #[test]
    fn only_successful_slots_contribute() {
        let slots = vec![
            slot(SlotStatus::Success {
                server_id: "1".into(),
            }),
            slot(SlotStatus::Uploading),
            slot(SlotStatus::Failed {
                reason: "HTTP 500".into(),
            }),
            slot(SlotStatus::Success {
                server_id: "4".into(),
            }),
            slot(SlotStatus::Pending),
        ];
        assert_eq!(server_ids(&slots), vec!["1".to_string(), "4".to_string()]);
        assert_eq!(success_count(&slots), 2);
        assert_eq!(server_ids(&slots).len(), success_count(&slots));
    }

    #[test]
    fn order_follows_sequence_not_completion() {
        // Build the sequence as if the second upload finished first.
        let mut slots = vec![slot(SlotStatus::Uploading), slot(SlotStatus::Uploading)];
        slots[1].status = SlotStatus::Success {
            server_id: "late-first".into(),
        };
        slots[0].status = SlotStatus::Success {
            server_id: "early-second".into(),
        };
        assert_eq!(
            server_ids(&slots),
            vec!["early-second".to_string(), "late-first".to_string()]
        );
    }

    #[test]
    fn empty_sequence_yields_empty_list() {
        assert!(server_ids(&[]).is_empty());
        assert_eq!(success_count(&[]), 0);
    }
}
