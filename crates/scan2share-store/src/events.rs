use scan2share_types::{EventItem, NewEvent};

use crate::state::{AppState, new_id};

const SHORT_CODE_LEN: usize = 6;

/// Shareable short reference cut from a fresh UUID. Not checked for uniqueness.
fn short_code() -> String {
    let mut code = new_id();
    code.truncate(SHORT_CODE_LEN);
    code
}

impl AppState {
    /// Prepend a new active event.
    pub fn create_event(&self, new: NewEvent) -> (Self, EventItem) {
        let item = EventItem {
            id: new_id(),
            title: new.title,
            description: new.description,
            date: new.date,
            location: new.location,
            hashtags: new.hashtags,
            short_code: short_code(),
            qr_payload: None,
            start_ms: new.start_ms,
            end_ms: new.end_ms,
        };

        let mut next = self.clone();
        next.events.insert(0, item.clone());
        (next, item)
    }

    /// Attach a QR payload to an active event. Returns the updated event.
    pub fn add_qr_to_event(&self, event_id: &str, payload: String) -> (Self, Option<EventItem>) {
        let Some(idx) = self.events.iter().position(|e| e.id == event_id) else {
            return (self.clone(), None);
        };

        let mut next = self.clone();
        next.events[idx].qr_payload = Some(payload);
        let updated = next.events[idx].clone();
        (next, Some(updated))
    }

    /// Remove an active event. Shares pointing at it are left in place.
    pub fn delete_event(&self, event_id: &str) -> (Self, Option<EventItem>) {
        let mut next = self.clone();
        let removed = take_by_id(&mut next.events, event_id);
        (next, removed)
    }

    pub fn delete_past_event(&self, event_id: &str) -> (Self, Option<EventItem>) {
        let mut next = self.clone();
        let removed = take_by_id(&mut next.past_events, event_id);
        (next, removed)
    }

    /// Move every active event whose end has passed onto the tail of the past
    /// list. Returns how many moved; applying it twice at the same `now_ms`
    /// moves nothing the second time.
    pub fn purge_expired_events(&self, now_ms: i64) -> (Self, usize) {
        let (expired, active): (Vec<EventItem>, Vec<EventItem>) = self
            .events
            .iter()
            .cloned()
            .partition(|e| e.end_ms != 0 && e.end_ms < now_ms);

        let moved = expired.len();
        let mut next = self.clone();
        next.events = active;
        next.past_events.extend(expired);
        (next, moved)
    }
}

fn take_by_id(items: &mut Vec<EventItem>, id: &str) -> Option<EventItem> {
    let idx = items.iter().position(|e| e.id == id)?;
    Some(items.remove(idx))
}
