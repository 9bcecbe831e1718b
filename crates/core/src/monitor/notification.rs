use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

/// Transient banners, oldest first.
///
/// Each entry lives for `ttl` and is independent of the others: no cap on
/// how many are visible at once and no deduplication.
#[derive(Debug)]
pub struct NotificationQueue {
    ttl: Duration,
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 0,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.push_at(kind, message, Instant::now())
    }

    pub fn push_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
            created_at: now,
        });
        id
    }

    /// Drops every notification older than the TTL. Returns how many went.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
        before - self.items.len()
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    /// Notifications pushed after the one with id `after` (exclusive).
    pub fn since(&self, after: Option<u64>) -> impl Iterator<Item = &Notification> {
        self.items
            .iter()
            .filter(move |n| after.map_or(true, |last| n.id > last))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3);

    #[test]
    fn test_notifications_stack_without_dedup() {
        let mut queue = NotificationQueue::new(TTL);
        queue.push(NotificationKind::Info, "Camera stopped");
        queue.push(NotificationKind::Info, "Camera stopped");
        queue.push(NotificationKind::Error, "boom");
        assert_eq!(queue.len(), 3);
        let kinds: Vec<_> = queue.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            [
                NotificationKind::Info,
                NotificationKind::Info,
                NotificationKind::Error
            ]
        );
    }

    #[test]
    fn test_expire_after_ttl() {
        let mut queue = NotificationQueue::new(TTL);
        let start = Instant::now();
        queue.push_at(NotificationKind::Success, "first", start);
        queue.push_at(NotificationKind::Success, "second", start + Duration::from_secs(2));

        assert_eq!(queue.expire(start + Duration::from_millis(2999)), 0);
        assert_eq!(queue.expire(start + Duration::from_secs(3)), 1);
        assert_eq!(queue.iter().next().unwrap().message, "second");
        assert_eq!(queue.expire(start + Duration::from_secs(5)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ids_are_monotonic_and_since_filters() {
        let mut queue = NotificationQueue::new(TTL);
        let a = queue.push(NotificationKind::Info, "a");
        let b = queue.push(NotificationKind::Info, "b");
        assert!(b > a);

        let newer: Vec<_> = queue.since(Some(a)).map(|n| n.message.as_str()).collect();
        assert_eq!(newer, ["b"]);
        assert_eq!(queue.since(None).count(), 2);
    }

    #[test]
    fn test_dismiss() {
        let mut queue = NotificationQueue::new(TTL);
        let a = queue.push(NotificationKind::Warning, "a");
        queue.push(NotificationKind::Warning, "b");
        queue.dismiss(a);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NotificationKind::Warning.to_string(), "warning");
    }
}
