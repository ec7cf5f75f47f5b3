//! Händelser efter ändringar i släktträdet
//!
//! Vyer prenumererar och räknar om sina härledda data från grunden.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info};

/// Ändring som just sparats i databasen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    MemberCreated { id: i64 },
    MemberUpdated { id: i64 },
    MemberDeleted { id: i64, orphaned: Vec<i64> },
}

impl TreeEvent {
    pub fn member_id(&self) -> i64 {
        match self {
            Self::MemberCreated { id } | Self::MemberUpdated { id } | Self::MemberDeleted { id, .. } => *id,
        }
    }
}

/// Lyssnare på trädhändelser
pub trait TreeListener {
    fn on_event(&self, event: &TreeEvent);
}

/// Loggar alla händelser
pub struct LoggingListener;

impl TreeListener for LoggingListener {
    fn on_event(&self, event: &TreeEvent) {
        match event {
            TreeEvent::MemberCreated { id } => info!(id, "Familjemedlem skapad"),
            TreeEvent::MemberUpdated { id } => debug!(id, "Familjemedlem uppdaterad"),
            TreeEvent::MemberDeleted { id, orphaned } => {
                info!(id, orphaned = orphaned.len(), "Familjemedlem raderad")
            }
        }
    }
}

/// Sätter en delad flagga så att vyer vet att de ska läsa om datat
#[derive(Debug, Clone, Default)]
pub struct RefreshFlag {
    dirty: Rc<Cell<bool>>,
}

impl RefreshFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returnerar true en gång per ändring
    pub fn take(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn mark(&self) {
        self.dirty.set(true);
    }
}

impl TreeListener for RefreshFlag {
    fn on_event(&self, _event: &TreeEvent) {
        self.mark();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_flag_is_taken_once() {
        let flag = RefreshFlag::new();
        let listener = flag.clone();

        assert!(!flag.take());
        listener.on_event(&TreeEvent::MemberCreated { id: 1 });
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_member_id() {
        let event = TreeEvent::MemberDeleted { id: 4, orphaned: vec![5, 6] };
        assert_eq!(event.member_id(), 4);
    }
}
