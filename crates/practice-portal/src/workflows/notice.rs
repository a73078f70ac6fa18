//! Single-slot transient notices.
//!
//! Each workflow owns one board. Posting a notice replaces whatever was shown and bumps the
//! generation; a clear only succeeds when the ticket's generation still matches, so a timer
//! scheduled for an older message can never erase a newer one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Proof of which post a scheduled clear belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoticeTicket {
    generation: u64,
}

impl NoticeTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct NoticeSlot {
    generation: u64,
    current: Option<Notice>,
}

#[derive(Debug)]
pub struct NoticeBoard {
    slot: Mutex<NoticeSlot>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(NoticeSlot::default()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn post(&self, kind: NoticeKind, message: impl Into<String>) -> NoticeTicket {
        let mut slot = self.slot.lock().expect("notice mutex poisoned");
        slot.generation += 1;
        slot.current = Some(Notice {
            kind,
            message: message.into(),
        });
        NoticeTicket {
            generation: slot.generation,
        }
    }

    pub fn current(&self) -> Option<Notice> {
        self.slot
            .lock()
            .expect("notice mutex poisoned")
            .current
            .clone()
    }

    /// Returns `true` when the notice posted under `ticket` was still showing and got cleared.
    pub fn clear(&self, ticket: NoticeTicket) -> bool {
        let mut slot = self.slot.lock().expect("notice mutex poisoned");
        if slot.generation != ticket.generation || slot.current.is_none() {
            return false;
        }
        slot.current = None;
        true
    }

    /// Waits out the board's TTL, then clears the notice if it is still the one from `ticket`.
    pub async fn expire(self: Arc<Self>, ticket: NoticeTicket) -> bool {
        tokio::time::sleep(self.ttl).await;
        self.clear(ticket)
    }
}

/// Fire-and-forget clear for the notice behind `ticket`. Must run inside a tokio runtime.
pub fn schedule_clear(board: &Arc<NoticeBoard>, ticket: NoticeTicket) -> JoinHandle<bool> {
    tokio::spawn(Arc::clone(board).expire(ticket))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_replaces_current_message() {
        let board = NoticeBoard::new(Duration::from_secs(3));
        let first = board.post(NoticeKind::Success, "Vacante publicada exitosamente");
        let second = board.post(NoticeKind::Warning, "Ya has postulado a esta vacante");

        assert!(second.generation() > first.generation());
        let current = board.current().expect("notice showing");
        assert_eq!(current.kind, NoticeKind::Warning);
        assert_eq!(current.message, "Ya has postulado a esta vacante");
    }

    #[test]
    fn stale_ticket_cannot_clear_newer_notice() {
        let board = NoticeBoard::new(Duration::from_secs(3));
        let stale = board.post(NoticeKind::Success, "Informe enviado exitosamente");
        let fresh = board.post(NoticeKind::Success, "Estado del informe actualizado a: aprobado");

        assert!(!board.clear(stale));
        assert!(board.current().is_some());
        assert!(board.clear(fresh));
        assert!(board.current().is_none());
        assert!(!board.clear(fresh), "second clear is a no-op");
    }

    #[tokio::test(start_paused = true)]
    async fn expire_clears_after_ttl() {
        let board = Arc::new(NoticeBoard::new(Duration::from_secs(3)));
        let ticket = board.post(NoticeKind::Success, "Postulación enviada exitosamente");

        let handle = schedule_clear(&board, ticket);
        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert!(board.current().is_some(), "notice still visible before ttl");

        assert!(handle.await.expect("expiry task joins"));
        assert!(board.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn late_expiry_leaves_newer_notice_in_place() {
        let board = Arc::new(NoticeBoard::new(Duration::from_secs(3)));
        let first = board.post(NoticeKind::Success, "Vacante publicada exitosamente");
        let pending = schedule_clear(&board, first);

        tokio::time::sleep(Duration::from_secs(2)).await;
        board.post(NoticeKind::Success, "Postulación enviada exitosamente");

        assert!(!pending.await.expect("expiry task joins"));
        assert_eq!(
            board.current().map(|notice| notice.message),
            Some("Postulación enviada exitosamente".to_string())
        );
    }
}
