//! In-Memory Session Manager Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{SessionError, SessionManagerPort, WritingSession};

/// 内存写作会话管理器
pub struct InMemorySessionManager {
    sessions: DashMap<String, WritingSession>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManagerPort for InMemorySessionManager {
    fn create(&self, session: WritingSession) -> Result<String, SessionError> {
        let session_id = session.id.clone();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists(session_id));
        }
        self.sessions.insert(session_id.clone(), session);
        tracing::info!(session_id = %session_id, "Writing session created");
        Ok(session_id)
    }

    fn get(&self, id: &str) -> Result<WritingSession, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn update_chapter(&self, id: &str, chapter_index: usize) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        if !session.is_active {
            return Err(SessionError::Closed(id.to_string()));
        }
        session.current_chapter = chapter_index;
        session.last_activity = Utc::now();
        tracing::debug!(session_id = %id, chapter_index, "Session chapter updated");
        Ok(())
    }

    fn is_valid(&self, id: &str) -> bool {
        self.sessions
            .get(id)
            .map(|s| s.is_active)
            .unwrap_or(false)
    }

    fn close(&self, id: &str) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.is_active = false;
        session.last_activity = Utc::now();
        tracing::info!(session_id = %id, "Writing session closed");
        Ok(())
    }

    fn list_all(&self) -> Vec<String> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let manager = InMemorySessionManager::new();
        let session = WritingSession::new("proj_1");
        let id = manager.create(session).unwrap();

        assert!(manager.is_valid(&id));

        manager.update_chapter(&id, 3).unwrap();
        assert_eq!(manager.get(&id).unwrap().current_chapter, 3);

        manager.close(&id).unwrap();
        assert!(!manager.is_valid(&id));
        assert!(matches!(
            manager.update_chapter(&id, 4),
            Err(SessionError::Closed(_))
        ));
    }

    #[test]
    fn test_duplicate_creation_rejected() {
        let manager = InMemorySessionManager::new();
        let session = WritingSession::new("proj_1");
        let duplicate = session.clone();

        manager.create(session).unwrap();
        assert!(matches!(
            manager.create(duplicate),
            Err(SessionError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_unknown_session() {
        let manager = InMemorySessionManager::new();
        assert!(!manager.is_valid("missing"));
        assert!(matches!(
            manager.get("missing"),
            Err(SessionError::NotFound(_))
        ));
    }
}
