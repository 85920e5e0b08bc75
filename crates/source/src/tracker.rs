use std::collections::HashSet;

/// Which tracking services currently have a usable login.
pub trait TrackerSessions: Send + Sync {
    fn is_logged_in(&self, service: i64) -> bool;
}

/// A fixed set of logged-in tracking service ids.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActiveSessions(HashSet<i64>);

impl ActiveSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, service: i64) {
        self.0.insert(service);
    }

    pub fn logout(&mut self, service: i64) {
        self.0.remove(&service);
    }
}
impl TrackerSessions for ActiveSessions {
    fn is_logged_in(&self, service: i64) -> bool {
        self.0.contains(&service)
    }
}
impl FromIterator<i64> for ActiveSessions {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions() {
        let mut sessions: ActiveSessions = [1, 2].into_iter().collect();
        assert!(sessions.is_logged_in(1));
        sessions.logout(1);
        assert!(!sessions.is_logged_in(1));
        sessions.login(3);
        assert!(sessions.is_logged_in(3));
        assert!(!ActiveSessions::new().is_logged_in(2));
    }
}
