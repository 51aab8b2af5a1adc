use crate::domain::auth::Session;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Journal,
    Analytics,
    Me,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Journal, Tab::Analytics, Tab::Me];
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Journal => write!(f, "Journal"),
            Tab::Analytics => write!(f, "Analytics"),
            Tab::Me => write!(f, "Me"),
        }
    }
}

/// Where a tab click actually lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub tab: Tab,
    /// Draw attention to the login box
    pub prompt_login: bool,
}

/// Everything except the account tab needs a session.
pub fn guard(session: Option<&Session>, requested: Tab) -> Route {
    match (session, requested) {
        (None, Tab::Me) | (Some(_), _) => Route {
            tab: requested,
            prompt_login: false,
        },
        (None, _) => Route {
            tab: Tab::Me,
            prompt_login: true,
        },
    }
}

/// Tab shown at startup and right after login/logout
pub fn landing_tab(session: Option<&Session>) -> Tab {
    if session.is_some() { Tab::Journal } else { Tab::Me }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_redirects_anonymous_users() {
        let route = guard(None, Tab::Journal);
        assert_eq!(route.tab, Tab::Me);
        assert!(route.prompt_login);

        let route = guard(None, Tab::Me);
        assert_eq!(route.tab, Tab::Me);
        assert!(!route.prompt_login);
    }

    #[test]
    fn test_guard_lets_session_through() {
        let session = Session::for_user("trader");
        for tab in Tab::ALL {
            assert_eq!(guard(Some(&session), tab).tab, tab);
        }
    }

    #[test]
    fn test_landing_tab() {
        assert_eq!(landing_tab(None), Tab::Me);
        assert_eq!(landing_tab(Some(&Session::for_user("x"))), Tab::Journal);
    }
}
