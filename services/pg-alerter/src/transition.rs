//! Up/down edge detection and alert wording

use std::fmt;

/// A change in reachability between two consecutive probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    WentDown,
    CameBackUp,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::WentDown => write!(f, "up -> down"),
            Transition::CameBackUp => write!(f, "down -> up"),
        }
    }
}

impl Transition {
    /// Name the edge between two observations, if there is one
    pub fn detect(previous_up: bool, current_up: bool) -> Option<Self> {
        if !should_alert(previous_up, current_up) {
            return None;
        }
        if current_up {
            Some(Transition::CameBackUp)
        } else {
            Some(Transition::WentDown)
        }
    }

    /// Build the chat message for this edge
    pub fn message(&self, resource_name: &str, environment_name: &str) -> String {
        match self {
            Transition::CameBackUp => format!(
                "{} is back up in {} environment!",
                resource_name, environment_name
            ),
            Transition::WentDown => format!(
                "Critical alert :rotating_light:! {} is down in {} environment :rotating_light:",
                resource_name, environment_name
            ),
        }
    }
}

/// Alerts fire only on edges, never on a repeated status
pub fn should_alert(previous_up: bool, current_up: bool) -> bool {
    previous_up != current_up
}
