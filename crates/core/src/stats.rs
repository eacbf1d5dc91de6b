//! Arithmetic behind the statistics endpoints.

use serde::{Deserialize, Serialize};

/// Name reported for the top user when there are no users at all.
pub const NO_TOP_USER: &str = "N/A";

/// The user with the most logged hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUser {
    pub name: String,
    pub hours: f64,
}

impl TopUser {
    /// Placeholder used when no user exists.
    pub fn none() -> Self {
        Self {
            name: NO_TOP_USER.to_string(),
            hours: 0.0,
        }
    }
}

/// Round to the two decimal places the `NUMERIC(10,2)` column keeps.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Average hours per user, `0` when there are no users.
pub fn average_hours_per_user(total_hours: f64, total_users: i64) -> f64 {
    if total_users <= 0 {
        return 0.0;
    }
    total_hours / total_users as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_with_no_users_is_zero() {
        assert_eq!(average_hours_per_user(0.0, 0), 0.0);
        assert_eq!(average_hours_per_user(12.0, 0), 0.0);
    }

    #[test]
    fn average_divides_total_by_users() {
        assert_eq!(average_hours_per_user(30.0, 4), 7.5);
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_hours(1.234), 1.23);
        assert_eq!(round_hours(1.2351), 1.24);
        assert_eq!(round_hours(0.1 + 0.2), 0.3);
    }

    #[test]
    fn top_user_placeholder() {
        let top = TopUser::none();
        assert_eq!(top.name, "N/A");
        assert_eq!(top.hours, 0.0);
    }
}
