//! Well-known role name constants.
//!
//! Roles are derived from the `is_staff` / `is_partner` flags on the user row
//! (staff wins over partner) and embedded in JWT claims at token issue time.

pub const ROLE_STAFF: &str = "staff";
pub const ROLE_PARTNER: &str = "partner";
pub const ROLE_GUEST: &str = "guest";

/// Resolve the role name for a user's flag combination.
pub fn role_for_flags(is_staff: bool, is_partner: bool) -> &'static str {
    if is_staff {
        ROLE_STAFF
    } else if is_partner {
        ROLE_PARTNER
    } else {
        ROLE_GUEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_wins_over_partner() {
        assert_eq!(role_for_flags(true, true), ROLE_STAFF);
        assert_eq!(role_for_flags(true, false), ROLE_STAFF);
    }

    #[test]
    fn partner_and_guest() {
        assert_eq!(role_for_flags(false, true), ROLE_PARTNER);
        assert_eq!(role_for_flags(false, false), ROLE_GUEST);
    }
}
