//! Declarative endpoint catalogue
//!
//! Every remote operation is one data row: name, path template, verb, and
//! whether credentials are required. The public client surface in
//! [`crate::client`] is generated from these rows; the request-building
//! and execution logic lives once, in `finch-http`.

use finch_http::Verb;

/// One remote operation.
///
/// `path` may contain a single `{id}` placeholder for operations that
/// address a specific resource; [`resolve`](Self::resolve) substitutes it
/// before the request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    /// Logical operation name, used for logging
    pub name: &'static str,

    /// Path template relative to the service host, without extension
    pub path: &'static str,

    /// HTTP verb, fixed by the operation's semantics
    pub verb: Verb,

    /// Whether the operation requires credentials
    pub auth: bool,
}

impl EndpointSpec {
    /// Substitute the `{id}` placeholder with a percent-encoded identifier.
    pub fn resolve(&self, id: &str) -> String {
        self.path.replace("{id}", &urlencoding::encode(id))
    }

    /// True when the path template addresses a specific resource.
    pub fn takes_id(&self) -> bool {
        self.path.contains("{id}")
    }
}

// Timelines
pub const PUBLIC_TIMELINE: EndpointSpec = EndpointSpec { name: "public_timeline", path: "statuses/public_timeline", verb: Verb::Get, auth: false };
pub const FRIENDS_TIMELINE: EndpointSpec = EndpointSpec { name: "friends_timeline", path: "statuses/friends_timeline", verb: Verb::Get, auth: true };
pub const USER_TIMELINE: EndpointSpec = EndpointSpec { name: "user_timeline", path: "statuses/user_timeline", verb: Verb::Get, auth: true };
pub const MENTIONS: EndpointSpec = EndpointSpec { name: "mentions", path: "statuses/mentions", verb: Verb::Get, auth: true };
pub const REPLIES: EndpointSpec = EndpointSpec { name: "replies", path: "statuses/replies", verb: Verb::Get, auth: true };

// Statuses
pub const SHOW_STATUS: EndpointSpec = EndpointSpec { name: "show_status", path: "statuses/show/{id}", verb: Verb::Get, auth: false };
pub const UPDATE_STATUS: EndpointSpec = EndpointSpec { name: "update_status", path: "statuses/update", verb: Verb::Post, auth: true };
pub const DESTROY_STATUS: EndpointSpec = EndpointSpec { name: "destroy_status", path: "statuses/destroy/{id}", verb: Verb::Post, auth: true };

// Users
pub const FRIENDS: EndpointSpec = EndpointSpec { name: "friends", path: "statuses/friends", verb: Verb::Get, auth: false };
pub const FOLLOWERS: EndpointSpec = EndpointSpec { name: "followers", path: "statuses/followers", verb: Verb::Get, auth: true };
pub const SHOW_USER: EndpointSpec = EndpointSpec { name: "show_user", path: "users/show", verb: Verb::Get, auth: false };

// Direct messages
pub const DIRECT_MESSAGES: EndpointSpec = EndpointSpec { name: "direct_messages", path: "direct_messages", verb: Verb::Get, auth: true };
pub const SENT_MESSAGES: EndpointSpec = EndpointSpec { name: "sent_messages", path: "direct_messages/sent", verb: Verb::Get, auth: true };
pub const NEW_MESSAGE: EndpointSpec = EndpointSpec { name: "new_message", path: "direct_messages/new", verb: Verb::Post, auth: true };
pub const DESTROY_MESSAGE: EndpointSpec = EndpointSpec { name: "destroy_message", path: "direct_messages/destroy/{id}", verb: Verb::Post, auth: true };

// Friendships
pub const CREATE_FRIENDSHIP: EndpointSpec = EndpointSpec { name: "create_friendship", path: "friendships/create", verb: Verb::Post, auth: true };
pub const DESTROY_FRIENDSHIP: EndpointSpec = EndpointSpec { name: "destroy_friendship", path: "friendships/destroy", verb: Verb::Post, auth: true };
pub const FRIENDSHIP_EXISTS: EndpointSpec = EndpointSpec { name: "friendship_exists", path: "friendships/exists", verb: Verb::Get, auth: true };

// Social graph
pub const FRIEND_IDS: EndpointSpec = EndpointSpec { name: "friend_ids", path: "friends/ids", verb: Verb::Get, auth: true };
pub const FOLLOWER_IDS: EndpointSpec = EndpointSpec { name: "follower_ids", path: "followers/ids", verb: Verb::Get, auth: true };

// Account
pub const VERIFY_CREDENTIALS: EndpointSpec = EndpointSpec { name: "verify_credentials", path: "account/verify_credentials", verb: Verb::Get, auth: true };
pub const RATE_LIMIT_STATUS: EndpointSpec = EndpointSpec { name: "rate_limit_status", path: "account/rate_limit_status", verb: Verb::Get, auth: false };
pub const END_SESSION: EndpointSpec = EndpointSpec { name: "end_session", path: "account/end_session", verb: Verb::Post, auth: true };
pub const UPDATE_DELIVERY_DEVICE: EndpointSpec = EndpointSpec { name: "update_delivery_device", path: "account/update_delivery_device", verb: Verb::Post, auth: true };
pub const UPDATE_PROFILE_COLORS: EndpointSpec = EndpointSpec { name: "update_profile_colors", path: "account/update_profile_colors", verb: Verb::Post, auth: true };
pub const UPDATE_PROFILE: EndpointSpec = EndpointSpec { name: "update_profile", path: "account/update_profile", verb: Verb::Post, auth: true };

// Favorites
pub const FAVORITES: EndpointSpec = EndpointSpec { name: "favorites", path: "favorites", verb: Verb::Get, auth: true };
pub const CREATE_FAVORITE: EndpointSpec = EndpointSpec { name: "create_favorite", path: "favorites/create/{id}", verb: Verb::Post, auth: true };
pub const DESTROY_FAVORITE: EndpointSpec = EndpointSpec { name: "destroy_favorite", path: "favorites/destroy/{id}", verb: Verb::Post, auth: true };

// Notifications
pub const FOLLOW_NOTIFICATIONS: EndpointSpec = EndpointSpec { name: "follow_notifications", path: "notifications/follow", verb: Verb::Post, auth: true };
pub const LEAVE_NOTIFICATIONS: EndpointSpec = EndpointSpec { name: "leave_notifications", path: "notifications/leave", verb: Verb::Post, auth: true };

// Blocks
pub const CREATE_BLOCK: EndpointSpec = EndpointSpec { name: "create_block", path: "blocks/create", verb: Verb::Post, auth: true };
pub const DESTROY_BLOCK: EndpointSpec = EndpointSpec { name: "destroy_block", path: "blocks/destroy", verb: Verb::Post, auth: true };
pub const BLOCK_EXISTS: EndpointSpec = EndpointSpec { name: "block_exists", path: "blocks/exists", verb: Verb::Get, auth: true };
pub const BLOCKING: EndpointSpec = EndpointSpec { name: "blocking", path: "blocks/blocking", verb: Verb::Get, auth: true };
pub const BLOCKING_IDS: EndpointSpec = EndpointSpec { name: "blocking_ids", path: "blocks/blocking/ids", verb: Verb::Get, auth: true };

// Help
pub const TEST: EndpointSpec = EndpointSpec { name: "test", path: "help/test", verb: Verb::Get, auth: false };

/// Every operation the service exposes, in catalogue order.
pub const CATALOGUE: &[EndpointSpec] = &[
    PUBLIC_TIMELINE,
    FRIENDS_TIMELINE,
    USER_TIMELINE,
    MENTIONS,
    REPLIES,
    SHOW_STATUS,
    UPDATE_STATUS,
    DESTROY_STATUS,
    FRIENDS,
    FOLLOWERS,
    SHOW_USER,
    DIRECT_MESSAGES,
    SENT_MESSAGES,
    NEW_MESSAGE,
    DESTROY_MESSAGE,
    CREATE_FRIENDSHIP,
    DESTROY_FRIENDSHIP,
    FRIENDSHIP_EXISTS,
    FRIEND_IDS,
    FOLLOWER_IDS,
    VERIFY_CREDENTIALS,
    RATE_LIMIT_STATUS,
    END_SESSION,
    UPDATE_DELIVERY_DEVICE,
    UPDATE_PROFILE_COLORS,
    UPDATE_PROFILE,
    FAVORITES,
    CREATE_FAVORITE,
    DESTROY_FAVORITE,
    FOLLOW_NOTIFICATIONS,
    LEAVE_NOTIFICATIONS,
    CREATE_BLOCK,
    DESTROY_BLOCK,
    BLOCK_EXISTS,
    BLOCKING,
    BLOCKING_IDS,
    TEST,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalogue_names_are_unique() {
        let names: HashSet<&str> = CATALOGUE.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), CATALOGUE.len());
    }

    #[test]
    fn catalogue_paths_are_relative() {
        for endpoint in CATALOGUE {
            assert!(!endpoint.path.starts_with('/'), "{}", endpoint.name);
            assert!(!endpoint.path.ends_with('/'), "{}", endpoint.name);
        }
    }

    #[test]
    fn id_templates_resolve_with_substitution() {
        assert_eq!(SHOW_STATUS.resolve("12345"), "statuses/show/12345");
        assert_eq!(
            DESTROY_MESSAGE.resolve("67890"),
            "direct_messages/destroy/67890"
        );
        assert!(SHOW_STATUS.takes_id());
        assert!(!UPDATE_STATUS.takes_id());
    }

    #[test]
    fn id_substitution_percent_encodes() {
        assert_eq!(
            SHOW_STATUS.resolve("a/b c"),
            "statuses/show/a%2Fb%20c"
        );
    }

    #[test]
    fn mutating_operations_use_post() {
        for endpoint in CATALOGUE {
            let mutates = endpoint.path.contains("update")
                || endpoint.path.contains("destroy")
                || endpoint.path.contains("create")
                || endpoint.path.contains("new")
                || endpoint.path.contains("end_session")
                || endpoint.path.starts_with("notifications/");
            if mutates {
                assert_eq!(endpoint.verb, Verb::Post, "{}", endpoint.name);
            } else {
                assert_eq!(endpoint.verb, Verb::Get, "{}", endpoint.name);
            }
        }
    }

    #[test]
    fn public_operations_skip_auth() {
        for endpoint in [PUBLIC_TIMELINE, SHOW_STATUS, SHOW_USER, TEST] {
            assert!(!endpoint.auth, "{}", endpoint.name);
        }
        assert!(VERIFY_CREDENTIALS.auth);
        assert!(UPDATE_STATUS.auth);
    }
}
