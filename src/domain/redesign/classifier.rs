//! Maps raw AI-service failures onto the closed [`ClassifiedError`] taxonomy.
//!
//! Rules are checked in a fixed precedence order and the first match wins:
//!
//! 1. the image is not a recognizable room → `InvalidRoomImage`
//! 2. permission denied (403 / `PERMISSION_DENIED`) → `CredentialRejected`
//! 3. credential missing or invalid (401, 404, invalid key) → `CredentialInvalid`
//! 4. anything else → `UnknownFailure`
//!
//! Matching is case-insensitive over the message and structured code. The
//! classifier is pure and total.

use super::{ClassifiedError, ServiceFailure};

const INVALID_ROOM_PATTERNS: &[&str] = &[
    "not a room",
    "not an interior",
    "no room detected",
    "not a valid room",
    "invalid_room_image",
];

const PERMISSION_PATTERNS: &[&str] = &["permission_denied", "permission denied", "forbidden"];

const INVALID_CREDENTIAL_PATTERNS: &[&str] = &[
    "requested entity was not found",
    "api key not valid",
    "api_key_invalid",
    "invalid api key",
    "invalid_api_key",
    "not_found",
    "unauthenticated",
];

/// Stateless classifier for AI collaborator failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies one raw failure.
    pub fn classify(&self, failure: &ServiceFailure) -> ClassifiedError {
        let haystack = match &failure.code {
            Some(code) => format!("{} {}", code, failure.message),
            None => failure.message.clone(),
        }
        .to_lowercase();
        let message = failure.message.clone();

        if matches_any(&haystack, INVALID_ROOM_PATTERNS) {
            return ClassifiedError::InvalidRoomImage(message);
        }
        if failure.status == Some(403) || matches_any(&haystack, PERMISSION_PATTERNS) {
            return ClassifiedError::CredentialRejected(message);
        }
        if matches!(failure.status, Some(401) | Some(404))
            || matches_any(&haystack, INVALID_CREDENTIAL_PATTERNS)
        {
            return ClassifiedError::CredentialInvalid(message);
        }
        ClassifiedError::UnknownFailure(message)
    }
}

fn matches_any(haystack: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|pattern| haystack.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify(message: &str) -> ClassifiedError {
        ErrorClassifier::new().classify(&ServiceFailure::new(message))
    }

    #[test]
    fn not_a_room_is_invalid_room_image() {
        let err = classify("The uploaded photo is not a room.");
        assert_eq!(
            err,
            ClassifiedError::InvalidRoomImage("The uploaded photo is not a room.".into())
        );
    }

    #[test]
    fn permission_denied_is_credential_rejected() {
        assert!(matches!(
            classify("403 PERMISSION_DENIED: The caller does not have permission"),
            ClassifiedError::CredentialRejected(_)
        ));
    }

    #[test]
    fn status_403_alone_is_credential_rejected() {
        let failure = ServiceFailure::new("request failed").with_status(403);
        assert!(matches!(
            ErrorClassifier::new().classify(&failure),
            ClassifiedError::CredentialRejected(_)
        ));
    }

    #[test]
    fn entity_not_found_is_credential_invalid() {
        assert!(matches!(
            classify("Requested entity was not found."),
            ClassifiedError::CredentialInvalid(_)
        ));
        assert!(matches!(
            classify("API key not valid. Please pass a valid API key."),
            ClassifiedError::CredentialInvalid(_)
        ));
    }

    #[test]
    fn structured_code_participates_in_matching() {
        let failure = ServiceFailure::new("bad key").with_code("API_KEY_INVALID");
        assert_eq!(
            ErrorClassifier::new().classify(&failure),
            ClassifiedError::CredentialInvalid("bad key".into())
        );
    }

    #[test]
    fn anything_else_is_unknown_with_verbatim_message() {
        assert_eq!(
            classify("Deadline exceeded"),
            ClassifiedError::UnknownFailure("Deadline exceeded".into())
        );
    }

    #[test]
    fn image_validity_beats_permission() {
        assert!(matches!(
            classify("PERMISSION_DENIED because this is not a room"),
            ClassifiedError::InvalidRoomImage(_)
        ));
    }

    #[test]
    fn permission_beats_invalid_credential() {
        let failure = ServiceFailure::new("Requested entity was not found").with_status(403);
        assert!(matches!(
            ErrorClassifier::new().classify(&failure),
            ClassifiedError::CredentialRejected(_)
        ));
    }

    #[test]
    fn invalid_credential_beats_unknown() {
        assert!(matches!(
            classify("upstream said: UNAUTHENTICATED"),
            ClassifiedError::CredentialInvalid(_)
        ));
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(message in ".*", status in proptest::option::of(100u16..600)) {
            let mut failure = ServiceFailure::new(message);
            failure.status = status;
            let classifier = ErrorClassifier::new();
            prop_assert_eq!(classifier.classify(&failure), classifier.classify(&failure));
        }

        #[test]
        fn classification_preserves_raw_message(message in "[a-z ]{0,40}") {
            let classified = classify(&message);
            let carried = match classified {
                ClassifiedError::InvalidRoomImage(m)
                | ClassifiedError::CredentialRejected(m)
                | ClassifiedError::CredentialInvalid(m)
                | ClassifiedError::UnknownFailure(m) => m,
                other => panic!("unexpected classification {:?}", other),
            };
            prop_assert_eq!(carried, message);
        }

        #[test]
        fn room_rejection_always_wins(prefix in "[A-Za-z ]{0,20}", suffix in "[A-Za-z ]{0,20}") {
            let message = format!("{} PERMISSION_DENIED not a room API key not valid {}", prefix, suffix);
            let is_invalid_room = matches!(classify(&message), ClassifiedError::InvalidRoomImage(_));
            prop_assert!(is_invalid_room);
        }
    }
}
