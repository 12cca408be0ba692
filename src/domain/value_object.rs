//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Normalize a user-supplied name: trim surrounding whitespace and lowercase.
///
/// Shared by the presence registry and the session handlers so the two can
/// never disagree on what counts as the same username or room.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Username value object.
///
/// The username a connection claims within a room. Normalized on
/// construction, so `" Alice "` and `"alice"` are the same username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw client input.
    ///
    /// # Returns
    ///
    /// A Result containing the normalized Username or an error if validation fails
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = normalized.chars().count();
        if len > 100 {
            return Err(ValueObjectError::UsernameTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(normalized))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name value object.
///
/// Rooms are string-keyed namespaces, not entities: two joins with the same
/// normalized name land in the same room, and nothing else identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName from raw client input.
    ///
    /// # Returns
    ///
    /// A Result containing the normalized RoomName or an error if validation fails
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = normalized.chars().count();
        if len > 100 {
            return Err(ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(normalized))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message text value object.
///
/// Free-form chat text, validated for size only. Moderation is a separate
/// pipeline stage, not a construction concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText(String);

impl MessageText {
    /// Create a new MessageText.
    ///
    /// # Returns
    ///
    /// A Result containing the MessageText or an error if validation fails
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let len = text.len();
        if len > 10000 {
            return Err(ValueObjectError::MessageTextTooLong {
                max: 10000,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic coordinates for a location share.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create new Coordinates.
    ///
    /// # Returns
    ///
    /// A Result containing the Coordinates or an error if either component
    /// is out of range (latitude ±90, longitude ±180)
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValueObjectError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValueObjectError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValueObjectError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Process-local connection identifier.
///
/// Assigned by the server when the transport is established; never persisted
/// and never reused within a process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Generate a fresh ConnectionId.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp from a millisecond Unix timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        // given:
        let raw = "  Lobby ROOM  ";

        // when:
        let result = normalize(raw);

        // then:
        assert_eq!(result, "lobby room");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        // given:
        let once = normalize("  Alice ");

        // when:
        let twice = normalize(&once);

        // then:
        assert_eq!(once, twice);
    }

    #[test]
    fn test_username_new_normalizes() {
        // given:
        let raw = " Alice ";

        // when:
        let result = Username::new(raw);

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_username_new_whitespace_only_fails() {
        // given:
        let raw = "   ";

        // when:
        let result = Username::new(raw);

        // then:
        assert_eq!(result.unwrap_err(), ValueObjectError::UsernameEmpty);
    }

    #[test]
    fn test_username_new_too_long_fails() {
        // given:
        let raw = "a".repeat(101);

        // when:
        let result = Username::new(&raw);

        // then:
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::UsernameTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_username_equality_after_normalization() {
        // given:
        let a = Username::new(" Alice ").unwrap();
        let b = Username::new("alice").unwrap();
        let c = Username::new("bob").unwrap();

        // then:
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_room_name_new_normalizes() {
        // given:
        let raw = " Lobby ";

        // when:
        let result = RoomName::new(raw);

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "lobby");
    }

    #[test]
    fn test_room_name_new_empty_fails() {
        // given:
        let raw = "";

        // when:
        let result = RoomName::new(raw);

        // then:
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomNameEmpty);
    }

    #[test]
    fn test_message_text_new_success() {
        // given:
        let text = "Hello, world!".to_string();

        // when:
        let result = MessageText::new(text);

        // then:
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "Hello, world!");
    }

    #[test]
    fn test_message_text_new_empty_fails() {
        // given:
        let text = "".to_string();

        // when:
        let result = MessageText::new(text);

        // then:
        assert_eq!(result.unwrap_err(), ValueObjectError::MessageTextEmpty);
    }

    #[test]
    fn test_message_text_new_too_long_fails() {
        // given:
        let text = "a".repeat(10001);

        // when:
        let result = MessageText::new(text);

        // then:
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::MessageTextTooLong {
                max: 10000,
                actual: 10001
            }
        );
    }

    #[test]
    fn test_coordinates_new_success() {
        // given:
        let (lat, lon) = (35.6812, 139.7671);

        // when:
        let result = Coordinates::new(lat, lon);

        // then:
        assert!(result.is_ok());
        let coords = result.unwrap();
        assert_eq!(coords.latitude(), 35.6812);
        assert_eq!(coords.longitude(), 139.7671);
    }

    #[test]
    fn test_coordinates_latitude_out_of_range_fails() {
        // given:
        let (lat, lon) = (90.5, 0.0);

        // when:
        let result = Coordinates::new(lat, lon);

        // then:
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::LatitudeOutOfRange(90.5)
        );
    }

    #[test]
    fn test_coordinates_longitude_out_of_range_fails() {
        // given:
        let (lat, lon) = (0.0, -180.01);

        // when:
        let result = Coordinates::new(lat, lon);

        // then:
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::LongitudeOutOfRange(-180.01)
        );
    }

    #[test]
    fn test_coordinates_non_finite_fails() {
        // given:
        let (lat, lon) = (f64::NAN, 0.0);

        // when:
        let result = Coordinates::new(lat, lon);

        // then:
        assert!(result.is_err());
    }

    #[test]
    fn test_connection_id_generate_uniqueness() {
        // when:
        let id1 = ConnectionId::generate();
        let id2 = ConnectionId::generate();

        // then:
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_timestamp_ordering() {
        // given:
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(2000);

        // then:
        assert!(ts1 < ts2);
        assert!(ts2 > ts1);
    }
}
