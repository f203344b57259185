#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use word_snake_world::LevelData;

const SNAPSHOT_DOMAIN: &str = "wordsnake";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded level payload.
pub(crate) const SNAPSHOT_HEADER: &str = "wordsnake:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes a level template into a single-line string suitable for
/// clipboard transfer.
pub(crate) fn encode(data: &LevelData) -> String {
    let json = serde_json::to_vec(data).expect("level data serialization never fails");
    let encoded = STANDARD_NO_PAD.encode(json);
    format!("{SNAPSHOT_HEADER}{FIELD_DELIMITER}{encoded}")
}

/// Decodes a level template from its shared string representation.
pub(crate) fn decode(value: &str) -> Result<LevelData, LevelTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LevelTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(LevelTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(LevelTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(LevelTransferError::MissingPayload)?;

    if domain != SNAPSHOT_DOMAIN {
        return Err(LevelTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SNAPSHOT_VERSION {
        return Err(LevelTransferError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(LevelTransferError::InvalidEncoding)?;
    serde_json::from_slice(&bytes).map_err(LevelTransferError::InvalidPayload)
}

/// Errors that can occur while decoding level transfer strings.
#[derive(Debug)]
pub(crate) enum LevelTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded level.
    MissingPrefix,
    /// The encoded level did not contain a version segment.
    MissingVersion,
    /// The encoded level did not include the payload segment.
    MissingPayload,
    /// The encoded level used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded level used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for LevelTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "shared level payload was empty"),
            Self::MissingPrefix => write!(f, "shared level is missing the prefix"),
            Self::MissingVersion => write!(f, "shared level is missing the version"),
            Self::MissingPayload => write!(f, "shared level is missing the payload"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "shared level prefix '{prefix}' is not supported")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "shared level version '{version}' is not supported")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode shared level payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse shared level payload: {error}")
            }
        }
    }
}

impl Error for LevelTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}
