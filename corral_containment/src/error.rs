// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for grouping operations, the membership cache, and settings.
//!
//! None of these are fatal. The engine logs them and falls back to
//! recomputing from live canvas state; they are returned so callers can
//! inspect why an edit was refused.

use alloc::string::String;
use corral_canvas::ElementId;
use thiserror::Error;

/// Errors from membership and hierarchy edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainmentError {
    /// The id does not resolve to a live element.
    #[error("element {0:?} is not live")]
    StaleElement(ElementId),

    /// The id is not a registered container.
    #[error("element {0:?} is not a registered container")]
    NotAContainer(ElementId),

    /// A container was asked to list itself as a member.
    #[error("container {0:?} cannot contain itself")]
    SelfContainment(ElementId),

    /// The edit would make the container relation cyclic.
    #[error("adding {member:?} to {container:?} would create a containment cycle")]
    WouldCycle {
        /// Container that would receive the member.
        container: ElementId,
        /// Member that already (transitively) contains `container`.
        member: ElementId,
    },

    /// Header containers have no content region and take no members.
    #[error("header container {0:?} cannot take members")]
    HeaderContainer(ElementId),
}

/// Errors from a membership cache store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The store could not serialize its entries.
    #[error("failed to encode membership cache: {0}")]
    Encode(String),

    /// Persisted data could not be read back.
    #[error("failed to decode membership cache: {0}")]
    Decode(String),

    /// Persisted data was written by an incompatible format version.
    #[error("unsupported membership cache version {0}")]
    UnsupportedVersion(u32),

    /// A backing store refused the operation.
    ///
    /// Never produced by [`MemoryStore`](crate::MemoryStore); it is the variant
    /// for [`CacheStore`](crate::CacheStore) implementations whose backend is
    /// offline or read-only. [`MembershipCache`](crate::MembershipCache) logs
    /// it and treats the entry as missing.
    #[error("membership cache store unavailable: {0}")]
    Unavailable(String),
}

/// Errors from settings validation and loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value is outside its valid range.
    #[error("value out of range for '{key}': {value}")]
    ValueOutOfRange {
        /// Setting name.
        key: &'static str,
        /// Offending value, formatted.
        value: String,
    },

    /// Settings could not be parsed.
    #[error("failed to decode settings: {0}")]
    Decode(String),
}

/// Result alias for membership and hierarchy edits.
pub type ContainmentResult<T> = Result<T, ContainmentError>;

/// Result alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Result alias for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
