// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the music theory library.

use thiserror::Error;

/// Result type for theory operations.
pub type TheoryResult<T> = Result<T, TheoryError>;

/// Errors raised by scale, key, chord and pattern operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// The pitch letter of a note name was not recognized.
    #[error("invalid note name: '{0}'")]
    InvalidNoteName(String),

    /// The octave part of a note name could not be parsed.
    #[error("failed to parse '{input}': {reason}")]
    ParseError {
        /// The full input string.
        input: String,
        /// What went wrong.
        reason: String,
    },

    /// A registry lookup found no entry with this name.
    #[error("unknown {kind} name: '{name}'")]
    NotFound {
        /// What the registry holds ("scale", "chord").
        kind: &'static str,
        /// The name that was looked up.
        name: String,
    },

    /// A random selection was requested from an empty registry.
    #[error("no {kind}s available")]
    EmptyRegistry {
        /// What the registry holds.
        kind: &'static str,
    },

    /// An argument was outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl TheoryError {
    /// Creates an invalid argument error.
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a parse error for the given input.
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
