//! This module contains reusable components for encoding and decoding text
//! in KLV data structures, including support for character repertoires.
//!
//! ST 0601 string elements are UTF-8 unless the tag declares otherwise;
//! ST 0102 uses ISO 646 for most of its text fields and UTF-16BE for the
//! Object Country Codes element. The repertoire of a tag is declared in its
//! dictionary entry as a [`TextEncoding`] and resolved here to a codec.

use std::borrow::Cow;

use encoding::all::{ASCII, UTF_16BE, UTF_8};
use encoding::{DecoderTrap, EncoderTrap, EncodingRef};
use klv_core::value::TextEncoding;
use snafu::{Backtrace, Snafu};

/// An error type for text encoding issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum EncodeTextError {
    /// A custom error message,
    /// for when the underlying error type does not encode error semantics
    /// into type variants.
    #[snafu(display("{}", message))]
    EncodeCustom {
        /// The error message in plain text.
        message: Cow<'static, str>,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

/// An error type for text decoding issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DecodeTextError {
    /// A custom error message,
    /// for when the underlying error type does not encode error semantics
    /// into type variants.
    #[snafu(display("{}", message))]
    DecodeCustom {
        /// The error message in plain text.
        message: Cow<'static, str>,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

type EncodeResult<T> = Result<T, EncodeTextError>;
type DecodeResult<T> = Result<T, DecodeTextError>;

/// A holder of encoding and decoding mechanisms for text in KLV content,
/// which depends on the repertoire declared by the element's tag.
pub trait TextCodec {
    /// Obtain the unique name of the text encoding.
    fn name(&self) -> Cow<'static, str>;

    /// Decode the given byte buffer as a single string.
    fn decode(&self, text: &[u8]) -> DecodeResult<String>;

    /// Encode a text value into a byte vector.
    fn encode(&self, text: &str) -> EncodeResult<Vec<u8>>;
}

impl TextCodec for TextEncoding {
    fn name(&self) -> Cow<'static, str> {
        match self {
            TextEncoding::Utf8 => Cow::Borrowed("UTF-8"),
            TextEncoding::Iso646 => Cow::Borrowed("ISO 646"),
            TextEncoding::Utf16Be => Cow::Borrowed("UTF-16BE"),
        }
    }

    fn decode(&self, text: &[u8]) -> DecodeResult<String> {
        let repertoire: EncodingRef = match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Iso646 => ASCII,
            TextEncoding::Utf16Be => UTF_16BE,
        };
        repertoire
            .decode(text, DecoderTrap::Strict)
            .map_err(|message| DecodeCustomSnafu { message }.build())
    }

    fn encode(&self, text: &str) -> EncodeResult<Vec<u8>> {
        let repertoire: EncodingRef = match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Iso646 => ASCII,
            TextEncoding::Utf16Be => UTF_16BE,
        };
        repertoire
            .encode(text, EncoderTrap::Strict)
            .map_err(|message| EncodeCustomSnafu { message }.build())
    }
}
