// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

/// A type for representing a CoAP Content Format value.
///
/// A packet with no content format at all is represented as
/// `Option::<ContentFormat>::None`, in which case no Content-Format option is
/// emitted on the wire.
#[derive(Debug, Copy, Eq, PartialEq, Hash, Clone, Ord, PartialOrd)]
pub struct ContentFormat(pub u16);

impl ContentFormat {
    /// From IETF-RFC7252.
    pub const TEXT_PLAIN_UTF8: ContentFormat = ContentFormat(0);

    /// From IETF-RFC7252.
    pub const APPLICATION_LINK_FORMAT: ContentFormat = ContentFormat(40);

    /// From IETF-RFC7252.
    pub const APPLICATION_XML: ContentFormat = ContentFormat(41);

    /// From IETF-RFC7252.
    pub const APPLICATION_OCTET_STREAM: ContentFormat = ContentFormat(42);

    /// From IETF-RFC7252.
    pub const APPLICATION_EXI: ContentFormat = ContentFormat(47);

    /// From IETF-RFC7252.
    pub const APPLICATION_JSON: ContentFormat = ContentFormat(50);

    /// From IETF-RFC7049 Concise Binary Object Representation (CBOR)
    pub const APPLICATION_CBOR: ContentFormat = ContentFormat(60);

    /// Returns the MIME name of this content format as a `&'static str`, if possible.
    pub fn static_name(self) -> Option<&'static str> {
        Some(match self {
            Self::TEXT_PLAIN_UTF8 => "text/plain;charset=utf-8",
            Self::APPLICATION_LINK_FORMAT => "application/link-format",
            Self::APPLICATION_XML => "application/xml",
            Self::APPLICATION_OCTET_STREAM => "application/octet-stream",
            Self::APPLICATION_EXI => "application/exi",
            Self::APPLICATION_JSON => "application/json",
            Self::APPLICATION_CBOR => "application/cbor",
            _ => return None,
        })
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = self.static_name() {
            f.write_str(name)
        } else {
            write!(f, "application/x-coap-{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_names() {
        assert_eq!(
            ContentFormat::APPLICATION_JSON.static_name(),
            Some("application/json")
        );
        assert_eq!(ContentFormat(12345).static_name(), None);
        assert_eq!(
            ContentFormat::APPLICATION_CBOR.to_string(),
            "application/cbor"
        );
    }
}
